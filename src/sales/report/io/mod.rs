//! File adapters: CSV in, xlsx out.

pub mod csv_read;
pub mod excel_write;
