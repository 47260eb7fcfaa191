//! Core library for the sales-report command line application.
//!
//! The library exposes the pipeline that powers the command-line interface as
//! well as the integration tests. Responsibilities stay narrow: file adapters
//! live under [`sales::report::io`], the table representation inside
//! [`sales::report::model`], the normalization passes in
//! [`sales::report::clean`], regional totals in [`sales::report::summary`], and
//! the end-to-end run under [`sales::report::pipeline`].

pub mod sales;

pub use sales::report::{ReportError, Result, clean, error, io, model, pipeline, summary};
