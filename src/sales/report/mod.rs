pub mod clean;
pub mod error;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod summary;

pub use error::{ReportError, Result};
