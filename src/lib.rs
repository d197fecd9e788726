pub mod config;
pub mod error;
pub mod table;
pub mod verify;

pub use error::{EvalErr, Result};
pub use table::Table;
pub use verify::{verify, verify_with, Report, RowResult};
