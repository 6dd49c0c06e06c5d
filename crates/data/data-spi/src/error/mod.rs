//! Error module containing dataset error types.

mod data_error;

pub use data_error::{DataError, ErrorKind, Result};
