//! Contract module containing dataset traits.

mod data_source;

pub use data_source::DataSource;
