//! Hyperparameter Tuning Core
//!
//! Stratified cross-validation, classification metrics and the parallel
//! randomized search.

pub mod metrics;
pub mod search;
pub mod validation;

pub use metrics::*;
pub use search::*;
pub use validation::*;

// Re-export SPI types
pub use tuning_spi::{
    CandidateScore, FoldSplit, Objective, ParameterSpace, Result, SearchResult, TuningError,
    Validator,
};

// Re-export API types
pub use tuning_api::{ParamGrid, SearchBuilder, SearchConfig};
