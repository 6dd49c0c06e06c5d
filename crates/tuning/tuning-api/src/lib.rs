//! Hyperparameter Tuning API
//!
//! Configuration types and builders for the randomized booster search.

pub mod builder;
pub mod config;

pub use builder::*;
pub use config::*;
