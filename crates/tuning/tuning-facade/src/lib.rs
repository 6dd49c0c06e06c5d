//! Hyperparameter Tuning Facade
//!
//! Unified re-exports for the tuning module.

// Re-export everything from SPI
pub use tuning_spi::*;

// Re-export everything from API
pub use tuning_api::*;

// Re-export everything from Core
pub use tuning_core::*;
