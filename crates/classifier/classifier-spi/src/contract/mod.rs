//! Contract module containing the classification capability.

mod classifier;

pub use classifier::Classifier;
