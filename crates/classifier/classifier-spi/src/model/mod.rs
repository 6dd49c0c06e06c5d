//! Model module containing prediction types.

mod prediction;

pub use prediction::{Prediction, DECISION_THRESHOLD, NEGATIVE_CLASS_NAME, POSITIVE_CLASS_NAME};
