//! Classifier output.

use serde::{Deserialize, Serialize};

/// Probabilities strictly above this value are classified as confirmed.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Display name of label 0.
pub const NEGATIVE_CLASS_NAME: &str = "False Positive (0)";

/// Display name of label 1.
pub const POSITIVE_CLASS_NAME: &str = "Confirmed Planet (1)";

/// A class decision together with the positive-class probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// 1 for a confirmed planet, 0 for a false positive.
    pub label: u8,
    /// Probability of label 1.
    pub probability: f64,
}

impl Prediction {
    /// Derive the decision from a positive-class probability.
    pub fn from_probability(probability: f64) -> Self {
        Self {
            label: u8::from(probability > DECISION_THRESHOLD),
            probability,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.label == 1
    }

    /// Probability assigned to the chosen class.
    pub fn confidence(&self) -> f64 {
        if self.is_confirmed() {
            self.probability
        } else {
            1.0 - self.probability
        }
    }

    /// Display name of the chosen class.
    pub fn class_name(&self) -> &'static str {
        if self.is_confirmed() {
            POSITIVE_CLASS_NAME
        } else {
            NEGATIVE_CLASS_NAME
        }
    }
}
