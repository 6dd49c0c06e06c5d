//! Ordered 11-feature observation.

use serde::{Deserialize, Serialize};
use std::ops::Index;

use super::schema::{FEATURE_COLUMNS, FEATURE_COUNT};
use crate::error::{DataError, Result};

/// One observation in the fixed feature order of [`FEATURE_COLUMNS`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Create from values already in model order.
    pub const fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// All-zero observation.
    pub const fn zeros() -> Self {
        Self([0.0; FEATURE_COUNT])
    }

    /// Create from a slice, which must hold exactly [`FEATURE_COUNT`] values.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        let array: [f64; FEATURE_COUNT] =
            values.try_into().map_err(|_| DataError::InvalidParameter {
                name: "features".to_string(),
                reason: format!("expected {} values, got {}", FEATURE_COUNT, values.len()),
            })?;
        Ok(Self(array))
    }

    /// Values in model order.
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    /// Value of a feature by column name.
    pub fn get(&self, column: &str) -> Option<f64> {
        FEATURE_COLUMNS
            .iter()
            .position(|c| *c == column)
            .map(|i| self.0[i])
    }

    /// Whether every value is finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Iterate over `(column, value)` pairs in model order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_COLUMNS.iter().copied().zip(self.0.iter().copied())
    }
}

impl Index<usize> for FeatureVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_requires_eleven_values() {
        assert!(FeatureVector::from_slice(&[1.0; 11]).is_ok());
        assert!(FeatureVector::from_slice(&[1.0; 10]).is_err());
        assert!(FeatureVector::from_slice(&[1.0; 12]).is_err());
    }

    #[test]
    fn test_get_by_name() {
        let mut values = [0.0; FEATURE_COUNT];
        values[3] = 2.38;
        let v = FeatureVector::new(values);
        assert_eq!(v.get("koi_prad"), Some(2.38));
        assert_eq!(v.get("koi_disposition"), None);
        assert_eq!(v[3], 2.38);
    }

    #[test]
    fn test_is_finite() {
        let mut values = [1.0; FEATURE_COUNT];
        assert!(FeatureVector::new(values).is_finite());
        values[7] = f64::NAN;
        assert!(!FeatureVector::new(values).is_finite());
    }

    #[test]
    fn test_named_order() {
        let v = FeatureVector::zeros();
        let names: Vec<&str> = v.named().map(|(n, _)| n).collect();
        assert_eq!(names, FEATURE_COLUMNS.to_vec());
    }
}
