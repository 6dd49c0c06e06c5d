//! Column schema of the Kepler cumulative KOI table.

/// Number of model features.
pub const FEATURE_COUNT: usize = 11;

/// Feature columns in model order. The order is part of the artifact contract.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "koi_period",    // orbital period (days)
    "koi_duration",  // transit duration (hours)
    "koi_depth",     // transit depth (ppm)
    "koi_prad",      // planet radius (Earth radii)
    "koi_model_snr", // transit signal-to-noise
    "koi_teq",       // equilibrium temperature (K)
    "koi_srad",      // stellar radius (solar radii)
    "koi_steff",     // stellar effective temperature (K)
    "koi_slogg",     // stellar surface gravity (log g)
    "koi_insol",     // insolation flux (Earth flux)
    "koi_kepmag",    // Kepler-band magnitude
];

/// Disposition column.
pub const LABEL_COLUMN: &str = "koi_disposition";

/// Disposition mapped to the positive class.
pub const CONFIRMED_LABEL: &str = "CONFIRMED";

/// Disposition of unresolved detections, excluded from training.
pub const CANDIDATE_LABEL: &str = "CANDIDATE";

/// Cell contents treated as a missing value.
pub const NA_VALUES: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a raw cell counts as missing.
pub fn is_missing(cell: &str) -> bool {
    NA_VALUES.contains(&cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_missing() {
        assert!(is_missing(""));
        assert!(is_missing("NaN"));
        assert!(is_missing("NA"));
        assert!(is_missing("null"));
        assert!(!is_missing("0"));
        assert!(!is_missing("CANDIDATE"));
        assert!(!is_missing(" "));
    }

    #[test]
    fn test_feature_columns_unique() {
        for (i, a) in FEATURE_COLUMNS.iter().enumerate() {
            for b in FEATURE_COLUMNS.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
        assert!(!FEATURE_COLUMNS.contains(&LABEL_COLUMN));
    }
}
