//! Named observation presets offered by the inference form.

use data_spi::FeatureVector;
use serde::Serialize;

/// A named observation used to pre-fill the form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Preset {
    /// Stable identifier used in URLs and on the command line.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Feature values in model order.
    pub features: FeatureVector,
}

/// Presets in display order. The first entry is manual input.
pub static PRESETS: [Preset; 4] = [
    Preset {
        id: "manual",
        name: "Manual Input",
        features: FeatureVector::new([0.0; 11]),
    },
    Preset {
        id: "kepler-22b",
        name: "Kepler-22b (Confirmed Habitable)",
        features: FeatureVector::new([
            289.86, 7.40, 492.0, 2.38, 35.8, 262.0, 0.98, 5518.0, 4.44, 1.11, 15.3,
        ]),
    },
    Preset {
        id: "kepler-186f",
        name: "Kepler-186f (Confirmed Earth-size)",
        features: FeatureVector::new([
            129.94, 5.28, 124.0, 1.11, 24.3, 188.0, 0.47, 3788.0, 4.81, 0.29, 14.6,
        ]),
    },
    Preset {
        id: "false-positive",
        name: "Typical False Positive (Binary Star)",
        features: FeatureVector::new([
            1.50, 2.00, 50000.0, 15.00, 1500.0, 4500.0, 1.20, 6000.0, 4.00, 10000.0, 10.5,
        ]),
    },
];

/// Look up a preset by id (case-insensitive).
pub fn find_preset(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}
