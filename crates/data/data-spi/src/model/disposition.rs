//! KOI disposition label.

use serde::{Deserialize, Serialize};

use super::schema::{CANDIDATE_LABEL, CONFIRMED_LABEL};

/// Vetting outcome of a KOI as recorded in the raw table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Disposition {
    /// Confirmed planet (positive class)
    Confirmed,
    /// Unresolved detection, carries no ground truth
    Candidate,
    /// Any other disposition, e.g. `FALSE POSITIVE` (negative class)
    Other(String),
}

impl Disposition {
    /// Parse a raw label. Matching is exact and case-sensitive.
    pub fn parse(raw: &str) -> Self {
        match raw {
            CONFIRMED_LABEL => Disposition::Confirmed,
            CANDIDATE_LABEL => Disposition::Candidate,
            other => Disposition::Other(other.to_string()),
        }
    }

    /// Binary training label, or `None` for candidates.
    pub fn label(&self) -> Option<u8> {
        match self {
            Disposition::Confirmed => Some(1),
            Disposition::Candidate => None,
            Disposition::Other(_) => Some(0),
        }
    }
}

impl std::fmt::Display for Disposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Disposition::Confirmed => write!(f, "{}", CONFIRMED_LABEL),
            Disposition::Candidate => write!(f, "{}", CANDIDATE_LABEL),
            Disposition::Other(raw) => write!(f, "{}", raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_roundtrip() {
        for raw in ["CONFIRMED", "CANDIDATE", "FALSE POSITIVE"] {
            assert_eq!(Disposition::parse(raw).to_string(), raw);
        }
    }

    #[test]
    fn test_padded_label_is_not_confirmed() {
        assert_eq!(Disposition::parse(" CONFIRMED"), Disposition::Other(" CONFIRMED".into()));
        assert_eq!(Disposition::parse("CANDIDATE ").label(), Some(0));
    }
}
