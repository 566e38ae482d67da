use serde::{Deserialize, Serialize};

/// Coarse quality rating of a per-pixel depth estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    /// Raw value 0.
    Low,
    /// Raw value 1.
    Medium,
    /// Raw value 2.
    High,
}

impl ConfidenceLevel {
    /// All levels, from least to most trusted.
    pub const ALL: [ConfidenceLevel; 3] = [
        ConfidenceLevel::Low,
        ConfidenceLevel::Medium,
        ConfidenceLevel::High,
    ];

    /// Decode the raw confidence byte stored in a confidence map.
    ///
    /// Returns `None` for bytes that do not name a level.
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(ConfidenceLevel::Low),
            1 => Some(ConfidenceLevel::Medium),
            2 => Some(ConfidenceLevel::High),
            _ => None,
        }
    }

    /// The raw byte for this level.
    pub fn raw(self) -> u8 {
        self as u8
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            ConfidenceLevel::Low => "Low",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::High => "High",
        }
    }
}

impl TryFrom<u8> for ConfidenceLevel {
    type Error = u8;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        ConfidenceLevel::from_raw(raw).ok_or(raw)
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_from_raw() {
        assert_eq!(ConfidenceLevel::from_raw(0), Some(ConfidenceLevel::Low));
        assert_eq!(ConfidenceLevel::from_raw(1), Some(ConfidenceLevel::Medium));
        assert_eq!(ConfidenceLevel::from_raw(2), Some(ConfidenceLevel::High));
        assert_eq!(ConfidenceLevel::from_raw(3), None);
        assert_eq!(ConfidenceLevel::try_from(255u8), Err(255));

        for level in ConfidenceLevel::ALL {
            assert_eq!(ConfidenceLevel::from_raw(level.raw()), Some(level));
        }
    }

    #[test]
    fn test_confidence_serde() -> Result<(), serde_json::Error> {
        let levels: Vec<ConfidenceLevel> = serde_json::from_str(r#"["high", "medium"]"#)?;
        assert_eq!(levels, vec![ConfidenceLevel::High, ConfidenceLevel::Medium]);
        assert_eq!(serde_json::to_string(&ConfidenceLevel::Low)?, r#""low""#);
        assert_eq!(ConfidenceLevel::High.to_string(), "High");
        Ok(())
    }
}
