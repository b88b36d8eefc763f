//! Lossless decimal text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A decimal number carried as exact text.
///
/// Promotion-qualification indexes and survey answer indexes arrive from the
/// engines as precise decimals; converting them through a binary float would
/// silently corrupt them, so they stay text for the whole pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LosslessDecimal(pub String);

impl LosslessDecimal {
    /// The exact decimal text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LosslessDecimal {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for LosslessDecimal {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for LosslessDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparent_serde() {
        let d = LosslessDecimal::from("79228162514264337593543950335");
        let json = serde_json::to_string(&d).expect("serialize");
        assert_eq!(json, "\"79228162514264337593543950335\"");

        let back: LosslessDecimal = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, d);
    }
}
