//! Confidence-scored value wrapper used by the normalization engine.

use serde::{Deserialize, Serialize};

/// A scalar paired with an optional extraction-confidence score.
///
/// Fields that originate from OCR or mailbox extraction may be partially
/// trusted; the engine reports a confidence alongside the value. A value with
/// no underlying extraction has `confidence: None`; zero is a real score and
/// must never stand in for "no confidence data".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalValue<T> {
    /// The extracted value.
    pub value: T,
    /// Extraction confidence, absent when the source supplied none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl<T> CanonicalValue<T> {
    /// Wrap a value together with its extraction confidence.
    #[must_use]
    pub fn scored(value: T, confidence: f32) -> Self {
        Self {
            value,
            confidence: Some(confidence),
        }
    }

    /// Wrap a plain value that carries no confidence concept.
    #[must_use]
    pub fn plain(value: T) -> Self {
        Self {
            value,
            confidence: None,
        }
    }

    /// Map the inner value, keeping the confidence untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CanonicalValue<U> {
        CanonicalValue {
            value: f(self.value),
            confidence: self.confidence,
        }
    }
}

impl<T> From<T> for CanonicalValue<T> {
    fn from(value: T) -> Self {
        Self::plain(value)
    }
}
