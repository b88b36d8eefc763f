//! Failure surface shared by every provider engine.

use thiserror::Error;

/// Errors a provider engine can report.
///
/// Engines are external collaborators; their failures are wrapped with a
/// stable kind before reaching callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Credentials were required but not supplied.
    #[error("credentials have not been provided")]
    NoCredentials,

    /// The provider rejected the supplied credentials.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The user cancelled an interactive step.
    #[error("cancelled by user")]
    Cancelled,

    /// The account is already linked elsewhere.
    #[error("account already linked")]
    LinkConflict,

    /// The engine could not parse a provider response.
    #[error("parse failure: {0}")]
    Parse(String),

    /// Unexpected internal engine failure.
    #[error("internal engine error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Wrap this engine failure with its stable kind.
    ///
    /// `subject` names what the engine was acting on (a username, an
    /// operation) for the variants whose message carries context.
    #[must_use]
    pub fn into_capture_for(self, subject: &str) -> capture_core::CaptureError {
        use capture_core::CaptureError;
        match self {
            Self::NoCredentials => CaptureError::NoCredentials,
            Self::InvalidCredentials => CaptureError::InvalidCredentials(subject.to_string()),
            Self::Cancelled => CaptureError::VerificationCancelled,
            Self::LinkConflict => CaptureError::LinkConflict(subject.to_string()),
            Self::Parse(message) => CaptureError::Parse(message),
            Self::Internal(message) => CaptureError::Engine(message),
        }
    }
}

/// Result type alias for engine calls.
pub type EngineResult<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            EngineError::NoCredentials.to_string(),
            "credentials have not been provided"
        );
        assert_eq!(
            EngineError::Internal("socket closed".into()).to_string(),
            "internal engine error: socket closed"
        );
    }
}
