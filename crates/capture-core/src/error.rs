//! Core error types for the capture workspace.
//!
//! Every subsystem reports failures through [`CaptureError`]. The callback
//! surface additionally needs a stable, serializable discriminant, which is
//! what [`ErrorKind`] provides.

use crate::ops::OperationKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Central error type for all capture operations.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// Camera access was denied by the user or the platform.
    #[error("camera permission denied: {0}")]
    PermissionDenied(String),

    /// Credentials were required but not provided.
    #[error("credentials have not been provided")]
    NoCredentials,

    /// The provider engine rejected the supplied credentials.
    #[error("invalid credentials for '{0}'")]
    InvalidCredentials(String),

    /// The user cancelled an in-progress verification challenge.
    #[error("account verification cancelled")]
    VerificationCancelled,

    /// The account is already linked elsewhere.
    #[error("account link conflict: {0}")]
    LinkConflict(String),

    /// A raw provider code has no canonical mapping.
    #[error("unsupported provider code: {0}")]
    UnsupportedProvider(String),

    /// The provider engine failed internally.
    #[error("engine error: {0}")]
    Engine(String),

    /// A provider payload could not be parsed or normalized.
    #[error("parse failure: {0}")]
    Parse(String),

    /// Network errors (publish pipeline only, swallowed there).
    #[error("network error: {0}")]
    Network(String),

    /// An operation was invoked before the SDK was initialized.
    #[error("not initialized: {0}")]
    NotInitialized(String),

    /// A single-slot operation is already in flight.
    #[error("operation already in progress: {0:?}")]
    OperationInFlight(OperationKind),

    /// Configuration errors (loading, parsing, validation).
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors (checkpoint reads/writes).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CaptureError {
    /// The stable discriminant forwarded on the callback surface.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PermissionDenied(_) => ErrorKind::PermissionDenied,
            Self::NoCredentials => ErrorKind::NoCredentials,
            Self::InvalidCredentials(_) => ErrorKind::InvalidCredentials,
            Self::VerificationCancelled => ErrorKind::VerificationCancelled,
            Self::LinkConflict(_) => ErrorKind::LinkConflict,
            Self::UnsupportedProvider(_) => ErrorKind::UnsupportedProvider,
            Self::Engine(_) => ErrorKind::EngineInternal,
            Self::Parse(_) => ErrorKind::ParseFailure,
            Self::Network(_) => ErrorKind::Network,
            Self::NotInitialized(_) | Self::Config(_) => ErrorKind::NotInitialized,
            Self::OperationInFlight(_) => ErrorKind::OperationInFlight,
            Self::Io(_) => ErrorKind::EngineInternal,
        }
    }
}

/// Stable error discriminants exposed to callers.
///
/// These are part of the public contract: engine errors are wrapped with one
/// of these kinds and the original message is forwarded verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Camera permission denied
    PermissionDenied,
    /// Missing credentials
    NoCredentials,
    /// Rejected credentials
    InvalidCredentials,
    /// Verification challenge cancelled
    VerificationCancelled,
    /// Account already linked (auto-retried once before surfacing)
    LinkConflict,
    /// Unknown provider code
    UnsupportedProvider,
    /// Provider engine internal failure
    EngineInternal,
    /// Malformed provider payload
    ParseFailure,
    /// Network failure
    Network,
    /// SDK used before initialization
    NotInitialized,
    /// Single-slot operation already held
    OperationInFlight,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `CaptureError`.
pub type Result<T> = std::result::Result<T, CaptureError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
