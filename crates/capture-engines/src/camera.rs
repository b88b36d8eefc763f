//! Camera capture capability.

use crate::error::EngineResult;
use crate::raw::RawScanResults;
use async_trait::async_trait;

/// Camera authorization status as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraAuthorization {
    /// The user has not been asked yet.
    Undetermined,
    /// Camera access granted.
    Authorized,
    /// Camera access denied.
    Denied,
}

/// How a capture session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// The user scanned a receipt.
    Captured(Box<RawScanResults>),
    /// The user dismissed the camera without scanning.
    Cancelled,
}

/// The optical capture engine.
///
/// Given camera authorization, a capture session asynchronously yields a raw
/// scan result, a cancellation, or an error.
#[async_trait]
pub trait CameraEngine: Send + Sync {
    /// Current camera authorization without prompting.
    async fn authorization(&self) -> CameraAuthorization;

    /// Prompt the user for camera access and report the resulting status.
    async fn request_authorization(&self) -> CameraAuthorization;

    /// Run one capture session. Must only be called once authorized.
    async fn capture(&self) -> EngineResult<ScanOutcome>;
}
