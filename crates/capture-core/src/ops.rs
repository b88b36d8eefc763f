//! Process-wide single-slot operation registry.
//!
//! The physical-scan callback slot and the active verification presentation
//! are mutually exclusive, process-wide resources. Acquisition hands back a
//! scoped guard; dropping the guard releases the slot on every outcome path,
//! so a failed or cancelled operation can never stall the next one.

use crate::error::{CaptureError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// The single-slot operations tracked by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// A camera capture session.
    PhysicalScan,
    /// An externally-presented login verification challenge.
    VerificationPresentation,
}

/// Registry of currently held single-slot operations.
///
/// A second acquisition of a held slot is rejected deterministically with
/// [`CaptureError::OperationInFlight`] instead of overwriting the first.
#[derive(Debug, Default)]
pub struct OperationRegistry {
    active: Mutex<HashSet<OperationKind>>,
}

impl OperationRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the slot for `kind`, or fail fast if it is already held.
    pub fn acquire(self: &Arc<Self>, kind: OperationKind) -> Result<OperationGuard> {
        let mut active = self.active.lock().expect("operation registry poisoned");
        if !active.insert(kind) {
            tracing::warn!(?kind, "rejected concurrent single-slot operation");
            return Err(CaptureError::OperationInFlight(kind));
        }
        tracing::debug!(?kind, "operation slot acquired");
        Ok(OperationGuard {
            registry: Arc::clone(self),
            kind,
        })
    }

    /// Whether the slot for `kind` is currently held.
    #[must_use]
    pub fn is_active(&self, kind: OperationKind) -> bool {
        self.active
            .lock()
            .expect("operation registry poisoned")
            .contains(&kind)
    }

    fn release(&self, kind: OperationKind) {
        self.active
            .lock()
            .expect("operation registry poisoned")
            .remove(&kind);
        tracing::debug!(?kind, "operation slot released");
    }
}

/// Scoped ownership of a single-slot operation.
///
/// The slot is released when the guard drops, whichever way the operation
/// ends.
#[derive(Debug)]
pub struct OperationGuard {
    registry: Arc<OperationRegistry>,
    kind: OperationKind,
}

impl OperationGuard {
    /// The operation this guard holds.
    #[must_use]
    pub fn kind(&self) -> OperationKind {
        self.kind
    }
}

impl Drop for OperationGuard {
    fn drop(&mut self) {
        self.registry.release(self.kind);
    }
}
