//! Shared foundation for the capture workspace.
//!
//! Holds the pieces every other crate leans on: the central error taxonomy,
//! the confidence-scored [`CanonicalValue`] wrapper, SDK configuration, the
//! persisted sweep checkpoint, and the process-wide single-slot operation
//! registry.

pub mod checkpoint;
pub mod config;
pub mod error;
pub mod ops;
pub mod value;

pub use checkpoint::{day_cutoff, CheckpointStore, MAX_DAY_CUTOFF};
pub use config::{CaptureConfig, DEFAULT_INGEST_ENDPOINT};
pub use error::{CaptureError, ConfigError, ErrorKind, Result};
pub use ops::{OperationGuard, OperationKind, OperationRegistry};
pub use value::CanonicalValue;
