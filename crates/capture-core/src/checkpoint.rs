//! Sweep checkpoint persistence and the day-cutoff policy.
//!
//! One scalar is persisted per install: the timestamp of the last successful
//! e-mail sweep. It bounds how far back the mailbox engine is asked to look
//! on the next sweep while guaranteeing full coverage on first run.

use crate::error::{CaptureError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Widest sweep window, in days. Used when no checkpoint exists or the
/// elapsed time exceeds it.
pub const MAX_DAY_CUTOFF: i64 = 15;

/// Compute the day-cutoff for a mailbox sweep.
///
/// `min(15, days since last successful sweep)`, floored at 0. No prior
/// checkpoint (or a future-dated one that would go negative on a clock step)
/// yields the full window.
#[must_use]
pub fn day_cutoff(last_sweep: Option<DateTime<Utc>>, now: DateTime<Utc>) -> u32 {
    match last_sweep {
        None => MAX_DAY_CUTOFF as u32,
        Some(last) => {
            let days = (now - last).num_days();
            days.clamp(0, MAX_DAY_CUTOFF) as u32
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CheckpointFile {
    last_email_sweep: Option<DateTime<Utc>>,
}

/// File-backed store for the per-install sweep checkpoint.
///
/// Read at sweep start, written at sweep success, cleared on full logout.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    /// Open the store at its default per-install location.
    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("com", "capture", "capture")
            .ok_or(crate::error::ConfigError::NoConfigDir)?;
        let dir = dirs.data_dir();
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join("sweep-checkpoint.json"),
        })
    }

    /// Open the store at an explicit path.
    #[must_use]
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the last successful sweep timestamp, if any.
    pub fn last_sweep(&self) -> Result<Option<DateTime<Utc>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        let file: CheckpointFile = serde_json::from_str(&contents)
            .map_err(|e| CaptureError::Parse(format!("checkpoint file: {e}")))?;
        Ok(file.last_email_sweep)
    }

    /// Record a successful sweep.
    pub fn record_sweep(&self, at: DateTime<Utc>) -> Result<()> {
        let file = CheckpointFile {
            last_email_sweep: Some(at),
        };
        let contents = serde_json::to_string(&file)
            .map_err(|e| CaptureError::Parse(format!("checkpoint file: {e}")))?;
        fs::write(&self.path, contents)?;
        tracing::debug!(at = %at, "recorded sweep checkpoint");
        Ok(())
    }

    /// Drop the checkpoint, restoring first-run behavior.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            tracing::debug!("cleared sweep checkpoint");
        }
        Ok(())
    }
}
