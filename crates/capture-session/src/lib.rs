//! Account session orchestration.
//!
//! Drives login → (optional external verification) → verified → logout per
//! account, including the one-shot unlink-and-retry on link conflicts and
//! the process-wide single verification presentation.

pub mod manager;
pub mod state;

pub use manager::{AccountsSnapshot, LoginOutcome, PendingVerification, SessionManager};
pub use state::SessionState;
