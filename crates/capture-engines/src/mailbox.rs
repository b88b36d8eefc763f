//! Mailbox e-receipt capability.

use crate::credentials::Credentials;
use crate::error::{EngineError, EngineResult};
use crate::linking::LinkStep;
use crate::raw::RawScanResults;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// A mailbox the engine currently holds a link for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedMailbox {
    /// Raw engine code of the e-mail provider.
    pub provider_code: u32,
    /// Mailbox address.
    pub username: String,
    /// Whether the engine has verified mailbox access.
    pub verified: bool,
}

/// Which mailboxes one sweep covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepScope {
    /// Every linked mailbox.
    All,
    /// One mailbox by address.
    Account(String),
}

/// Lazily yielded e-receipts from one sweep; the stream ending means the
/// engine reported no more messages.
pub type SweepStream = BoxStream<'static, EngineResult<Box<RawScanResults>>>;

/// The mailbox access engine.
#[async_trait]
pub trait MailboxEngine: Send + Sync {
    /// Link a mailbox, either with IMAP credentials or by driving an OAuth
    /// consent flow surfaced as a verification challenge.
    async fn login(&self, provider_code: u32, credentials: &Credentials)
        -> EngineResult<LinkStep>;

    /// Unlink one mailbox by address, or every mailbox when `None`.
    async fn logout(&self, username: Option<&str>) -> EngineResult<()>;

    /// Currently linked mailboxes.
    async fn linked(&self) -> EngineResult<Vec<LinkedMailbox>>;

    /// Run one e-receipt sweep bounded to the last `cutoff_days` days.
    async fn sweep(&self, scope: SweepScope, cutoff_days: u32) -> EngineResult<SweepStream>;

    /// Re-check a mailbox link after the user finished a consent challenge.
    async fn resolve_verification(
        &self,
        challenge: &crate::linking::VerificationChallenge,
    ) -> EngineResult<LinkStep> {
        let _ = challenge;
        Err(EngineError::Internal(
            "mailbox engine does not support verification challenges".to_string(),
        ))
    }
}
