//! The initialized SDK handle.

use crate::stream::{ReceiptEvent, ReceiptStream};
use capture_core::Result;
use capture_engines::{Credentials, LicenseRecord};
use capture_provider::{Account, Provider, ProviderFamily};
use capture_publish::Publisher;
use capture_receipt::normalize;
use capture_retrieval::{RetrievalEvent, RetrievalOrchestrator, RetrievalStream};
use capture_session::{AccountsSnapshot, LoginOutcome, PendingVerification, SessionManager};
use std::sync::Arc;

/// Buffer size for the normalized receipt channels.
const RECEIPT_CHANNEL_CAPACITY: usize = 64;

/// The initialized capture SDK.
///
/// Every retrieval surface returns a [`ReceiptStream`] of canonical
/// receipts: raw engine results are normalized as they arrive, forwarded to
/// the caller, and submitted to the ingestion endpoint best-effort. A
/// normalization failure is fatal to that single item only.
pub struct CaptureSdk {
    user_id: String,
    license: LicenseRecord,
    session: SessionManager,
    retrieval: RetrievalOrchestrator,
    publisher: Arc<Publisher>,
}

impl std::fmt::Debug for CaptureSdk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSdk")
            .field("user_id", &self.user_id)
            .field("license", &self.license)
            .finish_non_exhaustive()
    }
}

impl CaptureSdk {
    pub(crate) fn assemble(
        user_id: String,
        license: LicenseRecord,
        session: SessionManager,
        retrieval: RetrievalOrchestrator,
        publisher: Arc<Publisher>,
    ) -> Self {
        Self {
            user_id,
            license,
            session,
            retrieval,
            publisher,
        }
    }

    /// The user this SDK instance was initialized for.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The licensing record registered at initialization.
    #[must_use]
    pub fn license(&self) -> &LicenseRecord {
        &self.license
    }

    /// Scan one physical receipt with the camera.
    ///
    /// Fails fast while another scan is pending.
    pub fn scan(&self) -> Result<ReceiptStream> {
        let raw = self.retrieval.scan()?;
        Ok(self.normalized(raw))
    }

    /// Retrieve digital receipts from every linked account of one family.
    pub async fn receipts(&self, family: ProviderFamily) -> ReceiptStream {
        let raw = self.retrieval.scrape_family(family).await;
        self.normalized(raw)
    }

    /// Retrieve digital receipts for one account.
    pub async fn receipts_for_account(&self, account: &Account) -> ReceiptStream {
        let raw = self.retrieval.scrape_account(account).await;
        self.normalized(raw)
    }

    /// Retrieve digital receipts from every linked account of both
    /// families.
    pub async fn receipts_all(&self) -> ReceiptStream {
        let raw = self.retrieval.scrape_all().await;
        self.normalized(raw)
    }

    /// Log in to a provider account for receipt retrieval.
    pub async fn login(&self, provider: Provider, credentials: Credentials) -> Result<LoginOutcome> {
        self.session.login(provider, credentials).await
    }

    /// Conclude a pending verification challenge.
    pub async fn resolve_verification(&self, pending: PendingVerification) -> Result<Account> {
        self.session.resolve_verification(pending).await
    }

    /// Abandon a pending verification challenge.
    pub fn cancel_verification(&self, pending: PendingVerification) {
        self.session.cancel_verification(pending);
    }

    /// Log out of one account.
    pub async fn logout_account(&self, account: &Account) -> Result<()> {
        self.session.logout_account(account).await
    }

    /// Log out of every account and clear all checkpoints.
    pub async fn logout_all(&self) -> Result<()> {
        self.session.logout_all().await
    }

    /// The engines' currently linked accounts.
    pub async fn accounts(&self) -> AccountsSnapshot {
        self.session.accounts().await
    }

    /// Pipe a raw retrieval stream through normalization and the publish
    /// pipeline.
    fn normalized(&self, mut raw: RetrievalStream) -> ReceiptStream {
        let (tx, stream) = ReceiptStream::channel(RECEIPT_CHANNEL_CAPACITY);
        let publisher = Arc::clone(&self.publisher);

        tokio::spawn(async move {
            while let Some(event) = raw.next_event().await {
                let forwarded = match event {
                    RetrievalEvent::Item(item) => match normalize(&item) {
                        Ok(receipt) => {
                            // Best-effort; never blocks or fails the stream.
                            let _ = publisher.publish(receipt.clone());
                            ReceiptEvent::Receipt(Box::new(receipt))
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "dropping unnormalizable result");
                            ReceiptEvent::Error(err)
                        }
                    },
                    RetrievalEvent::Error(err) => ReceiptEvent::Error(err),
                    RetrievalEvent::Complete => ReceiptEvent::Complete,
                };
                if tx.send(forwarded).await.is_err() {
                    break;
                }
            }
        });

        stream
    }
}
