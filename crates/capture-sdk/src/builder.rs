//! SDK construction.

use crate::sdk::CaptureSdk;
use capture_core::{
    CaptureConfig, CaptureError, CheckpointStore, OperationRegistry, Result,
};
use capture_engines::{
    AccountLinkingEngine, CameraEngine, IdentityPlatform, MailboxEngine,
};
use capture_publish::{LicenseService, Publisher};
use capture_retrieval::RetrievalOrchestrator;
use capture_session::SessionManager;
use std::sync::Arc;

fn missing(what: &str) -> CaptureError {
    CaptureError::NotInitialized(format!("{what} must be supplied before initialize()"))
}

/// Builds and initializes the capture SDK.
///
/// Configuration is explicit: everything the SDK needs (identity, terms,
/// provider engines) is supplied here, and `initialize()` fails with
/// `NotInitialized` when something required is missing. There is no global
/// state to set up beforehand.
#[derive(Default)]
pub struct CaptureBuilder {
    user_id: Option<String>,
    provider_id: Option<String>,
    terms: Option<String>,
    gmail_client_id: Option<String>,
    outlook_client_id: Option<String>,
    config: CaptureConfig,
    checkpoint: Option<CheckpointStore>,
    camera: Option<Arc<dyn CameraEngine>>,
    linking: Option<Arc<dyn AccountLinkingEngine>>,
    mailbox: Option<Arc<dyn MailboxEngine>>,
    identity: Option<Arc<dyn IdentityPlatform>>,
}

impl CaptureBuilder {
    /// Start an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The user's unique identifier. Required.
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// The publishing/provider identifier for the identity platform.
    /// Required.
    #[must_use]
    pub fn with_provider_id(mut self, provider_id: impl Into<String>) -> Self {
        self.provider_id = Some(provider_id.into());
        self
    }

    /// Terms of use attached to the license record. Required.
    #[must_use]
    pub fn with_terms(mut self, terms: impl Into<String>) -> Self {
        self.terms = Some(terms.into());
        self
    }

    /// OAuth client id enabling Gmail mailbox linking.
    #[must_use]
    pub fn with_gmail_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.gmail_client_id = Some(client_id.into());
        self
    }

    /// OAuth client id enabling Outlook mailbox linking.
    #[must_use]
    pub fn with_outlook_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.outlook_client_id = Some(client_id.into());
        self
    }

    /// Base configuration; identity fields set on the builder override it.
    #[must_use]
    pub fn with_config(mut self, config: CaptureConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the sweep checkpoint location (defaults to the per-install
    /// data directory).
    #[must_use]
    pub fn with_checkpoint(mut self, checkpoint: CheckpointStore) -> Self {
        self.checkpoint = Some(checkpoint);
        self
    }

    /// The optical capture engine. Required.
    #[must_use]
    pub fn with_camera(mut self, camera: Arc<dyn CameraEngine>) -> Self {
        self.camera = Some(camera);
        self
    }

    /// The retailer account-linking engine. Required.
    #[must_use]
    pub fn with_linking(mut self, linking: Arc<dyn AccountLinkingEngine>) -> Self {
        self.linking = Some(linking);
        self
    }

    /// The mailbox engine. Required.
    #[must_use]
    pub fn with_mailbox(mut self, mailbox: Arc<dyn MailboxEngine>) -> Self {
        self.mailbox = Some(mailbox);
        self
    }

    /// The identity/licensing platform. Required.
    #[must_use]
    pub fn with_identity(mut self, identity: Arc<dyn IdentityPlatform>) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Validate the configuration, register the user's license, and hand
    /// back the initialized SDK.
    pub async fn initialize(self) -> Result<CaptureSdk> {
        let user_id = self.user_id.ok_or_else(|| missing("a user id"))?;
        let provider_id = self.provider_id.ok_or_else(|| missing("a provider id"))?;
        let terms = self.terms.ok_or_else(|| missing("license terms"))?;
        let camera = self.camera.ok_or_else(|| missing("a camera engine"))?;
        let linking = self.linking.ok_or_else(|| missing("a linking engine"))?;
        let mailbox = self.mailbox.ok_or_else(|| missing("a mailbox engine"))?;
        let identity = self.identity.ok_or_else(|| missing("an identity platform"))?;

        let mut config = self.config;
        config.publishing_id = provider_id;
        config.terms = terms;
        if self.gmail_client_id.is_some() {
            config.gmail_client_id = self.gmail_client_id;
        }
        if self.outlook_client_id.is_some() {
            config.outlook_client_id = self.outlook_client_id;
        }
        config.validate()?;

        capture_provider::validate_codecs()?;

        let checkpoint = match self.checkpoint {
            Some(checkpoint) => checkpoint,
            None => CheckpointStore::open_default()?,
        };

        let license = LicenseService::new(Arc::clone(&identity))
            .register(&user_id, &config.terms)
            .await?;

        let ops = Arc::new(OperationRegistry::new());
        let publisher = Arc::new(Publisher::new(
            Arc::clone(&identity),
            &config.ingest_endpoint,
        )?);
        let session = SessionManager::new(
            Arc::clone(&linking),
            Arc::clone(&mailbox),
            Arc::clone(&ops),
            checkpoint.clone(),
            config.clone(),
        );
        let retrieval = RetrievalOrchestrator::new(camera, linking, mailbox, ops, checkpoint);

        tracing::info!(user = %user_id, "capture SDK initialized");
        Ok(CaptureSdk::assemble(
            user_id, license, session, retrieval, publisher,
        ))
    }
}
