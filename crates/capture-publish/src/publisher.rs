//! Best-effort receipt submission to the ingestion endpoint.

use capture_core::{CaptureError, ConfigError, Result};
use capture_engines::IdentityPlatform;
use capture_receipt::Receipt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use url::Url;

/// Submits canonical receipts to the remote ingestion endpoint.
///
/// Publishing is fire-and-forget: it never blocks the retrieval stream and
/// its failures never surface to the caller. Token acquisition failures,
/// serialization failures, network failures, and non-2xx responses are all
/// logged and dropped; there is no retry and no dead-letter queue. Receipt capture is
/// never slowed by ingestion availability.
pub struct Publisher {
    http: reqwest::Client,
    endpoint: Url,
    identity: Arc<dyn IdentityPlatform>,
}

impl std::fmt::Debug for Publisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl Publisher {
    /// Create a publisher for the given ingestion endpoint.
    ///
    /// # Errors
    /// Returns a configuration error if the endpoint is not a valid URL.
    pub fn new(identity: Arc<dyn IdentityPlatform>, endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            CaptureError::Config(ConfigError::InvalidValue {
                field: "ingest_endpoint".to_string(),
                reason: e.to_string(),
            })
        })?;
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
            identity,
        })
    }

    /// Submit one receipt in the background.
    ///
    /// The returned handle may be ignored; awaiting it only observes that
    /// the attempt finished, never a failure.
    pub fn publish(&self, receipt: Receipt) -> JoinHandle<()> {
        let http = self.http.clone();
        let endpoint = self.endpoint.clone();
        let identity = Arc::clone(&self.identity);

        tokio::spawn(async move {
            if let Err(err) = submit(&http, &endpoint, identity.as_ref(), &receipt).await {
                tracing::warn!(error = %err, "receipt publish dropped");
            }
        })
    }
}

async fn submit(
    http: &reqwest::Client,
    endpoint: &Url,
    identity: &dyn IdentityPlatform,
    receipt: &Receipt,
) -> Result<()> {
    let token = identity
        .token()
        .await
        .map_err(|e| e.into_capture_for("ingestion token"))?;

    let response = http
        .post(endpoint.clone())
        .bearer_auth(token.as_str())
        .json(receipt)
        .send()
        .await
        .map_err(|e| CaptureError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CaptureError::Network(format!(
            "ingestion endpoint returned {status}"
        )));
    }

    tracing::debug!("receipt published");
    Ok(())
}
