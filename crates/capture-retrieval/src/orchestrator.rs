//! Coordinates scan and scrape operations across the provider engines.
//!
//! Every operation hands back a [`RetrievalStream`]: items ordered by
//! arrival, zero or more per-item errors, and exactly one terminal
//! completion, even when everything fails. Account fan-out runs
//! concurrently; a retailer stream only completes once every polled
//! account's remaining count has reached zero.

use crate::stream::{RetrievalEvent, RetrievalStream};
use capture_core::{
    day_cutoff, CaptureError, CheckpointStore, OperationKind, OperationRegistry, Result,
};
use capture_engines::{
    AccountLinkingEngine, CameraAuthorization, CameraEngine, MailboxEngine, ScanOutcome,
    SweepScope,
};
use capture_provider::{Account, Provider, ProviderFamily, RetailerProvider};
use chrono::Utc;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Default buffer size for retrieval channels.
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// One unit of scrape work: a single account's worth of results.
enum ScrapeJob {
    Retailer { provider_code: u32, username: String },
    Mailbox { scope: SweepScope },
}

/// Orchestrates scan/scrape operations over the provider engines.
pub struct RetrievalOrchestrator {
    camera: Arc<dyn CameraEngine>,
    linking: Arc<dyn AccountLinkingEngine>,
    mailbox: Arc<dyn MailboxEngine>,
    ops: Arc<OperationRegistry>,
    checkpoint: CheckpointStore,
    channel_capacity: usize,
}

impl RetrievalOrchestrator {
    /// Create an orchestrator over the provider engines.
    #[must_use]
    pub fn new(
        camera: Arc<dyn CameraEngine>,
        linking: Arc<dyn AccountLinkingEngine>,
        mailbox: Arc<dyn MailboxEngine>,
        ops: Arc<OperationRegistry>,
        checkpoint: CheckpointStore,
    ) -> Self {
        Self {
            camera,
            linking,
            mailbox,
            ops,
            checkpoint,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Override the stream buffer size.
    #[must_use]
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Start one physical scan.
    ///
    /// Fails fast with `OperationInFlight` while another scan is pending;
    /// the pending scan's registration is never disturbed. Camera
    /// authorization is requested when undetermined; a denial emits a
    /// `PermissionDenied` error and completion without ever invoking the
    /// capture engine. A user cancellation completes with no item.
    pub fn scan(&self) -> Result<RetrievalStream> {
        let guard = self.ops.acquire(OperationKind::PhysicalScan)?;
        let (tx, stream) = RetrievalStream::channel(self.channel_capacity);
        let camera = Arc::clone(&self.camera);

        tokio::spawn(async move {
            let status = match camera.authorization().await {
                CameraAuthorization::Undetermined => camera.request_authorization().await,
                status => status,
            };

            match status {
                CameraAuthorization::Authorized => match camera.capture().await {
                    Ok(ScanOutcome::Captured(result)) => {
                        let _ = tx.send(RetrievalEvent::Item(result)).await;
                    }
                    Ok(ScanOutcome::Cancelled) => {
                        tracing::info!("physical scan cancelled by user");
                    }
                    Err(err) => {
                        let _ = tx
                            .send(RetrievalEvent::Error(err.into_capture_for("physical scan")))
                            .await;
                    }
                },
                _ => {
                    let _ = tx
                        .send(RetrievalEvent::Error(CaptureError::PermissionDenied(
                            "camera access denied".to_string(),
                        )))
                        .await;
                }
            }

            // Release the slot on every outcome path before signaling
            // completion, so a caller that saw `Complete` can start the
            // next scan immediately.
            drop(guard);
            let _ = tx.send(RetrievalEvent::Complete).await;
        });

        Ok(stream)
    }

    /// Scrape every linked account of one provider family.
    pub async fn scrape_family(&self, family: ProviderFamily) -> RetrievalStream {
        let mut errors = Vec::new();
        let jobs = match family {
            ProviderFamily::Retailer => self.retailer_jobs(&mut errors).await,
            ProviderFamily::Email => vec![ScrapeJob::Mailbox {
                scope: SweepScope::All,
            }],
        };
        self.spawn_jobs(jobs, errors)
    }

    /// Scrape one named account.
    pub async fn scrape_account(&self, account: &Account) -> RetrievalStream {
        let jobs = match account.provider {
            Provider::Retailer(retailer) => vec![ScrapeJob::Retailer {
                provider_code: retailer.engine_code(),
                username: account.username.clone(),
            }],
            Provider::Email(_) => vec![ScrapeJob::Mailbox {
                scope: SweepScope::Account(account.username.clone()),
            }],
        };
        self.spawn_jobs(jobs, Vec::new())
    }

    /// Scrape every linked account of both families.
    pub async fn scrape_all(&self) -> RetrievalStream {
        let mut errors = Vec::new();
        let mut jobs = self.retailer_jobs(&mut errors).await;
        jobs.push(ScrapeJob::Mailbox {
            scope: SweepScope::All,
        });
        self.spawn_jobs(jobs, errors)
    }

    /// One scrape job per linked retailer account. Listing failures and
    /// unsupported codes become stream errors instead of jobs.
    async fn retailer_jobs(&self, errors: &mut Vec<CaptureError>) -> Vec<ScrapeJob> {
        match self.linking.linked().await {
            Ok(links) => links
                .into_iter()
                .filter_map(|link| match RetailerProvider::from_engine_code(link.provider_code) {
                    Ok(_) => Some(ScrapeJob::Retailer {
                        provider_code: link.provider_code,
                        username: link.username,
                    }),
                    Err(err) => {
                        errors.push(err);
                        None
                    }
                })
                .collect(),
            Err(err) => {
                errors.push(err.into_capture_for("retailer account listing"));
                Vec::new()
            }
        }
    }

    /// Fan the jobs out concurrently and close the stream with exactly one
    /// completion once every job has drained.
    fn spawn_jobs(&self, jobs: Vec<ScrapeJob>, errors: Vec<CaptureError>) -> RetrievalStream {
        let (tx, stream) = RetrievalStream::channel(self.channel_capacity);
        let linking = Arc::clone(&self.linking);
        let mailbox = Arc::clone(&self.mailbox);
        let checkpoint = self.checkpoint.clone();

        tokio::spawn(async move {
            for err in errors {
                let _ = tx.send(RetrievalEvent::Error(err)).await;
            }

            let mut tasks = FuturesUnordered::new();
            for job in jobs {
                let tx = tx.clone();
                let linking = Arc::clone(&linking);
                let mailbox = Arc::clone(&mailbox);
                let checkpoint = checkpoint.clone();
                tasks.push(async move {
                    match job {
                        ScrapeJob::Retailer {
                            provider_code,
                            username,
                        } => page_orders(linking, provider_code, username, tx).await,
                        ScrapeJob::Mailbox { scope } => {
                            sweep_mailboxes(mailbox, scope, checkpoint, tx).await;
                        }
                    }
                });
            }
            while tasks.next().await.is_some() {}

            let _ = tx.send(RetrievalEvent::Complete).await;
        });

        stream
    }
}

/// Page one retailer account's order history until the engine-reported
/// remaining count reaches zero. An engine failure ends this account's
/// pagination after forwarding the error; the surrounding stream still
/// waits for the other accounts.
async fn page_orders(
    linking: Arc<dyn AccountLinkingEngine>,
    provider_code: u32,
    username: String,
    tx: mpsc::Sender<RetrievalEvent>,
) {
    loop {
        match linking.fetch_orders(provider_code).await {
            Ok(page) => {
                if let Some(order) = page.order {
                    let _ = tx.send(RetrievalEvent::Item(order)).await;
                }
                if page.remaining == 0 {
                    tracing::debug!(provider_code, "order history exhausted");
                    break;
                }
            }
            Err(err) => {
                let _ = tx
                    .send(RetrievalEvent::Error(err.into_capture_for(&username)))
                    .await;
                break;
            }
        }
    }
}

/// Run one bounded mailbox sweep. The day-cutoff comes from the per-install
/// checkpoint; the checkpoint is advanced only when the sweep finishes
/// without engine errors, so a partial sweep is re-covered next time.
async fn sweep_mailboxes(
    mailbox: Arc<dyn MailboxEngine>,
    scope: SweepScope,
    checkpoint: CheckpointStore,
    tx: mpsc::Sender<RetrievalEvent>,
) {
    let last_sweep = match checkpoint.last_sweep() {
        Ok(last) => last,
        Err(err) => {
            tracing::warn!(error = %err, "unreadable sweep checkpoint, using full window");
            None
        }
    };
    let cutoff = day_cutoff(last_sweep, Utc::now());
    tracing::debug!(cutoff, "starting mailbox sweep");

    match mailbox.sweep(scope, cutoff).await {
        Ok(mut results) => {
            let mut clean = true;
            while let Some(item) = results.next().await {
                match item {
                    Ok(result) => {
                        let _ = tx.send(RetrievalEvent::Item(result)).await;
                    }
                    Err(err) => {
                        clean = false;
                        let _ = tx
                            .send(RetrievalEvent::Error(err.into_capture_for("mailbox sweep")))
                            .await;
                    }
                }
            }
            if clean {
                if let Err(err) = checkpoint.record_sweep(Utc::now()) {
                    tracing::warn!(error = %err, "failed to record sweep checkpoint");
                }
            }
        }
        Err(err) => {
            let _ = tx
                .send(RetrievalEvent::Error(err.into_capture_for("mailbox sweep")))
                .await;
        }
    }
}
