//! Scan and scrape flows against scripted engines.

use async_trait::async_trait;
use capture_core::{CaptureError, CheckpointStore, OperationRegistry};
use capture_engines::{
    AccountLinkingEngine, CameraAuthorization, CameraEngine, Credentials, EngineError,
    EngineResult, LinkStep, LinkedMailbox, LinkedRetailer, MailboxEngine, OrderPage,
    RetailerConnection, ScanOutcome, SweepScope, SweepStream, VerificationChallenge,
};
use capture_engines::raw::RawScanResults;
use capture_provider::{Account, ProviderFamily, RetailerProvider};
use capture_retrieval::RetrievalOrchestrator;
use chrono::{Duration, Utc};
use futures::StreamExt;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Default)]
struct ScriptedCamera {
    authorization: Mutex<Option<CameraAuthorization>>,
    request_result: Mutex<Option<CameraAuthorization>>,
    capture_calls: AtomicU32,
    outcome: Mutex<Option<ScanOutcome>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

#[async_trait]
impl CameraEngine for ScriptedCamera {
    async fn authorization(&self) -> CameraAuthorization {
        self.authorization
            .lock()
            .expect("lock")
            .unwrap_or(CameraAuthorization::Authorized)
    }

    async fn request_authorization(&self) -> CameraAuthorization {
        self.request_result
            .lock()
            .expect("lock")
            .unwrap_or(CameraAuthorization::Authorized)
    }

    async fn capture(&self) -> EngineResult<ScanOutcome> {
        self.capture_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().expect("lock").take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(self
            .outcome
            .lock()
            .expect("lock")
            .clone()
            .unwrap_or(ScanOutcome::Captured(Box::default())))
    }
}

#[derive(Default)]
struct ScriptedLinking {
    linked: Mutex<Vec<LinkedRetailer>>,
    pages: Mutex<HashMap<u32, VecDeque<OrderPage>>>,
    fetch_errors: Mutex<HashMap<u32, EngineError>>,
}

impl ScriptedLinking {
    fn link_account(&self, retailer: RetailerProvider, username: &str, pages: Vec<OrderPage>) {
        let code = retailer.engine_code();
        self.linked.lock().expect("lock").push(LinkedRetailer {
            provider_code: code,
            username: username.to_string(),
        });
        self.pages
            .lock()
            .expect("lock")
            .insert(code, pages.into_iter().collect());
    }
}

fn order_page(remaining: u32) -> OrderPage {
    OrderPage {
        order: Some(Box::default()),
        remaining,
    }
}

#[async_trait]
impl AccountLinkingEngine for ScriptedLinking {
    async fn link(
        &self,
        _connection: &RetailerConnection,
        _credentials: &Credentials,
    ) -> EngineResult<()> {
        Ok(())
    }

    async fn verify(&self, _connection: &RetailerConnection) -> EngineResult<LinkStep> {
        Ok(LinkStep::Verified)
    }

    async fn resolve_verification(
        &self,
        _challenge: &VerificationChallenge,
    ) -> EngineResult<LinkStep> {
        Ok(LinkStep::Verified)
    }

    async fn unlink(&self, _provider_code: u32) -> EngineResult<()> {
        Ok(())
    }

    async fn unlink_all(&self) -> EngineResult<()> {
        Ok(())
    }

    async fn reset_history(&self, _provider_code: Option<u32>) -> EngineResult<()> {
        Ok(())
    }

    async fn linked(&self) -> EngineResult<Vec<LinkedRetailer>> {
        Ok(self.linked.lock().expect("lock").clone())
    }

    async fn fetch_orders(&self, provider_code: u32) -> EngineResult<OrderPage> {
        if let Some(err) = self.fetch_errors.lock().expect("lock").get(&provider_code) {
            return Err(err.clone());
        }
        Ok(self
            .pages
            .lock()
            .expect("lock")
            .get_mut(&provider_code)
            .and_then(VecDeque::pop_front)
            .unwrap_or_default())
    }
}

#[derive(Default)]
struct ScriptedMailbox {
    results: Mutex<Vec<EngineResult<Box<RawScanResults>>>>,
    cutoffs: Mutex<Vec<u32>>,
}

#[async_trait]
impl MailboxEngine for ScriptedMailbox {
    async fn login(
        &self,
        _provider_code: u32,
        _credentials: &Credentials,
    ) -> EngineResult<LinkStep> {
        Ok(LinkStep::Verified)
    }

    async fn logout(&self, _username: Option<&str>) -> EngineResult<()> {
        Ok(())
    }

    async fn linked(&self) -> EngineResult<Vec<LinkedMailbox>> {
        Ok(Vec::new())
    }

    async fn sweep(&self, _scope: SweepScope, cutoff_days: u32) -> EngineResult<SweepStream> {
        self.cutoffs.lock().expect("lock").push(cutoff_days);
        let results = std::mem::take(&mut *self.results.lock().expect("lock"));
        Ok(futures::stream::iter(results).boxed())
    }
}

struct Harness {
    orchestrator: RetrievalOrchestrator,
    camera: Arc<ScriptedCamera>,
    linking: Arc<ScriptedLinking>,
    mailbox: Arc<ScriptedMailbox>,
    checkpoint: CheckpointStore,
    _checkpoint_dir: tempfile::TempDir,
}

fn harness() -> Harness {
    let camera = Arc::new(ScriptedCamera::default());
    let linking = Arc::new(ScriptedLinking::default());
    let mailbox = Arc::new(ScriptedMailbox::default());
    let checkpoint_dir = tempfile::tempdir().expect("tempdir");
    let checkpoint = CheckpointStore::at_path(checkpoint_dir.path().join("checkpoint.json"));

    let orchestrator = RetrievalOrchestrator::new(
        camera.clone(),
        linking.clone(),
        mailbox.clone(),
        Arc::new(OperationRegistry::new()),
        checkpoint.clone(),
    );

    Harness {
        orchestrator,
        camera,
        linking,
        mailbox,
        checkpoint,
        _checkpoint_dir: checkpoint_dir,
    }
}

#[tokio::test]
async fn scan_yields_one_item_and_completes() {
    let h = harness();
    let collected = h.orchestrator.scan().expect("scan").collect().await;

    assert_eq!(collected.items.len(), 1);
    assert!(collected.errors.is_empty());
    assert_eq!(collected.completions, 1);
}

#[tokio::test]
async fn denied_camera_errors_without_invoking_capture() {
    let h = harness();
    *h.camera.authorization.lock().expect("lock") = Some(CameraAuthorization::Denied);

    let collected = h.orchestrator.scan().expect("scan").collect().await;

    assert!(collected.items.is_empty());
    assert_eq!(collected.errors.len(), 1);
    assert!(matches!(
        collected.errors[0],
        CaptureError::PermissionDenied(_)
    ));
    assert_eq!(collected.completions, 1);
    assert_eq!(h.camera.capture_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn undetermined_authorization_prompts_before_capture() {
    let h = harness();
    *h.camera.authorization.lock().expect("lock") = Some(CameraAuthorization::Undetermined);
    *h.camera.request_result.lock().expect("lock") = Some(CameraAuthorization::Denied);

    let collected = h.orchestrator.scan().expect("scan").collect().await;

    assert!(matches!(
        collected.errors[0],
        CaptureError::PermissionDenied(_)
    ));
    assert_eq!(h.camera.capture_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn second_scan_fails_fast_without_disturbing_the_first() {
    let h = harness();
    let gate = Arc::new(Notify::new());
    *h.camera.gate.lock().expect("lock") = Some(gate.clone());

    let first = h.orchestrator.scan().expect("first scan");

    let err = h.orchestrator.scan().expect_err("second scan while pending");
    assert!(matches!(err, CaptureError::OperationInFlight(_)));

    gate.notify_one();
    let collected = first.collect().await;
    assert_eq!(collected.items.len(), 1);
    assert_eq!(collected.completions, 1);

    // The slot is free again once the first scan finished.
    let collected = h.orchestrator.scan().expect("scan after release").collect().await;
    assert_eq!(collected.completions, 1);
}

#[tokio::test]
async fn cancelled_scan_completes_with_no_item() {
    let h = harness();
    *h.camera.outcome.lock().expect("lock") = Some(ScanOutcome::Cancelled);

    let collected = h.orchestrator.scan().expect("scan").collect().await;

    assert!(collected.items.is_empty());
    assert!(collected.errors.is_empty());
    assert_eq!(collected.completions, 1);

    h.orchestrator.scan().expect("slot released after cancel");
}

#[tokio::test]
async fn retailer_scrape_completes_when_all_accounts_exhaust() {
    let h = harness();
    // First account pages down through remaining counts 1 then 0, carrying
    // two orders; second account is already exhausted.
    h.linking.link_account(
        RetailerProvider::Target,
        "sam@example.com",
        vec![order_page(1), order_page(0)],
    );
    h.linking.link_account(
        RetailerProvider::Costco,
        "sam@example.com",
        vec![OrderPage::default()],
    );

    let collected = h
        .orchestrator
        .scrape_family(ProviderFamily::Retailer)
        .await
        .collect()
        .await;

    assert_eq!(collected.items.len(), 2);
    assert!(collected.errors.is_empty());
    assert_eq!(collected.completions, 1);
}

#[tokio::test]
async fn per_account_engine_error_does_not_kill_the_stream() {
    let h = harness();
    h.linking.link_account(
        RetailerProvider::Target,
        "sam@example.com",
        vec![order_page(0)],
    );
    h.linking.link_account(RetailerProvider::Kroger, "sam@example.com", Vec::new());
    h.linking.fetch_errors.lock().expect("lock").insert(
        RetailerProvider::Kroger.engine_code(),
        EngineError::Internal("order service unavailable".to_string()),
    );

    let collected = h
        .orchestrator
        .scrape_family(ProviderFamily::Retailer)
        .await
        .collect()
        .await;

    assert_eq!(collected.items.len(), 1);
    assert_eq!(collected.errors.len(), 1);
    assert!(matches!(collected.errors[0], CaptureError::Engine(_)));
    assert_eq!(collected.completions, 1);
}

#[tokio::test]
async fn scrape_account_restricts_to_one_retailer() {
    let h = harness();
    h.linking.link_account(
        RetailerProvider::Target,
        "sam@example.com",
        vec![order_page(0)],
    );
    h.linking.link_account(
        RetailerProvider::Costco,
        "pat@example.com",
        vec![order_page(0)],
    );

    let account = Account::new(RetailerProvider::Target, "sam@example.com");
    let collected = h.orchestrator.scrape_account(&account).await.collect().await;

    assert_eq!(collected.items.len(), 1);
    assert_eq!(collected.completions, 1);
}

#[tokio::test]
async fn first_sweep_uses_the_full_window_and_records_a_checkpoint() {
    let h = harness();
    h.mailbox
        .results
        .lock()
        .expect("lock")
        .push(Ok(Box::default()));

    let collected = h
        .orchestrator
        .scrape_family(ProviderFamily::Email)
        .await
        .collect()
        .await;

    assert_eq!(collected.items.len(), 1);
    assert_eq!(collected.completions, 1);
    assert_eq!(h.mailbox.cutoffs.lock().expect("lock").as_slice(), &[15]);
    assert!(h.checkpoint.last_sweep().expect("read").is_some());
}

#[tokio::test]
async fn sweep_cutoff_tracks_the_checkpoint_age() {
    let h = harness();
    h.checkpoint
        .record_sweep(Utc::now() - Duration::days(3))
        .expect("seed checkpoint");

    h.orchestrator
        .scrape_family(ProviderFamily::Email)
        .await
        .collect()
        .await;

    assert_eq!(h.mailbox.cutoffs.lock().expect("lock").as_slice(), &[3]);
}

#[tokio::test]
async fn failed_sweep_leaves_the_checkpoint_untouched() {
    let h = harness();
    let seeded = Utc::now() - Duration::days(10);
    h.checkpoint.record_sweep(seeded).expect("seed checkpoint");
    h.mailbox
        .results
        .lock()
        .expect("lock")
        .push(Err(EngineError::Internal("IMAP connection lost".to_string())));

    let collected = h
        .orchestrator
        .scrape_family(ProviderFamily::Email)
        .await
        .collect()
        .await;

    assert_eq!(collected.errors.len(), 1);
    assert_eq!(collected.completions, 1);
    let last = h.checkpoint.last_sweep().expect("read").expect("present");
    assert_eq!(last.timestamp(), seeded.timestamp());
}

#[tokio::test]
async fn scrape_all_unions_both_families() {
    let h = harness();
    h.linking.link_account(
        RetailerProvider::Walmart,
        "sam@example.com",
        vec![order_page(0)],
    );
    h.mailbox
        .results
        .lock()
        .expect("lock")
        .push(Ok(Box::default()));

    let collected = h.orchestrator.scrape_all().await.collect().await;

    assert_eq!(collected.items.len(), 2);
    assert!(collected.errors.is_empty());
    assert_eq!(collected.completions, 1);
}
