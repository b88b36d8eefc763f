//! End-to-end login/logout flows against scripted engines.

use async_trait::async_trait;
use capture_core::{
    CaptureConfig, CaptureError, CheckpointStore, OperationKind, OperationRegistry,
};
use capture_engines::{
    AccountLinkingEngine, Credentials, EngineError, EngineResult, LinkStep, LinkedMailbox,
    LinkedRetailer, MailboxEngine, OrderPage, RetailerConnection, SweepScope, SweepStream,
    VerificationChallenge,
};
use capture_provider::{EmailProvider, Provider, RetailerProvider};
use capture_session::{LoginOutcome, SessionManager};
use futures::StreamExt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct ScriptedLinking {
    link_calls: AtomicU32,
    unlink_calls: AtomicU32,
    reset_calls: AtomicU32,
    /// How many upcoming link attempts report a conflict.
    conflicts: AtomicU32,
    link_error: Mutex<Option<EngineError>>,
    verify_step: Mutex<Option<LinkStep>>,
    linked: Mutex<Vec<LinkedRetailer>>,
}

#[async_trait]
impl AccountLinkingEngine for ScriptedLinking {
    async fn link(
        &self,
        _connection: &RetailerConnection,
        _credentials: &Credentials,
    ) -> EngineResult<()> {
        self.link_calls.fetch_add(1, Ordering::SeqCst);
        if self.conflicts.load(Ordering::SeqCst) > 0 {
            self.conflicts.fetch_sub(1, Ordering::SeqCst);
            return Err(EngineError::LinkConflict);
        }
        if let Some(err) = self.link_error.lock().expect("lock").clone() {
            return Err(err);
        }
        Ok(())
    }

    async fn verify(&self, _connection: &RetailerConnection) -> EngineResult<LinkStep> {
        Ok(self
            .verify_step
            .lock()
            .expect("lock")
            .clone()
            .unwrap_or(LinkStep::Verified))
    }

    async fn resolve_verification(
        &self,
        _challenge: &VerificationChallenge,
    ) -> EngineResult<LinkStep> {
        Ok(LinkStep::Verified)
    }

    async fn unlink(&self, _provider_code: u32) -> EngineResult<()> {
        self.unlink_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn unlink_all(&self) -> EngineResult<()> {
        self.unlink_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn reset_history(&self, _provider_code: Option<u32>) -> EngineResult<()> {
        self.reset_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn linked(&self) -> EngineResult<Vec<LinkedRetailer>> {
        Ok(self.linked.lock().expect("lock").clone())
    }

    async fn fetch_orders(&self, _provider_code: u32) -> EngineResult<OrderPage> {
        Ok(OrderPage::default())
    }
}

#[derive(Default)]
struct QuietMailbox {
    linked: Mutex<Vec<LinkedMailbox>>,
}

#[async_trait]
impl MailboxEngine for QuietMailbox {
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
        Ok(self.linked.lock().expect("lock").clone())
    }

    async fn sweep(&self, _scope: SweepScope, _cutoff_days: u32) -> EngineResult<SweepStream> {
        Ok(futures::stream::empty().boxed())
    }
}

struct Harness {
    manager: SessionManager,
    linking: Arc<ScriptedLinking>,
    mailbox: Arc<QuietMailbox>,
    ops: Arc<OperationRegistry>,
    _checkpoint_dir: tempfile::TempDir,
}

fn harness() -> Harness {
    let linking = Arc::new(ScriptedLinking::default());
    let mailbox = Arc::new(QuietMailbox::default());
    let ops = Arc::new(OperationRegistry::new());
    let checkpoint_dir = tempfile::tempdir().expect("tempdir");
    let checkpoint = CheckpointStore::at_path(checkpoint_dir.path().join("checkpoint.json"));

    let manager = SessionManager::new(
        linking.clone(),
        mailbox.clone(),
        ops.clone(),
        checkpoint,
        CaptureConfig::default(),
    );

    Harness {
        manager,
        linking,
        mailbox,
        ops,
        _checkpoint_dir: checkpoint_dir,
    }
}

fn creds() -> Credentials {
    Credentials::new("sam@example.com", "hunter2")
}

#[tokio::test]
async fn login_links_and_verifies() {
    let h = harness();
    let outcome = h
        .manager
        .login(Provider::Retailer(RetailerProvider::Target), creds())
        .await
        .expect("login");

    match outcome {
        LoginOutcome::Linked(account) => {
            assert_eq!(account.username, "sam@example.com");
            assert!(account.verified);
        }
        LoginOutcome::VerificationPending(_) => panic!("no challenge was scripted"),
    }
    assert_eq!(h.linking.link_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_credentials_never_reach_the_engine() {
    let h = harness();
    let err = h
        .manager
        .login(
            Provider::Retailer(RetailerProvider::Target),
            Credentials::new("sam@example.com", ""),
        )
        .await
        .expect_err("no credentials");
    assert!(matches!(err, CaptureError::NoCredentials));
    assert_eq!(h.linking.link_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn link_conflict_retries_exactly_once_then_succeeds() {
    let h = harness();
    h.linking.conflicts.store(1, Ordering::SeqCst);

    let outcome = h
        .manager
        .login(Provider::Retailer(RetailerProvider::Costco), creds())
        .await
        .expect("retry should succeed");

    assert!(matches!(outcome, LoginOutcome::Linked(_)));
    assert_eq!(h.linking.link_calls.load(Ordering::SeqCst), 2);
    assert_eq!(h.linking.unlink_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn repeated_conflict_surfaces_without_second_retry() {
    let h = harness();
    h.linking.conflicts.store(2, Ordering::SeqCst);

    let err = h
        .manager
        .login(Provider::Retailer(RetailerProvider::Costco), creds())
        .await
        .expect_err("second conflict is terminal");

    assert!(matches!(err, CaptureError::LinkConflict(_)));
    // One original attempt plus exactly one retry, never a third.
    assert_eq!(h.linking.link_calls.load(Ordering::SeqCst), 2);
    assert_eq!(h.linking.unlink_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn invalid_credentials_are_terminal() {
    let h = harness();
    *h.linking.link_error.lock().expect("lock") = Some(EngineError::InvalidCredentials);

    let err = h
        .manager
        .login(Provider::Retailer(RetailerProvider::Kroger), creds())
        .await
        .expect_err("invalid credentials");

    assert!(matches!(err, CaptureError::InvalidCredentials(u) if u == "sam@example.com"));
    assert_eq!(h.linking.link_calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.linking.unlink_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn verification_pending_holds_the_presentation_slot() {
    let h = harness();
    *h.linking.verify_step.lock().expect("lock") =
        Some(LinkStep::VerificationNeeded(VerificationChallenge {
            session_id: "sess-1".to_string(),
            presentation_url: "https://verify.example.com/sess-1".to_string(),
        }));

    let outcome = h
        .manager
        .login(Provider::Retailer(RetailerProvider::Walmart), creds())
        .await
        .expect("login reaches verification");

    let pending = match outcome {
        LoginOutcome::VerificationPending(pending) => pending,
        LoginOutcome::Linked(_) => panic!("challenge was scripted"),
    };
    assert!(h.ops.is_active(OperationKind::VerificationPresentation));

    // A second login while the presentation is active is rejected, not
    // silently overwritten.
    let err = h
        .manager
        .login(Provider::Retailer(RetailerProvider::Target), creds())
        .await
        .expect_err("second login while pending");
    assert!(matches!(err, CaptureError::OperationInFlight(_)));

    let account = h
        .manager
        .resolve_verification(pending)
        .await
        .expect("resolve");
    assert!(account.verified);
    assert!(!h.ops.is_active(OperationKind::VerificationPresentation));
}

#[tokio::test]
async fn cancelled_verification_releases_the_slot() {
    let h = harness();
    *h.linking.verify_step.lock().expect("lock") =
        Some(LinkStep::VerificationNeeded(VerificationChallenge {
            session_id: "sess-2".to_string(),
            presentation_url: "https://verify.example.com/sess-2".to_string(),
        }));

    let outcome = h
        .manager
        .login(Provider::Retailer(RetailerProvider::Walmart), creds())
        .await
        .expect("login reaches verification");

    if let LoginOutcome::VerificationPending(pending) = outcome {
        h.manager.cancel_verification(pending);
    }
    assert!(!h.ops.is_active(OperationKind::VerificationPresentation));

    // The slot is usable again.
    h.manager
        .login(Provider::Retailer(RetailerProvider::Walmart), creds())
        .await
        .expect("slot free after cancel");
}

#[tokio::test]
async fn logout_resets_history_and_unlinks() {
    let h = harness();
    let account = capture_provider::Account::new(RetailerProvider::Heb, "sam@example.com");

    h.manager.logout_account(&account).await.expect("logout");
    assert_eq!(h.linking.reset_calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.linking.unlink_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn logout_all_clears_both_families() {
    let h = harness();
    h.manager.logout_all().await.expect("logout all");
    assert_eq!(h.linking.reset_calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.linking.unlink_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn accounts_snapshot_projects_both_families() {
    let h = harness();
    h.linking.linked.lock().expect("lock").push(LinkedRetailer {
        provider_code: RetailerProvider::Target.engine_code(),
        username: "sam@example.com".to_string(),
    });
    h.mailbox.linked.lock().expect("lock").push(LinkedMailbox {
        provider_code: EmailProvider::Gmail.engine_code(),
        username: "sam@gmail.com".to_string(),
        verified: true,
    });

    let snapshot = h.manager.accounts().await;
    assert_eq!(snapshot.accounts.len(), 2);
    assert!(snapshot.errors.is_empty());
    assert!(snapshot.accounts.iter().all(|a| a.verified));
}

#[tokio::test]
async fn unknown_linked_code_lands_in_snapshot_errors() {
    let h = harness();
    h.linking.linked.lock().expect("lock").push(LinkedRetailer {
        provider_code: 9001,
        username: "sam@example.com".to_string(),
    });

    let snapshot = h.manager.accounts().await;
    assert!(snapshot.accounts.is_empty());
    assert_eq!(snapshot.errors.len(), 1);
    assert!(matches!(
        snapshot.errors[0],
        CaptureError::UnsupportedProvider(_)
    ));
}
