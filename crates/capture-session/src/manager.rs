//! Login, verification, and logout orchestration across both provider
//! families.

use crate::state::{LinkSession, SessionState};
use capture_core::{
    CaptureConfig, CaptureError, CheckpointStore, OperationGuard, OperationKind,
    OperationRegistry, Result, MAX_DAY_CUTOFF,
};
use capture_engines::{
    AccountLinkingEngine, Credentials, EngineError, LinkStep, MailboxEngine, RetailerConnection,
    VerificationChallenge,
};
use capture_provider::{
    Account, EmailProvider, Provider, ProviderFamily, RetailerProvider,
};
use std::sync::Arc;

/// How a login attempt concluded from the caller's point of view.
#[derive(Debug)]
pub enum LoginOutcome {
    /// The account linked and verified in one pass.
    Linked(Account),
    /// The provider requires an interactive challenge; present it and then
    /// resolve or cancel the pending verification.
    VerificationPending(PendingVerification),
}

/// A login waiting on an externally presented verification challenge.
///
/// Holds the process-wide verification presentation slot; dropping (or
/// cancelling) releases it.
#[derive(Debug)]
pub struct PendingVerification {
    account: Account,
    challenge: VerificationChallenge,
    _guard: OperationGuard,
}

impl PendingVerification {
    /// The challenge to present to the user.
    #[must_use]
    pub fn challenge(&self) -> &VerificationChallenge {
        &self.challenge
    }

    /// The account the challenge belongs to (not yet verified).
    #[must_use]
    pub fn account(&self) -> &Account {
        &self.account
    }
}

/// The provider engines' current linked accounts, plus any per-item decode
/// failures encountered while projecting them.
#[derive(Debug, Default)]
pub struct AccountsSnapshot {
    /// Successfully projected accounts.
    pub accounts: Vec<Account>,
    /// Per-item failures; the snapshot is still usable.
    pub errors: Vec<CaptureError>,
}

/// Drives the login/verification/logout state machine per account.
///
/// Holds no authoritative account store; accounts are always projected live
/// from the provider engines.
pub struct SessionManager {
    linking: Arc<dyn AccountLinkingEngine>,
    mailbox: Arc<dyn MailboxEngine>,
    ops: Arc<OperationRegistry>,
    checkpoint: CheckpointStore,
    config: CaptureConfig,
}

impl SessionManager {
    /// Create a session manager over the provider engines.
    #[must_use]
    pub fn new(
        linking: Arc<dyn AccountLinkingEngine>,
        mailbox: Arc<dyn MailboxEngine>,
        ops: Arc<OperationRegistry>,
        checkpoint: CheckpointStore,
        config: CaptureConfig,
    ) -> Self {
        Self {
            linking,
            mailbox,
            ops,
            checkpoint,
            config,
        }
    }

    /// Log in to a provider account.
    ///
    /// A `LinkConflict` from the engine triggers exactly one automatic
    /// unlink-and-retry of the same attempt; a second conflict is surfaced.
    /// All other engine failures are terminal and leave the account
    /// unlinked.
    pub async fn login(&self, provider: Provider, credentials: Credentials) -> Result<LoginOutcome> {
        if credentials.username.is_empty() || credentials.password.is_empty() {
            return Err(CaptureError::NoCredentials);
        }

        let mut session =
            LinkSession::new(Account::new(provider, credentials.username.clone()));

        match provider {
            Provider::Retailer(retailer) => {
                self.login_retailer(retailer, &credentials, &mut session).await
            }
            Provider::Email(email) => self.login_email(email, &credentials, &mut session).await,
        }
    }

    async fn login_retailer(
        &self,
        retailer: RetailerProvider,
        credentials: &Credentials,
        session: &mut LinkSession,
    ) -> Result<LoginOutcome> {
        let connection = RetailerConnection {
            provider_code: retailer.engine_code(),
            username: credentials.username.clone(),
            day_cutoff: MAX_DAY_CUTOFF as u32,
            latest_orders_only: self.config.latest_orders_only,
            country_code: self.config.country_code.clone(),
        };

        session.transition(SessionState::LinkRequested);
        let mut conflict_retried = false;
        loop {
            match self.linking.link(&connection, credentials).await {
                Ok(()) => break,
                Err(EngineError::LinkConflict) if !conflict_retried => {
                    conflict_retried = true;
                    session.transition(SessionState::LinkConflict);
                    tracing::info!(
                        retailer = %retailer,
                        "link conflict, unlinking and retrying once"
                    );
                    self.linking
                        .unlink(connection.provider_code)
                        .await
                        .map_err(|e| e.into_capture_for(&connection.username))?;
                    session.transition(SessionState::LinkRequested);
                }
                Err(err) => {
                    session.transition(SessionState::Unlinked);
                    return Err(err.into_capture_for(&connection.username));
                }
            }
        }

        match self.linking.verify(&connection).await {
            Ok(step) => self.conclude_link(step, session),
            Err(err) => {
                session.transition(SessionState::Unlinked);
                Err(err.into_capture_for(&connection.username))
            }
        }
    }

    async fn login_email(
        &self,
        email: EmailProvider,
        credentials: &Credentials,
        session: &mut LinkSession,
    ) -> Result<LoginOutcome> {
        let provider_code = email.engine_code();

        session.transition(SessionState::LinkRequested);
        let mut conflict_retried = false;
        loop {
            match self.mailbox.login(provider_code, credentials).await {
                Ok(step) => return self.conclude_link(step, session),
                Err(EngineError::LinkConflict) if !conflict_retried => {
                    conflict_retried = true;
                    session.transition(SessionState::LinkConflict);
                    tracing::info!(provider = %email, "mailbox link conflict, relinking once");
                    self.mailbox
                        .logout(Some(&credentials.username))
                        .await
                        .map_err(|e| e.into_capture_for(&credentials.username))?;
                    session.transition(SessionState::LinkRequested);
                }
                Err(err) => {
                    session.transition(SessionState::Unlinked);
                    return Err(err.into_capture_for(&credentials.username));
                }
            }
        }
    }

    fn conclude_link(&self, step: LinkStep, session: &mut LinkSession) -> Result<LoginOutcome> {
        match step {
            LinkStep::Verified => {
                session.transition(SessionState::Verified);
                Ok(LoginOutcome::Linked(session.account().clone().verified()))
            }
            LinkStep::VerificationNeeded(challenge) => {
                // Only one presentation may be active per process; reject a
                // second login instead of overwriting the pending handle.
                let guard = self.ops.acquire(OperationKind::VerificationPresentation)?;
                session.transition(SessionState::VerificationPending);
                Ok(LoginOutcome::VerificationPending(PendingVerification {
                    account: session.account().clone(),
                    challenge,
                    _guard: guard,
                }))
            }
        }
    }

    /// Conclude a pending verification after the user finished the
    /// challenge. The presentation slot is released whichever way this
    /// ends.
    pub async fn resolve_verification(&self, pending: PendingVerification) -> Result<Account> {
        let PendingVerification {
            account, challenge, _guard,
        } = pending;

        let step = match account.provider.family() {
            ProviderFamily::Retailer => self.linking.resolve_verification(&challenge).await,
            ProviderFamily::Email => self.mailbox.resolve_verification(&challenge).await,
        };

        match step {
            Ok(LinkStep::Verified) => {
                tracing::info!(account = %account, "verification completed");
                Ok(account.verified())
            }
            Ok(LinkStep::VerificationNeeded(_)) => Err(CaptureError::Engine(
                "engine re-issued a challenge after resolution".to_string(),
            )),
            Err(err) => Err(err.into_capture_for(&account.username)),
        }
    }

    /// Abandon a pending verification, releasing the presentation slot and
    /// leaving the account unlinked.
    pub fn cancel_verification(&self, pending: PendingVerification) {
        tracing::info!(account = %pending.account, "verification cancelled");
        drop(pending);
    }

    /// Unlink one account and reset its engine-side scan-history
    /// checkpoint.
    pub async fn logout_account(&self, account: &Account) -> Result<()> {
        match account.provider {
            Provider::Retailer(retailer) => {
                let code = retailer.engine_code();
                self.linking
                    .reset_history(Some(code))
                    .await
                    .map_err(|e| e.into_capture_for(&account.username))?;
                self.linking
                    .unlink(code)
                    .await
                    .map_err(|e| e.into_capture_for(&account.username))?;
            }
            Provider::Email(_) => {
                self.mailbox
                    .logout(Some(&account.username))
                    .await
                    .map_err(|e| e.into_capture_for(&account.username))?;
            }
        }
        tracing::info!(account = %account, "logged out");
        Ok(())
    }

    /// Unlink every account of both families and clear all checkpoints.
    ///
    /// Attempts every step even when one fails; the first failure is
    /// reported after the rest have run.
    pub async fn logout_all(&self) -> Result<()> {
        let mut first_error: Option<CaptureError> = None;
        let mut remember = |result: std::result::Result<(), EngineError>| {
            if let Err(err) = result {
                tracing::warn!(error = %err, "logout step failed");
                if first_error.is_none() {
                    first_error = Some(err.into_capture_for("logout"));
                }
            }
        };

        remember(self.linking.reset_history(None).await);
        remember(self.linking.unlink_all().await);
        remember(self.mailbox.logout(None).await);

        if let Err(err) = self.checkpoint.clear() {
            tracing::warn!(error = %err, "failed to clear sweep checkpoint");
            if first_error.is_none() {
                first_error = Some(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => {
                tracing::info!("all accounts logged out");
                Ok(())
            }
        }
    }

    /// Project the engines' current linked accounts.
    ///
    /// Unknown provider codes never coerce to a known provider; they land in
    /// the snapshot's error list instead.
    pub async fn accounts(&self) -> AccountsSnapshot {
        let mut snapshot = AccountsSnapshot::default();

        match self.linking.linked().await {
            Ok(links) => {
                for link in links {
                    match RetailerProvider::from_engine_code(link.provider_code) {
                        Ok(provider) => snapshot
                            .accounts
                            .push(Account::new(provider, link.username).verified()),
                        Err(err) => {
                            tracing::warn!(
                                code = link.provider_code,
                                "linked retailer with unsupported code"
                            );
                            snapshot.errors.push(err);
                        }
                    }
                }
            }
            Err(err) => snapshot
                .errors
                .push(err.into_capture_for("retailer account listing")),
        }

        match self.mailbox.linked().await {
            Ok(mailboxes) => {
                for mailbox in mailboxes {
                    match EmailProvider::from_engine_code(mailbox.provider_code) {
                        Ok(provider) => {
                            let mut account = Account::new(provider, mailbox.username);
                            account.verified = mailbox.verified;
                            snapshot.accounts.push(account);
                        }
                        Err(err) => {
                            tracing::warn!(
                                code = mailbox.provider_code,
                                "linked mailbox with unsupported code"
                            );
                            snapshot.errors.push(err);
                        }
                    }
                }
            }
            Err(err) => snapshot
                .errors
                .push(err.into_capture_for("mailbox account listing")),
        }

        snapshot
    }
}
