//! Per-account link session state.

use capture_provider::Account;

/// Where one login attempt currently stands.
///
/// Ephemeral: the state lives only for the duration of a login/logout call
/// and is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No link exists.
    Unlinked,
    /// A link was requested from the provider engine.
    LinkRequested,
    /// The provider requires an interactive challenge.
    VerificationPending,
    /// The link is established and verified.
    Verified,
    /// The account is already linked elsewhere; one automatic
    /// unlink-and-retry is in progress.
    LinkConflict,
}

/// One account's link session while a login drives it.
#[derive(Debug)]
pub(crate) struct LinkSession {
    account: Account,
    state: SessionState,
}

impl LinkSession {
    pub(crate) fn new(account: Account) -> Self {
        Self {
            account,
            state: SessionState::Unlinked,
        }
    }

    pub(crate) fn transition(&mut self, next: SessionState) {
        tracing::debug!(
            account = %self.account,
            from = ?self.state,
            to = ?next,
            "link session transition"
        );
        self.state = next;
    }

    pub(crate) fn state(&self) -> SessionState {
        self.state
    }

    pub(crate) fn account(&self) -> &Account {
        &self.account
    }

    pub(crate) fn into_account(self) -> Account {
        self.account
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capture_provider::RetailerProvider;

    #[test]
    fn test_initial_state_unlinked() {
        let session = LinkSession::new(Account::new(RetailerProvider::Target, "sam"));
        assert_eq!(session.state(), SessionState::Unlinked);
    }

    #[test]
    fn test_transitions() {
        let mut session = LinkSession::new(Account::new(RetailerProvider::Target, "sam"));
        session.transition(SessionState::LinkRequested);
        session.transition(SessionState::VerificationPending);
        session.transition(SessionState::Verified);
        assert_eq!(session.state(), SessionState::Verified);
    }
}
