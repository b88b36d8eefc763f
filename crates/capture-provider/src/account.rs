//! Linked-account identity.
//!
//! Accounts are a transient projection of the provider engines' linked
//! lists: this core never persists them, and the engines stay authoritative.

use crate::email::EmailProvider;
use crate::retailer::RetailerProvider;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two structurally different provider families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderFamily {
    /// Credential-linked retailer web accounts.
    Retailer,
    /// OAuth/IMAP-linked mailboxes.
    Email,
}

/// A source of receipts: one provider out of either family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "family", content = "provider", rename_all = "snake_case")]
pub enum Provider {
    /// A retailer order-history provider.
    Retailer(RetailerProvider),
    /// An e-receipt mailbox provider.
    Email(EmailProvider),
}

impl Provider {
    /// The family this provider belongs to.
    #[must_use]
    pub fn family(&self) -> ProviderFamily {
        match self {
            Self::Retailer(_) => ProviderFamily::Retailer,
            Self::Email(_) => ProviderFamily::Email,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Retailer(r) => write!(f, "{r}"),
            Self::Email(e) => write!(f, "{e}"),
        }
    }
}

impl From<RetailerProvider> for Provider {
    fn from(p: RetailerProvider) -> Self {
        Self::Retailer(p)
    }
}

impl From<EmailProvider> for Provider {
    fn from(p: EmailProvider) -> Self {
        Self::Email(p)
    }
}

/// A linked source account.
///
/// The natural key is (provider family, username). No password is retained
/// here; credentials pass through to the engines and are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The provider this account is linked against.
    pub provider: Provider,
    /// Username within the provider family.
    pub username: String,
    /// Whether the provider engine has verified the link.
    pub verified: bool,
}

impl Account {
    /// Create an unverified account projection.
    #[must_use]
    pub fn new(provider: impl Into<Provider>, username: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            username: username.into(),
            verified: false,
        }
    }

    /// Mark the account verified.
    #[must_use]
    pub fn verified(mut self) -> Self {
        self.verified = true;
        self
    }

    /// The natural key within a provider family.
    #[must_use]
    pub fn key(&self) -> (ProviderFamily, &str) {
        (self.provider.family(), &self.username)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.username, self.provider)
    }
}
