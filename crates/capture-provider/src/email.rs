//! E-mail provider enumeration, engine-code codec, and OAuth metadata.

use capture_core::{CaptureError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Supported e-receipt mailbox providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmailProvider {
    /// Gmail, linked over IMAP after OAuth consent.
    Gmail,
    /// AOL Mail.
    Aol,
    /// Yahoo Mail.
    Yahoo,
    /// Outlook / Microsoft 365.
    Outlook,
    /// No mailbox provider.
    None,
    /// A user-supplied IMAP server.
    Custom,
}

/// Every e-mail provider, in catalog order.
pub const ALL_EMAIL_PROVIDERS: [EmailProvider; 6] = [
    EmailProvider::Gmail,
    EmailProvider::Aol,
    EmailProvider::Yahoo,
    EmailProvider::Outlook,
    EmailProvider::None,
    EmailProvider::Custom,
];

/// Canonical provider → raw mailbox-engine code.
const ENGINE_CODES: [(EmailProvider, u32); 6] = [
    (EmailProvider::None, 0),
    (EmailProvider::Outlook, 2),
    (EmailProvider::Yahoo, 3),
    (EmailProvider::Aol, 4),
    (EmailProvider::Gmail, 5),
    (EmailProvider::Custom, 6),
];

/// Extra raw codes the engine reports for providers already in the table.
/// The engine kept legacy code points alive for Gmail's pre-IMAP path and
/// Yahoo's v2 rollout; both decode to the canonical provider.
const DECODE_ALIASES: [(u32, EmailProvider); 2] =
    [(1, EmailProvider::Gmail), (7, EmailProvider::Yahoo)];

static ENCODE: Lazy<HashMap<EmailProvider, u32>> =
    Lazy::new(|| ENGINE_CODES.iter().copied().collect());

static DECODE: Lazy<HashMap<u32, EmailProvider>> = Lazy::new(|| {
    ENGINE_CODES
        .iter()
        .map(|&(p, c)| (c, p))
        .chain(DECODE_ALIASES.iter().copied())
        .collect()
});

/// OAuth endpoints for providers that link through an OAuth consent flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OAuthEndpoints {
    /// Authorization (consent) endpoint.
    pub authorization_url: &'static str,
    /// Token exchange endpoint.
    pub token_url: &'static str,
}

impl EmailProvider {
    /// The raw code this provider carries on the mailbox-engine wire.
    #[must_use]
    pub fn engine_code(self) -> u32 {
        ENCODE[&self]
    }

    /// Decode a raw mailbox-engine code, alias code points included.
    pub fn from_engine_code(code: u32) -> Result<Self> {
        DECODE
            .get(&code)
            .copied()
            .ok_or_else(|| CaptureError::UnsupportedProvider(format!("email engine code {code}")))
    }

    /// OAuth endpoints, for the providers that require a consent flow.
    #[must_use]
    pub fn oauth_endpoints(&self) -> Option<OAuthEndpoints> {
        match self {
            Self::Gmail => Some(OAuthEndpoints {
                authorization_url: "https://accounts.google.com/o/oauth2/v2/auth",
                token_url: "https://www.googleapis.com/oauth2/v4/token",
            }),
            Self::Outlook => Some(OAuthEndpoints {
                authorization_url:
                    "https://login.microsoftonline.com/common/oauth2/v2.0/authorize",
                token_url: "https://login.microsoftonline.com/common/oauth2/v2.0/token",
            }),
            _ => Option::None,
        }
    }

    /// Human-readable provider name.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gmail => "Gmail",
            Self::Aol => "AOL",
            Self::Yahoo => "Yahoo",
            Self::Outlook => "Outlook",
            Self::None => "None",
            Self::Custom => "Custom IMAP",
        }
    }
}

impl fmt::Display for EmailProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Verify the e-mail codec covers the catalog exactly once per direction,
/// aliases included.
pub fn validate_codec() -> Result<()> {
    if ENCODE.len() != ALL_EMAIL_PROVIDERS.len() {
        return Err(CaptureError::UnsupportedProvider(format!(
            "email encode table has {} entries for {} catalog values",
            ENCODE.len(),
            ALL_EMAIL_PROVIDERS.len()
        )));
    }
    if DECODE.len() != ENGINE_CODES.len() + DECODE_ALIASES.len() {
        return Err(CaptureError::UnsupportedProvider(
            "duplicate raw code in email table".to_string(),
        ));
    }
    for provider in ALL_EMAIL_PROVIDERS {
        if EmailProvider::from_engine_code(provider.engine_code())? != provider {
            return Err(CaptureError::UnsupportedProvider(format!(
                "{provider} does not round-trip"
            )));
        }
    }
    Ok(())
}
