//! Identity / licensing platform capability.

use crate::error::EngineResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A short-lived bearer token for the ingestion endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the `Authorization` header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A licensing record held by the identity platform for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseRecord {
    /// Record identifier.
    pub id: String,
    /// The user the record belongs to.
    pub user_id: String,
    /// Terms of use the user agreed to.
    pub terms: String,
    /// Expiry, when the license is time-bounded.
    pub expiry: Option<DateTime<Utc>>,
}

/// The identity/licensing platform, consumed as two opaque remote calls.
#[async_trait]
pub trait IdentityPlatform: Send + Sync {
    /// Obtain a bearer token for the ingestion endpoint.
    async fn token(&self) -> EngineResult<BearerToken>;

    /// Register the user (or fetch the existing record) and return their
    /// licensing record.
    async fn register_user(&self, user_id: &str, terms: &str) -> EngineResult<LicenseRecord>;
}
