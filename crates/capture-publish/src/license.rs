//! User licensing against the identity platform.

use capture_core::{CaptureError, Result};
use capture_engines::{IdentityPlatform, LicenseRecord};
use std::sync::Arc;

/// Registers users with the identity platform and retrieves their licensing
/// record.
///
/// Both calls are opaque remote operations; this service only adds argument
/// checking and logging around them.
pub struct LicenseService {
    identity: Arc<dyn IdentityPlatform>,
}

impl LicenseService {
    /// Create a license service over the identity platform.
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityPlatform>) -> Self {
        Self { identity }
    }

    /// Register the user (idempotent on the platform side) and return their
    /// licensing record.
    ///
    /// # Errors
    /// Fails when the user id is empty or the platform call fails.
    pub async fn register(&self, user_id: &str, terms: &str) -> Result<LicenseRecord> {
        if user_id.is_empty() {
            return Err(CaptureError::NotInitialized(
                "a user id is required before licensing".to_string(),
            ));
        }

        let record = self
            .identity
            .register_user(user_id, terms)
            .await
            .map_err(|e| e.into_capture_for(user_id))?;

        tracing::info!(user = user_id, license = %record.id, "license registered");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use capture_engines::{BearerToken, EngineResult};

    struct StaticIdentity;

    #[async_trait]
    impl IdentityPlatform for StaticIdentity {
        async fn token(&self) -> EngineResult<BearerToken> {
            Ok(BearerToken::new("token-1"))
        }

        async fn register_user(&self, user_id: &str, terms: &str) -> EngineResult<LicenseRecord> {
            Ok(LicenseRecord {
                id: format!("license-{user_id}"),
                user_id: user_id.to_string(),
                terms: terms.to_string(),
                expiry: None,
            })
        }
    }

    #[tokio::test]
    async fn test_register_returns_record() {
        let service = LicenseService::new(Arc::new(StaticIdentity));
        let record = service
            .register("user-7", "terms of use")
            .await
            .expect("register");
        assert_eq!(record.id, "license-user-7");
        assert_eq!(record.terms, "terms of use");
    }

    #[tokio::test]
    async fn test_empty_user_id_rejected() {
        let service = LicenseService::new(Arc::new(StaticIdentity));
        let err = service
            .register("", "terms of use")
            .await
            .expect_err("empty user id");
        assert!(matches!(err, CaptureError::NotInitialized(_)));
    }
}
