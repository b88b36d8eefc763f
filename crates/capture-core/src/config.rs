//! SDK configuration.
//!
//! Configuration is an explicit value handed to the builder. There is no
//! global singleton. A TOML file can seed it, but callers always pass the
//! resulting value in.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default ingestion endpoint for normalized receipts.
pub const DEFAULT_INGEST_ENDPOINT: &str = "https://ingest.receipt-capture.dev/api/latest/receipt";

/// Configuration for the capture SDK.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Publishing identifier for the identity/licensing platform.
    pub publishing_id: String,
    /// License key for the optical scan engine.
    pub scan_license_key: String,
    /// Product intelligence key for the scan engine's analytics lookups.
    pub product_intelligence_key: String,
    /// Terms of use attached to the license record.
    pub terms: String,
    /// OAuth client id for Gmail mailbox linking, when enabled.
    pub gmail_client_id: Option<String>,
    /// OAuth client id for Outlook mailbox linking, when enabled.
    pub outlook_client_id: Option<String>,
    /// Receipt ingestion endpoint.
    pub ingest_endpoint: String,
    /// Country code sent with retailer order-history connections.
    pub country_code: String,
    /// Ask retailer engines for the latest orders only.
    pub latest_orders_only: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            publishing_id: String::new(),
            scan_license_key: String::new(),
            product_intelligence_key: String::new(),
            terms: String::new(),
            gmail_client_id: None,
            outlook_client_id: None,
            ingest_endpoint: DEFAULT_INGEST_ENDPOINT.to_string(),
            country_code: "US".to_string(),
            latest_orders_only: true,
        }
    }
}

impl CaptureConfig {
    /// Load configuration from the per-install config file, falling back to
    /// defaults when the file does not exist.
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            tracing::debug!("loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to disk, creating the directory if needed.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Path of the per-install config file.
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            directories::ProjectDirs::from("com", "capture", "capture").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Check that the fields required for initialization are present.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.publishing_id.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "publishing_id".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.terms.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "terms".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.ingest_endpoint.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "ingest_endpoint".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.country_code.len() != 2 {
            return Err(ConfigError::InvalidValue {
                field: "country_code".to_string(),
                reason: format!("expected ISO 3166-1 alpha-2, got '{}'", self.country_code),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> CaptureConfig {
        CaptureConfig {
            publishing_id: "pub-0001".to_string(),
            scan_license_key: "scan-key".to_string(),
            product_intelligence_key: "intel-key".to_string(),
            terms: "terms of use".to_string(),
            ..CaptureConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = CaptureConfig::default();
        assert_eq!(config.ingest_endpoint, DEFAULT_INGEST_ENDPOINT);
        assert_eq!(config.country_code, "US");
        assert!(config.latest_orders_only);
    }

    #[test]
    fn test_validate_ok() {
        valid_config().validate().expect("valid config");
    }

    #[test]
    fn test_validate_missing_publishing_id() {
        let config = CaptureConfig {
            publishing_id: String::new(),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "publishing_id"
        ));
    }

    #[test]
    fn test_validate_bad_country_code() {
        let config = CaptureConfig {
            country_code: "USA".to_string(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = valid_config();
        let toml = toml::to_string_pretty(&config).expect("serialize");
        let back: CaptureConfig = toml::from_str(&toml).expect("deserialize");
        assert_eq!(back.publishing_id, config.publishing_id);
        assert_eq!(back.latest_orders_only, config.latest_orders_only);
    }
}
