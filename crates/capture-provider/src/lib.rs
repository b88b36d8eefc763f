//! Provider catalogs and the linked-account model.
//!
//! Two closed enumerations (retailer and e-mail providers), data-driven
//! bidirectional codecs to the raw engine code space, and the transient
//! [`Account`] projection.

pub mod account;
pub mod email;
pub mod retailer;

pub use account::{Account, Provider, ProviderFamily};
pub use email::{EmailProvider, OAuthEndpoints, ALL_EMAIL_PROVIDERS};
pub use retailer::{RetailerProvider, ALL_RETAILERS};

use capture_core::Result;

/// Validate every provider codec at startup.
///
/// Catalog edits that leave a value unmapped (or double-mapped) fail here
/// instead of surfacing later as a misrouted account.
pub fn validate_codecs() -> Result<()> {
    retailer::validate_codec()?;
    email::validate_codec()?;
    tracing::debug!(
        retailers = ALL_RETAILERS.len(),
        email_providers = ALL_EMAIL_PROVIDERS.len(),
        "provider codecs validated"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_codecs() {
        validate_codecs().expect("all codecs complete");
    }
}
