//! Retailer account-linking capability.

use crate::credentials::Credentials;
use crate::error::EngineResult;
use crate::raw::RawScanResults;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Connection parameters for linking one retailer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetailerConnection {
    /// Raw engine code of the retailer.
    pub provider_code: u32,
    /// Account username.
    pub username: String,
    /// How many days of order history to pull.
    pub day_cutoff: u32,
    /// Ask the engine for the latest orders only.
    pub latest_orders_only: bool,
    /// ISO 3166-1 alpha-2 storefront country.
    pub country_code: String,
}

/// Where a link attempt stands after the engine's verification round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStep {
    /// The link is established and verified.
    Verified,
    /// The provider requires an interactive challenge before the link
    /// completes.
    VerificationNeeded(VerificationChallenge),
}

/// Handle for presenting an interactive verification challenge.
///
/// The engine owns the challenge session; this handle is what the caller
/// presents to the user and later resolves or abandons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationChallenge {
    /// Engine session this challenge belongs to.
    pub session_id: String,
    /// URL of the page to present to the user.
    pub presentation_url: String,
}

/// A retailer connection the engine currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedRetailer {
    /// Raw engine code of the retailer.
    pub provider_code: u32,
    /// Account username.
    pub username: String,
}

/// One page of order history.
///
/// `remaining` is the engine-reported count of still-unfetched orders after
/// this page; zero means this account's history is exhausted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPage {
    /// The order on this page, when one was produced.
    pub order: Option<Box<RawScanResults>>,
    /// Orders still unfetched after this page.
    pub remaining: u32,
}

/// The retailer account-linking engine.
#[async_trait]
pub trait AccountLinkingEngine: Send + Sync {
    /// Establish a link for the connection, without verifying it yet.
    async fn link(
        &self,
        connection: &RetailerConnection,
        credentials: &Credentials,
    ) -> EngineResult<()>;

    /// Verify a previously established link.
    async fn verify(&self, connection: &RetailerConnection) -> EngineResult<LinkStep>;

    /// Re-check a link after the user finished (or abandoned) a challenge.
    async fn resolve_verification(
        &self,
        challenge: &VerificationChallenge,
    ) -> EngineResult<LinkStep>;

    /// Remove the link for one retailer.
    async fn unlink(&self, provider_code: u32) -> EngineResult<()>;

    /// Remove every retailer link.
    async fn unlink_all(&self) -> EngineResult<()>;

    /// Reset the engine-side order-history checkpoint for one retailer, or
    /// for all retailers when `provider_code` is `None`.
    async fn reset_history(&self, provider_code: Option<u32>) -> EngineResult<()>;

    /// Currently linked retailer connections.
    async fn linked(&self) -> EngineResult<Vec<LinkedRetailer>>;

    /// Fetch the next page of order history for one retailer.
    async fn fetch_orders(&self, provider_code: u32) -> EngineResult<OrderPage>;
}
