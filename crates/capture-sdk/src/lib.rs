//! Public facade for receipt capture.
//!
//! Applications collect purchase receipts from camera scans, linked
//! retailer accounts, and linked e-mail mailboxes, and receive
//! them as one canonical receipt stream. Build an SDK instance with
//! [`CaptureBuilder`], then drive scans, logins, and retrievals from the
//! returned [`CaptureSdk`] handle.
//!
//! ```no_run
//! use capture_sdk::CaptureBuilder;
//! # use std::sync::Arc;
//! # async fn run(
//! #     camera: Arc<dyn capture_engines::CameraEngine>,
//! #     linking: Arc<dyn capture_engines::AccountLinkingEngine>,
//! #     mailbox: Arc<dyn capture_engines::MailboxEngine>,
//! #     identity: Arc<dyn capture_engines::IdentityPlatform>,
//! # ) -> capture_core::Result<()> {
//! let sdk = CaptureBuilder::new()
//!     .with_user_id("user-1")
//!     .with_provider_id("publisher-1")
//!     .with_terms("terms of use")
//!     .with_camera(camera)
//!     .with_linking(linking)
//!     .with_mailbox(mailbox)
//!     .with_identity(identity)
//!     .initialize()
//!     .await?;
//!
//! let mut receipts = sdk.receipts_all().await;
//! while let Some(_event) = receipts.next_event().await {
//!     // canonical receipts, per-item errors, then one completion
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod sdk;
pub mod stream;

pub use builder::CaptureBuilder;
pub use sdk::CaptureSdk;
pub use stream::{CollectedReceipts, ReceiptEvent, ReceiptStream};

// The surface types callers interact with.
pub use capture_core::{CaptureConfig, CaptureError, ErrorKind};
pub use capture_engines::Credentials;
pub use capture_provider::{Account, EmailProvider, Provider, ProviderFamily, RetailerProvider};
pub use capture_receipt::Receipt;
pub use capture_session::{AccountsSnapshot, LoginOutcome, PendingVerification};
