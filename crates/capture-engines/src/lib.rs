//! Capability seams for the external provider engines.
//!
//! The capture core orchestrates four collaborators it does not implement:
//! the optical capture engine, the retailer account-linking engine, the
//! mailbox engine, and the identity/licensing platform. Each is consumed
//! through an async trait here, alongside the raw result payloads they
//! yield.

pub mod camera;
pub mod credentials;
pub mod error;
pub mod identity;
pub mod linking;
pub mod mailbox;
pub mod raw;

pub use camera::{CameraAuthorization, CameraEngine, ScanOutcome};
pub use credentials::Credentials;
pub use error::{EngineError, EngineResult};
pub use identity::{BearerToken, IdentityPlatform, LicenseRecord};
pub use linking::{
    AccountLinkingEngine, LinkStep, LinkedRetailer, OrderPage, RetailerConnection,
    VerificationChallenge,
};
pub use mailbox::{LinkedMailbox, MailboxEngine, SweepScope, SweepStream};
pub use raw::{
    RawAdditionalLine, RawCoupon, RawFloatValue, RawPaymentMethod, RawProduct, RawPromotion,
    RawScanResults, RawShipment, RawStringValue, RawSurvey, RawSurveyAnswer, RawSurveyQuestion,
    RawSurveyResponse,
};
