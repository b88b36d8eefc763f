//! Canonical receipt schema and the normalization engine.
//!
//! Provider engines emit deeply nested, confidence-scored, provider-specific
//! payloads; everything downstream (the publish pipeline, the caller's
//! stream) works with the one canonical [`Receipt`] shape produced here.

pub mod decimal;
pub mod items;
pub mod normalize;
pub mod product;
pub mod receipt;

pub use decimal::LosslessDecimal;
pub use items::{
    Coupon, PaymentMethod, Promotion, Shipment, Survey, SurveyAnswer, SurveyQuestion,
    SurveyResponse,
};
pub use normalize::{normalize, MAX_DEPTH};
pub use product::{AdditionalLine, Product};
pub use receipt::{Receipt, RetailerIdentity};
