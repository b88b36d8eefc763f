//! Canonical coupon, payment, shipment, promotion, and survey records.

use crate::decimal::LosslessDecimal;
use crate::product::Product;
use capture_core::CanonicalValue;
use serde::{Deserialize, Serialize};

/// A coupon applied on the receipt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub coupon_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<CanonicalValue<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<CanonicalValue<String>>,
    /// Index into `products` of the line this coupon applied to.
    pub related_product_index: i32,
}

/// A payment method used on the receipt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_issuer: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<CanonicalValue<f32>>,
}

/// A shipment grouping of products on an e-receipt order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub products: Vec<Product>,
}

/// A promotion the receipt qualified (or failed to qualify) for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward_currency: Option<String>,
    pub error_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Indexes of the products that drove the promotion, as exact decimals.
    pub related_product_indexes: Vec<LosslessDecimal>,
    /// Qualification tuples, as exact decimals.
    pub qualifications: Vec<Vec<LosslessDecimal>>,
}

/// A survey attached to the receipt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Reward amount formatted to two decimal places.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward_value: Option<String>,
    /// ISO 8601 date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// ISO 8601 date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub questions: Vec<SurveyQuestion>,
}

/// One survey question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyQuestion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub question_type: Option<String>,
    pub answers: Vec<SurveyAnswer>,
    pub multiple_answers: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_response: Option<SurveyResponse>,
}

/// One selectable survey answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyAnswer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// The user's recorded response to a survey question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    /// Selected answer indexes, as exact decimals.
    pub answers_selected: Vec<LosslessDecimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_text: Option<String>,
}
