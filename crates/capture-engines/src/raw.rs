//! Raw, provider-specific result payloads.
//!
//! These mirror what the scan/linking/mailbox engines actually emit: deeply
//! nested, confidence-scored, and with most fields optional. The
//! normalization engine flattens them into the canonical receipt schema.
//! Every struct deserializes leniently (`serde(default)`) because engines
//! omit whatever they did not extract.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A string the engine extracted together with a confidence score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawStringValue {
    /// Extracted text.
    pub value: String,
    /// Extraction confidence, absent when the engine supplied none.
    pub confidence: Option<f32>,
}

impl RawStringValue {
    /// Convenience constructor for a scored extraction.
    #[must_use]
    pub fn scored(value: impl Into<String>, confidence: f32) -> Self {
        Self {
            value: value.into(),
            confidence: Some(confidence),
        }
    }
}

/// A float the engine extracted together with a confidence score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawFloatValue {
    /// Extracted value.
    pub value: f32,
    /// Extraction confidence, absent when the engine supplied none.
    pub confidence: Option<f32>,
}

impl RawFloatValue {
    /// Convenience constructor for a scored extraction.
    #[must_use]
    pub fn scored(value: f32, confidence: f32) -> Self {
        Self {
            value,
            confidence: Some(confidence),
        }
    }
}

/// One full scan/scrape result as emitted by an engine.
///
/// Covers optical scans, retailer order history entries, and mailbox
/// e-receipts; a multi-part e-mail receipt nests its constituent messages in
/// `component_emails`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawScanResults {
    pub receipt_date: Option<RawStringValue>,
    pub receipt_time: Option<RawStringValue>,
    /// Engine's numeric merchant identifier.
    pub retailer_id: Option<i64>,
    pub products: Option<Vec<RawProduct>>,
    pub coupons: Option<Vec<RawCoupon>>,
    pub total: Option<RawFloatValue>,
    pub tip: Option<RawFloatValue>,
    pub subtotal: Option<RawFloatValue>,
    pub taxes: Option<RawFloatValue>,
    pub store_number: Option<RawStringValue>,
    pub merchant_name: Option<RawStringValue>,
    pub store_address: Option<RawStringValue>,
    pub store_city: Option<RawStringValue>,
    /// Engine-assigned receipt identifier.
    pub receipt_id: Option<String>,
    pub store_state: Option<RawStringValue>,
    pub store_zip: Option<RawStringValue>,
    pub store_phone: Option<RawStringValue>,
    pub cashier_id: Option<RawStringValue>,
    pub transaction_id: Option<RawStringValue>,
    pub register_id: Option<RawStringValue>,
    pub payment_methods: Option<Vec<RawPaymentMethod>>,
    pub tax_id: Option<RawStringValue>,
    pub mall_name: Option<RawStringValue>,
    pub last4cc: Option<RawStringValue>,
    /// Whole-receipt OCR confidence; the engine always reports one.
    pub ocr_confidence: f32,
    pub found_top_edge: Option<bool>,
    pub found_bottom_edge: Option<bool>,
    pub ereceipt_order_number: Option<String>,
    pub ereceipt_order_status: Option<String>,
    pub ereceipt_raw_html: Option<String>,
    pub shipments: Option<Vec<RawShipment>>,
    pub long_transaction_id: Option<RawStringValue>,
    pub subtotal_matches: Option<bool>,
    pub ereceipt_email_provider: Option<String>,
    pub ereceipt_authenticated: Option<bool>,
    pub instacart_shopper: Option<bool>,
    /// Whether this payload is a valid e-receipt.
    pub ereceipt_valid: bool,
    /// Constituent messages of a multi-part e-mail receipt.
    pub component_emails: Option<Vec<RawScanResults>>,
    pub duplicate: Option<bool>,
    pub fraudulent: Option<bool>,
    pub duplicate_receipt_ids: Option<Vec<String>>,
    pub merchant_match_guess: Option<String>,
    pub products_pending_lookup: i32,
    pub qualified_promotions: Option<Vec<RawPromotion>>,
    pub unqualified_promotions: Option<Vec<RawPromotion>>,
    pub ereceipt_additional_fees: Option<BTreeMap<String, String>>,
    pub purchase_type: Option<String>,
    pub channel: Option<RawStringValue>,
    pub loyalty_for_banner: Option<bool>,
    pub ereceipt_fulfilled_by: Option<String>,
    pub ereceipt_pos_system: Option<String>,
    pub ereceipt_sub_merchant: Option<String>,
    pub qualified_surveys: Option<Vec<RawSurvey>>,
    pub barcode: Option<String>,
    pub ereceipt_merchant_email: Option<String>,
    pub ereceipt_email_subject: Option<String>,
    pub ereceipt_shipping_costs: Option<f32>,
    pub currency_code: Option<String>,
    pub client_merchant_name: Option<String>,
    pub loyalty_program: Option<bool>,
    pub merchant_sources: Option<Vec<i64>>,
    pub payment_terminal_id: Option<RawStringValue>,
    pub payment_transaction_id: Option<RawStringValue>,
    pub combined_raw_text: Option<String>,
}

/// A line item on a receipt, with ambiguous-OCR candidates and bundle
/// decomposition nested recursively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawProduct {
    pub product_number: Option<RawStringValue>,
    pub description: Option<String>,
    pub quantity: Option<RawFloatValue>,
    pub unit_price: Option<RawFloatValue>,
    pub unit_of_measure: Option<RawStringValue>,
    pub total_price: Option<RawFloatValue>,
    pub full_price: Option<RawFloatValue>,
    pub product_name: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub size: Option<String>,
    pub rewards_group: Option<String>,
    pub competitor_rewards_group: Option<String>,
    pub upc: Option<String>,
    pub image_url: Option<String>,
    pub shipping_status: Option<String>,
    pub additional_lines: Option<Vec<RawAdditionalLine>>,
    pub price_after_coupons: Option<RawFloatValue>,
    pub voided: Option<bool>,
    pub probability: Option<f32>,
    pub sensitive: Option<bool>,
    /// Ambiguous OCR candidates for this line.
    pub possible_products: Option<Vec<RawProduct>>,
    /// Bundle decomposition.
    pub sub_products: Option<Vec<RawProduct>>,
    pub added: Option<bool>,
    pub fuel_type: Option<String>,
    pub description_prefix: Option<RawStringValue>,
    pub description_postfix: Option<RawStringValue>,
    pub sku_prefix: Option<RawStringValue>,
    pub sku_postfix: Option<RawStringValue>,
    pub attributes: Option<Vec<BTreeMap<String, String>>>,
    pub sector: Option<String>,
    pub department: Option<String>,
    pub major_category: Option<String>,
    pub sub_category: Option<String>,
    pub item_type: Option<String>,
}

/// Extra text lines the engine attaches to a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawAdditionalLine {
    #[serde(rename = "type")]
    pub line_type: Option<RawStringValue>,
    pub text: Option<RawStringValue>,
    pub line_number: i32,
}

/// A coupon applied on the receipt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawCoupon {
    #[serde(rename = "type")]
    pub coupon_type: Option<String>,
    pub amount: Option<RawFloatValue>,
    pub sku: Option<RawStringValue>,
    pub description: Option<String>,
    pub related_product_index: i32,
}

/// A payment method used on the receipt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawPaymentMethod {
    pub method: Option<RawStringValue>,
    pub card_type: Option<RawStringValue>,
    pub card_issuer: Option<RawStringValue>,
    pub amount: Option<RawFloatValue>,
}

/// A shipment grouping of products on an e-receipt order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawShipment {
    pub status: Option<String>,
    pub products: Option<Vec<RawProduct>>,
}

/// A promotion the receipt qualified (or failed to qualify) for.
///
/// Product indexes and qualification tuples arrive as exact decimal text;
/// they stay text end to end so precision is never lost to a float.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawPromotion {
    pub slug: Option<String>,
    pub reward_value: Option<f32>,
    pub reward_currency: Option<String>,
    pub error_code: i32,
    pub error_message: Option<String>,
    pub related_product_indexes: Option<Vec<String>>,
    pub qualifications: Option<Vec<Vec<String>>>,
}

/// A survey attached to the receipt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSurvey {
    pub slug: Option<String>,
    pub reward_value: Option<f32>,
    /// ISO 8601 date.
    pub start_date: Option<String>,
    /// ISO 8601 date.
    pub end_date: Option<String>,
    pub questions: Option<Vec<RawSurveyQuestion>>,
}

/// One survey question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSurveyQuestion {
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub question_type: Option<String>,
    pub answers: Option<Vec<RawSurveyAnswer>>,
    pub multiple_answers: bool,
    pub user_response: Option<RawSurveyResponse>,
}

/// One selectable survey answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSurveyAnswer {
    pub text: Option<String>,
}

/// The user's recorded response to a survey question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSurveyResponse {
    /// Selected answer indexes as exact decimal text.
    pub answers_selected: Option<Vec<String>>,
    pub free_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_deserialization() {
        // Engines omit everything they did not extract.
        let raw: RawScanResults = serde_json::from_str("{}").expect("empty payload");
        assert_eq!(raw.ocr_confidence, 0.0);
        assert!(raw.products.is_none());
        assert!(!raw.ereceipt_valid);
    }

    #[test]
    fn test_camel_case_wire_names() {
        let json = r#"{"merchantName":{"value":"Target","confidence":0.93},"ocrConfidence":0.9}"#;
        let raw: RawScanResults = serde_json::from_str(json).expect("payload");
        let merchant = raw.merchant_name.expect("merchant name");
        assert_eq!(merchant.value, "Target");
        assert_eq!(merchant.confidence, Some(0.93));
    }

    #[test]
    fn test_type_field_renames() {
        let json = r#"{"type":"STORE","relatedProductIndex":2}"#;
        let coupon: RawCoupon = serde_json::from_str(json).expect("coupon");
        assert_eq!(coupon.coupon_type.as_deref(), Some("STORE"));
        assert_eq!(coupon.related_product_index, 2);
    }
}
