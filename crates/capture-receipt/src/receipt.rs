//! The canonical receipt aggregate.

use crate::items::{Coupon, PaymentMethod, Promotion, Shipment, Survey};
use crate::product::Product;
use capture_core::CanonicalValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The engine's numeric merchant identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetailerIdentity {
    /// Merchant identifier.
    pub id: i64,
    /// Banner (sub-brand) identifier, when the merchant has banners.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_id: Option<i64>,
}

/// The canonical, provider-independent receipt.
///
/// Every receipt source (optical scan, retailer order history, mailbox
/// e-receipt) flattens into this one shape. Extracted scalars carry their
/// confidence in [`CanonicalValue`]; nested collections are always present,
/// empty when the source supplied nothing. A multi-part e-mail receipt
/// decomposes into `component_receipts` of this same shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_date: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_time: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retailer: Option<RetailerIdentity>,
    pub products: Vec<Product>,
    pub coupons: Vec<Coupon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<CanonicalValue<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<CanonicalValue<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<CanonicalValue<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxes: Option<CanonicalValue<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_number: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_address: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_city: Option<CanonicalValue<String>>,
    /// Engine-assigned receipt identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_state: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_zip: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_phone: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cashier_id: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub register_id: Option<CanonicalValue<String>>,
    pub payment_methods: Vec<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mall_name: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last4cc: Option<CanonicalValue<String>>,
    /// Whole-receipt OCR confidence. Required by the schema; the engine
    /// always reports one for optical scans.
    pub ocr_confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_top_edge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_bottom_edge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ereceipt_order_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ereceipt_order_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ereceipt_raw_html: Option<String>,
    pub shipments: Vec<Shipment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_transaction_id: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal_matches: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ereceipt_email_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ereceipt_authenticated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instacart_shopper: Option<bool>,
    /// Whether this receipt originated from an e-receipt source.
    pub ereceipt: bool,
    /// Constituent sub-receipts of a multi-part e-mail receipt.
    pub component_receipts: Vec<Receipt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraudulent: Option<bool>,
    pub duplicate_receipt_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_match_guess: Option<String>,
    pub products_pending_lookup: i32,
    pub qualified_promotions: Vec<Promotion>,
    pub unqualified_promotions: Vec<Promotion>,
    pub ereceipt_additional_fees: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_type: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loyalty_for_banner: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ereceipt_fulfilled_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ereceipt_pos_system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ereceipt_sub_merchant: Option<String>,
    pub qualified_surveys: Vec<Survey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ereceipt_merchant_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ereceipt_email_subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ereceipt_shipping_costs: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_merchant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loyalty_program: Option<bool>,
    pub merchant_sources: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_terminal_id: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_transaction_id: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined_raw_text: Option<CanonicalValue<String>>,
}
