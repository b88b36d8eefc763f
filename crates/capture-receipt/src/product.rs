//! Canonical product line items.

use capture_core::CanonicalValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A product on the canonical receipt.
///
/// Ambiguous OCR candidates (`possible_products`) and bundle decomposition
/// (`sub_products`) recurse with the same shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_number: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<CanonicalValue<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<CanonicalValue<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_of_measure: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<CanonicalValue<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_price: Option<CanonicalValue<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// Brand taxonomy as reported by product intelligence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewards_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competitor_rewards_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_status: Option<String>,
    pub additional_lines: Vec<AdditionalLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_after_coupons: Option<CanonicalValue<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voided: Option<bool>,
    /// Engine probability that this line is a real product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,
    /// Ambiguous OCR candidates for this line.
    pub possible_products: Vec<Product>,
    /// Bundle decomposition.
    pub sub_products: Vec<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_prefix: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_postfix: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku_prefix: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku_postfix: Option<CanonicalValue<String>>,
    pub attributes: Vec<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
}

/// An extra text line attached to a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalLine {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub line_type: Option<CanonicalValue<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<CanonicalValue<String>>,
    pub line_number: i32,
}
