//! Normalization of raw engine payloads into the canonical receipt.
//!
//! The mapping is pure and total: the same raw payload always yields the
//! same canonical receipt. Confidence-scored scalars wrap in
//! [`CanonicalValue`]; absent collections become empty ones; recursive
//! fields (component receipts, possible/sub products) map with the same
//! functions under an explicit depth cap so a malformed payload turns into a
//! parse error instead of unbounded recursion.

use crate::decimal::LosslessDecimal;
use crate::items::{
    Coupon, PaymentMethod, Promotion, Shipment, Survey, SurveyAnswer, SurveyQuestion,
    SurveyResponse,
};
use crate::product::{AdditionalLine, Product};
use crate::receipt::{Receipt, RetailerIdentity};
use capture_core::{CanonicalValue, CaptureError, Result};
use capture_engines::raw::{
    RawAdditionalLine, RawCoupon, RawFloatValue, RawPaymentMethod, RawProduct, RawPromotion,
    RawScanResults, RawShipment, RawStringValue, RawSurvey, RawSurveyAnswer, RawSurveyQuestion,
    RawSurveyResponse,
};

/// Deepest nesting accepted in one payload, shared between component
/// receipts and product recursion. Real payloads stay in single digits.
pub const MAX_DEPTH: usize = 32;

/// Map one raw engine payload to the canonical receipt.
pub fn normalize(raw: &RawScanResults) -> Result<Receipt> {
    receipt_at_depth(raw, 0)
}

fn check_depth(depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(CaptureError::Parse(format!(
            "payload nesting exceeds {MAX_DEPTH} levels"
        )));
    }
    Ok(())
}

fn receipt_at_depth(raw: &RawScanResults, depth: usize) -> Result<Receipt> {
    check_depth(depth)?;

    let component_receipts = raw
        .component_emails
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|r| receipt_at_depth(r, depth + 1))
        .collect::<Result<Vec<_>>>()?;

    let products = products_at_depth(raw.products.as_deref(), depth)?;
    let shipments = raw
        .shipments
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|s| shipment_at_depth(s, depth))
        .collect::<Result<Vec<_>>>()?;

    Ok(Receipt {
        receipt_date: scored_string(raw.receipt_date.as_ref()),
        receipt_time: scored_string(raw.receipt_time.as_ref()),
        retailer: raw.retailer_id.map(|id| RetailerIdentity {
            id,
            banner_id: Some(id),
        }),
        products,
        coupons: raw
            .coupons
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(coupon)
            .collect(),
        total: scored_float(raw.total.as_ref()),
        tip: scored_float(raw.tip.as_ref()),
        subtotal: scored_float(raw.subtotal.as_ref()),
        taxes: scored_float(raw.taxes.as_ref()),
        store_number: scored_string(raw.store_number.as_ref()),
        merchant_name: scored_string(raw.merchant_name.as_ref()),
        store_address: scored_string(raw.store_address.as_ref()),
        store_city: scored_string(raw.store_city.as_ref()),
        receipt_id: raw.receipt_id.clone(),
        store_state: scored_string(raw.store_state.as_ref()),
        store_zip: scored_string(raw.store_zip.as_ref()),
        store_phone: scored_string(raw.store_phone.as_ref()),
        cashier_id: scored_string(raw.cashier_id.as_ref()),
        transaction_id: scored_string(raw.transaction_id.as_ref()),
        register_id: scored_string(raw.register_id.as_ref()),
        payment_methods: raw
            .payment_methods
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(payment_method)
            .collect(),
        tax_id: scored_string(raw.tax_id.as_ref()),
        mall_name: scored_string(raw.mall_name.as_ref()),
        last4cc: scored_string(raw.last4cc.as_ref()),
        ocr_confidence: raw.ocr_confidence,
        found_top_edge: raw.found_top_edge,
        found_bottom_edge: raw.found_bottom_edge,
        ereceipt_order_number: raw.ereceipt_order_number.clone(),
        ereceipt_order_status: raw.ereceipt_order_status.clone(),
        ereceipt_raw_html: raw.ereceipt_raw_html.clone(),
        shipments,
        long_transaction_id: scored_string(raw.long_transaction_id.as_ref()),
        subtotal_matches: raw.subtotal_matches,
        ereceipt_email_provider: raw.ereceipt_email_provider.clone(),
        ereceipt_authenticated: raw.ereceipt_authenticated,
        instacart_shopper: raw.instacart_shopper,
        ereceipt: raw.ereceipt_valid,
        component_receipts,
        duplicate: raw.duplicate,
        fraudulent: raw.fraudulent,
        duplicate_receipt_ids: raw.duplicate_receipt_ids.clone().unwrap_or_default(),
        merchant_match_guess: raw.merchant_match_guess.clone(),
        products_pending_lookup: raw.products_pending_lookup,
        qualified_promotions: raw
            .qualified_promotions
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(promotion)
            .collect(),
        unqualified_promotions: raw
            .unqualified_promotions
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(promotion)
            .collect(),
        ereceipt_additional_fees: raw.ereceipt_additional_fees.clone().unwrap_or_default(),
        purchase_type: plain_string(raw.purchase_type.as_ref()),
        channel: scored_string(raw.channel.as_ref()),
        loyalty_for_banner: raw.loyalty_for_banner,
        ereceipt_fulfilled_by: raw.ereceipt_fulfilled_by.clone(),
        ereceipt_pos_system: raw.ereceipt_pos_system.clone(),
        ereceipt_sub_merchant: raw.ereceipt_sub_merchant.clone(),
        qualified_surveys: raw
            .qualified_surveys
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(survey)
            .collect(),
        barcode: raw.barcode.clone(),
        ereceipt_merchant_email: raw.ereceipt_merchant_email.clone(),
        ereceipt_email_subject: raw.ereceipt_email_subject.clone(),
        ereceipt_shipping_costs: raw.ereceipt_shipping_costs,
        currency_code: raw.currency_code.clone(),
        client_merchant_name: raw.client_merchant_name.clone(),
        loyalty_program: raw.loyalty_program,
        merchant_sources: raw.merchant_sources.clone().unwrap_or_default(),
        payment_terminal_id: scored_string(raw.payment_terminal_id.as_ref()),
        payment_transaction_id: scored_string(raw.payment_transaction_id.as_ref()),
        combined_raw_text: plain_string(raw.combined_raw_text.as_ref()),
    })
}

fn products_at_depth(raw: Option<&[RawProduct]>, depth: usize) -> Result<Vec<Product>> {
    raw.unwrap_or_default()
        .iter()
        .map(|p| product_at_depth(p, depth))
        .collect()
}

fn product_at_depth(raw: &RawProduct, depth: usize) -> Result<Product> {
    check_depth(depth)?;

    let possible_products = raw
        .possible_products
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|p| product_at_depth(p, depth + 1))
        .collect::<Result<Vec<_>>>()?;
    let sub_products = raw
        .sub_products
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|p| product_at_depth(p, depth + 1))
        .collect::<Result<Vec<_>>>()?;

    Ok(Product {
        product_number: scored_string(raw.product_number.as_ref()),
        description: plain_string(raw.description.as_ref()),
        quantity: scored_float(raw.quantity.as_ref()),
        unit_price: scored_float(raw.unit_price.as_ref()),
        unit_of_measure: scored_string(raw.unit_of_measure.as_ref()),
        total_price: scored_float(raw.total_price.as_ref()),
        full_price: scored_float(raw.full_price.as_ref()),
        product_name: raw.product_name.clone(),
        brand: raw.brand.clone(),
        category: raw.category.clone(),
        size: raw.size.clone(),
        rewards_group: raw.rewards_group.clone(),
        competitor_rewards_group: raw.competitor_rewards_group.clone(),
        upc: raw.upc.clone(),
        image_url: raw.image_url.clone(),
        shipping_status: raw.shipping_status.clone(),
        additional_lines: raw
            .additional_lines
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(additional_line)
            .collect(),
        price_after_coupons: scored_float(raw.price_after_coupons.as_ref()),
        voided: raw.voided,
        probability: raw.probability,
        sensitive: raw.sensitive,
        possible_products,
        sub_products,
        added: raw.added,
        fuel_type: raw.fuel_type.clone(),
        description_prefix: scored_string(raw.description_prefix.as_ref()),
        description_postfix: scored_string(raw.description_postfix.as_ref()),
        sku_prefix: scored_string(raw.sku_prefix.as_ref()),
        sku_postfix: scored_string(raw.sku_postfix.as_ref()),
        attributes: raw.attributes.clone().unwrap_or_default(),
        sector: raw.sector.clone(),
        department: raw.department.clone(),
        major_category: raw.major_category.clone(),
        sub_category: raw.sub_category.clone(),
        item_type: raw.item_type.clone(),
    })
}

fn shipment_at_depth(raw: &RawShipment, depth: usize) -> Result<Shipment> {
    Ok(Shipment {
        status: raw.status.clone(),
        products: products_at_depth(raw.products.as_deref(), depth)?,
    })
}

fn additional_line(raw: &RawAdditionalLine) -> AdditionalLine {
    AdditionalLine {
        line_type: scored_string(raw.line_type.as_ref()),
        text: scored_string(raw.text.as_ref()),
        line_number: raw.line_number,
    }
}

fn coupon(raw: &RawCoupon) -> Coupon {
    Coupon {
        coupon_type: raw.coupon_type.clone(),
        amount: scored_float(raw.amount.as_ref()),
        sku: scored_string(raw.sku.as_ref()),
        description: plain_string(raw.description.as_ref()),
        related_product_index: raw.related_product_index,
    }
}

fn payment_method(raw: &RawPaymentMethod) -> PaymentMethod {
    PaymentMethod {
        payment_method: scored_string(raw.method.as_ref()),
        card_type: scored_string(raw.card_type.as_ref()),
        card_issuer: scored_string(raw.card_issuer.as_ref()),
        amount: scored_float(raw.amount.as_ref()),
    }
}

fn promotion(raw: &RawPromotion) -> Promotion {
    Promotion {
        slug: raw.slug.clone(),
        reward: raw.reward_value,
        reward_currency: raw.reward_currency.clone(),
        error_code: raw.error_code,
        error_message: raw.error_message.clone(),
        related_product_indexes: decimal_list(raw.related_product_indexes.as_deref()),
        qualifications: raw
            .qualifications
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|tuple| decimal_list(Some(tuple.as_slice())))
            .collect(),
    }
}

fn survey(raw: &RawSurvey) -> Survey {
    Survey {
        slug: raw.slug.clone(),
        reward_value: raw.reward_value.map(|v| format!("{v:.2}")),
        start_date: raw.start_date.clone(),
        end_date: raw.end_date.clone(),
        questions: raw
            .questions
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(survey_question)
            .collect(),
    }
}

fn survey_question(raw: &RawSurveyQuestion) -> SurveyQuestion {
    SurveyQuestion {
        text: raw.text.clone(),
        question_type: raw.question_type.clone(),
        answers: raw
            .answers
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(survey_answer)
            .collect(),
        multiple_answers: raw.multiple_answers,
        user_response: raw.user_response.as_ref().map(survey_response),
    }
}

fn survey_answer(raw: &RawSurveyAnswer) -> SurveyAnswer {
    SurveyAnswer {
        text: raw.text.clone(),
    }
}

fn survey_response(raw: &RawSurveyResponse) -> SurveyResponse {
    SurveyResponse {
        answers_selected: decimal_list(raw.answers_selected.as_deref()),
        free_text: raw.free_text.clone(),
    }
}

fn decimal_list(raw: Option<&[String]>) -> Vec<LosslessDecimal> {
    raw.unwrap_or_default()
        .iter()
        .map(|s| LosslessDecimal::from(s.clone()))
        .collect()
}

fn scored_string(raw: Option<&RawStringValue>) -> Option<CanonicalValue<String>> {
    raw.map(|v| CanonicalValue {
        value: v.value.clone(),
        confidence: v.confidence,
    })
}

fn scored_float(raw: Option<&RawFloatValue>) -> Option<CanonicalValue<f32>> {
    raw.map(|v| CanonicalValue {
        value: v.value,
        confidence: v.confidence,
    })
}

fn plain_string(raw: Option<&String>) -> Option<CanonicalValue<String>> {
    raw.map(|s| CanonicalValue::plain(s.clone()))
}
