//! Line item model for the Invoice Maker.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::validate_amount;

/// One row of an invoice.
///
/// `total` is derived from `quantity × unit_price` and is only ever written by
/// [`crate::calculation::recompute_line_total`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineItem {
    #[serde(default)]
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[serde(default, with = "crate::input::lenient_decimal")]
    #[validate(custom(function = "validate_amount"))]
    pub quantity: Decimal,

    #[serde(default, with = "crate::input::lenient_decimal")]
    #[validate(custom(function = "validate_amount"))]
    pub unit_price: Decimal,

    #[serde(default, with = "crate::input::lenient_decimal")]
    pub total: Decimal,
}

impl InvoiceLineItem {
    /// A blank row: quantity 1, unit price 0.
    pub fn empty() -> Self {
        Self {
            description: String::new(),
            quantity: Decimal::ONE,
            unit_price: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }

    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        let mut item = Self {
            description: description.into(),
            quantity,
            unit_price,
            total: Decimal::ZERO,
        };
        crate::calculation::recompute_line_total(&mut item);
        item
    }
}

impl Default for InvoiceLineItem {
    fn default() -> Self {
        Self::empty()
    }
}
