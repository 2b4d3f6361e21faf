//! Invoice form model.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{ClientDetails, Currency, InvoiceLineItem};
use crate::calculation::InvoiceTotals;
use crate::input::deserialize_lenient_date;
use crate::validation::{validate_amount, validate_percentage};

/// Tax rate applied to new invoices, in percent.
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(16, 0, 0, false, 0);

/// Days between issue date and due date on new invoices.
pub const DEFAULT_PAYMENT_TERM_DAYS: i64 = 30;

/// The editable state behind the Invoice Maker page.
///
/// Totals are never stored here; call [`InvoiceForm::totals`] to derive them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceForm {
    #[serde(default)]
    #[validate(nested)]
    pub client: ClientDetails,

    #[serde(deserialize_with = "deserialize_lenient_date")]
    pub issue_date: NaiveDate,

    #[serde(deserialize_with = "deserialize_lenient_date")]
    pub due_date: NaiveDate,

    #[serde(default)]
    pub currency: Currency,

    #[validate(length(min = 1, message = "Add at least one line item"), nested)]
    pub items: Vec<InvoiceLineItem>,

    #[serde(default, with = "crate::input::lenient_decimal")]
    #[validate(custom(function = "validate_percentage"))]
    pub tax_rate: Decimal,

    #[serde(default, with = "crate::input::lenient_decimal")]
    #[validate(custom(function = "validate_amount"))]
    pub discount: Decimal,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub payment_instructions: String,
}

impl InvoiceForm {
    /// A fresh invoice: issued today, due in 30 days, one blank line, 16% tax.
    pub fn new_draft(today: NaiveDate) -> Self {
        Self {
            client: ClientDetails::default(),
            issue_date: today,
            due_date: today + Duration::days(DEFAULT_PAYMENT_TERM_DAYS),
            currency: Currency::default(),
            items: vec![InvoiceLineItem::empty()],
            tax_rate: DEFAULT_TAX_RATE,
            discount: Decimal::ZERO,
            notes: String::new(),
            payment_instructions: String::new(),
        }
    }

    /// Derive subtotal, tax and total from the current inputs.
    pub fn totals(&self) -> InvoiceTotals {
        InvoiceTotals::derive(&self.items, self.discount, self.tax_rate)
    }

    /// Bring every line's stored `total` in line with its quantity and price.
    pub fn recompute_line_totals(&mut self) {
        for item in &mut self.items {
            crate::calculation::recompute_line_total(item);
        }
    }

    /// Form plus derived totals, as submitted to the invoices API.
    pub fn to_payload(&self) -> InvoicePayload {
        let mut form = self.clone();
        form.recompute_line_totals();
        let totals = form.totals();
        InvoicePayload { form, totals }
    }
}

/// Body for create (POST) and update (PUT) calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoicePayload {
    #[serde(flatten)]
    pub form: InvoiceForm,

    #[serde(flatten)]
    pub totals: InvoiceTotals,
}
