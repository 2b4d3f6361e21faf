//! invoicing-core: form state and derived totals for the Invoice Maker.
//!
//! Everything in this crate is synchronous and free of I/O. The web frontend
//! rebuilds an [`InvoiceForm`] from each posted form, applies one
//! [`InvoiceEdit`] and renders the [`InvoiceTotals`] it gets back.

pub mod calculation;
pub mod edit;
pub mod error;
pub mod format;
pub mod input;
pub mod models;
pub mod validation;

pub use calculation::{
    compute_subtotal, compute_tax, compute_total, recompute_line_total, InvoiceTotals,
};
pub use edit::{ClientField, InvoiceEdit};
pub use error::InvoiceFormError;
pub use format::{format_amount, format_with_symbol};
pub use input::{parse_amount, parse_date, parse_date_field, parse_percentage};
pub use models::{ClientDetails, Currency, InvoiceForm, InvoiceLineItem, InvoicePayload};
pub use rust_decimal::Decimal;
