//! Domain models for the Invoice Maker.

mod client;
mod currency;
mod form;
mod line_item;

pub use client::ClientDetails;
pub use currency::Currency;
pub use form::{InvoiceForm, InvoicePayload, DEFAULT_PAYMENT_TERM_DAYS, DEFAULT_TAX_RATE};
pub use line_item::InvoiceLineItem;
