//! Errors for invoice form mutations.

use thiserror::Error;

/// A refused form edit. The form is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvoiceFormError {
    #[error("An invoice needs at least one line item")]
    LastLineItem,

    #[error("Line item {index} does not exist (invoice has {len} items)")]
    LineIndexOutOfRange { index: usize, len: usize },

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
