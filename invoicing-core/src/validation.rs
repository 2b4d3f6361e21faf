//! Declarative validation for invoice forms.

use rust_decimal::Decimal;
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::InvoiceForm;

/// Largest quantity, unit price or discount accepted on submit (10^12).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Quantities, prices and discounts: zero or more, and at most [`MAX_AMOUNT`].
pub(crate) fn validate_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some(Cow::Borrowed("Must be zero or more"));
        return Err(err);
    }
    if *value > MAX_AMOUNT {
        let mut err = ValidationError::new("too_large");
        err.message = Some(Cow::Borrowed("Must be at most 1,000,000,000,000"));
        return Err(err);
    }
    Ok(())
}

pub(crate) fn validate_percentage(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO || *value > Decimal::ONE_HUNDRED {
        let mut err = ValidationError::new("percentage");
        err.message = Some(Cow::Borrowed("Tax rate must be between 0 and 100"));
        return Err(err);
    }
    Ok(())
}

impl InvoiceForm {
    /// Everything that must hold before the form may be submitted.
    pub fn validate_for_submit(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if self.due_date < self.issue_date {
            let mut err = ValidationError::new("due_before_issue");
            err.message = Some(Cow::Borrowed("Due date cannot be before the issue date"));
            errors.add("due_date", err);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(errors = %errors, "Invoice form failed validation");
            Err(errors)
        }
    }
}
