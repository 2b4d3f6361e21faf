//! Explicit form mutations.
//!
//! Each edit is applied to the form and the totals are derived again right
//! after, replacing a watch-every-field reactive setup.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::calculation::InvoiceTotals;
use crate::error::InvoiceFormError;
use crate::models::{Currency, InvoiceForm, InvoiceLineItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientField {
    Name,
    Email,
    Phone,
    Company,
    Address,
}

/// A single change to an [`InvoiceForm`].
#[derive(Debug, Clone, PartialEq)]
pub enum InvoiceEdit {
    Client(ClientField, String),
    IssueDate(NaiveDate),
    DueDate(NaiveDate),
    Currency(Currency),
    TaxRate(Decimal),
    Discount(Decimal),
    Notes(String),
    PaymentInstructions(String),
    LineDescription { index: usize, value: String },
    LineQuantity { index: usize, value: Decimal },
    LineUnitPrice { index: usize, value: Decimal },
    AddItem,
    RemoveItem(usize),
    /// No change; only re-derive line totals and invoice totals.
    Recalculate,
}

impl InvoiceForm {
    /// Apply one edit, then recompute every line total and the invoice totals.
    ///
    /// A refused edit returns an error and leaves the form untouched.
    pub fn apply(&mut self, edit: InvoiceEdit) -> Result<InvoiceTotals, InvoiceFormError> {
        match edit {
            InvoiceEdit::Client(field, value) => {
                let client = &mut self.client;
                match field {
                    ClientField::Name => client.name = value,
                    ClientField::Email => client.email = value,
                    ClientField::Phone => client.phone = value,
                    ClientField::Company => client.company = value,
                    ClientField::Address => client.address = value,
                }
            }
            InvoiceEdit::IssueDate(date) => self.issue_date = date,
            InvoiceEdit::DueDate(date) => self.due_date = date,
            InvoiceEdit::Currency(currency) => self.currency = currency,
            InvoiceEdit::TaxRate(rate) => self.tax_rate = rate,
            InvoiceEdit::Discount(discount) => self.discount = discount,
            InvoiceEdit::Notes(notes) => self.notes = notes,
            InvoiceEdit::PaymentInstructions(text) => self.payment_instructions = text,
            InvoiceEdit::LineDescription { index, value } => {
                self.line_mut(index)?.description = value;
            }
            InvoiceEdit::LineQuantity { index, value } => {
                self.line_mut(index)?.quantity = value;
            }
            InvoiceEdit::LineUnitPrice { index, value } => {
                self.line_mut(index)?.unit_price = value;
            }
            InvoiceEdit::AddItem => {
                self.add_item();
            }
            InvoiceEdit::RemoveItem(index) => {
                self.remove_item(index)?;
            }
            InvoiceEdit::Recalculate => {}
        }

        self.recompute_line_totals();
        Ok(self.totals())
    }

    /// Append a blank line item and return its index.
    pub fn add_item(&mut self) -> usize {
        self.items.push(InvoiceLineItem::empty());
        self.items.len() - 1
    }

    /// Remove the line at `index`. The last remaining line cannot be removed.
    pub fn remove_item(&mut self, index: usize) -> Result<InvoiceLineItem, InvoiceFormError> {
        if index >= self.items.len() {
            return Err(InvoiceFormError::LineIndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        if self.items.len() == 1 {
            return Err(InvoiceFormError::LastLineItem);
        }
        Ok(self.items.remove(index))
    }

    fn line_mut(&mut self, index: usize) -> Result<&mut InvoiceLineItem, InvoiceFormError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(InvoiceFormError::LineIndexOutOfRange { index, len })
    }
}
