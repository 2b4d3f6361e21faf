use chrono::NaiveDate;
use invoicing_core::input::lenient_decimal;
use invoicing_core::{
    parse_amount, parse_date_field, parse_percentage, ClientDetails, Currency, Decimal,
    InvoiceEdit, InvoiceForm, InvoiceLineItem,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A saved invoice as returned by `/api/invoices/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub form: InvoiceForm,
}

impl InvoiceRecord {
    /// Number shown to people and used in the PDF file name.
    pub fn display_number(&self) -> &str {
        if self.invoice_number.is_empty() {
            &self.id
        } else {
            &self.invoice_number
        }
    }
}

/// Create and update responses; only the identifier is guaranteed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedInvoice {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub status: String,
}

impl SavedInvoice {
    /// The full record as saved: what was sent plus what the API assigned.
    pub fn into_record(self, form: InvoiceForm) -> InvoiceRecord {
        InvoiceRecord {
            id: self.id,
            invoice_number: self.invoice_number,
            status: self.status,
            form,
        }
    }
}

/// A row in the invoice list.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub client: ClientDetails,
    #[serde(default)]
    pub issue_date: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default, with = "lenient_decimal")]
    pub total: Decimal,
    #[serde(default)]
    pub status: String,
}

impl InvoiceSummary {
    pub fn total_label(&self) -> String {
        invoicing_core::format_with_symbol(self.total, self.currency)
    }

    pub fn issued_label(&self) -> String {
        invoicing_core::parse_date(&self.issue_date)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    pub fn status_label(&self) -> &str {
        if self.status.is_empty() {
            "draft"
        } else {
            &self.status
        }
    }
}

/// Editor fields as posted by the invoice form.
///
/// Line items arrive as repeated `item_*` keys, one value per row, in row
/// order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InvoiceFormInput {
    pub id: Option<String>,
    pub invoice_number: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub client_company: String,
    pub client_address: String,
    pub issue_date: String,
    pub due_date: String,
    pub currency: String,
    pub tax_rate: String,
    pub discount: String,
    pub notes: String,
    pub payment_instructions: String,
    pub item_description: Vec<String>,
    pub item_quantity: Vec<String>,
    pub item_unit_price: Vec<String>,
    pub action: Option<String>,
}

/// Form state rebuilt from a post, plus messages for dates that could not be
/// read.
#[derive(Debug, Clone)]
pub struct ParsedInvoiceForm {
    pub form: InvoiceForm,
    pub field_errors: BTreeMap<String, String>,
}

impl InvoiceFormInput {
    /// Saved invoices carry their ID; blank values mean a new invoice.
    pub fn record_id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    /// Rebuild the form with the lenient numeric rules; unreadable dates fall
    /// back to the draft defaults and are reported.
    pub fn to_form(&self, today: NaiveDate) -> ParsedInvoiceForm {
        let draft = InvoiceForm::new_draft(today);
        let mut field_errors = BTreeMap::new();

        let mut date = |field: &str, raw: &str, fallback: NaiveDate| match parse_date_field(raw) {
            Ok(date) => date,
            Err(e) => {
                field_errors.insert(field.to_string(), e.to_string());
                fallback
            }
        };
        let issue_date = date("issue_date", &self.issue_date, draft.issue_date);
        let due_date = date("due_date", &self.due_date, draft.due_date);

        let rows = self
            .item_description
            .len()
            .max(self.item_quantity.len())
            .max(self.item_unit_price.len());
        let cell = |values: &[String], index: usize| values.get(index).cloned().unwrap_or_default();

        let mut items: Vec<InvoiceLineItem> = (0..rows)
            .map(|i| {
                InvoiceLineItem::new(
                    cell(&self.item_description, i).trim(),
                    parse_amount(&cell(&self.item_quantity, i)),
                    parse_amount(&cell(&self.item_unit_price, i)),
                )
            })
            .collect();
        if items.is_empty() {
            items.push(InvoiceLineItem::empty());
        }

        let form = InvoiceForm {
            client: ClientDetails {
                name: self.client_name.trim().to_string(),
                email: self.client_email.trim().to_string(),
                phone: self.client_phone.trim().to_string(),
                company: self.client_company.trim().to_string(),
                address: self.client_address.trim().to_string(),
            },
            issue_date,
            due_date,
            currency: Currency::from_code(&self.currency),
            items,
            tax_rate: parse_percentage(&self.tax_rate),
            discount: parse_amount(&self.discount),
            notes: self.notes.trim().to_string(),
            payment_instructions: self.payment_instructions.trim().to_string(),
        };

        ParsedInvoiceForm { form, field_errors }
    }
}

/// The edit requested by an editor button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Recalculate,
    AddItem,
    RemoveItem(usize),
}

impl EditorAction {
    /// `recalculate`, `add_item` or `remove_item:{index}`; anything else
    /// recalculates.
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw == "add_item" {
            return EditorAction::AddItem;
        }
        raw.strip_prefix("remove_item:")
            .and_then(|index| index.parse().ok())
            .map(EditorAction::RemoveItem)
            .unwrap_or(EditorAction::Recalculate)
    }

    pub fn to_edit(self) -> InvoiceEdit {
        match self {
            EditorAction::Recalculate => InvoiceEdit::Recalculate,
            EditorAction::AddItem => InvoiceEdit::AddItem,
            EditorAction::RemoveItem(index) => InvoiceEdit::RemoveItem(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn input() -> InvoiceFormInput {
        InvoiceFormInput {
            client_name: "Acme Ltd".into(),
            client_email: "billing@acme.co".into(),
            issue_date: "2026-03-01".into(),
            due_date: "2026-03-31".into(),
            currency: "KES".into(),
            tax_rate: "16".into(),
            discount: "50".into(),
            item_description: vec!["Design".into(), "Hosting".into()],
            item_quantity: vec!["2".into(), "1".into()],
            item_unit_price: vec!["100".into(), "300".into()],
            ..Default::default()
        }
    }

    #[test]
    fn rebuilds_rows_in_order() {
        let parsed = input().to_form(today());
        assert!(parsed.field_errors.is_empty());
        let form = parsed.form;
        assert_eq!(form.currency, Currency::Kes);
        assert_eq!(form.items.len(), 2);
        assert_eq!(form.items[0].total, Decimal::from(200));
        assert_eq!(form.items[1].description, "Hosting");
        assert_eq!(form.totals().total, Decimal::from(522));
    }

    #[test]
    fn malformed_numbers_count_as_zero() {
        let raw = InvoiceFormInput {
            tax_rate: "abc".into(),
            item_quantity: vec!["".into(), "x".into()],
            ..input()
        };
        let form = raw.to_form(today()).form;
        assert_eq!(form.tax_rate, Decimal::ZERO);
        assert_eq!(form.items[0].quantity, Decimal::ZERO);
        assert_eq!(form.totals().subtotal, Decimal::ZERO);
    }

    #[test]
    fn bad_dates_fall_back_and_are_reported() {
        let raw = InvoiceFormInput {
            due_date: "soon".into(),
            ..input()
        };
        let parsed = raw.to_form(today());
        assert!(parsed.field_errors.contains_key("due_date"));
        assert_eq!(parsed.form.due_date, NaiveDate::from_ymd_opt(2026, 3, 31).unwrap());
    }

    #[test]
    fn empty_post_keeps_one_line() {
        let parsed = InvoiceFormInput::default().to_form(today());
        assert_eq!(parsed.form.items.len(), 1);
    }

    #[test]
    fn parses_editor_actions() {
        assert_eq!(EditorAction::parse(Some("add_item")), EditorAction::AddItem);
        assert_eq!(
            EditorAction::parse(Some("remove_item:2")),
            EditorAction::RemoveItem(2)
        );
        assert_eq!(
            EditorAction::parse(Some("remove_item:x")),
            EditorAction::Recalculate
        );
        assert_eq!(EditorAction::parse(None), EditorAction::Recalculate);
    }

    #[test]
    fn saved_invoice_needs_only_an_id() {
        let saved: SavedInvoice = serde_json::from_value(json!({ "_id": "inv_9" })).unwrap();
        let record = saved.into_record(InvoiceForm::new_draft(today()));
        assert_eq!(record.id, "inv_9");
        assert_eq!(record.display_number(), "inv_9");
        assert_eq!(record.form.items.len(), 1);
    }

    #[test]
    fn record_reads_flattened_form() {
        let record: InvoiceRecord = serde_json::from_value(json!({
            "_id": "inv_1",
            "invoiceNumber": "INV-0001",
            "client": {"name": "Acme", "email": "a@acme.co"},
            "issueDate": "2026-03-01T00:00:00.000Z",
            "dueDate": "2026-03-31",
            "currency": "USD",
            "items": [{"description": "Work", "quantity": 1, "unitPrice": "250.00", "total": 250}],
            "taxRate": 16,
            "discount": 0,
            "subtotal": 250,
            "total": 290
        }))
        .unwrap();
        assert_eq!(record.id, "inv_1");
        assert_eq!(record.display_number(), "INV-0001");
        assert_eq!(record.form.items[0].unit_price, Decimal::from(250));
    }
}
