//! End-to-end behaviour of the invoice form: edits in, totals out.

use chrono::NaiveDate;
use invoicing_core::{
    format_amount, format_with_symbol, ClientField, Currency, Decimal, InvoiceEdit, InvoiceForm,
    InvoiceFormError, InvoiceLineItem,
};

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn draft() -> InvoiceForm {
    InvoiceForm::new_draft(NaiveDate::from_ymd_opt(2026, 5, 4).unwrap())
}

#[test]
fn worked_example_from_line_items() {
    let mut form = draft();
    form.apply(InvoiceEdit::LineQuantity {
        index: 0,
        value: d("2"),
    })
    .unwrap();
    form.apply(InvoiceEdit::LineUnitPrice {
        index: 0,
        value: d("50"),
    })
    .unwrap();
    let totals = form.apply(InvoiceEdit::Discount(d("10"))).unwrap();

    assert_eq!(totals.subtotal, d("100"));
    assert_eq!(totals.tax_amount, d("14.4"));
    assert_eq!(totals.total, d("104.4"));
    assert_eq!(format_amount(totals.total, form.currency), "$104.40");
}

#[test]
fn line_totals_track_every_quantity_and_price_edit() {
    let mut form = draft();
    form.apply(InvoiceEdit::AddItem).unwrap();
    form.apply(InvoiceEdit::AddItem).unwrap();

    let edits = [
        InvoiceEdit::LineQuantity { index: 0, value: d("3") },
        InvoiceEdit::LineUnitPrice { index: 0, value: d("19.99") },
        InvoiceEdit::LineUnitPrice { index: 1, value: d("1000") },
        InvoiceEdit::LineQuantity { index: 2, value: d("0.5") },
        InvoiceEdit::LineUnitPrice { index: 2, value: d("80") },
        InvoiceEdit::LineQuantity { index: 1, value: d("0") },
    ];

    for edit in edits {
        let totals = form.apply(edit).unwrap();
        for item in &form.items {
            assert_eq!(item.total, item.quantity * item.unit_price);
        }
        let expected: Decimal = form.items.iter().map(|i| i.quantity * i.unit_price).sum();
        assert_eq!(totals.subtotal, expected);
    }

    assert_eq!(form.totals().subtotal, d("99.97"));
}

#[test]
fn item_count_never_drops_below_one() {
    let mut form = draft();
    form.apply(InvoiceEdit::AddItem).unwrap();

    form.apply(InvoiceEdit::RemoveItem(0)).unwrap();
    assert_eq!(form.items.len(), 1);

    for _ in 0..3 {
        assert_eq!(
            form.apply(InvoiceEdit::RemoveItem(0)),
            Err(InvoiceFormError::LastLineItem)
        );
        assert_eq!(form.items.len(), 1);
    }
}

#[test]
fn empty_invoice_with_discount_goes_negative() {
    let mut form = draft();
    let totals = form.apply(InvoiceEdit::Recalculate).unwrap();
    assert_eq!(totals.subtotal, Decimal::ZERO);
    assert_eq!(totals.tax_amount, Decimal::ZERO);
    assert_eq!(totals.total, Decimal::ZERO);

    let totals = form.apply(InvoiceEdit::Discount(d("25"))).unwrap();
    assert_eq!(totals.tax_amount, d("-4"));
    assert_eq!(totals.total, d("-29"));
}

#[test]
fn kes_invoice_formats_with_shilling_prefix() {
    let mut form = draft();
    form.apply(InvoiceEdit::Currency(Currency::Kes)).unwrap();
    form.items[0] = InvoiceLineItem::new("Retainer", d("1"), d("1234.5"));
    let totals = form.apply(InvoiceEdit::TaxRate(Decimal::ZERO)).unwrap();

    assert_eq!(format_amount(totals.total, form.currency), "1,234.50");
    assert_eq!(format_with_symbol(totals.total, form.currency), "KSh 1,234.50");
}

#[test]
fn client_edits_feed_validation() {
    let mut form = draft();
    form.items[0].description = "Consulting".into();
    assert!(form.validate_for_submit().is_err());

    form.apply(InvoiceEdit::Client(ClientField::Name, "Jane Wanjiru".into()))
        .unwrap();
    form.apply(InvoiceEdit::Client(
        ClientField::Email,
        "jane@example.co.ke".into(),
    ))
    .unwrap();

    assert!(form.validate_for_submit().is_ok());
}
