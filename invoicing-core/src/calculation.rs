//! Derived invoice arithmetic.
//!
//! All functions are pure and never panic. Discounts larger than the subtotal
//! are not clamped, so tax and total can come out negative. A result too large
//! for a `Decimal` saturates at `Decimal::MAX` (or `Decimal::MIN`); submit-time
//! validation caps inputs well below that.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::InvoiceLineItem;

/// Totals derived from the form; never stored on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    #[serde(with = "crate::input::lenient_decimal")]
    pub subtotal: Decimal,
    #[serde(with = "crate::input::lenient_decimal")]
    pub tax_amount: Decimal,
    #[serde(with = "crate::input::lenient_decimal")]
    pub total: Decimal,
}

impl InvoiceTotals {
    pub fn derive(items: &[InvoiceLineItem], discount: Decimal, tax_rate: Decimal) -> Self {
        let subtotal = compute_subtotal(items);
        let tax_amount = compute_tax(subtotal, discount, tax_rate);
        let total = compute_total(subtotal, discount, tax_amount);
        Self {
            subtotal,
            tax_amount,
            total,
        }
    }

    /// True when the discount has pushed the invoice below zero.
    pub fn is_negative(&self) -> bool {
        self.total < Decimal::ZERO
    }
}

fn saturated(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

fn mul(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b)
        .unwrap_or_else(|| saturated(a.is_sign_negative() != b.is_sign_negative()))
}

// Overflow on add or sub only happens when the result keeps `a`'s sign.
fn add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b)
        .unwrap_or_else(|| saturated(a.is_sign_negative()))
}

fn sub(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b)
        .unwrap_or_else(|| saturated(a.is_sign_negative()))
}

/// Write `quantity × unit_price` into the item's `total` and return it.
pub fn recompute_line_total(item: &mut InvoiceLineItem) -> Decimal {
    item.total = mul(item.quantity, item.unit_price);
    item.total
}

/// Sum of `quantity × unit_price`, ignoring whatever `total` currently holds.
pub fn compute_subtotal(items: &[InvoiceLineItem]) -> Decimal {
    items
        .iter()
        .map(|item| mul(item.quantity, item.unit_price))
        .fold(Decimal::ZERO, add)
}

pub fn compute_tax(subtotal: Decimal, discount: Decimal, tax_rate: Decimal) -> Decimal {
    let rate = tax_rate
        .checked_div(Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::ZERO);
    mul(sub(subtotal, discount), rate)
}

pub fn compute_total(subtotal: Decimal, discount: Decimal, tax_amount: Decimal) -> Decimal {
    add(sub(subtotal, discount), tax_amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn tax_and_total_follow_the_worked_example() {
        let tax = compute_tax(d("100"), d("10"), d("16"));
        assert_eq!(tax, d("14.4"));
        assert_eq!(compute_total(d("100"), d("10"), tax), d("104.4"));
    }

    #[test]
    fn subtotal_ignores_stale_line_totals() {
        let mut item = InvoiceLineItem::new("Audit", d("2"), d("300"));
        item.quantity = d("3");
        assert_eq!(item.total, d("600"));

        assert_eq!(compute_subtotal(&[item.clone()]), d("900"));
        assert_eq!(recompute_line_total(&mut item), d("900"));
        assert_eq!(item.total, d("900"));
    }

    #[test]
    fn empty_line_item_yields_zero_totals() {
        let totals = InvoiceTotals::derive(&[InvoiceLineItem::empty()], Decimal::ZERO, d("16"));
        assert_eq!(totals, InvoiceTotals::default());
    }

    #[test]
    fn discount_above_subtotal_is_not_clamped() {
        let totals = InvoiceTotals::derive(&[InvoiceLineItem::empty()], d("50"), d("16"));
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.tax_amount, d("-8"));
        assert_eq!(totals.total, d("-58"));
        assert!(totals.is_negative());
    }

    #[test]
    fn oversized_amounts_saturate_instead_of_panicking() {
        let huge = d("79228162514264337593543950335");
        let item = InvoiceLineItem::new("Big", huge, d("2"));
        assert_eq!(item.total, Decimal::MAX);

        let items = [item.clone(), item];
        let totals = InvoiceTotals::derive(&items, Decimal::ZERO, d("16"));
        assert_eq!(totals.subtotal, Decimal::MAX);
        assert_eq!(totals.total, Decimal::MAX);

        let refund = InvoiceTotals::derive(&[InvoiceLineItem::empty()], huge, d("100"));
        assert_eq!(refund.total, Decimal::MIN);
        assert!(refund.is_negative());
    }

    #[test]
    fn zero_tax_rate_means_no_tax() {
        let items = [InvoiceLineItem::new("Support", d("1"), d("250.75"))];
        let totals = InvoiceTotals::derive(&items, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(totals.tax_amount, Decimal::ZERO);
        assert_eq!(totals.total, d("250.75"));
    }
}
