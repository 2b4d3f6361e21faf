//! Currency display formatting.
//!
//! Both supported locales (`en-US`, `en-KE`) group thousands with commas and
//! use a dot for decimals, so the difference between them is the symbol.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::Currency;

/// Format an amount for display.
///
/// KES amounts come back without a symbol (callers prefix "KSh"); every other
/// currency is rendered as US dollars with a `$` prefix.
pub fn format_amount(amount: Decimal, currency: Currency) -> String {
    let number = format_number(amount);
    match currency {
        Currency::Kes => number,
        Currency::Usd => prefix_symbol("$", &number),
    }
}

/// Format an amount with its currency symbol, e.g. `KSh 1,234.50`.
pub fn format_with_symbol(amount: Decimal, currency: Currency) -> String {
    match currency {
        Currency::Kes => {
            let number = format_number(amount);
            prefix_symbol("KSh ", &number)
        }
        Currency::Usd => format_amount(amount, currency),
    }
}

/// Two decimals, thousands grouped, `-` in front when negative.
pub fn format_number(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let mut magnitude = rounded.abs();
    magnitude.rescale(2);
    let digits = magnitude.to_string();
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let grouped = group_thousands(int_part);
    if negative {
        format!("-{}.{}", grouped, frac_part)
    } else {
        format!("{}.{}", grouped, frac_part)
    }
}

/// Insert `,` between every group of three integer digits.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn prefix_symbol(symbol: &str, number: &str) -> String {
    match number.strip_prefix('-') {
        Some(unsigned) => format!("-{}{}", symbol, unsigned),
        None => format!("{}{}", symbol, number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn usd_gets_dollar_prefix() {
        assert_eq!(format_amount(d("1234.5"), Currency::Usd), "$1,234.50");
        assert_eq!(format_amount(d("0"), Currency::Usd), "$0.00");
    }

    #[test]
    fn kes_has_no_symbol_until_asked() {
        assert_eq!(format_amount(d("1234.5"), Currency::Kes), "1,234.50");
        assert_eq!(format_with_symbol(d("1234.5"), Currency::Kes), "KSh 1,234.50");
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(format_number(d("10.005")), "10.01");
        assert_eq!(format_number(d("1000000")), "1,000,000.00");
        assert_eq!(format_number(d("999.994")), "999.99");
    }

    #[test]
    fn negative_amounts_keep_sign_before_symbol() {
        assert_eq!(format_amount(d("-58"), Currency::Usd), "-$58.00");
        assert_eq!(format_with_symbol(d("-1500"), Currency::Kes), "-KSh 1,500.00");
        assert_eq!(format_number(d("-0.001")), "0.00");
    }

    #[test]
    fn groups_digits() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }
}
