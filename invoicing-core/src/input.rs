//! Lenient parsing of form and API input.
//!
//! Form fields arrive as free text. An empty or unparsable number is read as
//! zero rather than rejected, so the totals can always be derived.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};
use std::str::FromStr;

use crate::error::InvoiceFormError;

/// Parse a monetary amount or quantity, falling back to zero.
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or(Decimal::ZERO)
}

/// Parse a percentage such as `16` or `16%`, falling back to zero.
pub fn parse_percentage(raw: &str) -> Decimal {
    parse_amount(raw.trim().trim_end_matches('%'))
}

/// Parse an ISO date, accepting a full timestamp and keeping its date part.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts.date());
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Parse a required date field from a form.
pub fn parse_date_field(raw: &str) -> Result<NaiveDate, InvoiceFormError> {
    parse_date(raw).ok_or_else(|| InvoiceFormError::InvalidDate(raw.trim().to_string()))
}

pub(crate) fn deserialize_lenient_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {raw}")))
}

/// Serde adapter: decimals go out as exact strings (`"1234.50"`) and come in
/// from numbers, numeric strings or null.
pub mod lenient_decimal {
    use super::*;
    use serde::Serializer;
    use std::fmt;

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LenientDecimalVisitor)
    }

    struct LenientDecimalVisitor;

    impl<'de> de::Visitor<'de> for LenientDecimalVisitor {
        type Value = Decimal;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number, a numeric string or null")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
            Ok(Decimal::from_f64(v).unwrap_or(Decimal::ZERO))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
            Ok(parse_amount(v))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Decimal, E> {
            Ok(Decimal::ZERO)
        }

        fn visit_none<E: de::Error>(self) -> Result<Decimal, E> {
            Ok(Decimal::ZERO)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_numbers_read_as_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("   "), Decimal::ZERO);
        assert_eq!(parse_amount("abc"), Decimal::ZERO);
        assert_eq!(parse_amount("NaN"), Decimal::ZERO);
    }

    #[test]
    fn parses_grouped_and_plain_amounts() {
        assert_eq!(parse_amount("1,234.50"), Decimal::new(123450, 2));
        assert_eq!(parse_amount(" 42 "), Decimal::from(42));
        assert_eq!(parse_percentage("16%"), Decimal::from(16));
    }

    #[derive(serde::Serialize, serde::Deserialize)]
    struct Amount(#[serde(with = "lenient_decimal")] Decimal);

    #[test]
    fn decimals_keep_every_digit_through_json() {
        let exact: Decimal = "12345678901234567.89".parse().unwrap();

        let json = serde_json::to_string(&Amount(exact)).unwrap();
        assert_eq!(json, "\"12345678901234567.89\"");

        let Amount(back) = serde_json::from_str(&json).unwrap();
        assert_eq!(back, exact);
        assert_eq!(back.to_string(), "12345678901234567.89");
    }

    #[test]
    fn dates_accept_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        assert_eq!(parse_date("2026-02-01"), Some(expected));
        assert_eq!(parse_date("2026-02-01T10:30:00.000Z"), Some(expected));
        assert_eq!(parse_date("2026-02-01T10:30:00"), Some(expected));
        assert_eq!(parse_date("soon"), None);
        assert_eq!(
            parse_date_field(" soon "),
            Err(InvoiceFormError::InvalidDate("soon".to_string()))
        );
    }
}
