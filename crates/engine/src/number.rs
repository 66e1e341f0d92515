//! Numeric normalization for operator-typed amounts.
//!
//! Operators type numbers in whatever notation they are used to: `1,234.56`,
//! `1.234,56`, `12,5`, `Rp 15.000`. [`normalize`] turns any of these into a
//! canonical [`Decimal`] without a locale flag, by looking at where the
//! separators sit:
//!
//! - `,` and `.` both present: the rightmost one is the decimal separator.
//! - only `,`: a single comma followed by at most two digits is decimal,
//!   anything else is grouping.
//! - only `.`: always decimal.
//!
//! The transaction parser does **not** go through [`normalize`]: it strips
//! commas up front and then reads tokens with [`parse_plain_amount`],
//! [`parse_price`] and [`parse_quantity`].

use std::str::FromStr;

use rust_decimal::Decimal;

/// Converts a locale-ambiguous numeric string into a canonical signed decimal.
///
/// Returns `None` when nothing numeric is left after cleaning.
///
/// ```rust
/// use engine::normalize;
/// use rust_decimal::Decimal;
///
/// assert_eq!(normalize("1.234,56"), Some(Decimal::new(123_456, 2)));
/// assert_eq!(normalize("1,234"), Some(Decimal::new(1_234, 0)));
/// assert_eq!(normalize("12,5"), Some(Decimal::new(125, 1)));
/// assert_eq!(normalize("abc"), None);
/// ```
#[must_use]
pub fn normalize(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();

    let negative = cleaned.contains('-');
    let unsigned = cleaned.replace('-', "");
    let literal = resolve_separators(&unsigned);

    let value = parse_decimal_literal(&literal)?;
    Some(if negative { -value } else { value })
}

/// Rewrites `raw` so that it contains at most one `.` decimal point and no
/// grouping separators.
fn resolve_separators(raw: &str) -> String {
    match (raw.rfind(','), raw.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => {
            tracing::trace!(raw, "comma is the decimal separator");
            raw.replace('.', "").replace(',', ".")
        }
        (Some(_), Some(_)) => {
            tracing::trace!(raw, "dot is the decimal separator");
            raw.replace(',', "")
        }
        (Some(comma), None) => {
            let fraction = &raw[comma + 1..];
            if raw.matches(',').count() == 1 && fraction.len() <= 2 {
                tracing::trace!(raw, "single short comma read as decimal");
                raw.replacen(',', ".", 1)
            } else {
                tracing::trace!(raw, "commas read as grouping");
                raw.replace(',', "")
            }
        }
        _ => raw.to_string(),
    }
}

/// Parses digits with at most one `.`; `.5` and `5.` are accepted.
fn parse_decimal_literal(literal: &str) -> Option<Decimal> {
    if !literal.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        || !literal.bytes().any(|b| b.is_ascii_digit())
    {
        return None;
    }

    let (whole, fraction) = literal.split_once('.').unwrap_or((literal, ""));
    if fraction.contains('.') {
        return None;
    }

    let whole = if whole.is_empty() { "0" } else { whole };
    if fraction.is_empty() {
        Decimal::from_str(whole).ok()
    } else {
        Decimal::from_str(&format!("{whole}.{fraction}")).ok()
    }
}

/// Whether `token` has the plain amount shape `\d+(\.\d*)?`, regardless of
/// whether its value fits a `Decimal`.
#[must_use]
pub fn is_plain_amount_token(token: &str) -> bool {
    let (whole, fraction) = token.split_once('.').unwrap_or((token, ""));
    !whole.is_empty()
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

/// Whether `token` has the quantity shape `\d+`, regardless of whether its
/// value fits a `u32`.
#[must_use]
pub fn is_quantity_token(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Reads a bare amount token of the shape `123`, `123.` or `123.45`.
///
/// No sign, no grouping and no leading `.`: this is the token grammar of the
/// transaction parser. `None` when the shape is wrong or the value does not
/// fit a `Decimal`; use [`is_plain_amount_token`] to tell the two apart.
#[must_use]
pub fn parse_plain_amount(token: &str) -> Option<Decimal> {
    if !is_plain_amount_token(token) {
        return None;
    }
    parse_decimal_literal(token)
}

/// Reads an unsigned price token: digits with at most one `.`, so `.5` and
/// `5.` are accepted as well as `5.25`.
#[must_use]
pub fn parse_price(token: &str) -> Option<Decimal> {
    parse_decimal_literal(token)
}

/// Reads a bare non-negative integer token (`\d+`).
#[must_use]
pub fn parse_quantity(token: &str) -> Option<u32> {
    if !is_quantity_token(token) {
        return None;
    }
    token.parse().ok()
}
