//! Rendering of canonical amounts for display.
//!
//! Rounding is half-to-even, grouping uses `,` and the decimal point is `.`.

use rust_decimal::Decimal;

/// Renders `amount` as `<symbol> 1,234.56` with `decimal_places` fraction digits.
///
/// ```rust
/// use engine::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(1_234_567, 0), "Rp", 0), "Rp 1,234,567");
/// assert_eq!(format_currency(Decimal::new(-123_456, 2), "$", 2), "$ -1,234.56");
/// ```
#[must_use]
pub fn format_currency(amount: Decimal, symbol: &str, decimal_places: u32) -> String {
    format!("{symbol} {}", group_thousands(amount, decimal_places))
}

/// Renders large amounts with a `K`, `M` or `B` suffix and one decimal.
///
/// Only the largest threshold reached applies; below a thousand this is
/// [`format_currency`] with no decimals.
#[must_use]
pub fn format_compact_currency(amount: Decimal, symbol: &str) -> String {
    let steps = [
        (Decimal::from(1_000_000_000_i64), 'B'),
        (Decimal::from(1_000_000_i64), 'M'),
        (Decimal::from(1_000_i64), 'K'),
    ];

    match steps.into_iter().find(|(threshold, _)| amount >= *threshold) {
        Some((threshold, suffix)) => {
            format!("{symbol} {}{suffix}", fixed(amount / threshold, 1))
        }
        None => format_currency(amount, symbol, 0),
    }
}

/// Renders `value` as a fixed-point percentage, e.g. `12.5%`.
#[must_use]
pub fn format_percentage(value: Decimal, decimal_places: u32) -> String {
    format!("{}%", fixed(value, decimal_places))
}

/// Rounds to exactly `decimal_places` fraction digits.
fn fixed(value: Decimal, decimal_places: u32) -> String {
    let mut rounded = value.round_dp(decimal_places);
    rounded.rescale(decimal_places);
    rounded.to_string()
}

fn group_thousands(amount: Decimal, decimal_places: u32) -> String {
    let rounded = amount.round_dp(decimal_places);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = fixed(rounded.abs(), decimal_places);
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}
