//! Validation of raw field values typed by the operator.
//!
//! Validators never panic and never raise: each returns the normalized value
//! or a [`ValidationError`] whose message can be shown to the operator.

use std::{str::FromStr, sync::LazyLock};

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

use crate::{ValidationError, ValidationResult};

/// Upper bound accepted by [`validate_stock_amount`].
pub const MAX_STOCK: i64 = 1_000_000;

/// Upper bound (in characters) accepted by [`validate_product_name`].
pub const MAX_PRODUCT_NAME_CHARS: usize = 200;

/// Currency markers removed before reading an amount.
const CURRENCY_SYMBOLS: [&str; 4] = ["$", "€", "£", "Rp"];

#[allow(clippy::expect_used)]
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

/// Validates a positive amount such as `Rp 15,000` or `$12.50`.
///
/// Commas are thousands separators here.
pub fn validate_amount(text: &str) -> ValidationResult<Decimal> {
    let mut raw = text.trim().to_string();
    for symbol in CURRENCY_SYMBOLS {
        raw = raw.replace(symbol, "");
    }
    let raw = raw.trim().replace(',', "");

    let amount = Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map_err(|_| ValidationError::InvalidAmountFormat)?;

    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(amount)
}

/// Validates a phone number and returns it in international form.
///
/// Everything but digits and a leading `+` is dropped first. Lengths count
/// digits only:
/// - `+…`: 8 to 15 digits, returned as is;
/// - `0…`: 10 to 13 digits, the `0` is replaced by `country_code`.
///
/// ```rust
/// use engine::validate_phone;
///
/// assert_eq!(validate_phone("0812-3456-789", "+62").unwrap(), "+628123456789");
/// assert!(validate_phone("+1234567", "+62").is_err());
/// ```
pub fn validate_phone(text: &str, country_code: &str) -> ValidationResult<String> {
    let mut phone = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii_digit() || (ch == '+' && phone.is_empty()) {
            phone.push(ch);
        }
    }

    if let Some(digits) = phone.strip_prefix('+') {
        if !(8..=15).contains(&digits.len()) {
            return Err(ValidationError::InvalidInternationalPhone);
        }
        Ok(phone)
    } else if let Some(rest) = phone.strip_prefix('0') {
        if !(10..=13).contains(&phone.len()) {
            return Err(ValidationError::InvalidLocalPhone);
        }
        Ok(format!("{country_code}{rest}"))
    } else {
        Err(ValidationError::PhonePrefix)
    }
}

/// Validates an email address of the shape `local@domain.tld`.
pub fn validate_email(text: &str) -> ValidationResult<String> {
    if EMAIL.is_match(text) {
        Ok(text.to_string())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Validates a stock level between 0 and [`MAX_STOCK`].
pub fn validate_stock_amount(text: &str) -> ValidationResult<u32> {
    let stock: i64 = text
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidStock)?;
    if stock < 0 {
        return Err(ValidationError::NegativeStock);
    }
    if stock > MAX_STOCK {
        return Err(ValidationError::StockTooLarge);
    }
    u32::try_from(stock).map_err(|_| ValidationError::StockTooLarge)
}

/// Validates a date against a `strftime` pattern such as `%d-%m-%Y`.
pub fn validate_date(text: &str, format: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), format).map_err(|_| ValidationError::InvalidDate {
        format: format.to_string(),
    })
}

/// Validates a product name; returns it trimmed.
pub fn validate_product_name(text: &str) -> ValidationResult<String> {
    let name = text.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyProductName);
    }
    if name.chars().count() > MAX_PRODUCT_NAME_CHARS {
        return Err(ValidationError::ProductNameTooLong {
            max: MAX_PRODUCT_NAME_CHARS,
        });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn amount_strips_symbols_and_grouping() {
        assert_eq!(validate_amount("Rp 15,000"), Ok(dec!(15000)));
        assert_eq!(validate_amount("$12.50"), Ok(dec!(12.50)));
        assert_eq!(validate_amount(" €1,234.5 "), Ok(dec!(1234.5)));
        assert_eq!(validate_amount("£7"), Ok(dec!(7)));
        assert_eq!(validate_amount("1e3"), Ok(dec!(1000)));
    }

    #[test]
    fn amount_rejects_garbage_and_non_positive() {
        assert_eq!(
            validate_amount("abc"),
            Err(ValidationError::InvalidAmountFormat)
        );
        assert_eq!(validate_amount(""), Err(ValidationError::InvalidAmountFormat));
        assert_eq!(validate_amount("0"), Err(ValidationError::NonPositiveAmount));
        assert_eq!(validate_amount("-5"), Err(ValidationError::NonPositiveAmount));
        assert_eq!(
            validate_amount("-5").unwrap_err().to_string(),
            "Amount must be greater than 0"
        );
    }

    #[test]
    fn local_phone_gets_country_code() {
        assert_eq!(
            validate_phone("08123456789", "+62"),
            Ok("+628123456789".to_string())
        );
        assert_eq!(
            validate_phone("(0812) 3456 789", "+62"),
            Ok("+628123456789".to_string())
        );
    }

    #[test]
    fn international_phone_length_bounds() {
        assert_eq!(
            validate_phone("+1234567", "+62"),
            Err(ValidationError::InvalidInternationalPhone)
        );
        assert_eq!(
            validate_phone("+12345678", "+62"),
            Ok("+12345678".to_string())
        );
        assert_eq!(
            validate_phone("+123456789012345", "+62"),
            Ok("+123456789012345".to_string())
        );
        assert_eq!(
            validate_phone("+1234567890123456", "+62"),
            Err(ValidationError::InvalidInternationalPhone)
        );
    }

    #[test]
    fn local_phone_length_bounds() {
        assert_eq!(
            validate_phone("081234567", "+62"),
            Err(ValidationError::InvalidLocalPhone)
        );
        assert_eq!(
            validate_phone("08123456789012", "+62"),
            Err(ValidationError::InvalidLocalPhone)
        );
    }

    #[test]
    fn phone_prefix_is_required() {
        assert_eq!(
            validate_phone("8123456789", "+62"),
            Err(ValidationError::PhonePrefix)
        );
        assert_eq!(validate_phone("", "+62"), Err(ValidationError::PhonePrefix));
        assert_eq!(
            validate_phone("12+345", "+62"),
            Err(ValidationError::PhonePrefix)
        );
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("owner@warung.co.id").is_ok());
        assert!(validate_email("first.last+shop@example.com").is_ok());
        assert!(validate_email("owner@warung").is_err());
        assert!(validate_email("owner@warung.c").is_err());
        assert!(validate_email("@warung.com").is_err());
        assert!(validate_email("owner warung@x.com").is_err());
    }

    #[test]
    fn stock_bounds() {
        assert_eq!(validate_stock_amount("0"), Ok(0));
        assert_eq!(validate_stock_amount(" 250 "), Ok(250));
        assert_eq!(validate_stock_amount("1000000"), Ok(1_000_000));
        assert_eq!(
            validate_stock_amount("1000001"),
            Err(ValidationError::StockTooLarge)
        );
        assert_eq!(
            validate_stock_amount("-1"),
            Err(ValidationError::NegativeStock)
        );
        assert_eq!(
            validate_stock_amount("2.5"),
            Err(ValidationError::InvalidStock)
        );
    }

    #[test]
    fn date_follows_format() {
        assert_eq!(
            validate_date("17-08-2024", "%d-%m-%Y"),
            Ok(NaiveDate::from_ymd_opt(2024, 8, 17).unwrap())
        );
        assert_eq!(
            validate_date("2024-08-17", "%Y-%m-%d"),
            Ok(NaiveDate::from_ymd_opt(2024, 8, 17).unwrap())
        );
        let err = validate_date("31-02-2024", "%d-%m-%Y").unwrap_err();
        assert_eq!(err.to_string(), "Invalid date format. Use %d-%m-%Y");
    }

    #[test]
    fn product_name_rules() {
        assert_eq!(validate_product_name("  bread "), Ok("bread".to_string()));
        assert_eq!(
            validate_product_name("   "),
            Err(ValidationError::EmptyProductName)
        );
        assert_eq!(
            validate_product_name(&"a".repeat(201)),
            Err(ValidationError::ProductNameTooLong { max: 200 })
        );
        assert!(validate_product_name(&"é".repeat(200)).is_ok());
    }
}
