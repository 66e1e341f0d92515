use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ValidationResult, format, validation};

/// Display and validation preferences of a shop.
///
/// The engine never reads ambient configuration: callers hold a `Settings`
/// value and either pass its fields to the free functions or use the
/// forwarding helpers below.
///
/// ```rust
/// use engine::Settings;
/// use rust_decimal::Decimal;
///
/// let settings = Settings::default();
/// assert_eq!(settings.format_currency(Decimal::from(15_000)), "Rp 15,000");
/// assert_eq!(settings.validate_phone("08123456789").unwrap(), "+628123456789");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Symbol printed before amounts, e.g. `Rp`.
    pub currency_symbol: String,
    /// Fraction digits for [`format_currency`](crate::format_currency).
    pub decimal_places: u32,
    /// Fraction digits for percentages.
    pub percentage_places: u32,
    /// Prefix replacing the leading `0` of local phone numbers.
    pub country_code: String,
    /// `strftime` pattern for dates typed by the operator.
    pub date_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "Rp".to_string(),
            decimal_places: 0,
            percentage_places: 1,
            country_code: "+62".to_string(),
            date_format: "%d-%m-%Y".to_string(),
        }
    }
}

impl Settings {
    #[must_use]
    pub fn format_currency(&self, amount: Decimal) -> String {
        format::format_currency(amount, &self.currency_symbol, self.decimal_places)
    }

    #[must_use]
    pub fn format_compact(&self, amount: Decimal) -> String {
        format::format_compact_currency(amount, &self.currency_symbol)
    }

    #[must_use]
    pub fn format_percentage(&self, value: Decimal) -> String {
        format::format_percentage(value, self.percentage_places)
    }

    pub fn validate_phone(&self, text: &str) -> ValidationResult<String> {
        validation::validate_phone(text, &self.country_code)
    }

    pub fn validate_date(&self, text: &str) -> ValidationResult<NaiveDate> {
        validation::validate_date(text, &self.date_format)
    }
}
