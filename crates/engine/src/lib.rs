//! Parsing engine for operator-typed shop bookkeeping.
//!
//! The engine turns one line of loosely structured text (`2x 500 bread`,
//! `supplies 1.234,56`) into typed records and canonical [`Decimal`] values,
//! validates raw field input, and renders amounts back for display.
//!
//! Everything here is a pure function of its arguments: no storage, no I/O,
//! no global configuration. Preferences travel as an explicit [`Settings`].
//!
//! - [`normalize`]: locale-ambiguous number → [`Decimal`].
//! - [`parse_sale`], [`parse_expense`], [`parse_product`]: ordered rule tables.
//! - `validate_*`: field validators returning [`ValidationResult`].
//! - [`format_currency`], [`format_compact_currency`], [`format_percentage`].
//! - [`stats`]: aggregates for reports.

pub use rust_decimal::Decimal;

pub use error::{ValidationError, ValidationResult};
pub use format::{format_compact_currency, format_currency, format_percentage};
pub use number::{
    is_plain_amount_token, is_quantity_token, normalize, parse_plain_amount, parse_price,
    parse_quantity,
};
pub use parsing::{
    ExpenseRule, ParsedExpense, ParsedProduct, ParsedSale, SaleRule, parse_expense,
    parse_expense_with_rule, parse_product, parse_sale, parse_sale_with_rule,
};
pub use settings::Settings;
pub use validation::{
    MAX_PRODUCT_NAME_CHARS, MAX_STOCK, validate_amount, validate_date, validate_email,
    validate_phone, validate_product_name, validate_stock_amount,
};

mod error;
mod format;
mod number;
mod parsing;
mod settings;
pub mod stats;
mod validation;
