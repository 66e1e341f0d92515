//! The module contains the errors a validator can return.
//!
//! Every variant renders, through [`Display`](std::fmt::Display), as a short
//! reason that can be shown to the operator as is, e.g.
//! [`NonPositiveAmount`] renders as `Amount must be greater than 0`.
//!
//! Parsers never return these: a parse that does not match is `None`.
//!
//!  [`NonPositiveAmount`]: ValidationError::NonPositiveAmount
use thiserror::Error;

/// Outcome of every validator: the normalized value or the reason it was rejected.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validator rejections.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid amount format")]
    InvalidAmountFormat,
    #[error("Amount must be greater than 0")]
    NonPositiveAmount,
    #[error("Invalid international phone number")]
    InvalidInternationalPhone,
    #[error("Invalid local phone number")]
    InvalidLocalPhone,
    #[error("Phone number must start with 0 or +")]
    PhonePrefix,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Invalid stock amount")]
    InvalidStock,
    #[error("Stock cannot be negative")]
    NegativeStock,
    #[error("Stock amount too large")]
    StockTooLarge,
    #[error("Invalid date format. Use {format}")]
    InvalidDate { format: String },
    #[error("Product name cannot be empty")]
    EmptyProductName,
    #[error("Product name too long (max {max} characters)")]
    ProductNameTooLong { max: usize },
}
