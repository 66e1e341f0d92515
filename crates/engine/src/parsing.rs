//! Free-text parsing of sales, expenses and products.
//!
//! Each entry point owns an ordered table of matchers. Matchers are tried top
//! to bottom and the first one whose shape fits the tokens decides the result;
//! later matchers are never consulted, even if they would read the input
//! "better". The table order is the disambiguation policy:
//!
//! | input            | sale rule          | result                     |
//! |------------------|--------------------|----------------------------|
//! | `2x 500 bread`   | `Multiplier`       | 1000, `bread`, qty 2       |
//! | `500 bread 3`    | `TrailingQuantity` | 500, `bread`, qty 3        |
//! | `bread 500`      | `TrailingAmount`   | 500, `bread`, qty 1        |
//! | `500 bread`      | `LeadingAmount`    | 500, `bread`, qty 1        |
//!
//! A rule whose shape fits but whose numbers do not fit their types (a
//! quantity beyond `u32`, an amount beyond `Decimal`, or an overflowing
//! `unit × N`) rejects the input; it does not hand over to a later rule.
//!
//! Before matching, every `,` is removed: in this context commas are read as
//! thousands separators (`12,500 rice` is 12500), unlike [`normalize`] which
//! would infer `12,5` as a decimal.
//!
//! [`normalize`]: crate::normalize

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::number::{
    is_plain_amount_token, is_quantity_token, parse_plain_amount, parse_price, parse_quantity,
};

/// A sale typed by the operator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSale {
    /// Total amount of the sale (unit price times quantity for `2x` input).
    pub amount: Decimal,
    pub item: String,
    pub quantity: u32,
}

/// An expense typed by the operator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedExpense {
    pub amount: Decimal,
    pub category: String,
}

/// A product definition typed by the operator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedProduct {
    pub name: String,
    pub price: Option<Decimal>,
    pub stock: u32,
}

/// Sale rules, in matching order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaleRule {
    /// `<N>x <amount> <item…>`
    Multiplier,
    /// `<amount> <item…> <N>`
    TrailingQuantity,
    /// `<item…> <amount>`
    TrailingAmount,
    /// `<amount> <item…>`
    LeadingAmount,
}

/// Expense rules, in matching order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseRule {
    /// `<amount> <category…>`
    LeadingAmount,
    /// `<category…> <amount>`
    TrailingAmount,
}

/// Outcome of trying one rule against the tokens.
#[derive(Debug, PartialEq, Eq)]
enum Fit<T> {
    /// The tokens do not have this rule's shape; the next rule is tried.
    Mismatch,
    /// The shape fits but a number does not fit its type; the input is
    /// rejected.
    OutOfRange,
    Parsed(T),
}

impl<T> From<Option<T>> for Fit<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Fit::OutOfRange, Fit::Parsed)
    }
}

type SaleMatcher = fn(&[&str]) -> Fit<ParsedSale>;
type ExpenseMatcher = fn(&[&str]) -> Fit<ParsedExpense>;

const SALE_RULES: [(SaleRule, SaleMatcher); 4] = [
    (SaleRule::Multiplier, sale_multiplier),
    (SaleRule::TrailingQuantity, sale_trailing_quantity),
    (SaleRule::TrailingAmount, sale_trailing_amount),
    (SaleRule::LeadingAmount, sale_leading_amount),
];

const EXPENSE_RULES: [(ExpenseRule, ExpenseMatcher); 2] = [
    (ExpenseRule::LeadingAmount, expense_leading_amount),
    (ExpenseRule::TrailingAmount, expense_trailing_amount),
];

/// Commas are thousands separators for the transaction parser.
fn strip_thousands(text: &str) -> String {
    text.trim().replace(',', "")
}

fn join(tokens: &[&str]) -> String {
    tokens.join(" ")
}

fn sale_multiplier(tokens: &[&str]) -> Fit<ParsedSale> {
    let [multiplier, unit, item @ ..] = tokens else {
        return Fit::Mismatch;
    };
    let Some(count) = multiplier.strip_suffix('x') else {
        return Fit::Mismatch;
    };
    if item.is_empty() || !is_quantity_token(count) || !is_plain_amount_token(unit) {
        return Fit::Mismatch;
    }

    parse_quantity(count)
        .zip(parse_plain_amount(unit))
        .and_then(|(quantity, unit)| {
            Some(ParsedSale {
                amount: unit.checked_mul(Decimal::from(quantity))?,
                item: join(item),
                quantity,
            })
        })
        .into()
}

fn sale_trailing_quantity(tokens: &[&str]) -> Fit<ParsedSale> {
    let [amount, item @ .., quantity] = tokens else {
        return Fit::Mismatch;
    };
    if item.is_empty() || !is_plain_amount_token(amount) || !is_quantity_token(quantity) {
        return Fit::Mismatch;
    }

    parse_plain_amount(amount)
        .zip(parse_quantity(quantity))
        .map(|(amount, quantity)| ParsedSale {
            amount,
            item: join(item),
            quantity,
        })
        .into()
}

fn sale_trailing_amount(tokens: &[&str]) -> Fit<ParsedSale> {
    let [item @ .., amount] = tokens else {
        return Fit::Mismatch;
    };
    if item.is_empty() || !is_plain_amount_token(amount) {
        return Fit::Mismatch;
    }

    parse_plain_amount(amount)
        .map(|amount| ParsedSale {
            amount,
            item: join(item),
            quantity: 1,
        })
        .into()
}

fn sale_leading_amount(tokens: &[&str]) -> Fit<ParsedSale> {
    let [amount, item @ ..] = tokens else {
        return Fit::Mismatch;
    };
    if item.is_empty() || !is_plain_amount_token(amount) {
        return Fit::Mismatch;
    }

    parse_plain_amount(amount)
        .map(|amount| ParsedSale {
            amount,
            item: join(item),
            quantity: 1,
        })
        .into()
}

fn expense_leading_amount(tokens: &[&str]) -> Fit<ParsedExpense> {
    let [amount, category @ ..] = tokens else {
        return Fit::Mismatch;
    };
    if category.is_empty() || !is_plain_amount_token(amount) {
        return Fit::Mismatch;
    }

    parse_plain_amount(amount)
        .map(|amount| ParsedExpense {
            amount,
            category: join(category),
        })
        .into()
}

fn expense_trailing_amount(tokens: &[&str]) -> Fit<ParsedExpense> {
    let [category @ .., amount] = tokens else {
        return Fit::Mismatch;
    };
    if category.is_empty() || !is_plain_amount_token(amount) {
        return Fit::Mismatch;
    }

    parse_plain_amount(amount)
        .map(|amount| ParsedExpense {
            amount,
            category: join(category),
        })
        .into()
}

/// Runs `rules` in order and returns the first rule whose shape fits, with
/// its value (`None` when a number in it was out of range).
fn first_fit<T, R: Copy>(
    rules: &[(R, fn(&[&str]) -> Fit<T>)],
    tokens: &[&str],
) -> Option<(R, Option<T>)> {
    rules.iter().find_map(|(rule, matcher)| match matcher(tokens) {
        Fit::Mismatch => None,
        Fit::OutOfRange => Some((*rule, None)),
        Fit::Parsed(value) => Some((*rule, Some(value))),
    })
}

/// Parses a sale and reports which rule produced it.
///
/// The first rule whose shape fits decides. If that rule yields a zero amount
/// or a zero quantity, or one of its numbers is too large for its type, the
/// input is rejected outright.
#[must_use]
pub fn parse_sale_with_rule(text: &str) -> Option<(SaleRule, ParsedSale)> {
    let cleaned = strip_thousands(text);
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    let Some((rule, sale)) = first_fit(&SALE_RULES, &tokens) else {
        tracing::debug!("no sale rule matched");
        return None;
    };
    let Some(sale) = sale else {
        tracing::debug!(?rule, "sale rule matched with a number out of range");
        return None;
    };

    if sale.amount.is_zero() || sale.quantity == 0 {
        tracing::debug!(?rule, "sale rule matched with zero amount or quantity");
        return None;
    }

    tracing::debug!(?rule, "sale rule matched");
    Some((rule, sale))
}

/// Parses a sale such as `500 bread`, `2x 500 bread`, `500 bread 3` or
/// `bread 500`.
///
/// ```rust
/// use engine::parse_sale;
/// use rust_decimal::Decimal;
///
/// let sale = parse_sale("2x 500 bread").unwrap();
/// assert_eq!(sale.amount, Decimal::from(1000));
/// assert_eq!(sale.item, "bread");
/// assert_eq!(sale.quantity, 2);
/// ```
#[must_use]
pub fn parse_sale(text: &str) -> Option<ParsedSale> {
    parse_sale_with_rule(text).map(|(_, sale)| sale)
}

/// Parses an expense and reports which rule produced it.
#[must_use]
pub fn parse_expense_with_rule(text: &str) -> Option<(ExpenseRule, ParsedExpense)> {
    let cleaned = strip_thousands(text);
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    let Some((rule, expense)) = first_fit(&EXPENSE_RULES, &tokens) else {
        tracing::debug!("no expense rule matched");
        return None;
    };
    let Some(expense) = expense else {
        tracing::debug!(?rule, "expense rule matched with a number out of range");
        return None;
    };

    if expense.amount.is_zero() {
        tracing::debug!(?rule, "expense rule matched with zero amount");
        return None;
    }

    tracing::debug!(?rule, "expense rule matched");
    Some((rule, expense))
}

/// Parses an expense such as `500 supplies` or `supplies 500`.
#[must_use]
pub fn parse_expense(text: &str) -> Option<ParsedExpense> {
    parse_expense_with_rule(text).map(|(_, expense)| expense)
}

/// Parses a product definition: `<name…> <price> <stock>`, `<name> <price>`
/// or just `<name…>`.
///
/// Returns `None` only for blank input.
#[must_use]
pub fn parse_product(text: &str) -> Option<ParsedProduct> {
    let cleaned = strip_thousands(text);
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    if tokens.is_empty() {
        tracing::debug!("empty product text");
        return None;
    }

    let product = product_with_stock(&tokens)
        .or_else(|| product_with_price(&tokens))
        .unwrap_or_else(|| {
            tracing::debug!("product read as name only");
            ParsedProduct {
                name: cleaned.trim().to_string(),
                price: None,
                stock: 0,
            }
        });

    Some(product)
}

fn product_with_stock(tokens: &[&str]) -> Option<ParsedProduct> {
    if tokens.len() < 3 {
        return None;
    }
    let [name @ .., price, stock] = tokens else {
        return None;
    };

    Some(ParsedProduct {
        price: Some(parse_price(price)?),
        stock: parse_quantity(stock)?,
        name: join(name),
    })
}

fn product_with_price(tokens: &[&str]) -> Option<ParsedProduct> {
    let [name, price] = tokens else {
        return None;
    };

    Some(ParsedProduct {
        name: (*name).to_string(),
        price: Some(parse_price(price)?),
        stock: 0,
    })
}
