//! Dispatch of CLI commands to the engine and rendering of the results.

use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
};

use clap::ValueEnum;
use engine::{Decimal, ParsedExpense, ParsedProduct, ParsedSale, Settings};
use serde::Serialize;

use crate::error::Result;

/// Kind of record a line of text is parsed into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Sale,
    Expense,
    Product,
}

/// Field checked by `microbiz validate`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Field {
    Amount,
    Phone,
    Email,
    Stock,
    Date,
    Name,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Record {
    Sale(ParsedSale),
    Expense(ParsedExpense),
    Product(ParsedProduct),
}

impl Kind {
    fn parse(self, text: &str) -> Option<Record> {
        match self {
            Kind::Sale => engine::parse_sale(text).map(Record::Sale),
            Kind::Expense => engine::parse_expense(text).map(Record::Expense),
            Kind::Product => engine::parse_product(text).map(Record::Product),
        }
    }

    /// Re-prompt shown when a line does not match any rule.
    fn hint(self) -> &'static str {
        match self {
            Kind::Sale => "I couldn't understand that sale. Use: `500 bread` or `3x 500 bread`",
            Kind::Expense => "I couldn't understand that expense. Use: `500 supplies`",
            Kind::Product => "Product name is required. Use: `bread 5000 100`",
        }
    }
}

fn render(record: &Record, settings: &Settings, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string(record)?);
    }

    let rendered = match record {
        Record::Sale(sale) => format!(
            "Sale: {} x{} {}",
            settings.format_currency(sale.amount),
            sale.quantity,
            sale.item
        ),
        Record::Expense(expense) => format!(
            "Expense: {} {}",
            settings.format_currency(expense.amount),
            expense.category
        ),
        Record::Product(product) => {
            let price = product
                .price
                .map(|price| settings.format_currency(price))
                .unwrap_or_else(|| "-".to_string());
            format!(
                "Product: {} {} (stock {})",
                product.name, price, product.stock
            )
        }
    };
    Ok(rendered)
}

/// Parses one line; `Ok(None)` means the operator has to try again.
fn parse_line(kind: Kind, line: &str, settings: &Settings, json: bool) -> Result<Option<String>> {
    match kind.parse(line) {
        Some(record) => Ok(Some(render(&record, settings, json)?)),
        None => Ok(None),
    }
}

/// Parses the text given on the command line, or every stdin line when empty.
pub fn parse(kind: Kind, words: &[String], settings: &Settings, json: bool) -> Result<ExitCode> {
    let mut out = io::stdout().lock();

    if !words.is_empty() {
        let text = words.join(" ");
        return match parse_line(kind, &text, settings, json)? {
            Some(rendered) => {
                writeln!(out, "{rendered}")?;
                Ok(ExitCode::SUCCESS)
            }
            None => {
                writeln!(out, "{}", kind.hint())?;
                Ok(ExitCode::FAILURE)
            }
        };
    }

    parse_stream(kind, io::stdin().lock(), &mut out, settings, json)?;
    Ok(ExitCode::SUCCESS)
}

/// Parses `reader` line by line. A line that is not understood, or is not
/// valid UTF-8, gets the re-prompt hint and the stream goes on.
fn parse_stream<R: BufRead, W: Write>(
    kind: Kind,
    reader: R,
    out: &mut W,
    settings: &Settings,
    json: bool,
) -> Result<()> {
    for (index, bytes) in reader.split(b'\n').enumerate() {
        let number = index + 1;
        let Ok(line) = String::from_utf8(bytes?) else {
            tracing::warn!(line = number, "line is not valid UTF-8");
            writeln!(out, "{}", kind.hint())?;
            continue;
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(kind, &line, settings, json)? {
            Some(rendered) => writeln!(out, "{rendered}")?,
            None => {
                tracing::info!(line = number, text = %line.trim(), "line not understood");
                writeln!(out, "{}", kind.hint())?;
            }
        }
    }
    Ok(())
}

fn validate_field(field: Field, value: &str, settings: &Settings) -> engine::ValidationResult<String> {
    match field {
        Field::Amount => engine::validate_amount(value).map(|amount| amount.to_string()),
        Field::Phone => settings.validate_phone(value),
        Field::Email => engine::validate_email(value),
        Field::Stock => engine::validate_stock_amount(value).map(|stock| stock.to_string()),
        Field::Date => settings.validate_date(value).map(|date| date.to_string()),
        Field::Name => engine::validate_product_name(value),
    }
}

pub fn validate(field: Field, value: &str, settings: &Settings) -> Result<ExitCode> {
    let mut out = io::stdout().lock();
    match validate_field(field, value, settings) {
        Ok(normalized) => {
            writeln!(out, "{normalized}")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            writeln!(out, "{err}")?;
            Ok(ExitCode::FAILURE)
        }
    }
}

pub fn normalize(text: &str) -> Result<ExitCode> {
    let mut out = io::stdout().lock();
    match engine::normalize(text) {
        Some(value) => {
            writeln!(out, "{value}")?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            writeln!(out, "not a number: {text}")?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// How `microbiz format` renders a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    Currency { places: Option<u32> },
    Compact,
    Percentage { places: Option<u32> },
}

fn render_value(value: Decimal, style: Style, settings: &Settings) -> String {
    match style {
        Style::Currency { places } => engine::format_currency(
            value,
            &settings.currency_symbol,
            places.unwrap_or(settings.decimal_places),
        ),
        Style::Compact => settings.format_compact(value),
        Style::Percentage { places } => {
            engine::format_percentage(value, places.unwrap_or(settings.percentage_places))
        }
    }
}

pub fn format(text: &str, style: Style, settings: &Settings) -> Result<ExitCode> {
    let mut out = io::stdout().lock();
    match engine::normalize(text) {
        Some(value) => {
            writeln!(out, "{}", render_value(value, style, settings))?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            writeln!(out, "not a number: {text}")?;
            Ok(ExitCode::FAILURE)
        }
    }
}
