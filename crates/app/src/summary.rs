//! `microbiz summary`: totals over a stream of sale and expense lines.
//!
//! Each line is `[DATE] sale TEXT` or `[DATE] expense TEXT`, where TEXT is
//! anything `microbiz sale`/`microbiz expense` accepts and DATE follows the
//! configured date format. Only sale dates are used, for the daily average.
use std::{
    collections::BTreeMap,
    io::{self, BufRead, Write},
    process::ExitCode,
};

use chrono::NaiveDate;
use engine::{Decimal, ParsedExpense, ParsedSale, Settings, stats};
use serde::Serialize;

use crate::error::{AppError, Result};

/// Optional figures of `microbiz summary`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Sales total of the previous period; enables the growth line.
    pub previous: Option<Decimal>,
    /// Window of the daily sales average, ending at the latest dated sale.
    pub days: Option<u32>,
}

#[derive(Debug, PartialEq)]
enum Entry {
    Sale(Option<NaiveDate>, ParsedSale),
    Expense(ParsedExpense),
}

#[derive(Debug, Serialize)]
struct Summary {
    sales: Decimal,
    sale_count: usize,
    average_sale: Decimal,
    expenses: Decimal,
    expenses_by_category: BTreeMap<String, Decimal>,
    profit: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    growth: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    daily_average: Option<Decimal>,
    skipped: usize,
}

fn read_entry(line: &str, settings: &Settings) -> Option<Entry> {
    let line = line.trim();
    let (date, rest) = match line.split_once(char::is_whitespace) {
        Some((head, tail)) => match settings.validate_date(head) {
            Ok(date) => (Some(date), tail.trim_start()),
            Err(_) => (None, line),
        },
        None => (None, line),
    };

    let (keyword, text) = rest.split_once(char::is_whitespace)?;
    match keyword.to_ascii_lowercase().as_str() {
        "sale" => engine::parse_sale(text).map(|sale| Entry::Sale(date, sale)),
        "expense" => engine::parse_expense(text).map(Entry::Expense),
        _ => None,
    }
}

fn summarize(entries: &[Entry], skipped: usize, options: Options) -> Result<Summary> {
    let mut sales = Vec::new();
    let mut expenses = Vec::new();
    for entry in entries {
        match entry {
            Entry::Sale(date, sale) => sales.push((*date, sale.amount)),
            Entry::Expense(expense) => {
                expenses.push((expense.category.as_str(), expense.amount));
            }
        }
    }
    let sale_amounts = || sales.iter().map(|(_, amount)| *amount);
    let expense_amounts = || expenses.iter().map(|(_, amount)| *amount);

    let total_sales = stats::total(sale_amounts()).ok_or(AppError::OutOfRange)?;
    let growth = options
        .previous
        .map(|previous| stats::growth(total_sales, previous).ok_or(AppError::OutOfRange))
        .transpose()?;

    let dated: Vec<(NaiveDate, Decimal)> = sales
        .iter()
        .filter_map(|(date, amount)| date.map(|date| (date, *amount)))
        .collect();
    let latest = dated.iter().map(|(date, _)| *date).max();
    let daily_average = match (options.days, latest) {
        (Some(days), Some(today)) => {
            Some(stats::daily_average(dated, days, today).ok_or(AppError::OutOfRange)?)
        }
        _ => None,
    };

    Ok(Summary {
        sales: total_sales,
        sale_count: sales.len(),
        average_sale: stats::average(sale_amounts()).ok_or(AppError::OutOfRange)?,
        expenses: stats::total(expense_amounts()).ok_or(AppError::OutOfRange)?,
        expenses_by_category: stats::by_category(expenses.iter().copied())
            .ok_or(AppError::OutOfRange)?,
        profit: stats::profit(sale_amounts(), expense_amounts()).ok_or(AppError::OutOfRange)?,
        growth,
        daily_average,
        skipped,
    })
}

fn render(summary: &Summary, options: Options, settings: &Settings) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Sales: {} ({} sales, average {})",
            settings.format_currency(summary.sales),
            summary.sale_count,
            settings.format_currency(summary.average_sale)
        ),
        format!("Expenses: {}", settings.format_currency(summary.expenses)),
    ];
    for (category, amount) in &summary.expenses_by_category {
        lines.push(format!("  {category}: {}", settings.format_currency(*amount)));
    }
    lines.push(format!("Profit: {}", settings.format_currency(summary.profit)));

    if let Some(growth) = summary.growth {
        lines.push(format!("Growth: {}", settings.format_percentage(growth)));
    }
    if let Some(days) = options.days {
        match summary.daily_average {
            Some(average) => lines.push(format!(
                "Daily average ({days} days): {}",
                settings.format_currency(average)
            )),
            None => lines.push("Daily average: no dated sales".to_string()),
        }
    }
    if summary.skipped > 0 {
        lines.push(format!("Skipped lines: {}", summary.skipped));
    }
    lines
}

fn summarize_stream<R: BufRead, W: Write>(
    reader: R,
    out: &mut W,
    settings: &Settings,
    options: Options,
    json: bool,
) -> Result<()> {
    let mut entries = Vec::new();
    let mut skipped = 0;
    for (index, bytes) in reader.split(b'\n').enumerate() {
        let number = index + 1;
        let Ok(line) = String::from_utf8(bytes?) else {
            tracing::warn!(line = number, "line is not valid UTF-8");
            skipped += 1;
            continue;
        };
        if line.trim().is_empty() {
            continue;
        }
        match read_entry(&line, settings) {
            Some(entry) => entries.push(entry),
            None => {
                tracing::info!(line = number, text = %line.trim(), "line skipped");
                skipped += 1;
            }
        }
    }
    tracing::debug!(entries = entries.len(), skipped, "summary input read");

    let summary = summarize(&entries, skipped, options)?;
    if json {
        writeln!(out, "{}", serde_json::to_string(&summary)?)?;
    } else {
        for line in render(&summary, options, settings) {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

/// Summarizes the sale and expense lines read from stdin.
pub fn summary(settings: &Settings, options: Options, json: bool) -> Result<ExitCode> {
    let mut out = io::stdout().lock();
    summarize_stream(io::stdin().lock(), &mut out, settings, options, json)?;
    Ok(ExitCode::SUCCESS)
}
