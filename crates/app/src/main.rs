use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use commands::{Field, Kind, Style};
use engine::Decimal;

mod commands;
mod error;
mod settings;
mod summary;

#[derive(Parser, Debug)]
#[command(name = "microbiz")]
#[command(about = "Parse operator-typed sales, expenses and products")]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override log level (e.g. debug).
    #[arg(long)]
    level: Option<String>,
    /// Print parsed records as JSON.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a sale (`500 bread`, `2x 500 bread`); reads stdin when TEXT is omitted.
    Sale(TextArgs),
    /// Parse an expense (`500 supplies`); reads stdin when TEXT is omitted.
    Expense(TextArgs),
    /// Parse a product (`bread 5000 100`); reads stdin when TEXT is omitted.
    Product(TextArgs),
    /// Print the canonical value of a number in any notation.
    Normalize {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Validate a raw field value.
    Validate(ValidateArgs),
    /// Render a number as currency.
    Format(FormatArgs),
    /// Render a number as a percentage.
    Percent(PercentArgs),
    /// Total `[DATE] sale TEXT` and `[DATE] expense TEXT` lines read from stdin.
    Summary(SummaryArgs),
}

#[derive(Args, Debug)]
struct TextArgs {
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    text: Vec<String>,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    #[arg(value_enum)]
    field: Field,
    value: String,
}

#[derive(Args, Debug)]
struct FormatArgs {
    #[arg(allow_hyphen_values = true)]
    value: String,
    /// Use K/M/B notation.
    #[arg(long, conflicts_with = "places")]
    compact: bool,
    /// Fraction digits (defaults to the configured value).
    #[arg(long)]
    places: Option<u32>,
}

#[derive(Args, Debug)]
struct PercentArgs {
    #[arg(allow_hyphen_values = true)]
    value: String,
    #[arg(long)]
    places: Option<u32>,
}

#[derive(Args, Debug)]
struct SummaryArgs {
    /// Sales total of the previous period, to report growth against.
    #[arg(long, value_parser = parse_amount)]
    previous: Option<Decimal>,
    /// Report the average sales per day over this many days.
    #[arg(long)]
    days: Option<u32>,
}

fn parse_amount(text: &str) -> Result<Decimal, String> {
    engine::normalize(text).ok_or_else(|| format!("not a number: {text}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("microbiz: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> error::Result<ExitCode> {
    let mut settings = settings::load(cli.config.as_deref())?;
    if let Some(level) = cli.level {
        settings.level = level;
    }

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "microbiz={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?settings, "settings loaded");

    let display = &settings.display;
    match cli.command {
        Command::Sale(args) => commands::parse(Kind::Sale, &args.text, display, cli.json),
        Command::Expense(args) => commands::parse(Kind::Expense, &args.text, display, cli.json),
        Command::Product(args) => commands::parse(Kind::Product, &args.text, display, cli.json),
        Command::Normalize { text } => commands::normalize(&text),
        Command::Validate(args) => commands::validate(args.field, &args.value, display),
        Command::Format(args) => {
            let style = if args.compact {
                Style::Compact
            } else {
                Style::Currency {
                    places: args.places,
                }
            };
            commands::format(&args.value, style, display)
        }
        Command::Percent(args) => commands::format(
            &args.value,
            Style::Percentage {
                places: args.places,
            },
            display,
        ),
        Command::Summary(args) => summary::summary(
            display,
            summary::Options {
                previous: args.previous,
                days: args.days,
            },
            cli.json,
        ),
    }
}
