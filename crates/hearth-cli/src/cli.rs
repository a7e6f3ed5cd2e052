use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate(pub String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    let shaped = value.len() == 10
        && value.bytes().enumerate().all(|(index, byte)| match index {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        });
    if !shaped {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err("date must use valid calendar values".to_string());
    }

    Ok(IsoDate(value.to_string()))
}

/// Extended help shown after `hearth import create --help`.
/// Contains workflow guidance, schema, and next-step instructions.
pub const IMPORT_CREATE_AFTER_HELP: &str = "\
How import works:
  Hearth does not parse raw bank PDFs or provider-specific exports.
  You bring a normalized transaction file, then import it.

  Accepted formats:
    CSV  — one header row with schema field names
    JSON — one top-level array of transaction objects

  <path> is a local file path.
  To read stdin explicitly, use `-` as the path.
  Example: cat rows.csv | hearth import create --dry-run -
  One import call takes one file. For multiple files, combine
  first or run multiple import commands.

What to do next:
  1. Export your transactions into CSV or JSON with the schema below.
  2. Run `hearth import create --dry-run <path>` and fix any reported issues.
  3. Run `hearth import create <path>` once dry-run passes.
  4. Pass `--replace` to clear previously imported rows first.

Import schema:
  CSV example (header + rows):
  date,category,description,amount,type
  2026-01-15,Groceries,WHOLE FOODS,-42.15,expense
  2026-01-16,Salary,Monthly salary,3200.00,income

  JSON example (one top-level array):
  [
    {
      \"date\": \"2026-01-15\",
      \"category\": \"Groceries\",
      \"description\": \"WHOLE FOODS\",
      \"amount\": -42.15,
      \"type\": \"expense\"
    }
  ]

Field rules (very explicit):
  date (required):
    Date only, exactly `YYYY-MM-DD`.
    Example: `2026-01-15`

  category (required):
    A short spending label. Keep the same spelling across imports;
    matching is case-insensitive but the first casing seen is displayed.
    Example: `Groceries`

  description (required):
    Raw transaction text from the source. Recurring detection scans this
    field for markers like `rent`, `bill`, `subscription`, and `salary`.

  amount (required):
    A number, not text.
    Signed amount rules:
    - negative = money out (expenses)
    - positive = money in (income)
    The `type` field decides which aggregate a row lands in; keep the
    sign convention consistent anyway.
    Example charge: `-42.15`

  type (required):
    `income` or `expense`, case-insensitive.
    Other values are stored but excluded from typed aggregates.
";

#[derive(Debug, Parser)]
#[command(
    name = "hearth",
    version,
    about = "household transaction analytics",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage transaction imports
    #[command(arg_required_else_help = true)]
    Import {
        #[command(subcommand)]
        command: ImportCommand,
    },
    /// Derive ordered plain-text insight statements from your ledger
    Insights {
        /// Start date filter (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        from: Option<IsoDate>,
        /// End date filter (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        to: Option<IsoDate>,
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
    },
    /// Show income/expense totals with category and monthly breakdowns
    Summary {
        /// Start date filter (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        from: Option<IsoDate>,
        /// End date filter (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        to: Option<IsoDate>,
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
    },
    /// Compare expenses across the two most recent months
    Trend {
        /// Start date filter (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        from: Option<IsoDate>,
        /// End date filter (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        to: Option<IsoDate>,
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
    },
    /// Estimate recurring obligations from description markers
    Recurring {
        /// Start date filter (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        from: Option<IsoDate>,
        /// End date filter (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        to: Option<IsoDate>,
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
    },
    /// Write insights and breakdown tables to a markdown report file
    Report {
        /// Output file path (defaults to <ledger home>/output/report.md)
        #[arg(long)]
        output: Option<String>,
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
    },
    /// Run the full analytics pipeline on bundled sample data
    Demo,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ImportCommand {
    /// Import normalized transaction data into your local Hearth ledger
    #[command(after_long_help = IMPORT_CREATE_AFTER_HELP)]
    Create {
        /// Validate import data without writing to the ledger
        #[arg(long)]
        dry_run: bool,
        /// Clear previously imported records before writing this batch
        #[arg(long)]
        replace: bool,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
        /// Path to a normalized CSV or JSON file (use `-` for stdin)
        path: Option<String>,
    },
    /// List all past imports with their status and row counts
    List {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
