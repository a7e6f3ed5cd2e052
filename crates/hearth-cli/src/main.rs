mod cli;
mod dispatch;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use hearth_client::ClientError;
use stdout_io::write_stdout_text;

const ROOT_HELP: &str = "Hearth - household transaction analytics

Usage:
  hearth <command>

Start here:
  hearth demo
  hearth import create --help
  hearth insights
";

const TOP_LEVEL_HELP: &str = "Hearth — household transaction analytics

USAGE: hearth <command>

Try it:
  hearth demo                                             Run the full pipeline on bundled sample data

Import your transactions:
  1. hearth import create --help                          Read import schema and workflow details
  2. hearth import create --dry-run <path>                Safely validate import without data writes
  3. hearth import create <path>                          Import transactions (add --replace to start fresh)

Read Hearth analysis (computed fresh on every call):
  hearth insights                                         Ordered plain-text insight statements
  hearth summary                                          Totals plus category and monthly breakdowns
  hearth trend                                            Month-over-month expense comparison
  hearth recurring                                        Estimated recurring obligations per month
  hearth report                                           Write a markdown report file

Other commands:
  hearth import list                                      List past imports

Want to ensure a clean first run, or having issues/errors?
  Run `hearth import create --help` for import workflow guidance,
  or `hearth <command> --help` for command usage.
";

const INTERNAL_ERROR_CODES: [&str; 5] = [
    "ledger_init_permission_denied",
    "ledger_locked",
    "ledger_corrupt",
    "migration_failed",
    "ledger_init_failed",
];

fn main() -> ExitCode {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        return emit_text(ROOT_HELP);
    }

    let cli = match cli::Cli::try_parse() {
        Ok(value) => value,
        Err(err) => return handle_parse_error(&err, &raw_args),
    };
    let mode = output::mode_for_command(&cli.command);

    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return ExitCode::from(2);
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            if output::print_failure(&error, mode).is_err() {
                return ExitCode::from(2);
            }
            if INTERNAL_ERROR_CODES.contains(&error.code.as_str())
                || error.code.starts_with("internal_")
            {
                ExitCode::from(2)
            } else {
                ExitCode::from(1)
            }
        }
    }
}

fn handle_parse_error(err: &clap::Error, raw_args: &[String]) -> ExitCode {
    let is_help_or_version = matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    );
    if is_help_or_version {
        // `hearth --help` alone gets the curated overview; everything else
        // keeps clap's generated help for the specific command.
        let wants_overview = err.kind() != ErrorKind::DisplayVersion
            && raw_args.len() == 2
            && matches!(raw_args[1].as_str(), "--help" | "-h");
        if wants_overview {
            return emit_text(TOP_LEVEL_HELP);
        }
        return emit_text(&err.to_string());
    }

    let parse_error = ClientError::invalid_argument_for_command(
        &strip_clap_boilerplate(&err.to_string()),
        command_hint(err.kind(), raw_args).as_deref(),
    );
    let wants_json = raw_args.iter().skip(1).any(|value| value == "--json");
    let mode = if wants_json {
        output::OutputMode::Json
    } else {
        output::OutputMode::Text
    };
    if output::print_failure(&parse_error, mode).is_err() {
        return ExitCode::from(2);
    }
    ExitCode::from(1)
}

fn emit_text(body: &str) -> ExitCode {
    if write_stdout_text(body).is_err() {
        return ExitCode::from(2);
    }
    ExitCode::SUCCESS
}

/// Strips clap's trailing boilerplate (Usage line, "For more information"
/// hint) so the recovery steps are the single source of guidance.
fn strip_clap_boilerplate(message: &str) -> String {
    let cut = message
        .find("\n\nUsage:")
        .or_else(|| message.find("\nFor more information"))
        .unwrap_or(message.len());
    message[..cut].trim_end().to_string()
}

/// Maps a misused invocation back to the subcommand whose `--help` the
/// recovery step should point at.
fn command_hint(kind: ErrorKind, raw_args: &[String]) -> Option<String> {
    let argument_shaped = matches!(
        kind,
        ErrorKind::MissingRequiredArgument
            | ErrorKind::InvalidValue
            | ErrorKind::ValueValidation
            | ErrorKind::WrongNumberOfValues
            | ErrorKind::UnknownArgument
            | ErrorKind::InvalidSubcommand
    );
    if !argument_shaped {
        return None;
    }

    let words = raw_args
        .iter()
        .skip(1)
        .filter(|value| !value.starts_with('-'))
        .map(String::as_str)
        .collect::<Vec<&str>>();

    let hint = match words.as_slice() {
        ["import", "create", ..] => "import create",
        ["import", "list", ..] => "import list",
        ["import", ..] => "import",
        ["insights", ..] => "insights",
        ["summary", ..] => "summary",
        ["trend", ..] => "trend",
        ["recurring", ..] => "recurring",
        ["report", ..] => "report",
        ["demo", ..] => "demo",
        _ => return None,
    };
    Some(hint.to_string())
}
