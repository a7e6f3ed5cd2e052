use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::contracts::types::{ImportIssue, ImportSummary};

pub(crate) const IMPORT_HELP_COMMAND: &str = "hearth import create --help";
pub(crate) const IMPORT_HELP_SECTION_TITLE: &str = "Import Troubleshooting";

/// Structured failure contract: a stable machine code, a human message,
/// and concrete recovery steps. `data` carries code-specific context
/// (validation issues, header lists) for JSON consumers.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_import_help(self) -> Self {
        self.with_import_help_data(json!({}))
    }

    pub fn with_import_help_data(self, data: Value) -> Self {
        self.with_data(attach_import_help(data))
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = command.map_or_else(
            || "Run `hearth --help` for usage.".to_string(),
            |cmd| format!("Run `hearth {cmd} --help` for usage."),
        );
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        match command {
            Some(cmd) => error.with_data(json!({ "command_hint": cmd })),
            None => error,
        }
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn invalid_import_format(message: &str, received_format: &str) -> Self {
        Self::invalid_argument_with_recovery(
            message,
            vec![
                "Provide a supported import format (CSV with headers or JSON array).".to_string(),
                "Run `hearth import create --help` to confirm field requirements.".to_string(),
            ],
        )
        .with_import_help_data(json!({
            "received_format": received_format,
            "supported_formats": ["csv", "json_array"],
        }))
    }

    pub fn import_schema_mismatch(
        required_headers: Vec<String>,
        actual_headers: Vec<String>,
    ) -> Self {
        Self::new(
            "import_schema_mismatch",
            "CSV headers do not satisfy the import schema.",
            vec![
                "Include exactly the required headers: date,category,description,amount,type."
                    .to_string(),
                "Run `hearth import create --help` to review field requirements.".to_string(),
                "Rerun `hearth import create --dry-run <path>`.".to_string(),
            ],
        )
        .with_import_help_data(json!({
            "required_headers": required_headers,
            "actual_headers": actual_headers,
        }))
    }

    pub fn import_validation_failed(summary: ImportSummary, issues: Vec<ImportIssue>) -> Self {
        let issue_count = summary.rows_invalid;
        Self::new(
            "import_validation_failed",
            &format!(
                "Import failed validation: {issue_count} rows need fixes. No rows were written."
            ),
            vec![
                "Fix the listed issues in your source file.".to_string(),
                "Rerun hearth import create --dry-run <path>.".to_string(),
                "Then rerun hearth import create <path>.".to_string(),
            ],
        )
        .with_import_help_data(json!({
            "summary": summary,
            "issues": issues,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn report_write_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "report_write_failed",
            &format!("Could not write report to `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or pass `--output` with a writable path."
            )],
        )
    }

    pub fn ledger_init_permission_denied(path: &Path, detail: &str) -> Self {
        ledger_error(
            "ledger_init_permission_denied",
            path,
            |at| format!("The ledger at `{at}` cannot be initialized: {detail}"),
            |at| {
                vec![format!(
                    "Grant write access to `{at}` or point `HEARTH_HOME` at a writable directory."
                )]
            },
        )
    }

    pub fn ledger_locked(path: &Path) -> Self {
        ledger_error(
            "ledger_locked",
            path,
            |at| format!("Another process holds a lock on the ledger at `{at}`."),
            |at| {
                vec![format!(
                    "Close other processes using `{at}`, then retry once the lock clears."
                )]
            },
        )
    }

    pub fn ledger_corrupt(path: &Path) -> Self {
        ledger_error(
            "ledger_corrupt",
            path,
            |at| format!("The ledger at `{at}` does not pass its integrity check."),
            |at| {
                vec![format!(
                    "Restore `{at}` from a backup, or remove it and re-import your transactions."
                )]
            },
        )
    }

    pub fn migration_failed(path: &Path, detail: &str) -> Self {
        ledger_error(
            "migration_failed",
            path,
            |at| format!("Applying ledger migrations at `{at}` failed: {detail}"),
            |_at| vec!["Resolve the conflicting schema objects named in the details.".to_string()],
        )
    }

    pub fn ledger_init_failed(path: &Path, detail: &str) -> Self {
        ledger_error(
            "ledger_init_failed",
            path,
            |at| format!("Ledger initialization failed at `{at}`: {detail}"),
            |_at| Vec::new(),
        )
    }
}

fn ledger_error(
    code: &str,
    path: &Path,
    message: impl Fn(&str) -> String,
    recovery: impl Fn(&str) -> Vec<String>,
) -> ClientError {
    let location = path.display().to_string();
    ClientError::new(code, &message(&location), recovery(&location))
}

/// Folds the shared import-help pointers into whatever context the caller
/// attached, so every import failure names the same troubleshooting path.
fn attach_import_help(data: Value) -> Value {
    let mut object = match data {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    object.insert(
        "help_command".to_string(),
        Value::String(IMPORT_HELP_COMMAND.to_string()),
    );
    object.insert(
        "help_section_title".to_string(),
        Value::String(IMPORT_HELP_SECTION_TITLE.to_string()),
    );
    Value::Object(object)
}

pub type ClientResult<T> = Result<T, ClientError>;
