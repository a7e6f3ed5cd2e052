pub(crate) mod input;
pub(crate) mod parse;
pub(crate) mod persist;
pub(crate) mod validate;

use std::path::PathBuf;

use crate::contracts::types::{ImportAction, ImportNextStep, ImportSummary, ImportWarning};
use crate::setup::SetupContext;
use crate::state::open_connection;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub(crate) struct CanonicalRecord {
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub record_type: String,
}

#[derive(Debug, Clone)]
pub(crate) struct ImportExecutionResult {
    pub dry_run: bool,
    pub replace: bool,
    pub import_id: Option<String>,
    pub message: String,
    pub summary: ImportSummary,
    pub warnings: Vec<ImportWarning>,
    pub next_step: ImportNextStep,
    pub other_actions: Vec<ImportAction>,
}

pub(crate) fn execute(
    setup: &SetupContext,
    path: Option<String>,
    dry_run: bool,
    replace: bool,
    stdin_override: Option<String>,
) -> ClientResult<ImportExecutionResult> {
    let source = input::resolve_source(path, stdin_override)?;
    let validated = validate::validate_rows(parse::parse_source(&source.content)?)?;
    let (next_step, other_actions) = build_next_actions(dry_run, replace, &source.source_kind);

    if dry_run {
        return Ok(ImportExecutionResult {
            dry_run,
            replace,
            import_id: None,
            message: "Validation passed. No rows were written.".to_string(),
            summary: validated.summary,
            warnings: validated.warnings,
            next_step,
            other_actions,
        });
    }

    let db_path = PathBuf::from(&setup.db_path);
    let mut connection = open_connection(&db_path)?;
    let persisted = persist::persist_import(
        &mut connection,
        &db_path,
        persist::PersistInput {
            rows: &validated.rows,
            rows_read: validated.summary.rows_read,
            rows_valid: validated.summary.rows_valid,
            rows_invalid: validated.summary.rows_invalid,
            replace,
            source_kind: source.source_kind.as_str(),
            source_ref: source.source_ref.as_deref(),
        },
    )?;

    let message = if persisted.replaced_prior_rows > 0 {
        format!(
            "Import completed successfully. {} prior rows were replaced.",
            persisted.replaced_prior_rows
        )
    } else {
        "Import completed successfully.".to_string()
    };

    Ok(ImportExecutionResult {
        dry_run,
        replace,
        import_id: Some(persisted.import_id),
        message,
        summary: ImportSummary {
            inserted: persisted.inserted,
            replaced_prior_rows: persisted.replaced_prior_rows,
            ..validated.summary
        },
        warnings: validated.warnings,
        next_step,
        other_actions,
    })
}

pub(crate) fn invalid_input_error(message: &str) -> ClientError {
    ClientError::invalid_argument_with_recovery(
        message,
        vec![
            "Provide CSV or JSON array input via path or stdin.".to_string(),
            "Run `hearth import create --help` to confirm import field requirements.".to_string(),
        ],
    )
    .with_import_help()
}

fn build_next_actions(
    dry_run: bool,
    replace: bool,
    source_kind: &input::SourceKind,
) -> (ImportNextStep, Vec<ImportAction>) {
    if dry_run {
        let commit_command = match (source_kind, replace) {
            (input::SourceKind::Stdin, true) => "hearth import create --replace",
            (input::SourceKind::Stdin, false) => "hearth import create",
            (input::SourceKind::File, true) => "hearth import create --replace <path>",
            (input::SourceKind::File, false) => "hearth import create <path>",
        };
        return (
            ImportNextStep {
                label: "Commit this import".to_string(),
                command: commit_command.to_string(),
            },
            Vec::new(),
        );
    }

    let other_actions = vec![
        ImportAction {
            label: "View import list".to_string(),
            command: "hearth import list".to_string(),
            risk: None,
        },
        ImportAction {
            label: "View categorized totals".to_string(),
            command: "hearth summary".to_string(),
            risk: None,
        },
        ImportAction {
            label: "Write a markdown report".to_string(),
            command: "hearth report".to_string(),
            risk: None,
        },
    ];

    (
        ImportNextStep {
            label: "Read your insights".to_string(),
            command: "hearth insights".to_string(),
        },
        other_actions,
    )
}
