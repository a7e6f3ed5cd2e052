use std::fs;
use std::io::{IsTerminal, Read};

use crate::import::invalid_input_error;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum SourceKind {
    File,
    Stdin,
}

impl SourceKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Stdin => "stdin",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ResolvedSource {
    pub(crate) source_kind: SourceKind,
    pub(crate) source_ref: Option<String>,
    pub(crate) content: String,
}

/// Exactly one source per import: a file path, or piped stdin (`-` makes
/// stdin explicit). Supplying both is rejected rather than guessed at.
pub(crate) fn resolve_source(
    path: Option<String>,
    stdin_override: Option<String>,
) -> ClientResult<ResolvedSource> {
    let stdin_body = read_piped_stdin(stdin_override)?;

    match (path, stdin_body) {
        (Some(path_value), stdin) if path_value == "-" => match stdin {
            Some(content) => Ok(stdin_source(content)),
            None => Err(invalid_input_error(
                "Path `-` means stdin input, but stdin was empty. Pipe CSV/JSON input or pass a file path.",
            )),
        },
        (Some(path_value), Some(_)) => {
            // Read the file first so a bad path reports as such even when
            // stdin also carried data.
            read_import_file(&path_value)?;
            Err(invalid_input_error(
                "Both stdin and file input were provided. Pass exactly one source: either a file path or piped stdin.",
            ))
        }
        (Some(path_value), None) => {
            let content = read_import_file(&path_value)?;
            Ok(ResolvedSource {
                source_kind: SourceKind::File,
                source_ref: Some(path_value),
                content,
            })
        }
        (None, Some(content)) => Ok(stdin_source(content)),
        (None, None) => Err(invalid_input_error(
            "No import source provided. Pass a file path or pipe input via stdin.",
        )),
    }
}

fn stdin_source(content: String) -> ResolvedSource {
    ResolvedSource {
        source_kind: SourceKind::Stdin,
        source_ref: None,
        content,
    }
}

fn read_import_file(path: &str) -> ClientResult<String> {
    fs::read_to_string(path).map_err(|error| {
        ClientError::invalid_argument_with_recovery(
            &format!("Could not read import file `{path}`: {error}"),
            vec![
                "Verify the path exists and is readable.".to_string(),
                "Rerun hearth import create <path>.".to_string(),
            ],
        )
    })
}

/// `None` when stdin is a terminal or carried only whitespace. The
/// override keeps tests off the real process stdin.
fn read_piped_stdin(stdin_override: Option<String>) -> ClientResult<Option<String>> {
    let body = match stdin_override {
        Some(value) => value,
        None => {
            if std::io::stdin().is_terminal() {
                return Ok(None);
            }
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|error| {
                    ClientError::invalid_argument_with_recovery(
                        &format!("Could not read stdin: {error}"),
                        vec![
                            "Retry with an explicit file path argument.".to_string(),
                            "Or rerun with valid stdin content.".to_string(),
                        ],
                    )
                })?;
            buffer
        }
    };

    if body.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(body))
}
