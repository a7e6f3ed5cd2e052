use std::path::{Path, PathBuf};

use rusqlite::params;

use crate::ClientResult;
use crate::commands::common::{data_range_hint, load_setup};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ImportData, ImportListData, ImportListItem};
use crate::state::{map_sqlite_error, open_connection};

#[derive(Debug, Default)]
pub struct ImportRunOptions<'a> {
    pub path: Option<String>,
    pub dry_run: bool,
    pub replace: bool,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

pub fn run(path: Option<String>, dry_run: bool, replace: bool) -> ClientResult<SuccessEnvelope> {
    run_with_options(ImportRunOptions {
        path,
        dry_run,
        replace,
        home_override: None,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ImportRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let result = crate::import::execute(
        &setup,
        options.path.clone(),
        options.dry_run,
        options.replace,
        options.stdin_override,
    )?;

    // Re-read the data range after a committed import so the hint covers
    // the rows that were just written.
    let range_setup = if result.dry_run {
        setup
    } else {
        load_setup(options.home_override)?
    };

    let data = ImportData {
        dry_run: result.dry_run,
        replace: result.replace,
        path: options.path,
        import_id: result.import_id,
        message: result.message,
        summary: result.summary,
        warnings: result.warnings,
        next_step: result.next_step,
        other_actions: result.other_actions,
        data_range_hint: data_range_hint(&range_setup.data_range),
    };

    success("import", data)
}

pub fn list() -> ClientResult<SuccessEnvelope> {
    list_with_options(None)
}

#[doc(hidden)]
pub fn list_with_options(home_override: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(home_override)?;
    let db_path = PathBuf::from(&setup.db_path);
    let connection = open_connection(&db_path)?;

    let mut statement = connection
        .prepare(
            "SELECT
                import_id,
                status,
                created_at,
                rows_read,
                rows_valid,
                rows_invalid,
                inserted,
                replaced_prior_rows,
                source_kind,
                source_ref
             FROM internal_import_runs
             ORDER BY CAST(created_at AS INTEGER) DESC, import_id DESC",
        )
        .map_err(|error| map_sqlite_error(&db_path, &error))?;

    let rows_iter = statement
        .query_map(params![], |row| {
            Ok(ImportListItem {
                import_id: row.get(0)?,
                status: row.get(1)?,
                created_at: row.get(2)?,
                rows_read: row.get(3)?,
                rows_valid: row.get(4)?,
                rows_invalid: row.get(5)?,
                inserted: row.get(6)?,
                replaced_prior_rows: row.get(7)?,
                source_kind: row.get(8)?,
                source_ref: row.get(9)?,
            })
        })
        .map_err(|error| map_sqlite_error(&db_path, &error))?;

    let mut rows: Vec<ImportListItem> = Vec::new();
    for row in rows_iter {
        rows.push(row.map_err(|error| map_sqlite_error(&db_path, &error))?);
    }

    success("import list", ImportListData { rows })
}
