use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{Connection, TransactionBehavior, params};
use ulid::Ulid;

use crate::ClientResult;
use crate::import::CanonicalRecord;
use crate::state::map_sqlite_error;

#[derive(Debug, Clone)]
pub(crate) struct PersistResult {
    pub(crate) import_id: String,
    pub(crate) inserted: i64,
    pub(crate) replaced_prior_rows: i64,
}

pub(crate) struct PersistInput<'a> {
    pub(crate) rows: &'a [CanonicalRecord],
    pub(crate) rows_read: i64,
    pub(crate) rows_valid: i64,
    pub(crate) rows_invalid: i64,
    pub(crate) replace: bool,
    pub(crate) source_kind: &'a str,
    pub(crate) source_ref: Option<&'a str>,
}

/// Writes the batch and its audit row in one immediate transaction, so a
/// replace never leaves the ledger partially cleared and a failed insert
/// leaves no trace.
pub(crate) fn persist_import(
    connection: &mut Connection,
    db_path: &Path,
    input: PersistInput<'_>,
) -> ClientResult<PersistResult> {
    let import_id = format!("imp_{}", Ulid::new());

    let transaction = connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let replaced_prior_rows = if input.replace {
        transaction
            .execute("DELETE FROM internal_records", [])
            .map_err(|error| map_sqlite_error(db_path, &error))? as i64
    } else {
        0
    };

    let inserted = {
        let mut insert = transaction
            .prepare(
                "INSERT INTO internal_records
                    (record_id, import_id, date, category, description, amount, type)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .map_err(|error| map_sqlite_error(db_path, &error))?;

        for row in input.rows {
            insert
                .execute(params![
                    format!("rec_{}", Ulid::new()),
                    &import_id,
                    &row.date,
                    &row.category,
                    &row.description,
                    row.amount,
                    &row.record_type
                ])
                .map_err(|error| map_sqlite_error(db_path, &error))?;
        }
        input.rows.len() as i64
    };

    transaction
        .execute(
            "INSERT INTO internal_import_runs
                (import_id, status, created_at, rows_read, rows_valid, rows_invalid,
                 inserted, replaced_prior_rows, source_kind, source_ref)
             VALUES (?1, 'committed', ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                &import_id,
                unix_seconds(),
                input.rows_read,
                input.rows_valid,
                input.rows_invalid,
                inserted,
                replaced_prior_rows,
                input.source_kind,
                input.source_ref
            ],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    transaction
        .commit()
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    Ok(PersistResult {
        import_id,
        inserted,
        replaced_prior_rows,
    })
}

fn unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}
