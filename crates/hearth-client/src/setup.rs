use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};

use crate::contracts::types::DataRange;
use crate::migrations::{
    REQUIRED_INDEX_NAMES, REQUIRED_META_KEYS, run_pending, safe_repair_statement,
};
use crate::state::{
    ensure_ledger_directory, ledger_db_path, map_sqlite_error, open_connection, resolve_ledger_home,
};
use crate::{ClientError, ClientResult};

const EXPECTED_USER_VERSION: i64 = 1;

struct CoreTable {
    name: &'static str,
    columns: &'static [&'static str],
}

const CORE_TABLES: [CoreTable; 3] = [
    CoreTable {
        name: "internal_meta",
        columns: &["key", "value"],
    },
    CoreTable {
        name: "internal_import_runs",
        columns: &[
            "import_id",
            "status",
            "created_at",
            "rows_read",
            "rows_valid",
            "rows_invalid",
            "inserted",
            "replaced_prior_rows",
            "source_kind",
            "source_ref",
        ],
    },
    CoreTable {
        name: "internal_records",
        columns: &[
            "record_id",
            "import_id",
            "date",
            "category",
            "description",
            "amount",
            "type",
        ],
    },
];

#[derive(Debug, Clone)]
pub struct SetupContext {
    pub ledger_home: String,
    pub db_path: String,
    pub schema_version: String,
    pub data_range: DataRange,
}

pub fn ensure_initialized() -> ClientResult<SetupContext> {
    initialize(None)
}

pub fn ensure_initialized_at(home_override: &Path) -> ClientResult<SetupContext> {
    initialize(Some(home_override))
}

/// Opens (creating if needed) the ledger, applies pending migrations, and
/// runs the startup self-check: required tables and columns must exist,
/// missing meta keys and indexes are restored from canonical SQL, and any
/// remaining drift is reported as corruption rather than patched over.
fn initialize(home_override: Option<&Path>) -> ClientResult<SetupContext> {
    let ledger_home = resolve_ledger_home(home_override)?;
    ensure_ledger_directory(&ledger_home)?;

    let db_path = ledger_db_path(&ledger_home);
    let mut connection = open_connection(&db_path)?;

    run_pending(&mut connection).map_err(|error| migration_error(&db_path, &error))?;

    check_core_tables(&connection, &db_path)?;
    restore_safe_objects(&connection, &db_path)?;
    verify_ledger_integrity(&connection, &db_path)?;

    Ok(SetupContext {
        ledger_home: ledger_home.display().to_string(),
        db_path: db_path.display().to_string(),
        schema_version: read_schema_version(&connection, &db_path)?,
        data_range: read_data_range(&connection, &db_path)?,
    })
}

fn migration_error(db_path: &Path, error: &rusqlite_migration::Error) -> ClientError {
    // Lock/permission/corruption failures keep their own codes; anything
    // else surfaces as a migration failure.
    if let rusqlite_migration::Error::RusqliteError { query: _, err } = error {
        let mapped = map_sqlite_error(db_path, err);
        if mapped.code != "ledger_init_failed" {
            return mapped;
        }
    }
    ClientError::migration_failed(db_path, &error.to_string())
}

fn check_core_tables(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    for table in &CORE_TABLES {
        if !object_exists(connection, "table", table.name, db_path)? {
            return Err(ClientError::ledger_corrupt(db_path));
        }

        let present = column_names(connection, table, db_path)?;
        let all_present = table
            .columns
            .iter()
            .all(|required| present.iter().any(|column| column == required));
        if !all_present {
            return Err(ClientError::ledger_corrupt(db_path));
        }
    }

    Ok(())
}

/// Insert-only repair: absent meta keys and indexes are recreated from the
/// bootstrap SQL; existing values are left alone for verification to judge.
fn restore_safe_objects(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    for (meta_key, default_value) in REQUIRED_META_KEYS {
        connection
            .execute(
                "INSERT OR IGNORE INTO internal_meta (key, value) VALUES (?1, ?2)",
                params![meta_key, default_value],
            )
            .map_err(|error| map_sqlite_error(db_path, &error))?;
    }

    for index_name in REQUIRED_INDEX_NAMES {
        if object_exists(connection, "index", index_name, db_path)? {
            continue;
        }
        let Some(sql) = safe_repair_statement(index_name) else {
            return Err(ClientError::ledger_init_failed(
                db_path,
                "No canonical SQL block exists for index repair.",
            ));
        };
        connection
            .execute_batch(&sql)
            .map_err(|error| map_sqlite_error(db_path, &error))?;
    }

    Ok(())
}

fn verify_ledger_integrity(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    let user_version: i64 = connection
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    if user_version != EXPECTED_USER_VERSION {
        return Err(ClientError::ledger_corrupt(db_path));
    }

    for (meta_key, expected_value) in REQUIRED_META_KEYS {
        let stored = connection
            .query_row(
                "SELECT value FROM internal_meta WHERE key = ?1 LIMIT 1",
                [meta_key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|error| map_sqlite_error(db_path, &error))?;

        match stored {
            Some(actual) if actual == expected_value => {}
            _ => return Err(ClientError::ledger_corrupt(db_path)),
        }
    }

    for index_name in REQUIRED_INDEX_NAMES {
        if !object_exists(connection, "index", index_name, db_path)? {
            return Err(ClientError::ledger_corrupt(db_path));
        }
    }

    Ok(())
}

fn object_exists(
    connection: &Connection,
    object_type: &str,
    object_name: &str,
    db_path: &Path,
) -> ClientResult<bool> {
    connection
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = ?1 AND name = ?2 LIMIT 1",
            params![object_type, object_name],
            |_row| Ok(()),
        )
        .optional()
        .map(|found| found.is_some())
        .map_err(|error| map_sqlite_error(db_path, &error))
}

fn column_names(
    connection: &Connection,
    table: &CoreTable,
    db_path: &Path,
) -> ClientResult<Vec<String>> {
    // PRAGMA cannot take a bound parameter; `table.name` only ever comes
    // from the compile-time CORE_TABLES list above.
    let mut statement = connection
        .prepare(&format!("PRAGMA table_info({})", table.name))
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let rows = statement
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut names = Vec::new();
    for row in rows {
        names.push(row.map_err(|error| map_sqlite_error(db_path, &error))?);
    }
    Ok(names)
}

fn read_schema_version(connection: &Connection, db_path: &Path) -> ClientResult<String> {
    connection
        .query_row(
            "SELECT value FROM internal_meta WHERE key = 'schema_version' LIMIT 1",
            [],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map(|value| value.unwrap_or_else(|| "v1".to_string()))
        .map_err(|error| map_sqlite_error(db_path, &error))
}

fn read_data_range(connection: &Connection, db_path: &Path) -> ClientResult<DataRange> {
    connection
        .query_row(
            "SELECT MIN(date), MAX(date) FROM internal_records",
            [],
            |row| {
                Ok(DataRange {
                    earliest: row.get(0)?,
                    latest: row.get(1)?,
                })
            },
        )
        .map_err(|error| map_sqlite_error(db_path, &error))
}
