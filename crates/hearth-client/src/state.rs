use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, Error as SqliteError, ffi::ErrorCode};

use crate::{ClientError, ClientResult};

const LEDGER_DB_FILE: &str = "ledger.db";
const BUSY_TIMEOUT: Duration = Duration::from_millis(250);

/// Resolution order: explicit override (tests), `HEARTH_HOME`, then
/// `~/.hearth`. Relative candidates are anchored to the current directory
/// so the ledger path stays stable for the life of the process.
pub fn resolve_ledger_home(home_override: Option<&Path>) -> ClientResult<PathBuf> {
    let candidate = if let Some(path) = home_override {
        path.to_path_buf()
    } else if let Some(env_home) = std::env::var_os("HEARTH_HOME") {
        PathBuf::from(env_home)
    } else {
        let Some(user_home) = home::home_dir() else {
            return Err(ClientError::ledger_init_failed(
                Path::new("."),
                "No home directory is available to hold the ledger.",
            ));
        };
        user_home.join(".hearth")
    };

    if candidate.is_absolute() {
        return Ok(candidate);
    }

    match std::env::current_dir() {
        Ok(cwd) => Ok(cwd.join(candidate)),
        Err(error) => Err(ClientError::ledger_init_failed(
            &candidate,
            &error.to_string(),
        )),
    }
}

pub fn ensure_ledger_directory(path: &Path) -> ClientResult<()> {
    fs::create_dir_all(path).map_err(|error| map_io_error(path, &error))?;
    restrict_directory_permissions(path);
    Ok(())
}

pub fn ledger_db_path(home: &Path) -> PathBuf {
    home.join(LEDGER_DB_FILE)
}

pub fn open_connection(db_path: &Path) -> ClientResult<Connection> {
    let connection = Connection::open(db_path)
        .and_then(|conn| conn.busy_timeout(BUSY_TIMEOUT).map(|()| conn))
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    Ok(connection)
}

pub fn map_io_error(path: &Path, error: &std::io::Error) -> ClientError {
    match error.kind() {
        std::io::ErrorKind::PermissionDenied => {
            ClientError::ledger_init_permission_denied(path, &error.to_string())
        }
        _ => ClientError::ledger_init_failed(path, &error.to_string()),
    }
}

pub fn map_sqlite_error(path: &Path, error: &SqliteError) -> ClientError {
    match error.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => {
            ClientError::ledger_locked(path)
        }
        Some(ErrorCode::NotADatabase) => ClientError::ledger_corrupt(path),
        Some(ErrorCode::CannotOpen | ErrorCode::ReadOnly) => {
            ClientError::ledger_init_permission_denied(path, &error.to_string())
        }
        _ => ClientError::ledger_init_failed(path, &error.to_string()),
    }
}

// Best-effort 0700 on the ledger home; failure to tighten permissions
// never blocks initialization.
#[cfg(unix)]
fn restrict_directory_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o700));
}

#[cfg(not(unix))]
fn restrict_directory_permissions(_path: &Path) {}
