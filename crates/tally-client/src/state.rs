use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, OpenFlags, ffi::ErrorCode};

use crate::{ClientError, ClientResult};

pub const HOME_ENV_VAR: &str = "TALLY_HOME";

const DEFAULT_HOME_DIR: &str = ".tally";
const DB_FILE_NAME: &str = "store.db";
const BUSY_TIMEOUT: Duration = Duration::from_millis(250);

/// Store home, in priority order: the caller's override, `TALLY_HOME`, then
/// `~/.tally`. Always returned as an absolute path.
pub fn resolve_store_home(home_override: Option<&Path>) -> ClientResult<PathBuf> {
    let candidate = home_override
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(HOME_ENV_VAR).map(PathBuf::from))
        .or_else(|| home::home_dir().map(|home| home.join(DEFAULT_HOME_DIR)))
        .ok_or_else(|| {
            ClientError::store_init_failed(
                Path::new("."),
                "Could not resolve a home directory for the transaction store.",
            )
        })?;

    std::path::absolute(&candidate).map_err(|error| map_io_error(&candidate, &error))
}

pub fn ensure_store_directory(path: &Path) -> ClientResult<()> {
    fs::create_dir_all(path).map_err(|error| map_io_error(path, &error))?;
    restrict_to_owner(path);
    Ok(())
}

pub fn store_db_path(home: &Path) -> PathBuf {
    home.join(DB_FILE_NAME)
}

pub fn open_connection(db_path: &Path) -> ClientResult<Connection> {
    open_with_flags(db_path, OpenFlags::default())
}

pub fn open_readonly_connection(db_path: &Path) -> ClientResult<Connection> {
    open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
}

fn open_with_flags(db_path: &Path, flags: OpenFlags) -> ClientResult<Connection> {
    let connection = Connection::open_with_flags(db_path, flags)
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    connection
        .busy_timeout(BUSY_TIMEOUT)
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    Ok(connection)
}

pub fn map_io_error(path: &Path, error: &io::Error) -> ClientError {
    match error.kind() {
        io::ErrorKind::PermissionDenied => {
            ClientError::store_init_permission_denied(path, &error.to_string())
        }
        _ => ClientError::store_init_failed(path, &error.to_string()),
    }
}

pub fn map_sqlite_error(path: &Path, error: &rusqlite::Error) -> ClientError {
    match error.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => {
            ClientError::store_locked(path)
        }
        Some(ErrorCode::NotADatabase | ErrorCode::DatabaseCorrupt) => {
            ClientError::store_corrupt(path)
        }
        Some(ErrorCode::CannotOpen | ErrorCode::ReadOnly | ErrorCode::PermissionDenied) => {
            ClientError::store_init_permission_denied(path, &error.to_string())
        }
        _ => ClientError::store_init_failed(path, &error.to_string()),
    }
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Err(error) = fs::set_permissions(path, fs::Permissions::from_mode(0o700)) {
        tracing::debug!(path = %path.display(), %error, "could not restrict store directory");
    }
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) {}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{resolve_store_home, store_db_path};

    #[test]
    fn explicit_home_override_wins() {
        let resolved = resolve_store_home(Some(Path::new("/tmp/tally-home")));
        assert!(resolved.is_ok());
        if let Ok(home) = resolved {
            assert_eq!(store_db_path(&home), Path::new("/tmp/tally-home/store.db"));
        }
    }

    #[test]
    fn relative_override_is_made_absolute() {
        let resolved = resolve_store_home(Some(Path::new("relative-home")));
        assert!(resolved.is_ok());
        if let Ok(home) = resolved {
            assert!(home.is_absolute());
            assert!(home.ends_with("relative-home"));
        }
    }
}
