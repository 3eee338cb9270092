use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use crate::contracts::types::DataRange;
use crate::migrations::{EXPECTED_SCHEMA_VERSION, REQUIRED_INDEX_NAMES, run_pending};
use crate::state::{
    ensure_store_directory, map_sqlite_error, open_connection, resolve_store_home, store_db_path,
};
use crate::{ClientError, ClientResult};

pub(crate) const TRANSACTIONS_TABLE: &str = "transactions";
pub(crate) const TRANSACTIONS_COLUMNS: [&str; 11] = [
    "transaction_id",
    "customer_id",
    "customer_name",
    "email",
    "item_id",
    "item_name",
    "price",
    "quantity",
    "total_amount",
    "transaction_type",
    "date",
];

#[derive(Debug, Clone)]
pub struct SetupContext {
    pub db_path: String,
    pub schema_version: String,
    pub data_range: DataRange,
}

pub fn ensure_initialized() -> ClientResult<SetupContext> {
    ensure_initialized_with_home_override(None)
}

pub fn ensure_initialized_at(home_override: &Path) -> ClientResult<SetupContext> {
    ensure_initialized_with_home_override(Some(home_override))
}

pub(crate) fn ensure_initialized_with_home_override(
    home_override: Option<&Path>,
) -> ClientResult<SetupContext> {
    let store_home = resolve_store_home(home_override)?;
    ensure_store_directory(&store_home)?;

    let db_path = store_db_path(&store_home);
    let mut connection = open_connection(&db_path)?;
    run_pending(&mut connection).map_err(|error| migration_error(&db_path, error))?;

    let sqlite_error = |error: rusqlite::Error| map_sqlite_error(&db_path, &error);

    if !schema_is_complete(&connection).map_err(sqlite_error)? {
        return Err(ClientError::store_corrupt(&db_path));
    }

    let schema_version = connection
        .query_row(
            "SELECT value FROM internal_meta WHERE key = 'schema_version'",
            [],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(sqlite_error)?;
    let Some(schema_version) = schema_version.filter(|value| value == EXPECTED_SCHEMA_VERSION)
    else {
        return Err(ClientError::store_corrupt(&db_path));
    };

    let data_range = connection
        .query_row(
            &format!("SELECT MIN(date), MAX(date) FROM {TRANSACTIONS_TABLE}"),
            [],
            |row| {
                Ok(DataRange {
                    earliest: row.get(0)?,
                    latest: row.get(1)?,
                })
            },
        )
        .map_err(sqlite_error)?;

    tracing::debug!(db_path = %db_path.display(), %schema_version, "store initialized");

    Ok(SetupContext {
        db_path: db_path.display().to_string(),
        schema_version,
        data_range,
    })
}

/// Lock, corruption and permission failures keep their own codes; anything
/// else raised while migrating is a migration failure.
fn migration_error(db_path: &Path, error: rusqlite_migration::Error) -> ClientError {
    if let rusqlite_migration::Error::RusqliteError { err, .. } = &error {
        let mapped = map_sqlite_error(db_path, err);
        if mapped.is_internal() && mapped.code != "store_init_failed" {
            return mapped;
        }
    }
    ClientError::migration_failed(db_path, &error.to_string())
}

/// True when the transactions table carries every expected column and every
/// required index exists.
fn schema_is_complete(connection: &Connection) -> rusqlite::Result<bool> {
    let mut columns = connection.prepare("SELECT name FROM pragma_table_info(?1)")?;
    let present = columns
        .query_map([TRANSACTIONS_TABLE], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    if !TRANSACTIONS_COLUMNS
        .iter()
        .all(|required| present.iter().any(|column| column == required))
    {
        return Ok(false);
    }

    let mut index_lookup =
        connection.prepare("SELECT 1 FROM sqlite_master WHERE type = 'index' AND name = ?1")?;
    for index_name in REQUIRED_INDEX_NAMES {
        if !index_lookup.exists([index_name])? {
            return Ok(false);
        }
    }
    Ok(true)
}
