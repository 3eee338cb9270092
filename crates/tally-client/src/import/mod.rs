pub(crate) mod parse;
pub(crate) mod persist;
pub(crate) mod validate;

use std::fs;
use std::path::PathBuf;

use crate::contracts::types::ImportSummary;
use crate::query::types::TransactionType;
use crate::setup::SetupContext;
use crate::state::open_connection;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub(crate) struct CanonicalTransaction {
    pub transaction_id: String,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub email: Option<String>,
    pub item_id: Option<String>,
    pub item_name: String,
    pub price: i64,
    pub quantity: i64,
    pub total_amount: i64,
    pub transaction_type: TransactionType,
    pub date: String,
}

pub(crate) fn execute(
    setup: &SetupContext,
    path: &str,
    content_override: Option<String>,
) -> ClientResult<ImportSummary> {
    let content = match content_override {
        Some(body) => body,
        None => fs::read_to_string(path)
            .map_err(|error| ClientError::import_source_unreadable(path, &error.to_string()))?,
    };

    let parsed_rows = parse::parse_csv(&content)?;
    let validated = validate::validate_rows(parsed_rows)?;

    let db_path = PathBuf::from(&setup.db_path);
    let mut connection = open_connection(&db_path)?;
    let persisted = persist::replace_transactions(&mut connection, &db_path, &validated.rows)?;

    tracing::info!(
        path,
        replaced = persisted.replaced,
        inserted = persisted.inserted,
        "transactions replaced from csv"
    );

    Ok(ImportSummary {
        replaced: persisted.replaced,
        inserted: persisted.inserted,
        ..validated.summary
    })
}
