use std::path::Path;

use rusqlite::{Connection, TransactionBehavior, params};

use crate::ClientResult;
use crate::import::CanonicalTransaction;
use crate::state::map_sqlite_error;

#[derive(Debug, Clone, Copy)]
pub(crate) struct PersistResult {
    pub(crate) replaced: i64,
    pub(crate) inserted: i64,
}

/// Replaces the whole `transactions` table with `rows` in one immediate
/// transaction.
pub(crate) fn replace_transactions(
    connection: &mut Connection,
    db_path: &Path,
    rows: &[CanonicalTransaction],
) -> ClientResult<PersistResult> {
    let transaction = connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let replaced = transaction
        .execute("DELETE FROM transactions", [])
        .map_err(|error| map_sqlite_error(db_path, &error))? as i64;

    let mut inserted = 0_i64;
    {
        let mut statement = transaction
            .prepare(
                "INSERT INTO transactions (
                    transaction_id,
                    customer_id,
                    customer_name,
                    email,
                    item_id,
                    item_name,
                    price,
                    quantity,
                    total_amount,
                    transaction_type,
                    date
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )
            .map_err(|error| map_sqlite_error(db_path, &error))?;

        for row in rows {
            statement
                .execute(params![
                    &row.transaction_id,
                    &row.customer_id,
                    &row.customer_name,
                    &row.email,
                    &row.item_id,
                    &row.item_name,
                    row.price,
                    row.quantity,
                    row.total_amount,
                    row.transaction_type.as_str(),
                    &row.date,
                ])
                .map_err(|error| map_sqlite_error(db_path, &error))?;
            inserted += 1;
        }
    }

    transaction
        .commit()
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    Ok(PersistResult { replaced, inserted })
}
