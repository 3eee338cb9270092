use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rusqlite::{Connection, params_from_iter};

use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{QueryData, SummaryRow, TransactionRow};
use crate::date::{parse_iso_date, today};
use crate::query::{
    BuiltQuery, EntityExtractor, FilterSet, Period, QueryMode, ResolveInput, TransactionType,
    build_listing, build_summary, list_items, resolve,
};
use crate::setup::ensure_initialized_with_home_override;
use crate::state::{map_sqlite_error, open_readonly_connection};
use crate::{ClientError, ClientResult};

const COMMAND: &str = "query";

/// Structured form values supplied next to the free text. Blank values are
/// treated as absent.
#[derive(Debug, Clone, Default)]
pub struct ExplicitFields {
    pub customer_id: Option<String>,
    pub item_name: Option<String>,
    pub transaction_type: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Default)]
pub struct QueryOptions<'a> {
    pub text: String,
    pub explicit: ExplicitFields,
    pub today: Option<NaiveDate>,
    pub home_override: Option<&'a Path>,
}

pub fn run(text: String, explicit: ExplicitFields) -> ClientResult<SuccessEnvelope> {
    run_with_options(QueryOptions {
        text,
        explicit,
        today: None,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: QueryOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let explicit = explicit_filters(&options.explicit)?;
    let setup = ensure_initialized_with_home_override(options.home_override)?;
    let reference_date = options.today.unwrap_or_else(today);

    let db_path = PathBuf::from(&setup.db_path);
    let connection = open_readonly_connection(&db_path)?;
    let catalog = list_items(&connection, &db_path)?;
    let extractor = EntityExtractor::new()?;

    let resolution = resolve(ResolveInput {
        text: &options.text,
        explicit,
        catalog: &catalog,
        extractor: &extractor,
        today: reference_date,
    });

    let (rows, summary) = match resolution.mode {
        QueryMode::Listing => {
            let built = build_listing(&resolution.filters);
            (query_rows(&connection, &db_path, &built)?, Vec::new())
        }
        QueryMode::Summary => {
            let built = build_summary(&resolution.filters);
            (Vec::new(), query_summary(&connection, &db_path, &built)?)
        }
    };

    let data = QueryData {
        text: options.text,
        mode: resolution.mode,
        reference_date: reference_date.to_string(),
        explicit_filters: resolution.explicit,
        inferred_filters: resolution.inferred,
        filters: resolution.filters,
        rows,
        summary,
        items: catalog.into_items(),
        data_range: setup.data_range,
    };
    success(COMMAND, data)
}

/// Validates form values into a filter set. Blank or whitespace-only values
/// are dropped rather than rejected.
pub fn explicit_filters(fields: &ExplicitFields) -> ClientResult<FilterSet> {
    let transaction_type = match non_blank(fields.transaction_type.as_deref()) {
        Some(value) => Some(TransactionType::parse(value).ok_or_else(|| {
            ClientError::invalid_argument_for_command(
                &format!("`transaction_type` must be SALE or PURCHASE; got `{value}`."),
                Some(COMMAND),
            )
        })?),
        None => None,
    };

    let period = match non_blank(fields.date.as_deref()) {
        Some(value) => Some(Period::Date(parse_iso_date(value).ok_or_else(|| {
            ClientError::invalid_argument_for_command(
                "`date` must use YYYY-MM-DD format with a real calendar date.",
                Some(COMMAND),
            )
        })?)),
        None => None,
    };

    Ok(FilterSet {
        customer_id: non_blank(fields.customer_id.as_deref()).map(str::to_string),
        transaction_type,
        item_name: non_blank(fields.item_name.as_deref()).map(str::to_string),
        period,
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|candidate| !candidate.is_empty())
}

fn query_rows(
    connection: &Connection,
    db_path: &Path,
    built: &BuiltQuery,
) -> ClientResult<Vec<TransactionRow>> {
    let mut statement = connection
        .prepare(&built.sql)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let rows_iter = statement
        .query_map(params_from_iter(built.params.iter()), |row| {
            Ok(TransactionRow {
                transaction_id: row.get(0)?,
                customer_id: row.get(1)?,
                customer_name: row.get(2)?,
                email: row.get(3)?,
                item_id: row.get(4)?,
                item_name: row.get(5)?,
                price: row.get(6)?,
                quantity: row.get(7)?,
                total_amount: row.get(8)?,
                transaction_type: row.get(9)?,
                date: row.get(10)?,
            })
        })
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut rows = Vec::new();
    for row in rows_iter {
        rows.push(row.map_err(|error| map_sqlite_error(db_path, &error))?);
    }
    Ok(rows)
}

fn query_summary(
    connection: &Connection,
    db_path: &Path,
    built: &BuiltQuery,
) -> ClientResult<Vec<SummaryRow>> {
    let mut statement = connection
        .prepare(&built.sql)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let rows_iter = statement
        .query_map(params_from_iter(built.params.iter()), |row| {
            Ok(SummaryRow {
                item_name: row.get(0)?,
                total_quantity: row.get::<_, Option<i64>>(1)?.unwrap_or(0),
                total_sales: row.get::<_, Option<i64>>(2)?.unwrap_or(0),
            })
        })
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut rows = Vec::new();
    for row in rows_iter {
        rows.push(row.map_err(|error| map_sqlite_error(db_path, &error))?);
    }
    Ok(rows)
}
