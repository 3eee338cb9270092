use serde::Deserialize;

use crate::setup::TRANSACTIONS_COLUMNS;
use crate::{ClientError, ClientResult};

/// One CSV record with every cell kept as raw text. Columns are matched by
/// header name, so the file may list them in any order.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ParsedRow {
    #[serde(skip)]
    pub(crate) row: i64,
    pub(crate) transaction_id: Option<String>,
    pub(crate) customer_id: Option<String>,
    pub(crate) customer_name: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) item_id: Option<String>,
    pub(crate) item_name: Option<String>,
    pub(crate) price: Option<String>,
    pub(crate) quantity: Option<String>,
    pub(crate) total_amount: Option<String>,
    pub(crate) transaction_type: Option<String>,
    pub(crate) date: Option<String>,
}

pub(crate) fn parse_csv(content: &str) -> ClientResult<Vec<ParsedRow>> {
    if content.trim().is_empty() {
        return Err(invalid_input_error("The import file has no content."));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let header_record = reader
        .headers()
        .map_err(|_| invalid_input_error("Could not read the CSV header row."))?;
    let headers = header_record
        .iter()
        .map(str::to_owned)
        .collect::<Vec<String>>();
    if !matches_transaction_columns(&headers) {
        let expected = TRANSACTIONS_COLUMNS.map(str::to_owned).to_vec();
        return Err(ClientError::import_schema_mismatch(expected, headers));
    }

    reader
        .deserialize::<ParsedRow>()
        .zip(1_i64..)
        .map(|(record, row)| {
            record
                .map(|parsed| ParsedRow { row, ..parsed })
                .map_err(|error| {
                    invalid_input_error(&format!("CSV row {row} could not be read: {error}"))
                })
        })
        .collect()
}

pub(crate) fn invalid_input_error(message: &str) -> ClientError {
    ClientError::invalid_argument_with_recovery(
        message,
        vec![
            "Provide a CSV file with one header row naming the transaction columns.".to_string(),
            "Run `tally import --help` to review the expected columns.".to_string(),
        ],
    )
}

/// Exactly the transaction columns, each once, in any order.
fn matches_transaction_columns(headers: &[String]) -> bool {
    headers.len() == TRANSACTIONS_COLUMNS.len()
        && TRANSACTIONS_COLUMNS
            .iter()
            .all(|column| headers.iter().filter(|header| header == column).count() == 1)
}
