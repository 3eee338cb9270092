use std::path::Path;

use crate::ClientResult;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ImportData;
use crate::import;
use crate::query::list_items;
use crate::setup::ensure_initialized_with_home_override;
use crate::state::open_readonly_connection;

#[derive(Debug, Default)]
pub struct ImportOptions<'a> {
    pub path: String,
    pub home_override: Option<&'a Path>,
    pub content_override: Option<String>,
}

pub fn run(path: String) -> ClientResult<SuccessEnvelope> {
    run_with_options(ImportOptions {
        path,
        home_override: None,
        content_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ImportOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = ensure_initialized_with_home_override(options.home_override)?;
    let summary = import::execute(&setup, &options.path, options.content_override)?;

    // Re-read so the reported catalog and range reflect the replaced rows.
    let refreshed = ensure_initialized_with_home_override(options.home_override)?;
    let db_path = Path::new(&refreshed.db_path);
    let connection = open_readonly_connection(db_path)?;
    let items = list_items(&connection, db_path)?.into_items();

    let message = format!(
        "Imported {} transactions, replacing {} existing rows.",
        summary.inserted, summary.replaced
    );
    success(
        "import",
        ImportData {
            path: options.path,
            message,
            summary,
            items,
            data_range: refreshed.data_range,
        },
    )
}
