use std::path::{Path, PathBuf};

use crate::ClientResult;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ItemsData;
use crate::query::list_items;
use crate::setup::ensure_initialized_with_home_override;
use crate::state::open_readonly_connection;

#[derive(Debug, Default)]
pub struct ItemsOptions<'a> {
    pub home_override: Option<&'a Path>,
}

pub fn run() -> ClientResult<SuccessEnvelope> {
    run_with_options(ItemsOptions::default())
}

#[doc(hidden)]
pub fn run_with_options(options: ItemsOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = ensure_initialized_with_home_override(options.home_override)?;
    let db_path = PathBuf::from(&setup.db_path);
    let connection = open_readonly_connection(&db_path)?;
    let items = list_items(&connection, &db_path)?.into_items();

    success(
        "items",
        ItemsData {
            item_count: items.len() as i64,
            items,
        },
    )
}
