use tally_client::commands;
use tally_client::commands::query::{ExplicitFields, QueryOptions};
use tally_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Query {
            text,
            customer_id,
            item_name,
            transaction_type,
            date,
            today,
            json: _,
        } => commands::query::run_with_options(QueryOptions {
            text: text.clone().unwrap_or_default(),
            explicit: ExplicitFields {
                customer_id: customer_id.clone(),
                item_name: item_name.clone(),
                transaction_type: transaction_type.clone(),
                date: date.clone(),
            },
            today: *today,
            home_override: None,
        }),
        Commands::Items { .. } => commands::items::run(),
        Commands::Import { path, .. } => commands::import::run(path.clone()),
    }
}
