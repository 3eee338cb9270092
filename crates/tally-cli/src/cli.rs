use chrono::NaiveDate;
use clap::{Parser, Subcommand};

pub fn parse_reference_date(value: &str) -> Result<NaiveDate, String> {
    tally_client::date::parse_iso_date(value)
        .ok_or_else(|| "date must use YYYY-MM-DD format with valid calendar values".to_string())
}

/// Extended help shown after `tally query --help`.
pub const QUERY_AFTER_HELP: &str = "\
How queries are read:
  The text is lowercased and scanned for filters:
    customer    a code like c001 or C001
    type        sale / sold / selling, or purchase / bought / buy
    item        the closest catalog item name (see `tally items`)
    period      today, yesterday, last week, this month, last month,
                or a month name (a month later than the current one
                means last year)

  Flags always win over what the text implies.

Listing vs summary:
  Text mentioning today, this month, last month, or a month name returns
  sales totals per item. Everything else lists matching transactions.

Examples:
  tally query \"sales today\"
  tally query \"what did c001 buy last week\"
  tally query \"widget a in march\" --today 2024-03-31
  tally query \"\" --item-name \"Widget A\" --transaction-type SALE
";

/// Extended help shown after `tally import --help`.
pub const IMPORT_AFTER_HELP: &str = "\
CSV schema (one header row, any column order):
  transaction_id,customer_id,customer_name,email,item_id,item_name,price,quantity,total_amount,transaction_type,date

Field rules:
  transaction_id     required, unique within the file
  item_name          required
  price              whole number
  quantity           whole number
  total_amount       whole number
  transaction_type   SALE or PURCHASE (any case)
  date               YYYY-MM-DD

Importing replaces every stored transaction. Rows are validated first;
if any row fails, nothing is written.
";

#[derive(Debug, Parser)]
#[command(
    name = "tally",
    version,
    about = "natural-language queries over sales and purchase transactions",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Ask a question about stored transactions in plain English
    #[command(after_long_help = QUERY_AFTER_HELP)]
    Query {
        /// Free-text question, e.g. "sales last month"
        text: Option<String>,
        /// Customer id filter; overrides any id found in the text
        #[arg(long)]
        customer_id: Option<String>,
        /// Item name filter; overrides any item found in the text
        #[arg(long)]
        item_name: Option<String>,
        /// SALE or PURCHASE; overrides any type found in the text
        #[arg(long)]
        transaction_type: Option<String>,
        /// Exact date filter (YYYY-MM-DD); overrides any period in the text
        #[arg(long)]
        date: Option<String>,
        /// Reference date for relative phrases (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_reference_date)]
        today: Option<NaiveDate>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// List the distinct item names known to the store
    Items {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Replace stored transactions with the rows of a CSV file
    #[command(after_long_help = IMPORT_AFTER_HELP)]
    Import {
        /// Path to a CSV file with the transactions header
        path: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
