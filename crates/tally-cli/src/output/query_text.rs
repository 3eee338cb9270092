use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

const FILTER_KEYS: [&str; 5] = [
    "customer_id",
    "transaction_type",
    "item_name",
    "date",
    "date_range",
];

pub fn render_query(data: &Value) -> io::Result<String> {
    let mode = data
        .get("mode")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("query output requires mode"))?;

    let mut lines = vec![
        format!("Query:           \"{}\"", format::value_text(data, "text")),
        format!("Reference date:  {}", format::value_text(data, "reference_date")),
        format!("Mode:            {mode}"),
        String::new(),
    ];
    lines.extend(render_filters(data));
    lines.push(String::new());

    match mode {
        "summary" => lines.extend(render_summary(data)?),
        _ => lines.extend(render_listing(data)?),
    }

    Ok(lines.join("\n"))
}

fn render_filters(data: &Value) -> Vec<String> {
    let filters = data.get("filters").cloned().unwrap_or(Value::Null);
    let explicit = data.get("explicit_filters").cloned().unwrap_or(Value::Null);

    let entries = FILTER_KEYS
        .iter()
        .filter_map(|key| {
            let value = filters.get(*key)?;
            let source = if explicit.get(*key).is_some() {
                "flag"
            } else {
                "text"
            };
            Some((*key, format!("{}  ({source})", filter_value_text(value))))
        })
        .collect::<Vec<(&str, String)>>();

    if entries.is_empty() {
        return vec!["Filters: none (all transactions)".to_string()];
    }

    let mut lines = vec!["Filters:".to_string()];
    lines.extend(format::key_value_rows(&entries, 2));
    lines
}

fn filter_value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Object(_) => format!(
            "{} to {}",
            format::value_text(value, "start"),
            format::value_text(value, "end")
        ),
        other => other.to_string(),
    }
}

fn render_listing(data: &Value) -> io::Result<Vec<String>> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("query output requires rows"))?;

    if rows.is_empty() {
        return Ok(render_empty(data, "No matching transactions."));
    }

    let columns = [
        Column {
            name: "ID",
            align: Align::Left,
        },
        Column {
            name: "Date",
            align: Align::Left,
        },
        Column {
            name: "Type",
            align: Align::Left,
        },
        Column {
            name: "Customer",
            align: Align::Left,
        },
        Column {
            name: "Item",
            align: Align::Left,
        },
        Column {
            name: "Qty",
            align: Align::Right,
        },
        Column {
            name: "Price",
            align: Align::Right,
        },
        Column {
            name: "Total",
            align: Align::Right,
        },
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            [
                "transaction_id",
                "date",
                "transaction_type",
                "customer_id",
                "item_name",
                "quantity",
                "price",
                "total_amount",
            ]
            .iter()
            .map(|key| format::value_text(row, key))
            .collect::<Vec<String>>()
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![format!(
        "{} found:",
        format::plural(rows.len(), "transaction", "transactions")
    )];
    lines.extend(format::render_table(&columns, &table_rows));
    Ok(lines)
}

fn render_summary(data: &Value) -> io::Result<Vec<String>> {
    let rows = data
        .get("summary")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("query output requires summary"))?;

    if rows.is_empty() {
        return Ok(render_empty(data, "No sales in this period."));
    }

    let columns = [
        Column {
            name: "Item",
            align: Align::Left,
        },
        Column {
            name: "Quantity",
            align: Align::Right,
        },
        Column {
            name: "Sales",
            align: Align::Right,
        },
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                format::value_text(row, "item_name"),
                format::value_i64(row, "total_quantity").to_string(),
                format::value_i64(row, "total_sales").to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    let grand_total = rows
        .iter()
        .map(|row| format::value_i64(row, "total_sales"))
        .sum::<i64>();

    let mut lines = vec![format!(
        "Sales by item ({}):",
        format::plural(rows.len(), "item", "items")
    )];
    lines.extend(format::render_table(&columns, &table_rows));
    lines.push(String::new());
    lines.push(format!("Total sales: {grand_total}"));
    Ok(lines)
}

fn render_empty(data: &Value, headline: &str) -> Vec<String> {
    let range = data.get("data_range").cloned().unwrap_or(Value::Null);
    let earliest = range.get("earliest").and_then(Value::as_str);
    let latest = range.get("latest").and_then(Value::as_str);

    let mut lines = vec![headline.to_string(), String::new()];
    match (earliest, latest) {
        (Some(first), Some(last)) => {
            lines.push(format!("Stored transactions cover {first} to {last}."));
            lines.push("Try a different period, or pass --today to move the reference date.".to_string());
        }
        _ => {
            lines.push("The store has no transactions yet.".to_string());
            lines.push("Run `tally import <path>` to load a CSV.".to_string());
        }
    }
    lines
}
