use std::io;

use serde_json::Value;

use super::format;

pub fn render_import(data: &Value) -> io::Result<String> {
    let summary = data
        .get("summary")
        .ok_or_else(|| io::Error::other("import output requires summary"))?;

    let mut lines = vec![
        "Import completed successfully.".to_string(),
        String::new(),
        "Summary:".to_string(),
    ];
    lines.extend(format::key_value_rows(
        &[
            ("Source:", format::value_text(data, "path")),
            ("Rows read:", format::value_i64(summary, "rows_read").to_string()),
            ("Rows valid:", format::value_i64(summary, "rows_valid").to_string()),
            ("Replaced:", format::value_i64(summary, "replaced").to_string()),
            ("Inserted:", format::value_i64(summary, "inserted").to_string()),
        ],
        2,
    ));

    let range = data.get("data_range").cloned().unwrap_or(Value::Null);
    if let (Some(earliest), Some(latest)) = (
        range.get("earliest").and_then(Value::as_str),
        range.get("latest").and_then(Value::as_str),
    ) {
        lines.push(String::new());
        lines.push(format!("Transactions now cover {earliest} to {latest}."));
    }

    let item_count = data
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);
    lines.push(format!(
        "{} available for item matching.",
        format::plural(item_count, "item is", "items are")
    ));

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    lines.push("  1. tally items".to_string());
    lines.push("  2. tally query \"sales this month\"".to_string());

    Ok(lines.join("\n"))
}
