use std::io;

use serde_json::Value;

use super::format;

pub fn render_items(data: &Value) -> io::Result<String> {
    let items = data
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("items output requires items"))?;

    if items.is_empty() {
        return Ok([
            "No items found yet.",
            "",
            "Load transactions first:",
            "  1. tally import --help",
            "  2. tally import <path>",
        ]
        .join("\n"));
    }

    let mut lines = vec![format!(
        "{} in the catalog:",
        format::plural(items.len(), "item", "items")
    )];
    lines.extend(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(|name| format!("  {name}")),
    );
    Ok(lines.join("\n"))
}
