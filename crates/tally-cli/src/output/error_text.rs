use serde_json::Value;
use tally_client::ClientError;

/// Issues beyond this count are summarized rather than listed.
const MAX_LISTED_ISSUES: usize = 10;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        "Something went wrong, but it's easy to fix.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];

    let issues = render_import_issues(error.data.as_ref());
    if !issues.is_empty() {
        lines.push(String::new());
        lines.push("Rows to fix:".to_string());
        lines.extend(issues);
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

fn render_import_issues(data: Option<&Value>) -> Vec<String> {
    let Some(issues) = data
        .and_then(|value| value.get("issues"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    let mut lines = issues
        .iter()
        .take(MAX_LISTED_ISSUES)
        .map(|issue| {
            let row = issue.get("row").and_then(Value::as_i64).unwrap_or(0);
            let description = issue
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("invalid value");
            format!("  row {row}: {description}")
        })
        .collect::<Vec<String>>();

    if issues.len() > MAX_LISTED_ISSUES {
        lines.push(format!(
            "  ... and {} more",
            issues.len() - MAX_LISTED_ISSUES
        ));
    }
    lines
}
