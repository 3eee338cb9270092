use std::collections::{HashMap, HashSet};

use crate::contracts::types::{ImportIssue, ImportSummary};
use crate::date::parse_iso_date;
use crate::import::CanonicalTransaction;
use crate::import::parse::ParsedRow;
use crate::query::types::TransactionType;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub(crate) struct ValidatedRows {
    pub(crate) rows: Vec<CanonicalTransaction>,
    pub(crate) summary: ImportSummary,
}

pub(crate) fn validate_rows(parsed_rows: Vec<ParsedRow>) -> ClientResult<ValidatedRows> {
    let total_rows = parsed_rows.len();
    let mut rows = Vec::new();
    let mut issues = Vec::new();
    let mut first_row_by_id: HashMap<String, i64> = HashMap::new();

    for raw in parsed_rows {
        let mut row_issues = Vec::new();

        let transaction_id = validate_required_string(
            raw.row,
            "transaction_id",
            raw.transaction_id,
            &mut row_issues,
        );
        if let Some(id) = &transaction_id {
            if let Some(first_row) = first_row_by_id.get(id) {
                row_issues.push(ImportIssue {
                    row: raw.row,
                    field: "transaction_id".to_string(),
                    code: "duplicate_transaction_id".to_string(),
                    description: format!(
                        "transaction_id \"{id}\" already appears on row {first_row}."
                    ),
                    expected: Some("unique value per row".to_string()),
                    received: Some(id.clone()),
                });
            } else {
                first_row_by_id.insert(id.clone(), raw.row);
            }
        }

        let item_name =
            validate_required_string(raw.row, "item_name", raw.item_name, &mut row_issues);
        let price = validate_integer(raw.row, "price", raw.price, &mut row_issues);
        let quantity = validate_integer(raw.row, "quantity", raw.quantity, &mut row_issues);
        let total_amount =
            validate_integer(raw.row, "total_amount", raw.total_amount, &mut row_issues);
        let transaction_type =
            validate_transaction_type(raw.row, raw.transaction_type, &mut row_issues);
        let date = validate_date(raw.row, raw.date, &mut row_issues);

        if row_issues.is_empty()
            && let (
                Some(transaction_id),
                Some(item_name),
                Some(price),
                Some(quantity),
                Some(total_amount),
                Some(transaction_type),
                Some(date),
            ) = (
                transaction_id,
                item_name,
                price,
                quantity,
                total_amount,
                transaction_type,
                date,
            )
        {
            rows.push(CanonicalTransaction {
                transaction_id,
                customer_id: normalize_optional(raw.customer_id),
                customer_name: normalize_optional(raw.customer_name),
                email: normalize_optional(raw.email),
                item_id: normalize_optional(raw.item_id),
                item_name,
                price,
                quantity,
                total_amount,
                transaction_type,
                date,
            });
        } else {
            issues.extend(row_issues);
        }
    }

    let summary = ImportSummary {
        rows_read: total_rows as i64,
        rows_valid: rows.len() as i64,
        rows_invalid: issues
            .iter()
            .map(|issue| issue.row)
            .collect::<HashSet<i64>>()
            .len() as i64,
        replaced: 0,
        inserted: 0,
    };

    if !issues.is_empty() {
        return Err(ClientError::import_validation_failed(summary, issues));
    }

    Ok(ValidatedRows { rows, summary })
}

fn validate_required_string(
    row: i64,
    field: &str,
    value: Option<String>,
    issues: &mut Vec<ImportIssue>,
) -> Option<String> {
    let normalized = normalize_optional(value);
    if normalized.is_none() {
        issues.push(missing_field(row, field, "non-empty string"));
    }
    normalized
}

fn validate_integer(
    row: i64,
    field: &str,
    value: Option<String>,
    issues: &mut Vec<ImportIssue>,
) -> Option<i64> {
    let Some(candidate) = normalize_optional(value) else {
        issues.push(missing_field(row, field, "integer (e.g. 120)"));
        return None;
    };

    match candidate.parse::<i64>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            issues.push(ImportIssue {
                row,
                field: field.to_string(),
                code: "invalid_integer".to_string(),
                description: format!("{field} must be a whole number; got \"{candidate}\""),
                expected: Some("integer (e.g. 120)".to_string()),
                received: Some(candidate),
            });
            None
        }
    }
}

fn validate_transaction_type(
    row: i64,
    value: Option<String>,
    issues: &mut Vec<ImportIssue>,
) -> Option<TransactionType> {
    let Some(candidate) = normalize_optional(value) else {
        issues.push(missing_field(row, "transaction_type", "SALE or PURCHASE"));
        return None;
    };

    let parsed = TransactionType::parse(&candidate);
    if parsed.is_none() {
        issues.push(ImportIssue {
            row,
            field: "transaction_type".to_string(),
            code: "invalid_transaction_type".to_string(),
            description: format!("transaction_type must be SALE or PURCHASE; got \"{candidate}\""),
            expected: Some("SALE or PURCHASE".to_string()),
            received: Some(candidate),
        });
    }
    parsed
}

fn validate_date(row: i64, value: Option<String>, issues: &mut Vec<ImportIssue>) -> Option<String> {
    let Some(candidate) = normalize_optional(value) else {
        issues.push(missing_field(row, "date", "YYYY-MM-DD"));
        return None;
    };

    if parse_iso_date(&candidate).is_none() {
        issues.push(ImportIssue {
            row,
            field: "date".to_string(),
            code: "invalid_date".to_string(),
            description: format!("date must be a real YYYY-MM-DD date; got \"{candidate}\""),
            expected: Some("YYYY-MM-DD".to_string()),
            received: Some(candidate),
        });
        return None;
    }

    Some(candidate)
}

fn missing_field(row: i64, field: &str, expected: &str) -> ImportIssue {
    ImportIssue {
        row,
        field: field.to_string(),
        code: "missing_required_field".to_string(),
        description: format!("{field} must be present and non-empty."),
        expected: Some(expected.to_string()),
        received: Some(String::new()),
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    let raw = value?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}
