use serde::Serialize;

use crate::query::types::{FilterSet, QueryMode};

#[derive(Debug, Clone, Serialize)]
pub struct DataRange {
    pub earliest: Option<String>,
    pub latest: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionRow {
    pub transaction_id: String,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub email: Option<String>,
    pub item_id: Option<String>,
    pub item_name: Option<String>,
    pub price: Option<i64>,
    pub quantity: Option<i64>,
    pub total_amount: Option<i64>,
    pub transaction_type: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    pub item_name: Option<String>,
    pub total_quantity: i64,
    pub total_sales: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryData {
    pub text: String,
    pub mode: QueryMode,
    pub reference_date: String,
    pub explicit_filters: FilterSet,
    pub inferred_filters: FilterSet,
    pub filters: FilterSet,
    pub rows: Vec<TransactionRow>,
    pub summary: Vec<SummaryRow>,
    pub items: Vec<String>,
    pub data_range: DataRange,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemsData {
    pub item_count: i64,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub rows_read: i64,
    pub rows_valid: i64,
    pub rows_invalid: i64,
    pub replaced: i64,
    pub inserted: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportIssue {
    pub row: i64,
    pub field: String,
    pub code: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportData {
    pub path: String,
    pub message: String,
    pub summary: ImportSummary,
    pub items: Vec<String>,
    pub data_range: DataRange,
}
