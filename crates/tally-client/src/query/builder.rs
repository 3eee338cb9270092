use crate::query::types::{FilterSet, Period};

const LISTING_SELECT: &str = "SELECT
    transaction_id,
    customer_id,
    customer_name,
    email,
    item_id,
    item_name,
    price,
    quantity,
    total_amount,
    transaction_type,
    date
 FROM transactions
 WHERE 1=1";

const SUMMARY_SELECT: &str = "SELECT
    item_name,
    SUM(quantity) AS total_quantity,
    SUM(total_amount) AS total_sales
 FROM transactions
 WHERE transaction_type = 'SALE'";

/// Columns that may appear literally in a generated predicate. Values never
/// do; they are always bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterColumn {
    CustomerId,
    TransactionType,
    ItemName,
    Date,
}

impl FilterColumn {
    const fn as_str(self) -> &'static str {
        match self {
            Self::CustomerId => "customer_id",
            Self::TransactionType => "transaction_type",
            Self::ItemName => "item_name",
            Self::Date => "date",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<String>,
}

impl BuiltQuery {
    fn new(select: &str) -> Self {
        Self {
            sql: select.to_string(),
            params: Vec::new(),
        }
    }

    fn equals(&mut self, column: FilterColumn, value: String) {
        self.sql.push_str(&format!(" AND {} = ?", column.as_str()));
        self.params.push(value);
    }

    fn period(&mut self, period: &Period) {
        match period {
            Period::Date(date) => self.equals(FilterColumn::Date, date.to_string()),
            Period::Range(range) => {
                self.sql
                    .push_str(&format!(" AND {} BETWEEN ? AND ?", FilterColumn::Date.as_str()));
                self.params.push(range.start().to_string());
                self.params.push(range.end().to_string());
            }
        }
    }
}

/// Row listing constrained by every filter present.
pub fn build_listing(filters: &FilterSet) -> BuiltQuery {
    let mut query = BuiltQuery::new(LISTING_SELECT);

    if let Some(customer_id) = &filters.customer_id {
        query.equals(FilterColumn::CustomerId, customer_id.clone());
    }
    if let Some(transaction_type) = filters.transaction_type {
        query.equals(
            FilterColumn::TransactionType,
            transaction_type.as_str().to_string(),
        );
    }
    if let Some(item_name) = &filters.item_name {
        query.equals(FilterColumn::ItemName, item_name.clone());
    }
    if let Some(period) = &filters.period {
        query.period(period);
    }

    query.sql.push_str(" ORDER BY date ASC, transaction_id ASC");
    query
}

/// Per-item SALE totals. Only the temporal filter applies; customer, item and
/// transaction type filters are ignored in this shape.
pub fn build_summary(filters: &FilterSet) -> BuiltQuery {
    let mut query = BuiltQuery::new(SUMMARY_SELECT);

    if let Some(period) = &filters.period {
        query.period(period);
    }

    query
        .sql
        .push_str(" GROUP BY item_name ORDER BY total_sales DESC, item_name ASC");
    query
}
