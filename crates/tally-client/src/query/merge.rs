use crate::query::types::FilterSet;

/// Builds the combined filter set; `explicit` wins on every key both sides
/// carry. The temporal slot counts as one key, so an explicit date also
/// suppresses an inferred range.
pub fn merge_filters(explicit: &FilterSet, inferred: &FilterSet) -> FilterSet {
    FilterSet {
        customer_id: explicit
            .customer_id
            .clone()
            .or_else(|| inferred.customer_id.clone()),
        transaction_type: explicit.transaction_type.or(inferred.transaction_type),
        item_name: explicit
            .item_name
            .clone()
            .or_else(|| inferred.item_name.clone()),
        period: explicit.period.or(inferred.period),
    }
}
