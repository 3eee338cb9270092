use regex::Regex;

use crate::query::catalog::Catalog;
use crate::query::types::{FilterSet, TransactionType};
use crate::{ClientError, ClientResult};

const CUSTOMER_ID_PATTERN: &str = r"c[0-9]{3}";
const SALE_WORDS: [&str; 3] = ["sale", "sold", "selling"];
const PURCHASE_WORDS: [&str; 3] = ["purchase", "bought", "buy"];

/// Pulls customer, transaction type and item filters out of free text.
///
/// Never fails on input: anything unrecognized simply contributes no filter.
/// The temporal slot of the returned set is always empty.
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    customer_id: Regex,
}

impl EntityExtractor {
    pub fn new() -> ClientResult<Self> {
        let customer_id = Regex::new(CUSTOMER_ID_PATTERN).map_err(|error| {
            ClientError::internal_pattern(&format!(
                "Customer id pattern failed to compile: {error}"
            ))
        })?;
        Ok(Self { customer_id })
    }

    pub fn extract(&self, text: &str, catalog: &Catalog) -> FilterSet {
        FilterSet {
            customer_id: self.customer_id(text),
            transaction_type: transaction_type(text),
            item_name: catalog.closest_item(text).map(str::to_string),
            period: None,
        }
    }

    pub fn customer_id(&self, text: &str) -> Option<String> {
        self.customer_id
            .find(text)
            .map(|found| found.as_str().to_uppercase())
    }
}

pub fn transaction_type(text: &str) -> Option<TransactionType> {
    if SALE_WORDS.iter().any(|word| text.contains(word)) {
        return Some(TransactionType::Sale);
    }
    if PURCHASE_WORDS.iter().any(|word| text.contains(word)) {
        return Some(TransactionType::Purchase);
    }
    None
}
