use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Sale,
    Purchase,
}

impl TransactionType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sale => "SALE",
            Self::Purchase => "PURCHASE",
        }
    }

    /// Parses a form value; matching is case-insensitive and ignores
    /// surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim();
        if normalized.eq_ignore_ascii_case("sale") {
            return Some(Self::Sale);
        }
        if normalized.eq_ignore_ascii_case("purchase") {
            return Some(Self::Purchase);
        }
        None
    }
}

/// Inclusive date bounds with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if start > end {
            return None;
        }
        Some(Self { start, end })
    }

    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    pub const fn end(&self) -> NaiveDate {
        self.end
    }
}

/// The temporal slot of a filter set: a single day or an inclusive range,
/// never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Period {
    #[serde(rename = "date")]
    Date(NaiveDate),
    #[serde(rename = "date_range")]
    Range(DateRange),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(flatten)]
    pub period: Option<Period>,
}

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        self.customer_id.is_none()
            && self.transaction_type.is_none()
            && self.item_name.is_none()
            && self.period.is_none()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self.period {
            Some(Period::Date(date)) => Some(date),
            _ => None,
        }
    }

    pub fn date_range(&self) -> Option<DateRange> {
        match self.period {
            Some(Period::Range(range)) => Some(range),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    Listing,
    Summary,
}

impl QueryMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Listing => "listing",
            Self::Summary => "summary",
        }
    }
}
