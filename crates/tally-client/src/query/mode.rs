use crate::query::temporal::MONTH_NAMES;
use crate::query::types::QueryMode;

const SUMMARY_PHRASES: [&str; 3] = ["today", "this month", "last month"];

/// Picks the summary view whenever the lowercased text uses summary-style
/// temporal language, whether or not a filter was resolved from it.
pub fn select_mode(text: &str) -> QueryMode {
    let has_phrase = SUMMARY_PHRASES.iter().any(|phrase| text.contains(phrase));
    let has_month = MONTH_NAMES.iter().any(|month| text.contains(month));

    if has_phrase || has_month {
        QueryMode::Summary
    } else {
        QueryMode::Listing
    }
}
