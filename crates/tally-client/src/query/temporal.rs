use chrono::{Datelike, Duration, NaiveDate};

use crate::query::types::{DateRange, Period};

pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

type Resolver = fn(&str, NaiveDate) -> Option<Period>;

/// Ordered by priority; the first rule that resolves wins.
const TEMPORAL_RULES: [(&str, Resolver); 6] = [
    ("today", resolve_today),
    ("yesterday", resolve_yesterday),
    ("last_week", resolve_last_week),
    ("this_month", resolve_this_month),
    ("last_month", resolve_last_month),
    ("month_name", resolve_month_name),
];

/// Resolves the temporal phrase in already-lowercased `text` against `today`.
pub fn resolve_period(text: &str, today: NaiveDate) -> Option<Period> {
    TEMPORAL_RULES.iter().find_map(|(rule, resolver)| {
        let period = resolver(text, today)?;
        tracing::debug!(rule, ?period, "temporal rule matched");
        Some(period)
    })
}

pub fn first_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    first_day_of_month(next_year, next_month)?.pred_opt()
}

fn month_range(year: i32, month: u32) -> Option<Period> {
    let start = first_day_of_month(year, month)?;
    let end = last_day_of_month(year, month)?;
    DateRange::new(start, end).map(Period::Range)
}

fn resolve_today(text: &str, today: NaiveDate) -> Option<Period> {
    text.contains("today").then_some(Period::Date(today))
}

fn resolve_yesterday(text: &str, today: NaiveDate) -> Option<Period> {
    if !text.contains("yesterday") {
        return None;
    }
    today.pred_opt().map(Period::Date)
}

fn resolve_last_week(text: &str, today: NaiveDate) -> Option<Period> {
    if !text.contains("last week") {
        return None;
    }
    let start = today.checked_sub_signed(Duration::days(7))?;
    DateRange::new(start, today).map(Period::Range)
}

fn resolve_this_month(text: &str, today: NaiveDate) -> Option<Period> {
    if !text.contains("this month") {
        return None;
    }
    month_range(today.year(), today.month())
}

fn resolve_last_month(text: &str, today: NaiveDate) -> Option<Period> {
    if !text.contains("last month") {
        return None;
    }
    let last_day_previous = first_day_of_month(today.year(), today.month())?.pred_opt()?;
    month_range(last_day_previous.year(), last_day_previous.month())
}

fn resolve_month_name(text: &str, today: NaiveDate) -> Option<Period> {
    let month = named_month(text)?;
    // A month later in the calendar than the current one refers to last year.
    let year = if month > today.month() {
        today.year() - 1
    } else {
        today.year()
    };
    month_range(year, month)
}

/// First calendar month (in January..December order) whose name occurs in
/// `text`, as a 1-based month number.
pub fn named_month(text: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|name| text.contains(name))
        .and_then(|index| u32::try_from(index + 1).ok())
}
