use chrono::NaiveDate;

use crate::query::catalog::Catalog;
use crate::query::extract::EntityExtractor;
use crate::query::merge::merge_filters;
use crate::query::mode::select_mode;
use crate::query::temporal::resolve_period;
use crate::query::types::{FilterSet, QueryMode};

pub struct ResolveInput<'a> {
    pub text: &'a str,
    pub explicit: FilterSet,
    pub catalog: &'a Catalog,
    pub extractor: &'a EntityExtractor,
    pub today: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub explicit: FilterSet,
    pub inferred: FilterSet,
    pub filters: FilterSet,
    pub mode: QueryMode,
}

/// Turns free text plus explicit form filters into the final filter set and
/// query mode. Pure over its inputs.
pub fn resolve(input: ResolveInput<'_>) -> Resolution {
    let lowered = input.text.to_lowercase();
    tracing::debug!(text = %input.text, explicit = ?input.explicit, "resolving query");

    let inferred = infer_filters(&lowered, input.catalog, input.extractor, input.today);
    tracing::debug!(?inferred, "inferred filters");

    let filters = merge_filters(&input.explicit, &inferred);
    tracing::debug!(?filters, "combined filters");

    let mode = select_mode(&lowered);
    tracing::debug!(mode = mode.as_str(), "selected query mode");

    Resolution {
        explicit: input.explicit,
        inferred,
        filters,
        mode,
    }
}

/// Filters read from lowercased text alone.
pub fn infer_filters(
    lowered: &str,
    catalog: &Catalog,
    extractor: &EntityExtractor,
    today: NaiveDate,
) -> FilterSet {
    if lowered.trim().is_empty() {
        return FilterSet::default();
    }

    let entities = extractor.extract(lowered, catalog);
    FilterSet {
        period: resolve_period(lowered, today),
        ..entities
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{ResolveInput, resolve};
    use crate::query::catalog::Catalog;
    use crate::query::extract::EntityExtractor;
    use crate::query::types::{FilterSet, Period, QueryMode, TransactionType};

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(value) => value,
            None => panic!("invalid fixture date"),
        }
    }

    fn extractor() -> EntityExtractor {
        match EntityExtractor::new() {
            Ok(value) => value,
            Err(error) => panic!("extractor should build: {error}"),
        }
    }

    fn widgets() -> Catalog {
        Catalog::new(vec!["Widget A".to_string(), "Widget B".to_string()])
    }

    #[test]
    fn sales_today_with_item_resolves_to_summary() {
        let extractor = extractor();
        let catalog = widgets();
        let today = day(2024, 3, 15);

        let resolution = resolve(ResolveInput {
            text: "Widget A today",
            explicit: FilterSet::default(),
            catalog: &catalog,
            extractor: &extractor,
            today,
        });

        assert_eq!(resolution.filters.item_name.as_deref(), Some("Widget A"));
        assert_eq!(resolution.filters.period, Some(Period::Date(today)));
        assert_eq!(resolution.mode, QueryMode::Summary);
    }

    #[test]
    fn longer_sentence_keeps_type_and_date_but_not_item() {
        let extractor = extractor();
        let catalog = widgets();
        let today = day(2024, 3, 15);

        let resolution = resolve(ResolveInput {
            text: "widget a sales today",
            explicit: FilterSet::default(),
            catalog: &catalog,
            extractor: &extractor,
            today,
        });

        assert_eq!(
            resolution.filters.transaction_type,
            Some(TransactionType::Sale)
        );
        assert_eq!(resolution.filters.date(), Some(today));
        assert_eq!(resolution.filters.item_name, None);
        assert_eq!(resolution.mode, QueryMode::Summary);
    }

    #[test]
    fn explicit_filters_override_inferred_ones() {
        let extractor = extractor();
        let catalog = widgets();

        let resolution = resolve(ResolveInput {
            text: "sale for C001",
            explicit: FilterSet {
                customer_id: Some("C777".to_string()),
                ..FilterSet::default()
            },
            catalog: &catalog,
            extractor: &extractor,
            today: day(2024, 3, 15),
        });

        assert_eq!(resolution.inferred.customer_id.as_deref(), Some("C001"));
        assert_eq!(resolution.filters.customer_id.as_deref(), Some("C777"));
        assert_eq!(
            resolution.filters.transaction_type,
            Some(TransactionType::Sale)
        );
        assert_eq!(resolution.mode, QueryMode::Listing);
    }

    #[test]
    fn mode_follows_text_not_explicit_date() {
        let extractor = extractor();
        let catalog = widgets();

        let resolution = resolve(ResolveInput {
            text: "sales this month",
            explicit: FilterSet {
                period: Some(Period::Date(day(2024, 3, 2))),
                ..FilterSet::default()
            },
            catalog: &catalog,
            extractor: &extractor,
            today: day(2024, 3, 15),
        });

        assert_eq!(resolution.filters.date(), Some(day(2024, 3, 2)));
        assert!(resolution.inferred.date_range().is_some());
        assert_eq!(resolution.mode, QueryMode::Summary);
    }

    #[test]
    fn blank_text_infers_nothing() {
        let extractor = extractor();
        let catalog = widgets();

        let resolution = resolve(ResolveInput {
            text: "   ",
            explicit: FilterSet::default(),
            catalog: &catalog,
            extractor: &extractor,
            today: day(2024, 3, 15),
        });

        assert!(resolution.inferred.is_empty());
        assert!(resolution.filters.is_empty());
        assert_eq!(resolution.mode, QueryMode::Listing);
    }

    #[test]
    fn resolution_is_deterministic() {
        let extractor = extractor();
        let catalog = widgets();
        let run = || {
            resolve(ResolveInput {
                text: "widget b bought in january by c314",
                explicit: FilterSet::default(),
                catalog: &catalog,
                extractor: &extractor,
                today: day(2024, 3, 15),
            })
        };

        assert_eq!(run(), run());
    }
}
