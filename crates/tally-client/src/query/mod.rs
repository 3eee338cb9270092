//! Free-text filter extraction: temporal phrases, entities, explicit-filter
//! precedence and view selection, plus the SQL shapes they drive.

pub mod builder;
pub mod catalog;
pub mod extract;
pub mod merge;
pub mod mode;
pub mod resolve;
pub mod temporal;
pub mod types;

pub use builder::{BuiltQuery, build_listing, build_summary};
pub use catalog::{Catalog, list_items};
pub use extract::EntityExtractor;
pub use merge::merge_filters;
pub use mode::select_mode;
pub use resolve::{Resolution, ResolveInput, resolve};
pub use temporal::resolve_period;
pub use types::{DateRange, FilterSet, Period, QueryMode, TransactionType};
