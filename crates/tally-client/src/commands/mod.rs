pub mod import;
pub mod items;
pub mod query;
