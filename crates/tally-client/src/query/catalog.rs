use std::path::Path;

use difflib::sequencematcher::SequenceMatcher;
use rusqlite::Connection;

use crate::ClientResult;
use crate::state::map_sqlite_error;

pub const ITEM_MATCH_CUTOFF: f64 = 0.6;

/// Snapshot of the distinct item names currently stored. Read once per
/// request and never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<String>,
}

impl Catalog {
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    pub fn into_items(self) -> Vec<String> {
        self.items
    }

    /// Closest catalog entry to the whole of `text`, compared lowercase.
    ///
    /// Each entry is scored with the Ratcliff/Obershelp ratio against the
    /// text, and entries under [`ITEM_MATCH_CUTOFF`] are dropped. The highest
    /// score wins; equal scores go to the lexicographically largest
    /// lowercased entry. The returned value is the catalog's original
    /// spelling.
    pub fn closest_item(&self, text: &str) -> Option<&str> {
        let needle = text.to_lowercase().chars().collect::<Vec<char>>();

        self.items
            .iter()
            .map(|item| {
                let lowered = item.to_lowercase();
                (similarity(&lowered, &needle), lowered, item)
            })
            .filter(|(ratio, _, _)| *ratio >= ITEM_MATCH_CUTOFF)
            .max_by(|left, right| left.0.total_cmp(&right.0).then_with(|| left.1.cmp(&right.1)))
            .map(|(_, _, item)| item.as_str())
    }
}

/// Matching-block ratio with the catalog entry as the first sequence.
fn similarity(candidate: &str, needle: &[char]) -> f64 {
    let candidate = candidate.chars().collect::<Vec<char>>();
    f64::from(SequenceMatcher::new(candidate.as_slice(), needle).ratio())
}

pub fn list_items(connection: &Connection, db_path: &Path) -> ClientResult<Catalog> {
    let mut statement = connection
        .prepare(
            "SELECT DISTINCT item_name
             FROM transactions
             WHERE item_name IS NOT NULL
             ORDER BY item_name ASC",
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let rows_iter = statement
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut items = Vec::new();
    for row in rows_iter {
        items.push(row.map_err(|error| map_sqlite_error(db_path, &error))?);
    }

    Ok(Catalog::new(items))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use rusqlite::Connection;

    use super::{Catalog, list_items};

    fn widgets() -> Catalog {
        Catalog::new(vec!["Widget A".to_string(), "Widget B".to_string()])
    }

    #[test]
    fn exact_text_resolves_to_original_case() {
        assert_eq!(widgets().closest_item("widget a"), Some("Widget A"));
        assert_eq!(widgets().closest_item("WIDGET B"), Some("Widget B"));
    }

    #[test]
    fn near_miss_clears_cutoff() {
        assert_eq!(widgets().closest_item("widgit b"), Some("Widget B"));
        assert_eq!(widgets().closest_item("widget a today"), Some("Widget A"));
    }

    #[test]
    fn equal_scores_go_to_largest_entry() {
        assert_eq!(widgets().closest_item("widget"), Some("Widget B"));
        assert_eq!(widgets().closest_item("widget sold"), Some("Widget B"));
    }

    #[test]
    fn ratio_uses_matching_blocks() {
        let lamps = Catalog::new(vec!["Desk Lamp".to_string()]);
        // A longest-common-subsequence ratio would put this at 0.64.
        assert_eq!(lamps.closest_item("pen sold lamp"), None);
        assert_eq!(lamps.closest_item("desk mug pad"), None);

        let blue = Catalog::new(vec!["Blue Sale".to_string()]);
        assert_eq!(blue.closest_item("blue red screw"), Some("Blue Sale"));
    }

    #[test]
    fn long_sentences_fall_below_cutoff() {
        // The whole sentence is compared, so extra words dilute the ratio.
        assert_eq!(widgets().closest_item("widget a sales today"), None);
        assert_eq!(widgets().closest_item("sale for c001"), None);
    }

    #[test]
    fn empty_catalog_never_matches() {
        assert_eq!(Catalog::default().closest_item("widget a"), None);
    }

    #[test]
    fn list_items_returns_distinct_sorted_names() {
        let opened = Connection::open_in_memory();
        assert!(opened.is_ok());
        if let Ok(connection) = opened {
            let setup = connection.execute_batch(
                "CREATE TABLE transactions (transaction_id TEXT PRIMARY KEY, item_name TEXT);
                 INSERT INTO transactions VALUES ('t1', 'Widget B');
                 INSERT INTO transactions VALUES ('t2', 'Widget A');
                 INSERT INTO transactions VALUES ('t3', 'Widget B');
                 INSERT INTO transactions VALUES ('t4', NULL);",
            );
            assert!(setup.is_ok());

            let catalog = list_items(&connection, Path::new(":memory:"));
            assert!(catalog.is_ok());
            if let Ok(value) = catalog {
                assert_eq!(value.into_items(), ["Widget A", "Widget B"]);
            }
        }
    }
}
