use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::category::OsCategory;

/// Per-category evidence accumulator for a single classification run.
/// Votes only add weight; nothing ever subtracts, so accumulators are
/// monotonically non-decreasing within a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTable {
    scores: [u32; 6],
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, category: OsCategory, weight: u32) {
        self.scores[category.index()] += weight;
    }

    pub fn get(&self, category: OsCategory) -> u32 {
        self.scores[category.index()]
    }

    /// All categories sorted by score descending. Equal scores keep the
    /// canonical enumeration order (stable sort), so the first entry of a
    /// tied group is deterministic for identical inputs.
    pub fn ranked(&self) -> Vec<(OsCategory, u32)> {
        let mut entries: Vec<(OsCategory, u32)> = OsCategory::ALL
            .iter()
            .map(|&cat| (cat, self.get(cat)))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

impl Serialize for ScoreTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(OsCategory::ALL.len()))?;
        for cat in OsCategory::ALL {
            map.serialize_entry(cat.key(), &self.get(cat))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_is_zeroed() {
        let table = ScoreTable::new();
        for cat in OsCategory::ALL {
            assert_eq!(table.get(cat), 0);
        }
    }

    #[test]
    fn test_add_accumulates_per_category() {
        let mut table = ScoreTable::new();
        table.add(OsCategory::Ios, 5);
        table.add(OsCategory::Ios, 6);
        table.add(OsCategory::Android, 2);
        assert_eq!(table.get(OsCategory::Ios), 11);
        assert_eq!(table.get(OsCategory::Android), 2);
        assert_eq!(table.get(OsCategory::Linux), 0);
    }

    #[test]
    fn test_ranked_breaks_ties_in_canonical_order() {
        let mut table = ScoreTable::new();
        table.add(OsCategory::Macos, 2);
        table.add(OsCategory::Windows, 2);
        table.add(OsCategory::Linux, 2);
        let ranked = table.ranked();
        assert_eq!(ranked[0], (OsCategory::Macos, 2));
        assert_eq!(ranked[1], (OsCategory::Windows, 2));
        assert_eq!(ranked[2], (OsCategory::Linux, 2));
        assert_eq!(ranked[3].1, 0);
    }

    #[test]
    fn test_serializes_as_keyed_map() {
        let mut table = ScoreTable::new();
        table.add(OsCategory::Android, 4);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["android"], 4);
        assert_eq!(json["ipados"], 0);
    }
}
