use std::collections::HashSet;

use crate::index::KeyIndex;
use crate::model::{Side, StockStatus};

/// The three disjoint key sets covering `K_latest ∪ K_older`.
#[derive(Debug, Default)]
pub struct KeySets {
    pub common: HashSet<String>,
    pub sold: HashSet<String>,
    pub new: HashSet<String>,
}

impl KeySets {
    pub fn partition(latest: &KeyIndex, older: &KeyIndex) -> Self {
        let mut sets = KeySets::default();

        for key in latest.keys() {
            if older.contains(key) {
                sets.common.insert(key.clone());
            } else {
                sets.new.insert(key.clone());
            }
        }
        for key in older.keys() {
            if !latest.contains(key) {
                sets.sold.insert(key.clone());
            }
        }

        sets
    }

    /// Status of a row from `side` carrying `key`: in both snapshots is in
    /// stock, latest only is a new arrival, older only is sold.
    pub fn status_of(&self, side: Side, key: &str) -> StockStatus {
        if self.common.contains(key) {
            StockStatus::InStock
        } else {
            match side {
                Side::Latest => StockStatus::NewArrival,
                Side::Older => StockStatus::Sold,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Record, Snapshot};

    fn index(side: Side, keys: &[&str]) -> KeyIndex {
        let s = Snapshot::new(
            side.as_str(),
            keys.iter().map(|k| Record::new().with("Ref.No", *k)).collect(),
        );
        KeyIndex::build(&s, side, "Ref.No").unwrap()
    }

    #[test]
    fn partition_is_disjoint_and_complete() {
        let latest = index(Side::Latest, &["A1", "B2", "C3"]);
        let older = index(Side::Older, &["B2", "C3", "D4", "E5"]);
        let sets = KeySets::partition(&latest, &older);

        assert_eq!(sets.common, HashSet::from(["B2".into(), "C3".into()]));
        assert_eq!(sets.new, HashSet::from(["A1".into()]));
        assert_eq!(sets.sold, HashSet::from(["D4".into(), "E5".into()]));
        assert!(sets.common.is_disjoint(&sets.new));
        assert!(sets.common.is_disjoint(&sets.sold));
        assert!(sets.new.is_disjoint(&sets.sold));
    }

    #[test]
    fn status_by_side() {
        let latest = index(Side::Latest, &["A1", "B2"]);
        let older = index(Side::Older, &["B2", "C3"]);
        let sets = KeySets::partition(&latest, &older);

        assert_eq!(sets.status_of(Side::Latest, "A1"), StockStatus::NewArrival);
        assert_eq!(sets.status_of(Side::Latest, "B2"), StockStatus::InStock);
        assert_eq!(sets.status_of(Side::Older, "B2"), StockStatus::InStock);
        assert_eq!(sets.status_of(Side::Older, "C3"), StockStatus::Sold);
    }
}
