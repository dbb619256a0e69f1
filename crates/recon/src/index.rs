use std::collections::HashMap;

use crate::error::ReconError;
use crate::model::{Side, Snapshot};

/// Hashed key → row index for one snapshot.
///
/// Building the index validates the snapshot: every record must carry a
/// non-blank key and keys must be unique.
#[derive(Debug)]
pub struct KeyIndex {
    positions: HashMap<String, usize>,
    keys: Vec<String>,
}

impl KeyIndex {
    pub fn build(snapshot: &Snapshot, side: Side, key_field: &str) -> Result<Self, ReconError> {
        let mut positions = HashMap::with_capacity(snapshot.len());
        let mut keys = Vec::with_capacity(snapshot.len());

        for (pos, record) in snapshot.records.iter().enumerate() {
            // Reported rows are 1-based data rows
            let row = pos + 1;
            let key = record
                .get(key_field)
                .and_then(|v| v.as_key())
                .ok_or_else(|| ReconError::MissingKey {
                    snapshot: side,
                    label: snapshot.label.clone(),
                    row,
                    field: key_field.to_string(),
                })?;

            if let Some(&first) = positions.get(&key) {
                return Err(ReconError::DuplicateKey {
                    snapshot: side,
                    label: snapshot.label.clone(),
                    key,
                    first_row: first + 1,
                    row,
                });
            }
            positions.insert(key.clone(), pos);
            keys.push(key);
        }

        Ok(Self { positions, keys })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Keys in row order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellValue, Record};

    fn snap(keys: &[&str]) -> Snapshot {
        Snapshot::new(
            "s",
            keys.iter().map(|k| Record::new().with("Ref.No", *k)).collect(),
        )
    }

    #[test]
    fn indexes_in_row_order() {
        let idx = KeyIndex::build(&snap(&["B2", "A1", "C3"]), Side::Latest, "Ref.No").unwrap();
        assert_eq!(idx.keys(), ["B2", "A1", "C3"]);
        assert_eq!(idx.position("A1"), Some(1));
        assert!(idx.contains("C3"));
        assert!(!idx.contains("D4"));
    }

    #[test]
    fn duplicate_reports_both_rows() {
        let err = KeyIndex::build(&snap(&["A1", "B2", "A1"]), Side::Older, "Ref.No").unwrap_err();
        assert_eq!(
            err,
            ReconError::DuplicateKey {
                snapshot: Side::Older,
                label: "s".into(),
                key: "A1".into(),
                first_row: 1,
                row: 3,
            }
        );
    }

    #[test]
    fn numeric_and_text_keys_collide() {
        let s = Snapshot::new(
            "s",
            vec![
                Record::new().with("Ref.No", 1001i64),
                Record::new().with("Ref.No", "1001"),
            ],
        );
        let err = KeyIndex::build(&s, Side::Latest, "Ref.No").unwrap_err();
        assert!(matches!(err, ReconError::DuplicateKey { ref key, .. } if key == "1001"));
    }

    #[test]
    fn missing_or_blank_key() {
        let s = Snapshot::new("s", vec![Record::new().with("Qty", 1i64)]);
        let err = KeyIndex::build(&s, Side::Latest, "Ref.No").unwrap_err();
        assert!(matches!(err, ReconError::MissingKey { row: 1, .. }));

        let s = Snapshot::new(
            "s",
            vec![
                Record::new().with("Ref.No", "A1"),
                Record::new().with("Ref.No", CellValue::Empty),
            ],
        );
        let err = KeyIndex::build(&s, Side::Latest, "Ref.No").unwrap_err();
        assert!(matches!(err, ReconError::MissingKey { row: 2, .. }));
    }

    #[test]
    fn empty_snapshot() {
        let idx = KeyIndex::build(&snap(&[]), Side::Latest, "Ref.No").unwrap();
        assert!(idx.is_empty());
    }
}
