use std::collections::HashSet;

use crate::config::SuffixPolicy;
use crate::model::{Record, Side};

/// Suffixes applied to fields present on both sides of a join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suffixes {
    pub latest: String,
    pub older: String,
}

impl Suffixes {
    pub fn by_side() -> Self {
        Self {
            latest: format!("_{}", Side::Latest),
            older: format!("_{}", Side::Older),
        }
    }

    /// Label suffixes only work when the labels tell the sides apart.
    pub fn resolve(policy: SuffixPolicy, latest_label: &str, older_label: &str) -> Self {
        let latest_label = latest_label.trim();
        let older_label = older_label.trim();
        match policy {
            SuffixPolicy::Label
                if !latest_label.is_empty()
                    && !older_label.is_empty()
                    && latest_label != older_label =>
            {
                Self {
                    latest: format!("_{latest_label}"),
                    older: format!("_{older_label}"),
                }
            }
            _ => Self::by_side(),
        }
    }
}

/// Merge the latest and older rows for one key.
///
/// The key field appears once (latest value). Latest fields come first in
/// their original order, then older-only fields. A non-key field present on
/// both sides is emitted twice, suffixed per side. A suffixed name that is
/// already in use gets the side suffix, then a numeric suffix (`Qty_latest_2`).
pub fn join_records(key_field: &str, latest: &Record, older: &Record, suffixes: &Suffixes) -> Record {
    let colliding: HashSet<&str> = latest
        .field_names()
        .filter(|name| *name != key_field && older.contains(name))
        .collect();

    // Every name already present, plus each generated one as it is handed out
    let mut used: HashSet<String> = latest
        .field_names()
        .chain(older.field_names())
        .map(str::to_string)
        .collect();
    let fallback = Suffixes::by_side();

    let mut rename = |name: &str, side: Side| -> String {
        let (preferred, backup) = match side {
            Side::Latest => (&suffixes.latest, &fallback.latest),
            Side::Older => (&suffixes.older, &fallback.older),
        };
        let backup = format!("{name}{backup}");
        let mut candidate = format!("{name}{preferred}");
        if used.contains(&candidate) {
            candidate = backup.clone();
        }
        let mut n = 2;
        while used.contains(&candidate) {
            candidate = format!("{backup}_{n}");
            n += 1;
        }
        used.insert(candidate.clone());
        candidate
    };

    let mut joined = Record::new();

    for (name, value) in latest.iter() {
        if colliding.contains(name) {
            joined.insert(rename(name, Side::Latest), value.clone());
        } else {
            joined.insert(name, value.clone());
        }
    }

    for (name, value) in older.iter() {
        if name == key_field {
            continue;
        }
        if colliding.contains(name) {
            joined.insert(rename(name, Side::Older), value.clone());
        } else {
            joined.insert(name, value.clone());
        }
    }

    joined
}
