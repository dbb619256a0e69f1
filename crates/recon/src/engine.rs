use crate::classify::KeySets;
use crate::config::ReconOptions;
use crate::error::ReconError;
use crate::evidence::compute_summary;
use crate::index::KeyIndex;
use crate::join::{join_records, Suffixes};
use crate::model::{
    CommonRecord, CommonTable, ReconciledRecord, ReconciledTable, Reconciliation, Side, Snapshot,
};

/// Reconcile two snapshots. Returns the annotated union, the common rows,
/// and a summary.
///
/// Both snapshots are validated (missing and duplicate keys) before any
/// output is built.
pub fn reconcile(
    latest: &Snapshot,
    older: &Snapshot,
    options: &ReconOptions,
) -> Result<Reconciliation, ReconError> {
    let key_field = options.key_field.as_str();

    let latest_idx = KeyIndex::build(latest, Side::Latest, key_field)?;
    let older_idx = KeyIndex::build(older, Side::Older, key_field)?;
    log::debug!(
        "indexed '{}' ({} keys) and '{}' ({} keys) on '{key_field}'",
        latest.label,
        latest_idx.len(),
        older.label,
        older_idx.len(),
    );

    let sets = KeySets::partition(&latest_idx, &older_idx);
    log::debug!(
        "key sets: {} common, {} new, {} sold",
        sets.common.len(),
        sets.new.len(),
        sets.sold.len(),
    );

    let mut rows = Vec::with_capacity(latest.len() + older.len());
    for (snapshot, index, side) in [
        (latest, &latest_idx, Side::Latest),
        (older, &older_idx, Side::Older),
    ] {
        for (record, key) in snapshot.records.iter().zip(index.keys()) {
            rows.push(ReconciledRecord {
                side,
                source_label: snapshot.label.clone(),
                status: sets.status_of(side, key),
                key: key.clone(),
                record: record.clone(),
            });
        }
    }
    let reconciled = ReconciledTable { rows };

    let suffixes = Suffixes::resolve(options.suffix, &latest.label, &older.label);
    let common_rows = latest_idx
        .keys()
        .iter()
        .enumerate()
        .filter_map(|(row, key)| {
            let older_row = older_idx.position(key)?;
            Some(CommonRecord {
                key: key.clone(),
                record: join_records(
                    key_field,
                    &latest.records[row],
                    &older.records[older_row],
                    &suffixes,
                ),
            })
        })
        .collect();
    let common = CommonTable { rows: common_rows };

    let summary = compute_summary(&reconciled, &common);

    Ok(Reconciliation {
        key_field: key_field.to_string(),
        latest_label: latest.label.clone(),
        older_label: older.label.clone(),
        summary,
        reconciled,
        common,
    })
}

/// [`reconcile`] with default options and the given key field.
pub fn reconcile_by(
    latest: &Snapshot,
    older: &Snapshot,
    key_field: &str,
) -> Result<Reconciliation, ReconError> {
    reconcile(latest, older, &ReconOptions::with_key(key_field))
}
