use thiserror::Error;

use crate::model::Side;

/// Precondition violations detected while indexing the two snapshots.
///
/// Row numbers are 1-based positions among the snapshot's data records.
///
/// Both variants are raised before any output is built, so a failed
/// reconciliation never yields partial tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconError {
    /// The key field is absent (or blank) on a record.
    #[error("{snapshot} snapshot '{label}', row {row}: missing key field '{field}'")]
    MissingKey {
        snapshot: Side,
        label: String,
        row: usize,
        field: String,
    },
    /// Two records in the same snapshot share a key.
    #[error(
        "{snapshot} snapshot '{label}': duplicate key '{key}' (rows {first_row} and {row})"
    )]
    DuplicateKey {
        snapshot: Side,
        label: String,
        key: String,
        first_row: usize,
        row: usize,
    },
}

impl ReconError {
    /// Which input snapshot violated its precondition.
    pub fn snapshot(&self) -> Side {
        match self {
            Self::MissingKey { snapshot, .. } | Self::DuplicateKey { snapshot, .. } => *snapshot,
        }
    }
}
