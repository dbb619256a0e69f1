//! `stocksync-recon`: Two-snapshot inventory reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded snapshots, returns classified
//! tables. No CLI or IO dependencies.

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod index;
pub mod join;
pub mod model;
pub mod table;

pub use config::{ReconLayout, ReconOptions, SuffixPolicy, DEFAULT_KEY_FIELD};
pub use engine::{reconcile, reconcile_by};
pub use error::ReconError;
pub use model::{
    CellValue, CommonRecord, CommonTable, ReconSummary, ReconciledRecord, ReconciledTable,
    Reconciliation, Record, Side, Snapshot, StockStatus, Table,
};
