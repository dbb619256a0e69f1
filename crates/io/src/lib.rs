// File I/O: source discovery, snapshot loading, result artifacts

pub mod csv;
pub mod discover;
pub mod error;
pub mod snapshot;
pub mod xlsx;

pub use discover::{ensure_dirs, find_single_source, label_from_path};
pub use error::IoError;
pub use snapshot::{load_snapshot, write_table, FileFormat};
