//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract: schedulers and scripts rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success, both artifacts written                      |
//! | 1    | General error (unspecified)                          |
//! | 2    | Usage error or invalid configuration                 |
//! | 3    | Source discovery failed (missing folder, 0 or >1 files) |
//! | 4    | Duplicate key within a snapshot                      |
//! | 5    | Record without the key field                         |
//! | 6    | Read or write error on a source or artifact          |

use stocksync_config::ConfigError;
use stocksync_io::IoError;
use stocksync_recon::ReconError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unreadable or invalid config.
pub const EXIT_USAGE: u8 = 2;

/// Snapshot folder missing, or not exactly one source file in it.
pub const EXIT_DISCOVERY: u8 = 3;

/// The same key appears twice in one snapshot.
pub const EXIT_DUPLICATE_KEY: u8 = 4;

/// A record lacks the key field (or it is blank).
pub const EXIT_MISSING_KEY: u8 = 5;

/// Source unreadable, unsupported, or artifact not writable.
pub const EXIT_IO: u8 = 6;

pub fn config_exit_code(_err: &ConfigError) -> u8 {
    EXIT_USAGE
}

pub fn io_exit_code(err: &IoError) -> u8 {
    match err {
        IoError::FolderMissing(_) | IoError::Discovery { .. } => EXIT_DISCOVERY,
        IoError::UnsupportedFormat(_)
        | IoError::EmptyWorkbook(_)
        | IoError::Read { .. }
        | IoError::Write { .. } => EXIT_IO,
    }
}

pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::DuplicateKey { .. } => EXIT_DUPLICATE_KEY,
        ReconError::MissingKey { .. } => EXIT_MISSING_KEY,
    }
}
