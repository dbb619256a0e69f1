use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    /// A snapshot folder does not exist.
    #[error("folder does not exist: {}", .0.display())]
    FolderMissing(PathBuf),
    /// Zero or several candidate source files in a snapshot folder.
    #[error(
        "expected exactly 1 {} file in {}, found {}{}",
        list_extensions(.extensions),
        .folder.display(),
        .found.len(),
        list_found(.found)
    )]
    Discovery {
        folder: PathBuf,
        extensions: Vec<String>,
        found: Vec<String>,
    },
    #[error("unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("{} contains no sheets", .0.display())]
    EmptyWorkbook(PathBuf),
    #[error("cannot read {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },
    #[error("cannot write {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },
}

impl IoError {
    pub(crate) fn read(path: &Path, err: impl ToString) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub(crate) fn write(path: &Path, err: impl ToString) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

fn list_extensions(extensions: &[String]) -> String {
    extensions
        .iter()
        .map(|e| format!(".{e}"))
        .collect::<Vec<_>>()
        .join("/")
}

fn list_found(found: &[String]) -> String {
    if found.is_empty() {
        String::new()
    } else {
        format!(": {}", found.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_message() {
        let err = IoError::Discovery {
            folder: PathBuf::from("/in/latest"),
            extensions: vec!["xlsx".into(), "csv".into()],
            found: vec!["a.xlsx".into(), "b.csv".into()],
        };
        assert_eq!(
            err.to_string(),
            "expected exactly 1 .xlsx/.csv file in /in/latest, found 2: a.xlsx, b.csv"
        );

        let err = IoError::Discovery {
            folder: PathBuf::from("/in/older"),
            extensions: vec!["xlsx".into()],
            found: vec![],
        };
        assert_eq!(err.to_string(), "expected exactly 1 .xlsx file in /in/older, found 0");
    }
}
