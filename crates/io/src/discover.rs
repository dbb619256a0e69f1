// Snapshot folder discovery: each input folder holds exactly one source file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::IoError;

/// Excel owner/lock files sit next to open workbooks (`~$stock.xlsx`).
const LOCK_FILE_PREFIX: &str = "~$";

fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|want| want.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

/// Find the single source file in `folder` with one of `extensions`.
pub fn find_single_source(folder: &Path, extensions: &[String]) -> Result<PathBuf, IoError> {
    if !folder.is_dir() {
        return Err(IoError::FolderMissing(folder.to_path_buf()));
    }

    let entries = fs::read_dir(folder).map_err(|e| IoError::read(folder, e))?;
    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| IoError::read(folder, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_lock_file = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(LOCK_FILE_PREFIX));
        if !is_lock_file && matches_extension(&path, extensions) {
            candidates.push(path);
        }
    }
    candidates.sort();

    if candidates.len() != 1 {
        return Err(IoError::Discovery {
            folder: folder.to_path_buf(),
            extensions: extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect(),
            found: candidates
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect(),
        });
    }

    let source = candidates.remove(0);
    log::debug!("discovered {} in {}", source.display(), folder.display());
    Ok(source)
}

/// Snapshot label: the file name without its extension.
pub fn label_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Create each folder (and parents) if missing.
pub fn ensure_dirs<'a>(folders: impl IntoIterator<Item = &'a Path>) -> Result<(), IoError> {
    for folder in folders {
        fs::create_dir_all(folder).map_err(|e| IoError::write(folder, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn xlsx() -> Vec<String> {
        vec!["xlsx".to_string()]
    }

    #[test]
    fn single_match() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("2026-02-01.xlsx"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let found = find_single_source(dir.path(), &xlsx()).unwrap();
        assert_eq!(found, dir.path().join("2026-02-01.xlsx"));
        assert_eq!(label_from_path(&found), "2026-02-01");
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("STOCK.XLSX"), b"x").unwrap();
        assert!(find_single_source(dir.path(), &[".xlsx".to_string()]).is_ok());
    }

    #[test]
    fn none_found() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("stock.csv"), b"x").unwrap();
        let err = find_single_source(dir.path(), &xlsx()).unwrap_err();
        assert!(matches!(err, IoError::Discovery { ref found, .. } if found.is_empty()));
    }

    #[test]
    fn several_found() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.xlsx"), b"x").unwrap();
        fs::write(dir.path().join("a.xlsx"), b"x").unwrap();
        let err = find_single_source(dir.path(), &xlsx()).unwrap_err();
        match err {
            IoError::Discovery { found, .. } => assert_eq!(found, ["a.xlsx", "b.xlsx"]),
            other => panic!("expected discovery error, got {other:?}"),
        }
    }

    #[test]
    fn lock_files_and_subdirs_ignored() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("stock.xlsx"), b"x").unwrap();
        fs::write(dir.path().join("~$stock.xlsx"), b"x").unwrap();
        fs::create_dir(dir.path().join("archive.xlsx")).unwrap();
        let found = find_single_source(dir.path(), &xlsx()).unwrap();
        assert_eq!(label_from_path(&found), "stock");
    }

    #[test]
    fn missing_folder() {
        let dir = tempdir().unwrap();
        let err = find_single_source(&dir.path().join("nope"), &xlsx()).unwrap_err();
        assert!(matches!(err, IoError::FolderMissing(_)));
    }

    #[test]
    fn ensure_dirs_creates_nested() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("input/file1");
        let b = dir.path().join("output");
        ensure_dirs([a.as_path(), b.as_path()]).unwrap();
        assert!(a.is_dir());
        assert!(b.is_dir());
        // Idempotent
        ensure_dirs([a.as_path()]).unwrap();
    }
}
