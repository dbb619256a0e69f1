// Format dispatch + grid → Snapshot conversion shared by the CSV and Excel readers.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use stocksync_recon::{CellValue, Record, Snapshot, Table};

use crate::error::IoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Excel,
    Csv,
    Tsv,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Some(Self::Excel),
            "csv" | "txt" => Some(Self::Csv),
            "tsv" => Some(Self::Tsv),
            _ => None,
        }
    }
}

/// Load a snapshot from a spreadsheet or delimited file.
pub fn load_snapshot(path: &Path, label: &str) -> Result<Snapshot, IoError> {
    let grid = match FileFormat::from_path(path) {
        Some(FileFormat::Excel) => crate::xlsx::read_grid(path)?,
        Some(FileFormat::Csv) => crate::csv::read_grid(path, None)?,
        Some(FileFormat::Tsv) => crate::csv::read_grid(path, Some(b'\t'))?,
        None => return Err(IoError::UnsupportedFormat(path.to_path_buf())),
    };
    let snapshot = snapshot_from_grid(label, grid);
    log::info!(
        "loaded {} rows from {} (label '{}')",
        snapshot.len(),
        path.display(),
        snapshot.label
    );
    Ok(snapshot)
}

/// Write a result table. The format follows the file extension.
pub fn write_table(path: &Path, table: &Table, sheet_name: &str) -> Result<(), IoError> {
    match FileFormat::from_path(path) {
        Some(FileFormat::Excel) => crate::xlsx::write_table(path, table, sheet_name)?,
        Some(FileFormat::Csv) => crate::csv::write_table(path, table, b',')?,
        Some(FileFormat::Tsv) => crate::csv::write_table(path, table, b'\t')?,
        None => return Err(IoError::UnsupportedFormat(path.to_path_buf())),
    }
    log::info!("wrote {} rows to {}", table.rows.len(), path.display());
    Ok(())
}

/// Header names: blanks become `Unnamed: N`, repeats get the next free `.1`, `.2`, ...
fn header_names(header: &[CellValue]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut used: HashSet<String> = HashSet::new();
    header
        .iter()
        .enumerate()
        .map(|(col, cell)| {
            let base = match cell.to_string().trim() {
                "" => format!("Unnamed: {col}"),
                name => name.to_string(),
            };
            let mut name = base.clone();
            let seen = counts.entry(base.clone()).or_insert(0);
            while used.contains(&name) {
                *seen += 1;
                name = format!("{base}.{seen}");
            }
            used.insert(name.clone());
            name
        })
        .collect()
}

/// First row is the header; fully blank rows are dropped.
pub(crate) fn snapshot_from_grid(label: &str, grid: Vec<Vec<CellValue>>) -> Snapshot {
    let mut rows = grid.into_iter();
    let Some(header) = rows.next() else {
        return Snapshot::new(label, Vec::new());
    };
    let columns = header_names(&header);

    let mut truncated = 0usize;
    let records = rows
        .filter(|row| row.iter().any(|c| !c.is_blank()))
        .map(|mut row| {
            if row.len() > columns.len() {
                truncated += 1;
            }
            row.resize(columns.len(), CellValue::Empty);
            columns.iter().cloned().zip(row).collect::<Record>()
        })
        .collect();

    if truncated > 0 {
        log::warn!("{label}: {truncated} row(s) had cells beyond the header; extra cells dropped");
    }

    Snapshot::new(label, records)
}
