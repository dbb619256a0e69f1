// CSV/TSV snapshot import and table export

use std::io::Read;
use std::path::Path;

use stocksync_recon::{CellValue, Table};

use crate::error::IoError;

/// Read a delimited file into a grid of typed cells.
///
/// `delimiter = None` sniffs the delimiter from the first lines.
pub fn read_grid(path: &Path, delimiter: Option<u8>) -> Result<Vec<Vec<CellValue>>, IoError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = delimiter.unwrap_or_else(|| sniff_delimiter(&content));
    parse_grid(&content, delimiter).map_err(|e| IoError::read(path, e))
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// Each candidate (tab, semicolon, comma, pipe) is scored by how many sample lines share
/// the first line's field count, weighted by that count. Single-field splits never win.
fn sniff_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content.lines().take(10).collect();

    let field_count = |line: &str, delim: u8| -> usize {
        csv::ReaderBuilder::new()
            .delimiter(delim)
            .has_headers(false)
            .flexible(true)
            .from_reader(line.as_bytes())
            .records()
            .next()
            .and_then(|r| r.ok())
            .map(|r| r.len())
            .unwrap_or(1)
    };

    let mut best = (b',', 0usize);
    for delim in [b'\t', b';', b',', b'|'] {
        let Some(first) = sample.first() else { break };
        let target = field_count(*first, delim);
        if target <= 1 {
            continue;
        }
        let consistent = sample.iter().filter(|l| field_count(**l, delim) == target).count();
        let score = consistent * target;
        if score > best.1 {
            best = (delim, score);
        }
    }
    best.0
}

/// Read file and convert to UTF-8 if needed (Excel-exported CSVs are often Windows-1252)
fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let mut file = std::fs::File::open(path).map_err(|e| IoError::read(path, e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| IoError::read(path, e))?;

    let content = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(e.as_bytes());
            decoded.into_owned()
        }
    };
    // Drop a UTF-8 BOM so it doesn't end up in the first header name
    if let Some(stripped) = content.strip_prefix('\u{feff}') {
        return Ok(stripped.to_string());
    }
    Ok(content)
}

fn parse_grid(content: &str, delimiter: u8) -> Result<Vec<Vec<CellValue>>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    reader
        .records()
        .map(|record| record.map(|r| r.iter().map(parse_cell).collect()))
        .collect()
}

/// Type a raw CSV field. Codes with leading zeros stay text.
fn parse_cell(raw: &str) -> CellValue {
    let s = raw.trim();
    if s.is_empty() {
        return CellValue::Empty;
    }
    if s.eq_ignore_ascii_case("true") {
        return CellValue::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return CellValue::Bool(false);
    }

    let digits = s.trim_start_matches('-');
    let leading_zero = digits.len() > 1 && digits.starts_with('0') && !digits.starts_with("0.");
    if !leading_zero {
        if let Ok(n) = s.parse::<f64>() {
            if n.is_finite() {
                return CellValue::Number(n);
            }
        }
    }
    CellValue::Text(raw.to_string())
}

pub fn write_table(path: &Path, table: &Table, delimiter: u8) -> Result<(), IoError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|e| IoError::write(path, e))?;

    writer
        .write_record(&table.columns)
        .map_err(|e| IoError::write(path, e))?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(|c| c.to_string()))
            .map_err(|e| IoError::write(path, e))?;
    }

    writer.flush().map_err(|e| IoError::write(path, e))?;
    Ok(())
}
