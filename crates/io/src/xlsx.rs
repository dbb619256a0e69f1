// Excel snapshot import (calamine) and table export (rust_xlsxwriter)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveTime;
use rust_xlsxwriter::{Format, Workbook};
use stocksync_recon::{CellValue, Table};

use crate::error::IoError;

/// Maximum rows in an xlsx worksheet, header included.
const MAX_ROWS: usize = 1_048_576;
/// Maximum columns in an xlsx worksheet.
const MAX_COLS: usize = 16_384;

/// Read the first worksheet of an Excel file (xlsx, xls, xlsb, ods) into a grid.
pub fn read_grid(path: &Path) -> Result<Vec<Vec<CellValue>>, IoError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| IoError::read(path, e))?;

    let sheet_names = workbook.sheet_names();
    let Some(first) = sheet_names.first() else {
        return Err(IoError::EmptyWorkbook(path.to_path_buf()));
    };
    if sheet_names.len() > 1 {
        log::debug!(
            "{}: {} sheets, reading '{first}'",
            path.display(),
            sheet_names.len()
        );
    }

    let range = workbook
        .worksheet_range(first)
        .map_err(|e| IoError::read(path, format!("sheet '{first}': {e}")))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(convert_cell).collect())
        .collect())
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.trim().is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ts) if ts.time() == NaiveTime::MIN => {
                CellValue::Text(ts.date().format("%Y-%m-%d").to_string())
            }
            Some(ts) => CellValue::Text(ts.format("%Y-%m-%d %H:%M:%S").to_string()),
            // Out-of-range serial: keep the number
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(format!("#{e:?}")),
    }
}

/// Write a table to a single-sheet workbook with a bold, frozen header row.
pub fn write_table(path: &Path, table: &Table, sheet_name: &str) -> Result<(), IoError> {
    if table.columns.len() > MAX_COLS || table.rows.len() + 1 > MAX_ROWS {
        return Err(IoError::write(
            path,
            format!(
                "{} rows x {} columns exceeds the xlsx sheet limit",
                table.rows.len(),
                table.columns.len()
            ),
        ));
    }
    let err = |e: rust_xlsxwriter::XlsxError| IoError::write(path, e);

    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).map_err(err)?;

    // Bounds checked above, so the index casts below cannot truncate
    for (col, name) in table.columns.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, name, &header)
            .map_err(err)?;
    }

    for (r, row) in table.rows.iter().enumerate() {
        let row32 = (r + 1) as u32;
        for (c, cell) in row.iter().enumerate() {
            let col16 = c as u16;
            match cell {
                CellValue::Empty => {}
                CellValue::Text(s) => {
                    worksheet.write_string(row32, col16, s).map_err(err)?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number(row32, col16, *n).map_err(err)?;
                }
                CellValue::Bool(b) => {
                    worksheet.write_boolean(row32, col16, *b).map_err(err)?;
                }
            }
        }
    }

    worksheet.set_freeze_panes(1, 0).map_err(err)?;
    worksheet.autofit();

    workbook.save(path).map_err(err)?;
    Ok(())
}
