//! Rectangular rendering of result tables for the writers.

use std::collections::HashSet;

use crate::config::ReconLayout;
use crate::model::{CellValue, CommonTable, Record, ReconciledTable, Table};

/// Union of field names in first-seen order.
fn union_columns<'a>(records: impl Iterator<Item = &'a Record>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for record in records {
        for name in record.field_names() {
            if seen.insert(name) {
                columns.push(name.to_string());
            }
        }
    }
    columns
}

fn render_row(record: &Record, columns: &[String]) -> Vec<CellValue> {
    columns
        .iter()
        .map(|c| record.get(c).cloned().unwrap_or_default())
        .collect()
}

impl ReconciledTable {
    /// Record fields, then the label and status columns.
    ///
    /// A record field named like a derived column is replaced by it.
    pub fn to_table(&self, layout: &ReconLayout) -> Table {
        let mut columns: Vec<String> = union_columns(self.rows.iter().map(|r| &r.record))
            .into_iter()
            .filter(|c| *c != layout.label_column && *c != layout.status_column)
            .collect();
        let field_count = columns.len();
        columns.push(layout.label_column.clone());
        if layout.status_column != layout.label_column {
            columns.push(layout.status_column.clone());
        }

        let rows = self
            .rows
            .iter()
            .map(|r| {
                let mut cells = render_row(&r.record, &columns[..field_count]);
                cells.push(CellValue::text(&r.source_label));
                if columns.len() > field_count + 1 {
                    cells.push(CellValue::text(r.status.as_str()));
                }
                cells
            })
            .collect();

        Table { columns, rows }
    }
}

impl CommonTable {
    pub fn to_table(&self) -> Table {
        let columns = union_columns(self.rows.iter().map(|r| &r.record));
        let rows = self
            .rows
            .iter()
            .map(|r| render_row(&r.record, &columns))
            .collect();
        Table { columns, rows }
    }
}
