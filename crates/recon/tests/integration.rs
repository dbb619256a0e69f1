use stocksync_recon::{
    reconcile, reconcile_by, CellValue, ReconError, ReconLayout, ReconOptions, Record, Side,
    Snapshot, StockStatus, SuffixPolicy,
};

fn item(key: &str, name: &str, qty: i64) -> Record {
    Record::new()
        .with("Ref.No", key)
        .with("Item", name)
        .with("Qty", qty)
}

fn feb() -> Snapshot {
    Snapshot::new(
        "2026-02-01",
        vec![
            item("R-100", "Oak chair", 4),
            item("R-101", "Pine table", 1),
            item("R-205", "Lamp", 6),
        ],
    )
}

fn jan() -> Snapshot {
    Snapshot::new(
        "2026-01-01",
        vec![
            item("R-099", "Sofa", 1),
            item("R-100", "Oak chair", 5),
            item("R-101", "Pine table", 1),
        ],
    )
}

// -------------------------------------------------------------------------
// Classification
// -------------------------------------------------------------------------

#[test]
fn mixed_snapshots() {
    let result = reconcile_by(&feb(), &jan(), "Ref.No").unwrap();

    assert_eq!(result.reconciled.len(), 6);
    assert_eq!(result.common.len(), 2);

    let s = &result.summary;
    assert_eq!(s.latest_rows, 3);
    assert_eq!(s.older_rows, 3);
    assert_eq!(s.in_stock, 4);
    assert_eq!(s.new_arrivals, 1);
    assert_eq!(s.sold, 1);
    assert_eq!(s.common, 2);

    let statuses: Vec<_> = result
        .reconciled
        .iter()
        .map(|r| (r.side, r.key.as_str(), r.status))
        .collect();
    assert_eq!(
        statuses,
        [
            (Side::Latest, "R-100", StockStatus::InStock),
            (Side::Latest, "R-101", StockStatus::InStock),
            (Side::Latest, "R-205", StockStatus::NewArrival),
            (Side::Older, "R-099", StockStatus::Sold),
            (Side::Older, "R-100", StockStatus::InStock),
            (Side::Older, "R-101", StockStatus::InStock),
        ]
    );
}

#[test]
fn disjoint_keys() {
    let latest = Snapshot::new("feb", vec![item("A", "a", 1), item("B", "b", 1)]);
    let older = Snapshot::new("jan", vec![item("C", "c", 1)]);
    let result = reconcile_by(&latest, &older, "Ref.No").unwrap();

    assert!(result.common.is_empty());
    for row in result.reconciled.iter() {
        match row.side {
            Side::Latest => assert_eq!(row.status, StockStatus::NewArrival),
            Side::Older => assert_eq!(row.status, StockStatus::Sold),
        }
    }
}

#[test]
fn identical_keys() {
    let result = reconcile_by(&jan(), &jan(), "Ref.No").unwrap();
    assert!(result.reconciled.iter().all(|r| r.status == StockStatus::InStock));
    assert_eq!(result.common.len(), 3);
}

#[test]
fn empty_latest_marks_everything_sold() {
    let latest = Snapshot::new("feb", vec![]);
    let result = reconcile_by(&latest, &jan(), "Ref.No").unwrap();
    assert_eq!(result.reconciled.len(), 3);
    assert!(result.reconciled.iter().all(|r| r.status == StockStatus::Sold));
    assert!(result.common.is_empty());
}

#[test]
fn both_empty() {
    let result = reconcile_by(&Snapshot::new("a", vec![]), &Snapshot::new("b", vec![]), "Ref.No")
        .unwrap();
    assert!(result.reconciled.is_empty());
    assert!(result.common.is_empty());
}

// -------------------------------------------------------------------------
// Common rows
// -------------------------------------------------------------------------

#[test]
fn common_rows_suffixed_by_label() {
    let result = reconcile_by(&feb(), &jan(), "Ref.No").unwrap();
    let first = &result.common.rows[0];
    assert_eq!(first.key, "R-100");

    let names: Vec<_> = first.record.field_names().collect();
    assert_eq!(
        names,
        [
            "Ref.No",
            "Item_2026-02-01",
            "Qty_2026-02-01",
            "Item_2026-01-01",
            "Qty_2026-01-01",
        ]
    );
    assert_eq!(first.record.get("Qty_2026-02-01"), Some(&CellValue::Number(4.0)));
    assert_eq!(first.record.get("Qty_2026-01-01"), Some(&CellValue::Number(5.0)));
}

#[test]
fn side_suffix_policy() {
    let options = ReconOptions {
        suffix: SuffixPolicy::Side,
        ..ReconOptions::default()
    };
    let result = reconcile(&feb(), &jan(), &options).unwrap();
    let table = result.common.to_table();
    assert_eq!(
        table.columns,
        ["Ref.No", "Item_latest", "Qty_latest", "Item_older", "Qty_older"]
    );
}

// -------------------------------------------------------------------------
// Failures
// -------------------------------------------------------------------------

#[test]
fn duplicate_key_in_latest() {
    let latest = Snapshot::new("feb", vec![item("A1", "x", 1), item("A1", "y", 2)]);
    let err = reconcile_by(&latest, &jan(), "Ref.No").unwrap_err();
    match err {
        ReconError::DuplicateKey { snapshot, key, label, .. } => {
            assert_eq!(snapshot, Side::Latest);
            assert_eq!(key, "A1");
            assert_eq!(label, "feb");
        }
        other => panic!("expected duplicate key, got {other:?}"),
    }
}

#[test]
fn duplicate_key_in_older() {
    let older = Snapshot::new("jan", vec![item("B2", "x", 1), item("B2", "y", 2)]);
    let err = reconcile_by(&feb(), &older, "Ref.No").unwrap_err();
    assert_eq!(err.snapshot(), Side::Older);
    assert!(err.to_string().ends_with("duplicate key 'B2' (rows 1 and 2)"), "{err}");
}

#[test]
fn missing_key_field() {
    let older = Snapshot::new(
        "jan",
        vec![item("B2", "x", 1), Record::new().with("Item", "orphan")],
    );
    let err = reconcile_by(&feb(), &older, "Ref.No").unwrap_err();
    assert!(matches!(
        err,
        ReconError::MissingKey { snapshot: Side::Older, row: 2, .. }
    ));
}

// -------------------------------------------------------------------------
// Rendering
// -------------------------------------------------------------------------

#[test]
fn reconciled_table_has_date_and_remarks() {
    let result = reconcile_by(&feb(), &jan(), "Ref.No").unwrap();
    let table = result.reconciled.to_table(&ReconLayout::default());

    assert_eq!(table.columns, ["Ref.No", "Item", "Qty", "Date", "Remarks"]);
    assert_eq!(table.rows.len(), 6);

    let remarks = table.column_index("Remarks").unwrap();
    let dates = table.column_index("Date").unwrap();
    assert_eq!(table.rows[2][remarks], CellValue::text("New Arrival"));
    assert_eq!(table.rows[2][dates], CellValue::text("2026-02-01"));
    assert_eq!(table.rows[3][remarks], CellValue::text("Sold"));
    assert_eq!(table.rows[3][dates], CellValue::text("2026-01-01"));
}

#[test]
fn result_serializes_to_json() {
    let result = reconcile_by(&feb(), &jan(), "Ref.No").unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["summary"]["sold"], 1);
    assert_eq!(json["reconciled"]["rows"][3]["status"], "sold");
    assert_eq!(json["common"]["rows"][0]["record"]["Ref.No"], "R-100");
}
