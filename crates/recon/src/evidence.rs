use crate::model::{CommonTable, ReconSummary, ReconciledTable, Side, StockStatus};

/// Compute summary statistics from the reconciled and common tables.
pub fn compute_summary(reconciled: &ReconciledTable, common: &CommonTable) -> ReconSummary {
    let mut summary = ReconSummary {
        common: common.len(),
        ..ReconSummary::default()
    };

    for row in reconciled.iter() {
        match row.side {
            Side::Latest => summary.latest_rows += 1,
            Side::Older => summary.older_rows += 1,
        }
        match row.status {
            StockStatus::InStock => summary.in_stock += 1,
            StockStatus::Sold => summary.sold += 1,
            StockStatus::NewArrival => summary.new_arrivals += 1,
        }
    }

    summary
}
