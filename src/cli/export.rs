use crate::core::config::AppConfig;
use crate::core::{LedgerEdit, LedgerSnapshot, Period, PeriodValue};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    /// Ledger table in spreadsheet shape
    #[default]
    Csv,
    /// Ledger, value series and threshold for charting
    Json,
}

/// Everything a chart renderer needs.
#[derive(Debug, Serialize)]
pub struct ExportReport<'a> {
    pub threshold: Decimal,
    pub values: &'a [PeriodValue],
    pub breaches: &'a [Period],
    pub ledger: &'a LedgerSnapshot,
}

/// Writes one record per ledger row: product, item, then one column per week.
pub fn write_csv<W: Write>(snapshot: &LedgerSnapshot, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["Product".to_string(), "Item".to_string()];
    header.extend(snapshot.period_labels());
    wtr.write_record(&header)?;

    for row in snapshot.rows() {
        let mut record = vec![row.product.product.to_string(), row.kind.to_string()];
        record.extend(
            row.cells
                .iter()
                .map(|q| q.map(|v| v.to_string()).unwrap_or_default()),
        );
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(report: &ExportReport<'_>, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

pub fn run(
    config: &AppConfig,
    edits: &[LedgerEdit],
    output: &Path,
    format: ExportFormat,
) -> Result<()> {
    let (store, valuation) = super::load_ledger(config, edits)?;
    let snapshot = store.snapshot();

    let file = File::create(output)
        .with_context(|| format!("Failed to create export file: {}", output.display()))?;

    let written = match format {
        ExportFormat::Csv => write_csv(&snapshot, file),
        ExportFormat::Json => {
            let values = valuation.value_series(&store);
            let breaches = valuation.breaches(&store);
            let report = ExportReport {
                threshold: valuation.threshold(),
                values: &values,
                breaches: &breaches,
                ledger: &snapshot,
            };
            write_json(&report, file)
        }
    };
    written.with_context(|| format!("Failed to write export file: {}", output.display()))?;

    info!("Exported ledger to {}", output.display());
    Ok(())
}
