//! YAML export of analytics
//!
//! Same document as the JSON export, for reading by humans.

use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::export::json::AnalyticsExport;
use crate::models::BudgetTable;
use crate::sync::AnalyticsSnapshot;

/// Export a snapshot to YAML
pub fn export_yaml<W: Write>(
    snapshot: &AnalyticsSnapshot,
    budgets: &BudgetTable,
    writer: &mut W,
) -> TrackerResult<()> {
    let export = AnalyticsExport::from_snapshot(snapshot, budgets);
    let export_err = |e: std::io::Error| TrackerError::Export(e.to_string());

    writeln!(writer, "# Expense analytics export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# Source: {}", export.export_source).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| TrackerError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a YAML export
pub fn read_yaml_export(yaml_str: &str) -> TrackerResult<AnalyticsExport> {
    let export: AnalyticsExport =
        serde_yaml::from_str(yaml_str).map_err(|e| TrackerError::Import(e.to_string()))?;

    export.validate().map_err(TrackerError::Import)?;

    Ok(export)
}
