//! JSON export of analytics
//!
//! Writes a snapshot together with where it came from and when it was
//! exported.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};
use crate::models::BudgetTable;
use crate::reports::InsightsView;
use crate::sync::{AnalyticsSnapshot, DataOrigin};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// One month of the trend series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedMonth {
    pub month: String,
    pub total: f64,
}

/// One category of the breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedCategory {
    pub category: String,
    pub total: f64,
}

/// One month of the budget comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedBudget {
    pub month: String,
    pub budget: f64,
    pub actual: f64,
}

/// Analytics export document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Whether the figures were aggregated remotely or locally
    pub export_source: DataOrigin,

    /// When the figures themselves were produced
    pub computed_at: DateTime<Utc>,

    /// All twelve months in calendar order
    pub monthly_trends: Vec<ExportedMonth>,

    pub category_breakdown: Vec<ExportedCategory>,

    pub insights: InsightsView,

    #[serde(default)]
    pub budget_comparison: Vec<ExportedBudget>,
}

impl AnalyticsExport {
    /// Build an export from a snapshot and the budget table
    pub fn from_snapshot(snapshot: &AnalyticsSnapshot, budgets: &BudgetTable) -> Self {
        let monthly_trends = snapshot
            .monthly_totals
            .iter()
            .map(|entry| ExportedMonth {
                month: entry.month.display_name().to_string(),
                total: entry.total,
            })
            .collect();

        let category_breakdown = snapshot
            .category_totals
            .iter()
            .map(|entry| ExportedCategory {
                category: entry.category.clone(),
                total: entry.total,
            })
            .collect();

        let budget_comparison = snapshot
            .budget_comparison(budgets)
            .rows()
            .map(|(month, budget, actual)| ExportedBudget {
                month: month.to_string(),
                budget,
                actual,
            })
            .collect();

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            export_source: snapshot.source,
            computed_at: snapshot.fetched_at,
            monthly_trends,
            category_breakdown,
            insights: snapshot.insights.view(),
            budget_comparison,
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }
        if self.monthly_trends.len() != 12 {
            return Err(format!(
                "Expected 12 monthly trend entries, got {}",
                self.monthly_trends.len()
            ));
        }
        Ok(())
    }
}

/// Export a snapshot to JSON
pub fn export_json<W: Write>(
    snapshot: &AnalyticsSnapshot,
    budgets: &BudgetTable,
    writer: &mut W,
    pretty: bool,
) -> TrackerResult<()> {
    let export = AnalyticsExport::from_snapshot(snapshot, budgets);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| TrackerError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a JSON export
pub fn read_json_export(json_str: &str) -> TrackerResult<AnalyticsExport> {
    let export: AnalyticsExport =
        serde_json::from_str(json_str).map_err(|e| TrackerError::Import(e.to_string()))?;

    export.validate().map_err(TrackerError::Import)?;

    Ok(export)
}
