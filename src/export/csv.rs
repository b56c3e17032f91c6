//! CSV export of analytics
//!
//! One flat table of `Section,Label,Amount` rows so the whole snapshot fits
//! in a single spreadsheet.

use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::models::BudgetTable;
use crate::sync::AnalyticsSnapshot;

/// Export a snapshot as `Section,Label,Amount` rows
///
/// Sections: `monthly` (all twelve months), `category`, `budget` and
/// `actual` (months in the budget comparison), and `insight`. The peak
/// month and top category insights carry their name in the label, as in
/// `highest_spending_month:January`.
pub fn export_csv<W: Write>(
    snapshot: &AnalyticsSnapshot,
    budgets: &BudgetTable,
    writer: W,
) -> TrackerResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let export_err = |e: csv::Error| TrackerError::Export(e.to_string());

    wtr.write_record(["Section", "Label", "Amount"])
        .map_err(export_err)?;

    for entry in snapshot.monthly_totals.iter() {
        wtr.write_record(["monthly", entry.month.display_name(), fixed(entry.total).as_str()])
            .map_err(export_err)?;
    }

    for entry in snapshot.category_totals.iter() {
        wtr.write_record(["category", entry.category.as_str(), fixed(entry.total).as_str()])
            .map_err(export_err)?;
    }

    for (month, budget, actual) in snapshot.budget_comparison(budgets).rows() {
        wtr.write_record(["budget", month, fixed(budget).as_str()])
            .map_err(export_err)?;
        wtr.write_record(["actual", month, fixed(actual).as_str()])
            .map_err(export_err)?;
    }

    let insights = snapshot.insights.view();
    let highest = named_label(
        "highest_spending_month",
        &insights.highest_spending_month.month,
    );
    let top = named_label(
        "top_spending_category",
        &insights.top_spending_category.category,
    );
    let insight_rows = [
        ("total_spending", insights.total_spending.as_str()),
        ("avg_monthly_spending", insights.avg_monthly_spending.as_str()),
        (highest.as_str(), insights.highest_spending_month.amount.as_str()),
        (top.as_str(), insights.top_spending_category.amount.as_str()),
    ];
    for (label, amount) in insight_rows {
        wtr.write_record(["insight", label, amount])
            .map_err(export_err)?;
    }

    wtr.flush()?;
    Ok(())
}

/// `label:name`, or the bare label when there is no name
fn named_label(label: &str, name: &str) -> String {
    if name.is_empty() {
        label.to_string()
    } else {
        format!("{}:{}", label, name)
    }
}

fn fixed(value: f64) -> String {
    format!("{:.2}", value)
}
