//! Search result tables

use tabled::{settings::Style, Table, Tabled};

use crate::services::SearchResults;
use crate::sync::DataOrigin;

use super::report::money;

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Expense")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format search results as a table with a source footer
pub fn format_search_results(results: &SearchResults, symbol: &str) -> String {
    if results.is_empty() {
        return "No matching expenses found.".to_string();
    }

    let rows: Vec<ResultRow> = results
        .records
        .iter()
        .map(|record| ResultRow {
            month: record.month.display_name().to_string(),
            name: record.name.clone(),
            category: record.category.clone(),
            amount: money(symbol, record.amount),
        })
        .collect();

    let total: f64 = results.records.iter().map(|r| r.amount).sum();
    let source = match results.source {
        DataOrigin::Remote => "tracker server",
        DataOrigin::Local => "local data (server unavailable)",
    };

    format!(
        "{}\n{} expense(s), {} total, from {}\n",
        Table::new(rows).with(Style::rounded()),
        results.len(),
        money(symbol, total),
        source
    )
}
