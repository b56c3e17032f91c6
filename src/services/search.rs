//! Expense search
//!
//! Asks the tracker server first and filters local data when it cannot
//! answer.

use serde::Serialize;
use tracing::warn;

use crate::models::{ExpenseRecord, SearchQuery, TrackerData};
use crate::remote::TrackerSource;
use crate::sync::{DataOrigin, SyncController};

/// Matched expenses and where they were found
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub records: Vec<ExpenseRecord>,
    pub source: DataOrigin,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Service for searching expenses
pub struct SearchService<'a, S> {
    controller: &'a SyncController<S>,
}

impl<'a, S: TrackerSource> SearchService<'a, S> {
    pub fn new(controller: &'a SyncController<S>) -> Self {
        Self { controller }
    }

    /// Search remotely, falling back to the local filter on any failure
    pub async fn search(&self, query: &SearchQuery) -> SearchResults {
        match self.controller.source().search(query).await {
            Ok(records) => SearchResults {
                records,
                source: DataOrigin::Remote,
            },
            Err(err) => {
                warn!(error = %err, "Remote search failed, searching local data");
                SearchResults {
                    records: filter_local(&self.controller.local(), query),
                    source: DataOrigin::Local,
                }
            }
        }
    }
}

/// Filter local data with a query
///
/// Results come in calendar order, then by expense name.
pub fn filter_local(data: &TrackerData, query: &SearchQuery) -> Vec<ExpenseRecord> {
    let needle = query
        .text
        .as_deref()
        .map(str::to_lowercase)
        .filter(|t| !t.is_empty());

    data.expenses
        .iter()
        .filter(|(month, name, amount)| {
            let amount = amount.value();
            needle
                .as_deref()
                .map_or(true, |n| name.to_lowercase().contains(n))
                && query.month.map_or(true, |m| m == *month)
                && query.min_amount.map_or(true, |min| amount >= min)
                && query.max_amount.map_or(true, |max| amount <= max)
                && query.category.as_deref().map_or(true, |c| {
                    data.categories.resolve_or_uncategorized(name) == c
                })
        })
        .map(|(month, name, amount)| ExpenseRecord {
            month,
            name: name.to_string(),
            amount: amount.value(),
            category: data.categories.resolve_or_uncategorized(name).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Month, UNCATEGORIZED};
    use crate::remote::fake::FakeSource;

    fn data() -> TrackerData {
        serde_json::from_str(
            r#"{
                "expenses": {
                    "march": {"Rent": 1000, "Coffee": 4.5},
                    "january": {"Rent": 950, "Car Rental": 120, "Food": 200}
                },
                "categories": {"Housing": ["Rent"]}
            }"#,
        )
        .unwrap()
    }

    fn names(records: &[ExpenseRecord]) -> Vec<(Month, &str)> {
        records.iter().map(|r| (r.month, r.name.as_str())).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let records = filter_local(&data(), &SearchQuery::new());
        assert_eq!(
            names(&records),
            vec![
                (Month::January, "Car Rental"),
                (Month::January, "Food"),
                (Month::January, "Rent"),
                (Month::March, "Coffee"),
                (Month::March, "Rent"),
            ]
        );
    }

    #[test]
    fn test_text_is_case_insensitive_substring() {
        let records = filter_local(&data(), &SearchQuery::new().with_text("RENT"));
        assert_eq!(
            names(&records),
            vec![
                (Month::January, "Car Rental"),
                (Month::January, "Rent"),
                (Month::March, "Rent"),
            ]
        );
    }

    #[test]
    fn test_category_and_month_filters() {
        let query = SearchQuery::new()
            .with_category(UNCATEGORIZED)
            .with_month(Month::January);
        let records = filter_local(&data(), &query);
        assert_eq!(
            names(&records),
            vec![(Month::January, "Car Rental"), (Month::January, "Food")]
        );
        assert!(records.iter().all(|r| r.category == UNCATEGORIZED));

        let housing = filter_local(&data(), &SearchQuery::new().with_category("Housing"));
        assert_eq!(housing.len(), 2);
    }

    #[test]
    fn test_amount_bounds_are_inclusive() {
        let query = SearchQuery::new().with_amount_range(Some(120.0), Some(950.0));
        let records = filter_local(&data(), &query);
        assert_eq!(
            names(&records),
            vec![
                (Month::January, "Car Rental"),
                (Month::January, "Food"),
                (Month::January, "Rent"),
            ]
        );
    }

    #[tokio::test]
    async fn test_search_prefers_remote() {
        let source = FakeSource::new();
        source.search_results.lock().unwrap().push(ExpenseRecord {
            month: Month::May,
            name: "Remote".into(),
            amount: 1.0,
            category: UNCATEGORIZED.into(),
        });
        let controller = SyncController::new(source);
        controller.replace_local(data());

        let results = SearchService::new(&controller)
            .search(&SearchQuery::new())
            .await;
        assert_eq!(results.source, DataOrigin::Remote);
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_search_falls_back_to_local() {
        let source = FakeSource::new();
        source.set_failing(true);
        let controller = SyncController::new(source);
        controller.replace_local(data());

        let results = SearchService::new(&controller)
            .search(&SearchQuery::new().with_text("coffee"))
            .await;
        assert_eq!(results.source, DataOrigin::Local);
        assert_eq!(names(&results.records), vec![(Month::March, "Coffee")]);
    }
}
