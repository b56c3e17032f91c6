//! Analytics snapshots
//!
//! A snapshot is the full set of aggregates at one point in time, either as
//! reported by the tracker server or computed here from local data.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{BudgetTable, Month, TrackerData};
use crate::remote::{CategoryPoint, RemoteInsights, TrendPoint};
use crate::reports::{
    budget_comparison, category_totals, insights, monthly_totals, BudgetComparison,
    CategoryTotals, Insights, MonthlyTotals, PeakMonth, TopCategory,
};

/// Where a set of figures came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataOrigin {
    /// Aggregated by the tracker server
    Remote,
    /// Computed from locally held data
    Local,
}

impl DataOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monthly totals, category totals and insights taken together
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSnapshot {
    pub monthly_totals: MonthlyTotals,
    pub category_totals: CategoryTotals,
    pub insights: Insights,
    pub source: DataOrigin,
    pub fetched_at: DateTime<Utc>,
}

impl AnalyticsSnapshot {
    /// Aggregate locally held data
    pub fn compute(data: &TrackerData) -> Self {
        let monthly = monthly_totals(&data.expenses);
        let categories = category_totals(&data.expenses, &data.categories);
        let insights = insights(&monthly, &categories, data.expenses.month_count());

        Self {
            monthly_totals: monthly,
            category_totals: categories,
            insights,
            source: DataOrigin::Local,
            fetched_at: Utc::now(),
        }
    }

    /// Normalize the three analytics responses of the tracker server
    ///
    /// Trend rows are matched to calendar months case-insensitively; the
    /// first row for a month wins and unknown months are ignored. Zero
    /// category totals are dropped. "None" placeholders in the insights
    /// become empty values.
    pub fn from_remote(
        trends: &[TrendPoint],
        breakdown: &[CategoryPoint],
        remote: &RemoteInsights,
    ) -> Self {
        let mut seen = [false; 12];
        let mut pairs = Vec::with_capacity(12);
        for point in trends {
            match point.month.parse::<Month>() {
                Ok(month) if !seen[month.index()] => {
                    seen[month.index()] = true;
                    pairs.push((month, point.total.value()));
                }
                Ok(_) => {}
                Err(_) => debug!(month = %point.month, "Ignoring trend row with unknown month"),
            }
        }
        let monthly = MonthlyTotals::from_pairs(pairs);

        let categories = CategoryTotals::from_pairs(
            breakdown
                .iter()
                .map(|point| (point.category.clone(), point.total.value())),
        );

        let insights = Insights {
            total_spending: remote.total_spending.value(),
            avg_monthly_spending: remote.avg_monthly_spending.value(),
            highest_spending_month: PeakMonth {
                month: remote
                    .highest_spending_month
                    .month
                    .as_deref()
                    .and_then(|m| m.parse().ok()),
                amount: remote.highest_spending_month.amount.value(),
            },
            top_spending_category: TopCategory {
                category: remote
                    .top_spending_category
                    .category
                    .clone()
                    .filter(|c| c != "None")
                    .unwrap_or_default(),
                amount: remote.top_spending_category.amount.value(),
            },
        };

        Self {
            monthly_totals: monthly,
            category_totals: categories,
            insights,
            source: DataOrigin::Remote,
            fetched_at: Utc::now(),
        }
    }

    /// Compare this snapshot's monthly totals against a budget table
    pub fn budget_comparison(&self, budgets: &BudgetTable) -> BudgetComparison {
        budget_comparison(&self.monthly_totals, budgets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Amount;
    use crate::remote::{RemoteCategoryAmount, RemoteMonthAmount};

    fn point(month: &str, total: f64) -> TrendPoint {
        TrendPoint {
            month: month.into(),
            total: Amount::new(total),
        }
    }

    #[test]
    fn test_compute_marks_local() {
        let data: TrackerData = serde_json::from_str(
            r#"{"expenses": {"january": {"Rent": 1000, "Food": 200}}, "categories": {"Housing": ["Rent"]}}"#,
        )
        .unwrap();
        let snapshot = AnalyticsSnapshot::compute(&data);

        assert_eq!(snapshot.source, DataOrigin::Local);
        assert_eq!(snapshot.monthly_totals.get(Month::January), 1200.0);
        assert_eq!(snapshot.category_totals.get("Housing"), 1000.0);
        assert_eq!(snapshot.insights.total_spending, 1200.0);
    }

    #[test]
    fn test_remote_trends_normalized() {
        let trends = vec![
            point("February", 1000.0),
            point("JANUARY", 1200.0),
            point("january", 5.0),
            point("Undecember", 42.0),
        ];
        let snapshot = AnalyticsSnapshot::from_remote(&trends, &[], &RemoteInsights::default());

        assert_eq!(snapshot.source, DataOrigin::Remote);
        assert_eq!(snapshot.monthly_totals.get(Month::January), 1200.0);
        assert_eq!(snapshot.monthly_totals.get(Month::February), 1000.0);
        assert_eq!(snapshot.monthly_totals.get(Month::March), 0.0);
        assert_eq!(snapshot.monthly_totals.total(), 2200.0);
    }

    #[test]
    fn test_remote_breakdown_drops_zero() {
        let breakdown = vec![
            CategoryPoint {
                category: "Housing".into(),
                total: Amount::new(2000.0),
            },
            CategoryPoint {
                category: "Travel".into(),
                total: Amount::zero(),
            },
        ];
        let snapshot = AnalyticsSnapshot::from_remote(&[], &breakdown, &RemoteInsights::default());
        assert_eq!(snapshot.category_totals.len(), 1);
        assert_eq!(snapshot.category_totals.get("Housing"), 2000.0);
    }

    #[test]
    fn test_remote_insight_placeholders() {
        let remote = RemoteInsights {
            total_spending: Amount::zero(),
            avg_monthly_spending: Amount::zero(),
            highest_spending_month: RemoteMonthAmount {
                month: Some("None".into()),
                amount: Amount::zero(),
            },
            top_spending_category: RemoteCategoryAmount {
                category: Some("None".into()),
                amount: Amount::zero(),
            },
        };
        let view = AnalyticsSnapshot::from_remote(&[], &[], &remote).insights.view();
        assert_eq!(view.highest_spending_month.month, "");
        assert_eq!(view.top_spending_category.category, "");

        let remote = RemoteInsights {
            highest_spending_month: RemoteMonthAmount {
                month: Some("january".into()),
                amount: Amount::new(1200.0),
            },
            ..RemoteInsights::default()
        };
        let view = AnalyticsSnapshot::from_remote(&[], &[], &remote).insights.view();
        assert_eq!(view.highest_spending_month.month, "January");
        assert_eq!(view.highest_spending_month.amount, "1200.00");
    }

    #[test]
    fn test_origin_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&DataOrigin::Remote).unwrap(), "\"remote\"");
        assert_eq!(DataOrigin::Local.to_string(), "local");
    }
}
