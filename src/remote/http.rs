//! HTTP implementation of [`TrackerSource`]
//!
//! Talks JSON to the tracker server. Mutation routes answer with a redirect
//! to the index page; any final 2xx counts as success.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    BudgetTable, CategoryIndex, ClearScope, ExpenseRecord, Month, MonthExpenses, SearchQuery,
};

use super::source::TrackerSource;
use super::wire::{
    CategoryPoint, RemoteBudgetStatus, RemoteExpenseRecord, RemoteInsights, TrendPoint,
};

/// Default tracker server address
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Tracker server client over HTTP
#[derive(Debug, Clone)]
pub struct HttpTrackerSource {
    /// Base URL; route segments are appended to its path
    base_url: Url,
    client: Client,
}

impl HttpTrackerSource {
    /// Create a client for the server at `base_url`
    ///
    /// # Errors
    /// Returns a configuration error if the URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> TrackerResult<Self> {
        let parsed = Url::parse(base_url).map_err(|e| {
            TrackerError::Config(format!("Invalid server URL '{}': {}", base_url, e))
        })?;
        if parsed.cannot_be_a_base() {
            return Err(TrackerError::Config(format!(
                "Server URL '{}' cannot be used as a base",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TrackerError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: parsed,
            client,
        })
    }

    /// The server base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the URL of a route, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> TrackerResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TrackerError::Config(format!("Invalid server URL '{}'", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> TrackerResult<T> {
        let url = self.endpoint(segments)?;
        debug!(url = %url, "GET tracker server");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            error!(error = %e, url = %url, "Tracker server request failed");
            TrackerError::from(e)
        })?;
        let response = check_status(response).await?;

        response.json::<T>().await.map_err(|e| {
            TrackerError::Transport(format!("Failed to decode response from {}: {}", url, e))
        })
    }

    async fn execute(&self, request: RequestBuilder) -> TrackerResult<()> {
        let response = request.send().await.map_err(|e| {
            error!(error = %e, "Tracker server request failed");
            TrackerError::from(e)
        })?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> TrackerResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    error!(status = %status, error = %message, "Tracker server returned error status");
    Err(TrackerError::Remote {
        status: status.as_u16(),
        message,
    })
}

fn clear_route(scope: ClearScope) -> &'static str {
    match scope {
        ClearScope::Expenses => "clear_expenses",
        ClearScope::Categories => "clear_categories",
        ClearScope::Budgets => "clear_budgets",
        ClearScope::All => "clear_all_data",
    }
}

/// Query parameters understood by the search route
fn search_params(query: &SearchQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(text) = query.text.as_ref().filter(|t| !t.is_empty()) {
        params.push(("query", text.clone()));
    }
    if let Some(category) = &query.category {
        params.push(("category", category.clone()));
    }
    if let Some(month) = query.month {
        params.push(("month", month.key().to_string()));
    }
    if let Some(min) = query.min_amount {
        params.push(("min_amount", min.to_string()));
    }
    if let Some(max) = query.max_amount {
        params.push(("max_amount", max.to_string()));
    }
    params
}

#[async_trait]
impl TrackerSource for HttpTrackerSource {
    async fn monthly_trends(&self) -> TrackerResult<Vec<TrendPoint>> {
        self.get_json(&["analytics", "monthly_trends"]).await
    }

    async fn category_breakdown(&self) -> TrackerResult<Vec<CategoryPoint>> {
        self.get_json(&["analytics", "category_breakdown"]).await
    }

    async fn insights(&self) -> TrackerResult<RemoteInsights> {
        self.get_json(&["analytics", "insights"]).await
    }

    async fn sync_analytics(&self) -> TrackerResult<()> {
        let url = self.endpoint(&["sync_analytics"])?;
        self.execute(self.client.get(url)).await
    }

    async fn list_expenses(&self, month: Month) -> TrackerResult<MonthExpenses> {
        self.get_json(&["list_expense", month.key()]).await
    }

    async fn list_categories(&self) -> TrackerResult<CategoryIndex> {
        self.get_json(&["list_categories"]).await
    }

    async fn list_budgets(&self) -> TrackerResult<BudgetTable> {
        self.get_json(&["list_budgets"]).await
    }

    async fn check_budget(&self, month: Month) -> TrackerResult<RemoteBudgetStatus> {
        self.get_json(&["check_budget", month.key()]).await
    }

    async fn add_expense(&self, month: Month, name: &str, amount: f64) -> TrackerResult<()> {
        let url = self.endpoint(&["add_expense"])?;
        let amount = amount.to_string();
        let form = [("month", month.key()), ("name", name), ("amount", amount.as_str())];
        self.execute(self.client.post(url).form(&form)).await
    }

    async fn update_expense(&self, month: Month, name: &str, amount: f64) -> TrackerResult<()> {
        let url = self.endpoint(&["update_expense", month.key(), name])?;
        let amount = amount.to_string();
        self.execute(self.client.post(url).form(&[("amount", amount.as_str())]))
            .await
    }

    async fn delete_expense(&self, month: Month, name: &str) -> TrackerResult<()> {
        let url = self.endpoint(&["delete_expense", month.key(), name])?;
        self.execute(self.client.get(url)).await
    }

    async fn set_budget(&self, month: Month, amount: f64) -> TrackerResult<()> {
        let url = self.endpoint(&["set_budget"])?;
        let amount = amount.to_string();
        let form = [("month", month.key()), ("amount", amount.as_str())];
        self.execute(self.client.post(url).form(&form)).await
    }

    async fn add_category(&self, name: &str) -> TrackerResult<()> {
        let url = self.endpoint(&["add_category"])?;
        self.execute(self.client.post(url).form(&[("category", name)]))
            .await
    }

    async fn assign_to_category(&self, category: &str, expense: &str) -> TrackerResult<()> {
        let url = self.endpoint(&["add_expense_to_category", category, expense])?;
        self.execute(self.client.get(url)).await
    }

    async fn delete_category(&self, name: &str) -> TrackerResult<()> {
        let url = self.endpoint(&["delete_category", name])?;
        self.execute(self.client.get(url)).await
    }

    async fn clear(&self, scope: ClearScope) -> TrackerResult<()> {
        let url = self.endpoint(&[clear_route(scope)])?;
        self.execute(self.client.get(url)).await
    }

    async fn search(&self, query: &SearchQuery) -> TrackerResult<Vec<ExpenseRecord>> {
        let url = self.endpoint(&["analytics", "search_expenses"])?;
        debug!(url = %url, ?query, "Searching tracker server");

        let response = self
            .client
            .get(url)
            .query(&search_params(query))
            .send()
            .await?;
        let rows: Vec<RemoteExpenseRecord> = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| TrackerError::Transport(format!("Failed to decode search results: {}", e)))?;

        Ok(rows
            .into_iter()
            .filter_map(RemoteExpenseRecord::into_record)
            .collect())
    }
}
