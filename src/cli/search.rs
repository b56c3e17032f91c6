//! Search CLI command

use clap::Args;

use crate::display::format_search_results;
use crate::error::TrackerResult;
use crate::models::{Month, SearchQuery};
use crate::services::SearchService;

use super::CliContext;

/// Arguments of the `search` command
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Text to look for in expense names (case-insensitive)
    pub text: Option<String>,
    /// Only expenses in this category ("Uncategorized" for unassigned)
    #[arg(short, long)]
    pub category: Option<String>,
    /// Only expenses in this month
    #[arg(short, long)]
    pub month: Option<Month>,
    /// Minimum amount (inclusive)
    #[arg(long)]
    pub min: Option<f64>,
    /// Maximum amount (inclusive)
    #[arg(long)]
    pub max: Option<f64>,
    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    fn query(&self) -> SearchQuery {
        let mut query = SearchQuery::new().with_amount_range(self.min, self.max);
        if let Some(text) = &self.text {
            query = query.with_text(text.trim());
        }
        if let Some(category) = &self.category {
            query = query.with_category(category.trim());
        }
        if let Some(month) = self.month {
            query = query.with_month(month);
        }
        query
    }
}

/// Handle `search`
pub async fn handle_search_command(ctx: &CliContext, args: SearchArgs) -> TrackerResult<()> {
    let controller = ctx.controller()?;
    ctx.load_local(&controller).await?;
    let results = SearchService::new(&controller).search(&args.query()).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print!("{}", format_search_results(&results, ctx.currency()));
    }
    Ok(())
}
