//! Import CLI command
//!
//! Reads CSV files and sends their contents to the tracker server.

use std::path::PathBuf;

use clap::Args;

use crate::error::{TrackerError, TrackerResult};
use crate::services::ImportService;

use super::analytics::read_csv_data;
use super::CliContext;

/// Arguments of the `import` command
#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Expenses CSV (Month,Expense,Amount)
    #[arg(long)]
    pub expenses: Option<PathBuf>,
    /// Categories CSV (Category,Expenses)
    #[arg(long)]
    pub categories: Option<PathBuf>,
    /// Budgets CSV (Month,Limit)
    #[arg(long)]
    pub budgets: Option<PathBuf>,
    /// Only parse the files and report what would be sent
    #[arg(long)]
    pub dry_run: bool,
}

/// Handle `import`
pub async fn handle_import_command(ctx: &CliContext, args: ImportArgs) -> TrackerResult<()> {
    if args.expenses.is_none() && args.categories.is_none() && args.budgets.is_none() {
        return Err(TrackerError::Validation(
            "Nothing to import: pass --expenses, --categories or --budgets".into(),
        ));
    }

    let data = read_csv_data(
        args.expenses.as_deref(),
        args.categories.as_deref(),
        args.budgets.as_deref(),
    )?;

    println!(
        "Read: {} expenses, {} categories, {} budgets",
        data.expenses.expense_count(),
        data.categories.len(),
        data.budgets.iter().count()
    );
    if args.dry_run {
        return Ok(());
    }

    let controller = ctx.controller()?;
    if !ctx.load_local(&controller).await? {
        return Err(TrackerError::Transport(format!(
            "Tracker server at {} is unavailable",
            ctx.settings.server_url
        )));
    }

    let summary = ImportService::new(&controller).push(&data).await;
    ctx.save_local(&controller);

    println!(
        "Sent: {} expenses, {} new categories, {} assignments, {} budgets",
        summary.expenses, summary.categories, summary.assignments, summary.budgets
    );
    for failure in &summary.failures {
        eprintln!("failed: {}", failure);
    }
    Ok(())
}
