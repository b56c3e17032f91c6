//! Analytics CLI commands
//!
//! Snapshot, budget comparison, export, and the offline `analyze` command
//! that aggregates CSV files without a tracker server.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};

use crate::display::{format_budget_comparison, format_budget_status, format_snapshot};
use crate::error::{TrackerError, TrackerResult};
use crate::export::{export_csv, export_json, export_yaml};
use crate::models::{Month, TrackerData};
use crate::remote::TrackerSource;
use crate::services::{
    import_budgets, import_categories, import_expenses, BudgetService, ImportSummary,
};
use crate::sync::{AnalyticsSnapshot, DataOrigin, SyncController};

use super::CliContext;

/// Export file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Yaml,
    Csv,
}

/// Arguments of the `export` command
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,
    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Fetch aggregates from the tracker server first
    #[arg(long)]
    pub refresh: bool,
}

/// Arguments of the offline `analyze` command
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Expenses CSV (Month,Expense,Amount)
    #[arg(long)]
    pub expenses: PathBuf,
    /// Categories CSV (Category,Expenses)
    #[arg(long)]
    pub categories: Option<PathBuf>,
    /// Budgets CSV (Month,Limit)
    #[arg(long)]
    pub budgets: Option<PathBuf>,
    /// Print the JSON export document instead of the report
    #[arg(long)]
    pub json: bool,
}

/// Ask the server for fresh aggregates, reporting a failure on stderr
async fn try_refresh<S: TrackerSource>(controller: &SyncController<S>) {
    if let Err(e) = controller.refresh().await {
        eprintln!("Could not refresh from tracker server ({}), showing local figures.", e);
    }
}

/// Handle `snapshot`
pub async fn handle_snapshot_command(
    ctx: &CliContext,
    refresh: bool,
    json: bool,
) -> TrackerResult<()> {
    let controller = ctx.controller()?;
    ctx.load_local(&controller).await?;
    if refresh {
        try_refresh(&controller).await;
    }

    let snapshot = controller.snapshot();
    if json {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        export_json(&snapshot, &controller.local().budgets, &mut out, true)?;
        writeln!(out)?;
    } else {
        print!("{}", format_snapshot(&snapshot, ctx.currency()));
    }
    Ok(())
}

/// Handle `budget`
pub async fn handle_budget_command(
    ctx: &CliContext,
    month: Option<Month>,
    refresh: bool,
) -> TrackerResult<()> {
    let controller = ctx.controller()?;
    ctx.load_local(&controller).await?;

    match month {
        Some(month) => {
            let (status, source) = BudgetService::new(&controller).status(month).await;
            if source == DataOrigin::Local {
                eprintln!("Tracker server did not answer, showing local figures.");
            }
            print!("{}", format_budget_status(&status, ctx.currency()));
        }
        None => {
            if refresh {
                try_refresh(&controller).await;
            }
            println!(
                "{}",
                format_budget_comparison(&controller.budget_comparison(), ctx.currency())
            );
        }
    }
    Ok(())
}

/// Handle `export`
pub async fn handle_export_command(ctx: &CliContext, args: ExportArgs) -> TrackerResult<()> {
    let controller = ctx.controller()?;
    ctx.load_local(&controller).await?;
    if args.refresh {
        try_refresh(&controller).await;
    }

    let snapshot = controller.snapshot();
    let budgets = controller.local().budgets;

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                TrackerError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(&snapshot, &budgets, args.format, &mut writer)?;
            writer.flush()?;
            println!(
                "Exported {} analytics to {}",
                snapshot.source,
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_export(&snapshot, &budgets, args.format, &mut out)?;
        }
    }
    Ok(())
}

fn write_export<W: Write>(
    snapshot: &AnalyticsSnapshot,
    budgets: &crate::models::BudgetTable,
    format: ExportFormat,
    writer: &mut W,
) -> TrackerResult<()> {
    match format {
        ExportFormat::Json => {
            export_json(snapshot, budgets, writer, true)?;
            writeln!(writer)?;
        }
        ExportFormat::Yaml => export_yaml(snapshot, budgets, writer)?,
        ExportFormat::Csv => export_csv(snapshot, budgets, writer)?,
    }
    Ok(())
}

fn open(path: &Path) -> TrackerResult<File> {
    File::open(path)
        .map_err(|e| TrackerError::Import(format!("Failed to open {}: {}", path.display(), e)))
}

fn report_skipped(label: &str, summary: &ImportSummary) {
    for skipped in &summary.skipped {
        eprintln!("{} line {}: {}", label, skipped.row, skipped.message);
    }
}

/// Read whichever CSV files are given into tracker data
///
/// Skipped rows are reported on stderr.
pub fn read_csv_data(
    expenses: Option<&Path>,
    categories: Option<&Path>,
    budgets: Option<&Path>,
) -> TrackerResult<TrackerData> {
    let mut data = TrackerData::default();

    if let Some(path) = expenses {
        let summary = import_expenses(open(path)?, &mut data.expenses)?;
        report_skipped("expenses", &summary);
    }
    if let Some(path) = categories {
        let summary = import_categories(open(path)?, &mut data.categories)?;
        report_skipped("categories", &summary);
    }
    if let Some(path) = budgets {
        let summary = import_budgets(open(path)?, &mut data.budgets)?;
        report_skipped("budgets", &summary);
    }

    Ok(data)
}

/// Handle `analyze`
pub fn handle_analyze_command(ctx: &CliContext, args: AnalyzeArgs) -> TrackerResult<()> {
    let data = read_csv_data(
        Some(args.expenses.as_path()),
        args.categories.as_deref(),
        args.budgets.as_deref(),
    )?;
    let snapshot = AnalyticsSnapshot::compute(&data);

    if args.json {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        export_json(&snapshot, &data.budgets, &mut out, true)?;
        writeln!(out)?;
    } else {
        print!("{}", format_snapshot(&snapshot, ctx.currency()));
        println!();
        println!(
            "{}",
            format_budget_comparison(&snapshot.budget_comparison(&data.budgets), ctx.currency())
        );
    }
    Ok(())
}
