use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_analytics::cli::{
    handle_analyze_command, handle_budget_command, handle_category_command,
    handle_expense_command, handle_export_command, handle_import_command,
    handle_search_command, handle_snapshot_command, AnalyzeArgs, CategoryCommands, CliContext,
    ExpenseCommand, ExportArgs, ImportArgs, SearchArgs,
};
use expense_analytics::logging::init_tracing;
use expense_analytics::models::Month;
use expense_analytics::config::SERVER_ENV_VAR;
use expense_analytics::remote::{HttpTrackerSource, TrackerSource};

#[derive(Parser)]
#[command(
    name = "expenses",
    author = "Kaylee Beyene",
    version,
    about = "Expense analytics for a personal expense tracker",
    long_about = "Shows monthly trends, category breakdowns, budget comparisons and \
                  spending insights. Figures come from the tracker server when it is \
                  reachable and are computed from local data when it is not."
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show monthly trends, category breakdown and insights
    Snapshot {
        /// Fetch aggregates from the tracker server
        #[arg(short, long)]
        refresh: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare spending with budgets, or show one month's budget status
    Budget {
        /// Show the status of a single month
        #[arg(short, long)]
        month: Option<Month>,
        /// Fetch aggregates from the tracker server
        #[arg(short, long)]
        refresh: bool,
    },

    /// Search expenses
    Search(SearchArgs),

    #[command(flatten)]
    Expense(ExpenseCommand),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Export analytics to JSON, YAML or CSV
    Export(ExportArgs),

    /// Import expenses, categories and budgets from CSV into the tracker
    Import(ImportArgs),

    /// Aggregate CSV files locally without a tracker server
    Analyze(AnalyzeArgs),

    /// Ask the tracker server to rebuild its analytics tables
    Sync,

    /// Show or change configuration
    Config {
        /// Tracker server URL
        #[arg(long)]
        server: Option<String>,
        /// Currency symbol for terminal output
        #[arg(long)]
        currency: Option<String>,
        /// HTTP request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
        /// Keep serving the last remote snapshot when a refresh fails
        #[arg(long)]
        retain_snapshot: Option<bool>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = CliContext::load()?;

    match cli.command {
        Some(Commands::Snapshot { refresh, json }) => {
            handle_snapshot_command(&ctx, refresh, json).await?;
        }
        Some(Commands::Budget { month, refresh }) => {
            handle_budget_command(&ctx, month, refresh).await?;
        }
        Some(Commands::Search(args)) => {
            handle_search_command(&ctx, args).await?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&ctx, cmd).await?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&ctx, cmd).await?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&ctx, args).await?;
        }
        Some(Commands::Import(args)) => {
            handle_import_command(&ctx, args).await?;
        }
        Some(Commands::Analyze(args)) => {
            handle_analyze_command(&ctx, args)?;
        }
        Some(Commands::Sync) => {
            let controller = ctx.controller()?;
            controller.source().sync_analytics().await?;
            println!("Tracker server analytics rebuilt.");
        }
        Some(Commands::Config {
            server,
            currency,
            timeout,
            retain_snapshot,
        }) => {
            let changed = server.is_some()
                || currency.is_some()
                || timeout.is_some()
                || retain_snapshot.is_some();
            if let Some(server) = server {
                ctx.settings.server_url = server;
            }
            if let Some(currency) = currency {
                ctx.settings.currency_symbol = currency;
            }
            if let Some(timeout) = timeout {
                ctx.settings.request_timeout_secs = timeout;
            }
            if let Some(retain) = retain_snapshot {
                ctx.settings.retain_snapshot_on_failure = retain;
            }
            if changed {
                HttpTrackerSource::new(&ctx.settings.server_url, ctx.settings.request_timeout())?;
                ctx.settings.save(&ctx.paths)?;
                println!("Configuration saved.");
                println!();
            }

            println!("Expense Analytics Configuration");
            println!("===============================");
            println!("Config directory: {}", ctx.paths.base_dir().display());
            println!("Settings file:    {}", ctx.paths.settings_file().display());
            println!("Local data cache: {}", ctx.paths.local_data_file().display());
            println!();
            println!("Settings:");
            println!("  Server URL:         {}", ctx.settings.server_url);
            let effective = ctx.settings.effective_server_url();
            if effective != ctx.settings.server_url {
                println!("  Overridden by {}: {}", SERVER_ENV_VAR, effective);
            }
            println!("  Request timeout:    {}s", ctx.settings.request_timeout_secs);
            println!("  Currency symbol:    {}", ctx.settings.currency_symbol);
            println!(
                "  Retain on failure:  {}",
                ctx.settings.retain_snapshot_on_failure
            );
        }
        None => {
            println!("Expense Analytics - spending trends, budgets and insights");
            println!();
            println!("Run 'expenses --help' for usage information.");
            println!("Run 'expenses snapshot --refresh' to fetch the latest figures.");
        }
    }

    Ok(())
}
