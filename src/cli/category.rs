//! Category CLI commands

use clap::Subcommand;

use crate::display::report::truncate;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Month, UNCATEGORIZED};
use crate::reports::{category_expenses, category_trends};
use crate::services::ExpenseService;

use super::CliContext;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories and the expense names assigned to them
    List,

    /// Create a new category
    Add {
        /// Category name
        name: String,
    },

    /// Assign an expense name to a category
    Assign {
        /// Category name
        category: String,
        /// Expense name
        expense: String,
    },

    /// Delete a category; its expenses become uncategorized
    Delete {
        /// Category name
        name: String,
    },

    /// Show the expenses that belong to a category, by month
    Show {
        /// Category name
        category: String,
    },

    /// Month-by-month spending of every category
    Trends,
}

/// Handle a category command
pub async fn handle_category_command(ctx: &CliContext, cmd: CategoryCommands) -> TrackerResult<()> {
    let controller = ctx.controller()?;
    ctx.load_local(&controller).await?;

    match cmd {
        CategoryCommands::List => {
            let local = controller.local();
            if local.categories.is_empty() {
                println!("No categories defined. Unassigned expenses count as {}.", UNCATEGORIZED);
                return Ok(());
            }
            for (category, names) in local.categories.iter() {
                if names.is_empty() {
                    println!("{}", category);
                } else {
                    println!("{}: {}", category, names.join(", "));
                }
            }
            for (expense, claimants) in local.categories.overlaps() {
                println!(
                    "warning: '{}' is listed under {}; it counts toward '{}'",
                    expense,
                    claimants.join(", "),
                    local.categories.resolve_or_uncategorized(&expense)
                );
            }
        }

        CategoryCommands::Add { name } => {
            ExpenseService::new(&controller).add_category(&name).await?;
            ctx.save_local(&controller);
            println!("Created category: {}", name.trim());
        }

        CategoryCommands::Assign { category, expense } => {
            ExpenseService::new(&controller)
                .assign_category(&category, &expense)
                .await?;
            ctx.save_local(&controller);
            println!("Assigned '{}' to {}", expense.trim(), category.trim());
        }

        CategoryCommands::Delete { name } => {
            ExpenseService::new(&controller).delete_category(&name).await?;
            ctx.save_local(&controller);
            println!("Deleted category: {}", name.trim());
        }

        CategoryCommands::Show { category } => {
            let local = controller.local();
            let ledger = category_expenses(&local.expenses, &local.categories, &category)
                .ok_or_else(|| TrackerError::category_not_found(&category))?;

            println!("{}", category);
            println!("{}", "=".repeat(40));
            if ledger.is_empty() {
                println!("No expenses recorded.");
            }
            for (month, name, amount) in ledger.iter() {
                println!(
                    "{:<10} {:<20} {:>8}",
                    month.display_name(),
                    name,
                    amount.format_with_symbol(ctx.currency())
                );
            }
        }

        CategoryCommands::Trends => {
            let local = controller.local();
            let trends = category_trends(&local.expenses, &local.categories);
            if trends.is_empty() {
                println!("No spending recorded.");
                return Ok(());
            }

            print!("{:<16}", "Category");
            for month in Month::ALL {
                print!(" {:>9}", &month.display_name()[..3]);
            }
            println!();
            for trend in trends {
                print!("{:<16}", truncate(&trend.category, 16));
                for entry in trend.totals.iter() {
                    print!(" {:>9.2}", entry.total);
                }
                println!();
            }
        }
    }

    Ok(())
}
