//! Expense and budget CLI commands

use clap::{Subcommand, ValueEnum};

use crate::error::TrackerResult;
use crate::models::{ClearScope, Month};
use crate::services::ExpenseService;

use super::CliContext;

/// What `clear` empties
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClearTarget {
    Expenses,
    Categories,
    Budgets,
    All,
}

impl From<ClearTarget> for ClearScope {
    fn from(target: ClearTarget) -> Self {
        match target {
            ClearTarget::Expenses => ClearScope::Expenses,
            ClearTarget::Categories => ClearScope::Categories,
            ClearTarget::Budgets => ClearScope::Budgets,
            ClearTarget::All => ClearScope::All,
        }
    }
}

/// Expense and budget mutations
#[derive(Subcommand)]
pub enum ExpenseCommand {
    /// Record an expense (replaces one with the same name in that month)
    Add {
        /// Month name or three-letter abbreviation
        month: Month,
        /// Expense name
        name: String,
        /// Amount (e.g., "42" or "42.50")
        amount: f64,
    },

    /// Change the amount of an existing expense
    Update {
        month: Month,
        name: String,
        /// New amount
        amount: f64,
    },

    /// Delete an expense
    Delete { month: Month, name: String },

    /// Set the budget for a month (0 clears it)
    #[command(name = "set-budget")]
    SetBudget { month: Month, amount: f64 },

    /// Delete expenses, categories, budgets or all data on the tracker server
    Clear {
        #[arg(value_enum)]
        target: ClearTarget,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
}

/// Handle an expense or budget mutation
pub async fn handle_expense_command(ctx: &CliContext, cmd: ExpenseCommand) -> TrackerResult<()> {
    if let ExpenseCommand::Clear {
        target,
        force: false,
    } = &cmd
    {
        let scope = ClearScope::from(*target);
        println!("This permanently deletes {} on the tracker server.", scope.as_str());
        println!("To proceed, run again with --force flag:");
        println!(
            "  expenses clear {} --force",
            target
                .to_possible_value()
                .map(|v| v.get_name().to_string())
                .unwrap_or_default()
        );
        return Ok(());
    }

    let controller = ctx.controller()?;
    ctx.load_local(&controller).await?;
    let service = ExpenseService::new(&controller);

    match cmd {
        ExpenseCommand::Add {
            month,
            name,
            amount,
        } => {
            service.add(month, &name, amount).await?;
            println!(
                "Added '{}' for {}: {}{:.2}",
                name.trim(),
                month,
                ctx.currency(),
                amount
            );
        }

        ExpenseCommand::Update {
            month,
            name,
            amount,
        } => {
            service.update(month, &name, amount).await?;
            println!(
                "Updated '{}' for {} to {}{:.2}",
                name.trim(),
                month,
                ctx.currency(),
                amount
            );
        }

        ExpenseCommand::Delete { month, name } => {
            service.delete(month, &name).await?;
            println!("Deleted '{}' from {}", name.trim(), month);
        }

        ExpenseCommand::SetBudget { month, amount } => {
            service.set_budget(month, amount).await?;
            if amount == 0.0 {
                println!("Cleared budget for {}", month);
            } else {
                println!("Budget for {} set to {}{:.2}", month, ctx.currency(), amount);
            }
        }

        ExpenseCommand::Clear { target, .. } => {
            let scope = ClearScope::from(target);
            service.clear(scope).await?;
            println!("Cleared {}", scope.as_str());
        }
    }

    ctx.save_local(&controller);
    Ok(())
}
