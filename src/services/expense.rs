//! Expense service
//!
//! Validates mutations, forwards them to the tracker server and mirrors the
//! accepted change into the controller's local data. Every accepted change
//! invalidates the cached snapshot.

use tracing::info;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Amount, ClearScope, Month};
use crate::remote::TrackerSource;
use crate::sync::SyncController;

/// Service for expense, budget and category changes
pub struct ExpenseService<'a, S> {
    controller: &'a SyncController<S>,
}

fn validate_name<'n>(name: &'n str, what: &str) -> TrackerResult<&'n str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TrackerError::Validation(format!("{} cannot be empty", what)));
    }
    Ok(name)
}

fn validate_amount(amount: f64) -> TrackerResult<f64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(TrackerError::Validation(format!(
            "Amount must be a positive number, got {}",
            amount
        )));
    }
    Ok(amount)
}

fn validate_budget(amount: f64) -> TrackerResult<f64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(TrackerError::Validation(format!(
            "Budget cannot be negative, got {}",
            amount
        )));
    }
    Ok(amount)
}

impl<'a, S: TrackerSource> ExpenseService<'a, S> {
    /// Create a new expense service
    pub fn new(controller: &'a SyncController<S>) -> Self {
        Self { controller }
    }

    /// Record an expense; an existing expense of the same name is overwritten
    pub async fn add(&self, month: Month, name: &str, amount: f64) -> TrackerResult<()> {
        let name = validate_name(name, "Expense name")?;
        let amount = validate_amount(amount)?;

        self.controller
            .source()
            .add_expense(month, name, amount)
            .await?;

        self.controller.update_local(|data| {
            data.expenses.insert(month, name, Amount::new(amount));
        });
        self.controller.clear_cache();
        info!(month = %month, name, amount, "Expense added");
        Ok(())
    }

    /// Change the amount of an existing expense
    pub async fn update(&self, month: Month, name: &str, amount: f64) -> TrackerResult<()> {
        let name = validate_name(name, "Expense name")?;
        let amount = validate_amount(amount)?;
        self.require_expense(month, name)?;

        self.controller
            .source()
            .update_expense(month, name, amount)
            .await?;

        self.controller.update_local(|data| {
            data.expenses.insert(month, name, Amount::new(amount));
        });
        self.controller.clear_cache();
        info!(month = %month, name, amount, "Expense updated");
        Ok(())
    }

    /// Delete an existing expense
    pub async fn delete(&self, month: Month, name: &str) -> TrackerResult<()> {
        let name = validate_name(name, "Expense name")?;
        self.require_expense(month, name)?;

        self.controller.source().delete_expense(month, name).await?;

        self.controller.update_local(|data| {
            data.expenses.remove(month, name);
        });
        self.controller.clear_cache();
        info!(month = %month, name, "Expense deleted");
        Ok(())
    }

    /// Set the budget for a month; zero clears it
    pub async fn set_budget(&self, month: Month, amount: f64) -> TrackerResult<()> {
        let amount = validate_budget(amount)?;

        self.controller.source().set_budget(month, amount).await?;

        self.controller.update_local(|data| {
            if amount == 0.0 {
                data.budgets.remove(month);
            } else {
                data.budgets.set(month, Amount::new(amount));
            }
        });
        self.controller.clear_cache();
        info!(month = %month, amount, "Budget set");
        Ok(())
    }

    /// Create an empty category
    pub async fn add_category(&self, name: &str) -> TrackerResult<()> {
        let name = validate_name(name, "Category name")?;
        if self.controller.with_local(|data| data.categories.contains(name)) {
            return Err(TrackerError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        self.controller.source().add_category(name).await?;

        self.controller
            .update_local(|data| data.categories.add_category(name))?;
        self.controller.clear_cache();
        info!(category = name, "Category added");
        Ok(())
    }

    /// Assign an expense name to a category
    ///
    /// The category must exist and the name must not belong to another
    /// category.
    pub async fn assign_category(&self, category: &str, expense: &str) -> TrackerResult<()> {
        let category = validate_name(category, "Category name")?;
        let expense = validate_name(expense, "Expense name")?;

        let mut categories = self.controller.local().categories;
        categories.assign(category, expense)?;

        self.controller
            .source()
            .assign_to_category(category, expense)
            .await?;

        self.controller
            .update_local(|data| data.categories.assign(category, expense))?;
        self.controller.clear_cache();
        info!(category, expense, "Expense assigned to category");
        Ok(())
    }

    /// Delete a category; its expense names become uncategorized
    pub async fn delete_category(&self, name: &str) -> TrackerResult<()> {
        let name = validate_name(name, "Category name")?;
        if !self.controller.with_local(|data| data.categories.contains(name)) {
            return Err(TrackerError::category_not_found(name));
        }

        self.controller.source().delete_category(name).await?;

        self.controller.update_local(|data| {
            data.categories.remove_category(name);
        });
        self.controller.clear_cache();
        info!(category = name, "Category deleted");
        Ok(())
    }

    /// Empty expenses, categories, budgets or everything
    pub async fn clear(&self, scope: ClearScope) -> TrackerResult<()> {
        self.controller.source().clear(scope).await?;

        self.controller.update_local(|data| data.clear(scope));
        self.controller.clear_cache();
        info!(scope = scope.as_str(), "Tracker data cleared");
        Ok(())
    }

    fn require_expense(&self, month: Month, name: &str) -> TrackerResult<()> {
        let exists = self
            .controller
            .with_local(|data| data.expenses.get(month, name).is_some());
        if exists {
            Ok(())
        } else {
            Err(TrackerError::expense_not_found(format!("{} in {}", name, month)))
        }
    }
}
