//! Category index
//!
//! Categories group expense names. An expense name resolves to the first
//! category (in category-name order) whose list contains it, or to
//! [`UNCATEGORIZED`] when no category claims it. New assignments that would
//! put a name in two categories are rejected.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{TrackerError, TrackerResult};

/// Synthetic category for expenses no category claims
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Mapping of category name to the expense names assigned to it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryIndex {
    categories: BTreeMap<String, Vec<String>>,
}

impl CategoryIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty category
    pub fn add_category(&mut self, name: &str) -> TrackerResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::Validation(
                "Category name cannot be empty".into(),
            ));
        }
        if self.categories.contains_key(name) {
            return Err(TrackerError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }
        self.categories.insert(name.to_string(), Vec::new());
        Ok(())
    }

    /// Remove a category and its assignments
    pub fn remove_category(&mut self, name: &str) -> Option<Vec<String>> {
        self.categories.remove(name)
    }

    /// Remove every category
    pub fn clear(&mut self) {
        self.categories.clear();
    }

    /// Assign an expense name to an existing category
    ///
    /// Assigning a name already in the same category is a no-op. Assigning a
    /// name that another category holds is rejected.
    pub fn assign(&mut self, category: &str, expense: &str) -> TrackerResult<()> {
        let expense = expense.trim();
        if expense.is_empty() {
            return Err(TrackerError::Validation(
                "Expense name cannot be empty".into(),
            ));
        }
        if !self.categories.contains_key(category) {
            return Err(TrackerError::category_not_found(category));
        }
        if let Some(owner) = self.resolve(expense) {
            if owner == category {
                return Ok(());
            }
            return Err(TrackerError::Duplicate {
                entity_type: "Category assignment",
                identifier: format!("'{}' already belongs to '{}'", expense, owner),
            });
        }
        if let Some(expenses) = self.categories.get_mut(category) {
            expenses.push(expense.to_string());
        }
        Ok(())
    }

    /// Insert a category with its names as given, without overlap checks
    ///
    /// Used for data loaded from the server or CSV where overlaps may already
    /// exist; see [`CategoryIndex::overlaps`].
    pub fn insert_raw(&mut self, category: impl Into<String>, expenses: Vec<String>) {
        self.categories.insert(category.into(), expenses);
    }

    /// The category an expense name belongs to, if any
    pub fn resolve(&self, expense: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|(_, names)| names.iter().any(|n| n == expense))
            .map(|(category, _)| category.as_str())
    }

    /// The category an expense name belongs to, or [`UNCATEGORIZED`]
    pub fn resolve_or_uncategorized(&self, expense: &str) -> &str {
        self.resolve(expense).unwrap_or(UNCATEGORIZED)
    }

    /// Expense names listed for a category
    pub fn expenses_in(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    /// Check if a category exists
    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    /// Category names in resolution order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Iterate categories with their expense names in resolution order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(name, expenses)| (name.as_str(), expenses.as_slice()))
    }

    /// Expense names listed under more than one category, with every claimant
    pub fn overlaps(&self) -> BTreeMap<String, Vec<String>> {
        let mut owners: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (category, expenses) in &self.categories {
            for expense in expenses {
                let claimants = owners.entry(expense.clone()).or_default();
                if !claimants.contains(category) {
                    claimants.push(category.clone());
                }
            }
        }
        owners.retain(|_, claimants| claimants.len() > 1);
        owners
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Check if there are no categories
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CategoryIndex {
        let mut index = CategoryIndex::new();
        index.add_category("Housing").unwrap();
        index.add_category("Food").unwrap();
        index.assign("Housing", "Rent").unwrap();
        index.assign("Food", "Groceries").unwrap();
        index
    }

    #[test]
    fn test_resolve() {
        let index = sample();
        assert_eq!(index.resolve("Rent"), Some("Housing"));
        assert_eq!(index.resolve("Cinema"), None);
        assert_eq!(index.resolve_or_uncategorized("Cinema"), UNCATEGORIZED);
    }

    #[test]
    fn test_add_category_validation() {
        let mut index = sample();
        assert!(index.add_category("  ").unwrap_err().is_validation());
        assert!(matches!(
            index.add_category("Housing"),
            Err(TrackerError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_assign_rejects_overlap() {
        let mut index = sample();
        assert!(index.assign("Housing", "Rent").is_ok());
        assert!(matches!(
            index.assign("Food", "Rent"),
            Err(TrackerError::Duplicate { .. })
        ));
        assert!(index.assign("Travel", "Taxi").unwrap_err().is_not_found());
        assert_eq!(index.expenses_in("Housing").unwrap(), ["Rent".to_string()]);
    }

    #[test]
    fn test_first_match_in_name_order() {
        let mut index = CategoryIndex::new();
        index.insert_raw("Zeta", vec!["Coffee".into()]);
        index.insert_raw("Alpha", vec!["Coffee".into()]);

        assert_eq!(index.resolve("Coffee"), Some("Alpha"));
        let overlaps = index.overlaps();
        assert_eq!(
            overlaps.get("Coffee").unwrap(),
            &vec!["Alpha".to_string(), "Zeta".to_string()]
        );
    }

    #[test]
    fn test_serde_shape() {
        let index: CategoryIndex =
            serde_json::from_str(r#"{"Housing": ["Rent"], "Fun": []}"#).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.names().collect::<Vec<_>>(), vec!["Fun", "Housing"]);
    }
}
