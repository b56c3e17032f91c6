//! CSV import
//!
//! Reads expenses (`Month,Expense,Amount`), categories (`Category,Expenses`
//! with `;`-separated names) and budgets (`Month,Limit`). Columns are found
//! by header name in any case and order. Rows that cannot be used are
//! reported and skipped; the rest are imported.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Amount, BudgetTable, CategoryIndex, ExpenseLedger, Month, TrackerData};
use crate::remote::TrackerSource;
use crate::services::ExpenseService;
use crate::sync::SyncController;

/// A row that was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// Line number in the file, header being line 1
    pub row: usize,
    pub message: String,
}

/// Outcome of reading one CSV file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: Vec<RowError>,
}

impl ImportSummary {
    fn skip(&mut self, row: usize, message: impl Into<String>) {
        let message = message.into();
        debug!(row, error = %message, "Skipping CSV row");
        self.skipped.push(RowError { row, message });
    }
}

/// Outcome of sending imported data to the tracker server
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushSummary {
    pub expenses: usize,
    pub categories: usize,
    pub assignments: usize,
    pub budgets: usize,
    pub failures: Vec<String>,
}

/// Header positions of the named columns
struct Columns(Vec<usize>);

impl Columns {
    fn find(headers: &StringRecord, names: &[&str]) -> TrackerResult<Self> {
        names
            .iter()
            .map(|name| {
                headers
                    .iter()
                    .position(|h| h.trim().eq_ignore_ascii_case(name))
                    .ok_or_else(|| TrackerError::Import(format!("Missing column '{}'", name)))
            })
            .collect::<TrackerResult<Vec<_>>>()
            .map(Self)
    }

    fn get<'r>(&self, record: &'r StringRecord, column: usize) -> &'r str {
        record.get(self.0[column]).unwrap_or("").trim()
    }
}

fn records<R: Read>(
    reader: R,
    names: &[&str],
) -> TrackerResult<(Columns, csv::StringRecordsIntoIter<R>)> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);
    let columns = Columns::find(reader.headers()?, names)?;
    Ok((columns, reader.into_records()))
}

/// Strict amount parse for imported data: an optional `$`, then a finite
/// non-negative number
fn parse_amount(s: &str) -> Result<f64, String> {
    let number = s.trim().trim_start_matches('$');
    match number.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        Ok(_) => Err(format!("Amount must be a non-negative number: '{}'", s)),
        Err(_) => Err(format!("Invalid amount: '{}'", s)),
    }
}

fn parse_month(s: &str) -> Result<Month, String> {
    s.parse::<Month>().map_err(|e| e.to_string())
}

/// Read expenses into a ledger; later rows overwrite earlier ones
pub fn import_expenses<R: Read>(reader: R, ledger: &mut ExpenseLedger) -> TrackerResult<ImportSummary> {
    let (columns, rows) = records(reader, &["Month", "Expense", "Amount"])?;
    let mut summary = ImportSummary::default();

    for (idx, result) in rows.enumerate() {
        let row = idx + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                summary.skip(row, format!("Error reading CSV record: {}", e));
                continue;
            }
        };

        let month = match parse_month(columns.get(&record, 0)) {
            Ok(month) => month,
            Err(e) => {
                summary.skip(row, e);
                continue;
            }
        };
        let name = columns.get(&record, 1);
        if name.is_empty() {
            summary.skip(row, "Expense name is empty");
            continue;
        }
        match parse_amount(columns.get(&record, 2)) {
            Ok(amount) => {
                ledger.insert(month, name, Amount::new(amount));
                summary.imported += 1;
            }
            Err(e) => summary.skip(row, e),
        }
    }

    Ok(summary)
}

/// Read categories and their assignments into an index
///
/// A name already held by another category is reported and left where it is.
pub fn import_categories<R: Read>(reader: R, index: &mut CategoryIndex) -> TrackerResult<ImportSummary> {
    let (columns, rows) = records(reader, &["Category", "Expenses"])?;
    let mut summary = ImportSummary::default();

    for (idx, result) in rows.enumerate() {
        let row = idx + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                summary.skip(row, format!("Error reading CSV record: {}", e));
                continue;
            }
        };

        let category = columns.get(&record, 0);
        if category.is_empty() {
            summary.skip(row, "Category name is empty");
            continue;
        }
        if !index.contains(category) {
            index.add_category(category)?;
        }

        for name in columns
            .get(&record, 1)
            .split(';')
            .map(str::trim)
            .filter(|n| !n.is_empty())
        {
            if let Err(e) = index.assign(category, name) {
                summary.skip(row, e.to_string());
            }
        }
        summary.imported += 1;
    }

    Ok(summary)
}

/// Read budgets into a budget table
pub fn import_budgets<R: Read>(reader: R, budgets: &mut BudgetTable) -> TrackerResult<ImportSummary> {
    let (columns, rows) = records(reader, &["Month", "Limit"])?;
    let mut summary = ImportSummary::default();

    for (idx, result) in rows.enumerate() {
        let row = idx + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                summary.skip(row, format!("Error reading CSV record: {}", e));
                continue;
            }
        };

        let parsed = parse_month(columns.get(&record, 0))
            .and_then(|month| parse_amount(columns.get(&record, 1)).map(|limit| (month, limit)));
        match parsed {
            Ok((month, limit)) => {
                budgets.set(month, Amount::new(limit));
                summary.imported += 1;
            }
            Err(e) => summary.skip(row, e),
        }
    }

    Ok(summary)
}

/// Service that sends imported data to the tracker server
pub struct ImportService<'a, S> {
    controller: &'a SyncController<S>,
}

impl<'a, S: TrackerSource> ImportService<'a, S> {
    pub fn new(controller: &'a SyncController<S>) -> Self {
        Self { controller }
    }

    /// Send every category, assignment, expense and budget in `data`
    ///
    /// Individual failures are collected and do not stop the push.
    pub async fn push(&self, data: &TrackerData) -> PushSummary {
        let service = ExpenseService::new(self.controller);
        let existing = self.controller.local().categories;
        let mut summary = PushSummary::default();

        for (category, names) in data.categories.iter() {
            if !existing.contains(category) {
                match service.add_category(category).await {
                    Ok(()) => summary.categories += 1,
                    Err(e) => summary.failures.push(format!("category '{}': {}", category, e)),
                }
            }
            for name in names {
                if existing.resolve(name) == Some(category) {
                    continue;
                }
                match service.assign_category(category, name).await {
                    Ok(()) => summary.assignments += 1,
                    Err(e) => summary
                        .failures
                        .push(format!("assignment '{}' -> '{}': {}", name, category, e)),
                }
            }
        }

        for (month, name, amount) in data.expenses.iter() {
            if amount.is_zero() {
                continue;
            }
            match service.add(month, name, amount.value()).await {
                Ok(()) => summary.expenses += 1,
                Err(e) => summary
                    .failures
                    .push(format!("expense '{}' in {}: {}", name, month, e)),
            }
        }

        for (month, limit) in data.budgets.iter() {
            match service.set_budget(month, limit.value()).await {
                Ok(()) => summary.budgets += 1,
                Err(e) => summary.failures.push(format!("budget for {}: {}", month, e)),
            }
        }

        if !summary.failures.is_empty() {
            warn!(failures = summary.failures.len(), "Some imported items were not accepted");
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::fake::FakeSource;

    #[test]
    fn test_import_expenses() {
        let csv = "month,EXPENSE,Amount\nJanuary,Rent,1000\nfeb,Food,$200.50\nSmarch,Ghost,1\nMarch,,3\nMarch,Bad,abc\nMarch,Refund,-5\n";
        let mut ledger = ExpenseLedger::new();
        let summary = import_expenses(csv.as_bytes(), &mut ledger).unwrap();

        assert_eq!(summary.imported, 2);
        assert_eq!(
            summary.skipped.iter().map(|e| e.row).collect::<Vec<_>>(),
            vec![4, 5, 6, 7]
        );
        assert_eq!(ledger.get(Month::February, "Food"), Some(Amount::new(200.5)));
    }

    #[test]
    fn test_import_columns_in_any_order() {
        let csv = "Amount,Expense,Month\n12,Tea,may\n";
        let mut ledger = ExpenseLedger::new();
        let summary = import_expenses(csv.as_bytes(), &mut ledger).unwrap();
        assert_eq!(summary.imported, 1);
        assert_eq!(ledger.get(Month::May, "Tea"), Some(Amount::new(12.0)));
    }

    #[test]
    fn test_missing_column_fails() {
        let mut ledger = ExpenseLedger::new();
        let err = import_expenses("Month,Amount\njan,1\n".as_bytes(), &mut ledger).unwrap_err();
        assert!(matches!(err, TrackerError::Import(_)));
    }

    #[test]
    fn test_import_categories_rejects_overlap() {
        let csv = "Category,Expenses\nHousing,Rent; Utilities\nBills,Utilities;Phone\nFood,\n";
        let mut index = CategoryIndex::new();
        let summary = import_categories(csv.as_bytes(), &mut index).unwrap();

        assert_eq!(summary.imported, 3);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].row, 3);
        assert_eq!(index.resolve("Utilities"), Some("Housing"));
        assert_eq!(index.resolve("Phone"), Some("Bills"));
        assert!(index.contains("Food"));
        assert!(index.overlaps().is_empty());
    }

    #[test]
    fn test_import_budgets() {
        let csv = "Month,Limit\njanuary,1500\nfebruary,lots\n";
        let mut budgets = BudgetTable::new();
        let summary = import_budgets(csv.as_bytes(), &mut budgets).unwrap();
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped[0].row, 3);
        assert_eq!(budgets.get(Month::January).value(), 1500.0);
    }

    #[tokio::test]
    async fn test_push_sends_everything() {
        let mut data = TrackerData::default();
        import_categories("Category,Expenses\nHousing,Rent\n".as_bytes(), &mut data.categories)
            .unwrap();
        import_expenses("Month,Expense,Amount\njan,Rent,1000\n".as_bytes(), &mut data.expenses)
            .unwrap();
        import_budgets("Month,Limit\njan,1500\n".as_bytes(), &mut data.budgets).unwrap();

        let controller = SyncController::new(FakeSource::new());
        let summary = ImportService::new(&controller).push(&data).await;

        assert_eq!(summary.categories, 1);
        assert_eq!(summary.assignments, 1);
        assert_eq!(summary.expenses, 1);
        assert_eq!(summary.budgets, 1);
        assert!(summary.failures.is_empty());
        assert_eq!(controller.local(), data);
    }
}
