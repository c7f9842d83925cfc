use chrono::NaiveDate;
use std::io::{self, Write};
use tracing::{debug, info, warn};

use crate::config::LedgerConfig;
use crate::domain::{Amount, CategoryFilter, ExportRow, percentage_of};
use crate::storage::ExpenseStore;

use super::{CategorySummary, LedgerError, StatisticsReport};

/// The expense ledger: category registry, expense bookkeeping and reporting.
/// This is the primary interface for any client (CLI, script, tests).
#[derive(Debug, Clone)]
pub struct ExpenseLedger {
    store: ExpenseStore,
}

impl Default for ExpenseLedger {
    fn default() -> Self {
        Self::new(&LedgerConfig::default())
    }
}

impl ExpenseLedger {
    /// Create a ledger with the configured initial categories.
    pub fn new(config: &LedgerConfig) -> Self {
        let store = ExpenseStore::with_categories(
            config
                .categories
                .iter()
                .map(String::as_str)
                .filter(|c| !c.trim().is_empty()),
        );
        debug!(categories = store.category_count(), "Ledger initialized");
        Self { store }
    }

    // ========================
    // Category operations
    // ========================

    /// Registered categories in registration order.
    pub fn categories(&self) -> Vec<String> {
        self.store.categories().map(str::to_string).collect()
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.store.contains(name)
    }

    /// Register a new category. Names match exactly, case and whitespace
    /// included; only blank names are rejected.
    pub fn add_category(&mut self, name: &str) -> Result<(), LedgerError> {
        if name.trim().is_empty() {
            warn!("Rejected empty category name");
            return Err(LedgerError::EmptyCategoryName);
        }

        if !self.store.insert_category(name) {
            warn!(category = name, "Category already exists: {}", name);
            return Err(LedgerError::DuplicateCategory(name.to_string()));
        }

        info!(category = name, "Added new category: {}", name);
        Ok(())
    }

    // ========================
    // Expense operations
    // ========================

    /// Record an expense against an existing category.
    pub fn add_expense(
        &mut self,
        category: &str,
        amount: Amount,
        date: NaiveDate,
    ) -> Result<(), LedgerError> {
        self.ensure_category(category)?;

        if !amount.is_finite() {
            warn!(category, "Rejected non-finite amount {}", amount);
            return Err(LedgerError::NonFiniteAmount(amount));
        }

        // Category was checked above, so the store accepts the record.
        self.store.record(category, date, amount);
        info!(
            category,
            %date,
            "Added expense: {} to category {} on {}",
            amount,
            category,
            date
        );
        Ok(())
    }

    pub fn expense_count(&self) -> usize {
        self.store.expense_count()
    }

    // ========================
    // Reporting
    // ========================

    /// Compute spending statistics for every category or a single one.
    pub fn statistics(&self, filter: &CategoryFilter) -> Result<StatisticsReport, LedgerError> {
        match filter {
            CategoryFilter::All => {
                let total = self.store.grand_total();
                let categories = self
                    .store
                    .categories()
                    .map(|category| {
                        let category_total = self.category_total(category);
                        CategorySummary {
                            category: category.to_string(),
                            total: category_total,
                            count: self.store.expense_count_in(category).unwrap_or(0),
                            percentage: Some(percentage_of(category_total, total)),
                        }
                    })
                    .collect();

                Ok(StatisticsReport::Overall { total, categories })
            }
            CategoryFilter::Only(category) => {
                self.ensure_category(category)?;
                Ok(StatisticsReport::Single(CategorySummary {
                    category: category.clone(),
                    total: self.category_total(category),
                    count: self.store.expense_count_in(category).unwrap_or(0),
                    percentage: None,
                }))
            }
        }
    }

    /// Write the statistics report to `out`, one line per entry.
    pub fn show_statistics<W: Write>(
        &self,
        filter: &CategoryFilter,
        out: &mut W,
    ) -> Result<StatisticsReport, ShowStatisticsError> {
        let report = self.statistics(filter)?;
        write!(out, "{}", report)?;
        Ok(report)
    }

    /// Flatten recorded expenses into export rows: categories in registration
    /// order, dates ascending, amounts in recording order.
    pub fn export_rows(&self, filter: &CategoryFilter) -> Result<Vec<ExportRow>, LedgerError> {
        if let CategoryFilter::Only(category) = filter {
            self.ensure_category(category)?;
        }

        Ok(self
            .store
            .categories()
            .filter(|category| filter.matches(category))
            .flat_map(|category| self.store.rows(category))
            .collect())
    }

    fn category_total(&self, category: &str) -> Amount {
        self.store.category_total(category).unwrap_or(0.0)
    }

    fn ensure_category(&self, category: &str) -> Result<(), LedgerError> {
        if self.store.contains(category) {
            Ok(())
        } else {
            warn!(category, "Invalid category: {}", category);
            Err(LedgerError::UnknownCategory(category.to_string()))
        }
    }
}

/// Failure while rendering statistics: either the ledger rejected the
/// request or the output could not be written.
#[derive(thiserror::Error, Debug)]
pub enum ShowStatisticsError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Failed to write statistics: {0}")]
    Io(#[from] io::Error),
}
