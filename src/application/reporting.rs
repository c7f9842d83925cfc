use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{Amount, format_amount};

/// Spending statistics as produced by `ExpenseLedger::statistics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "lowercase")]
pub enum StatisticsReport {
    /// Grand total plus one summary per category, in registration order.
    Overall {
        total: Amount,
        categories: Vec<CategorySummary>,
    },
    /// A single category's total, without a percentage.
    Single(CategorySummary),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub total: Amount,
    pub count: usize,
    /// Share of the grand total, rounded to two decimals. Only set in
    /// overall reports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

impl StatisticsReport {
    pub fn total(&self) -> Amount {
        match self {
            StatisticsReport::Overall { total, .. } => *total,
            StatisticsReport::Single(summary) => summary.total,
        }
    }

    pub fn categories(&self) -> &[CategorySummary] {
        match self {
            StatisticsReport::Overall { categories, .. } => categories,
            StatisticsReport::Single(summary) => std::slice::from_ref(summary),
        }
    }

    pub fn find(&self, category: &str) -> Option<&CategorySummary> {
        self.categories().iter().find(|c| c.category == category)
    }

    /// Report rendered as one line per entry.
    pub fn lines(&self) -> Vec<String> {
        match self {
            StatisticsReport::Overall { total, categories } => {
                let mut lines = Vec::with_capacity(categories.len() + 1);
                lines.push(format!("Total spent: {}", format_amount(*total)));
                lines.extend(categories.iter().map(CategorySummary::to_string));
                lines
            }
            StatisticsReport::Single(summary) => vec![summary.to_string()],
        }
    }
}

impl fmt::Display for CategorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.percentage {
            Some(percentage) => write!(
                f,
                "{}: {} ({:.2}%)",
                self.category,
                format_amount(self.total),
                percentage
            ),
            None => write!(f, "{}: {}", self.category, format_amount(self.total)),
        }
    }
}

impl fmt::Display for StatisticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
