use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{Amount, ExportRow, sum_amounts};

/// Amounts recorded for one category, keyed by date.
/// Dates iterate chronologically; amounts on a date keep insertion order.
pub type DailyAmounts = BTreeMap<NaiveDate, Vec<Amount>>;

#[derive(Debug, Clone, Default)]
struct CategoryBook {
    name: String,
    days: DailyAmounts,
}

/// In-memory storage for categories and the expenses recorded against them.
///
/// The category set and the per-category expense map live in the same entry,
/// so a category can never exist in one without the other.
#[derive(Debug, Clone, Default)]
pub struct ExpenseStore {
    books: Vec<CategoryBook>,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the given categories registered in order.
    /// Repeated names are collapsed to their first occurrence.
    pub fn with_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut store = Self::new();
        for category in categories {
            store.insert_category(category);
        }
        store
    }

    fn book(&self, category: &str) -> Option<&CategoryBook> {
        self.books.iter().find(|b| b.name == category)
    }

    fn book_mut(&mut self, category: &str) -> Option<&mut CategoryBook> {
        self.books.iter_mut().find(|b| b.name == category)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.book(category).is_some()
    }

    /// Registered category names in registration order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.books.iter().map(|b| b.name.as_str())
    }

    pub fn category_count(&self) -> usize {
        self.books.len()
    }

    /// Register a category. Returns false if it was already present.
    pub fn insert_category(&mut self, category: impl Into<String>) -> bool {
        let name = category.into();
        if self.contains(&name) {
            return false;
        }
        self.books.push(CategoryBook {
            name,
            days: DailyAmounts::new(),
        });
        true
    }

    /// Append an amount for (category, date). Returns false for an unknown
    /// category, in which case nothing is recorded.
    pub fn record(&mut self, category: &str, date: NaiveDate, amount: Amount) -> bool {
        match self.book_mut(category) {
            Some(book) => {
                book.days.entry(date).or_default().push(amount);
                true
            }
            None => false,
        }
    }

    pub fn category_total(&self, category: &str) -> Option<Amount> {
        self.book(category).map(|b| book_total(&b.days))
    }

    pub fn expense_count_in(&self, category: &str) -> Option<usize> {
        self.book(category)
            .map(|b| b.days.values().map(Vec::len).sum())
    }

    pub fn grand_total(&self) -> Amount {
        self.books
            .iter()
            .fold(0.0, |total, b| total + book_total(&b.days))
    }

    pub fn expense_count(&self) -> usize {
        self.books
            .iter()
            .flat_map(|b| b.days.values())
            .map(Vec::len)
            .sum()
    }

    /// Flattened rows for one category: dates ascending, amounts in the
    /// order they were recorded. Empty for an unknown category.
    pub fn rows<'a>(&'a self, category: &'a str) -> impl Iterator<Item = ExportRow> + 'a {
        self.book(category).into_iter().flat_map(|book| {
            book.days.iter().flat_map(move |(date, amounts)| {
                amounts.iter().map(move |amount| ExportRow {
                    date: *date,
                    category: book.name.clone(),
                    amount: *amount,
                })
            })
        })
    }
}

fn book_total(days: &DailyAmounts) -> Amount {
    sum_amounts(days.values().flatten())
}
