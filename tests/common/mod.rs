// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use expense_ledger::ExpenseLedger;
use expense_ledger::config::LedgerConfig;
use std::io;
use std::sync::{Arc, Mutex};

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Helper to create a ledger with only the given categories
pub fn ledger_with(categories: &[&str]) -> ExpenseLedger {
    ExpenseLedger::new(&LedgerConfig::with_categories(categories.iter().copied()))
}

/// Test fixture: the documented example scenario
pub struct SampleExpenses;

impl SampleExpenses {
    /// Default categories with Food 12.50 + 7.50 and Rent 500.00
    pub fn create() -> Result<ExpenseLedger> {
        let mut ledger = ExpenseLedger::default();
        ledger.add_expense("Food", 12.50, parse_date("2024-01-01"))?;
        ledger.add_expense("Food", 7.50, parse_date("2024-01-02"))?;
        ledger.add_expense("Rent", 500.00, parse_date("2024-01-01"))?;
        Ok(ledger)
    }
}

/// Shared in-memory sink for formatted log output
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

/// Run `f` with a plain-text subscriber installed for the current thread,
/// returning its result and everything that was logged.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}

/// The single log line containing `message`
pub fn log_line<'a>(logs: &'a str, message: &str) -> &'a str {
    let lines: Vec<&str> = logs.lines().filter(|l| l.contains(message)).collect();
    assert_eq!(lines.len(), 1, "expected one '{}' line in:\n{}", message, logs);
    lines[0]
}
