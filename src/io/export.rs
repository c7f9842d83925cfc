use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::application::{ExpenseLedger, LedgerError};
use crate::domain::{CategoryFilter, ExportRow, format_amount};

/// Column names written as the first row of every export.
pub const EXPORT_HEADER: [&str; 3] = ["Date", "Category", "Amount"];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Failed to write export file: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to write export row: {0}")]
    Csv(#[from] csv::Error),
}

/// A tabular file writer: a header row followed by (date, category, amount)
/// rows. Implementations decide the on-disk encoding.
pub trait RowWriter {
    fn write_header(&mut self, columns: &[&str]) -> Result<(), ExportError>;

    fn write_row(&mut self, row: &ExportRow) -> Result<(), ExportError>;

    /// Flush buffered output. Called once after the last row.
    fn finish(&mut self) -> Result<(), ExportError>;
}

/// Writes rows as CSV, which spreadsheet applications open directly.
pub struct CsvRowWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl<W: Write> CsvRowWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: csv::Writer::from_writer(writer),
        }
    }
}

impl<W: Write> RowWriter for CsvRowWriter<W> {
    fn write_header(&mut self, columns: &[&str]) -> Result<(), ExportError> {
        self.inner.write_record(columns)?;
        Ok(())
    }

    fn write_row(&mut self, row: &ExportRow) -> Result<(), ExportError> {
        self.inner.write_record([
            row.date_string(),
            row.category.clone(),
            format_amount(row.amount),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ExportError> {
        self.inner.flush()?;
        Ok(())
    }
}

/// Exporter for handing ledger rows to a tabular writer.
pub struct Exporter<'a> {
    ledger: &'a ExpenseLedger,
}

impl<'a> Exporter<'a> {
    pub fn new(ledger: &'a ExpenseLedger) -> Self {
        Self { ledger }
    }

    /// Write the header and every matching row. Returns the number of rows.
    pub fn export_rows<R: RowWriter>(
        &self,
        filter: &CategoryFilter,
        writer: &mut R,
    ) -> Result<usize, ExportError> {
        let rows = self.ledger.export_rows(filter)?;
        write_rows(&rows, writer)
    }

    /// Export as CSV into any writer.
    pub fn export_csv<W: Write>(
        &self,
        filter: &CategoryFilter,
        writer: W,
    ) -> Result<usize, ExportError> {
        let mut csv_writer = CsvRowWriter::new(writer);
        self.export_rows(filter, &mut csv_writer)
    }

    /// Export as CSV into a file at `path`. Rows are produced before the file
    /// is created, so an unknown category leaves no file behind.
    pub fn export_to_file(
        &self,
        filter: &CategoryFilter,
        path: impl AsRef<Path>,
    ) -> Result<usize, ExportError> {
        let rows = self.ledger.export_rows(filter)?;

        let file = File::create(path.as_ref())?;
        let mut csv_writer = CsvRowWriter::new(file);
        write_rows(&rows, &mut csv_writer)
    }
}

fn write_rows<R: RowWriter>(rows: &[ExportRow], writer: &mut R) -> Result<usize, ExportError> {
    writer.write_header(&EXPORT_HEADER)?;
    for row in rows {
        writer.write_row(row)?;
    }
    writer.finish()?;

    Ok(rows.len())
}

/// Export to a file and report the outcome through logging only.
/// Returns the number of rows written, or `None` if the export failed.
pub fn export_and_log(
    ledger: &ExpenseLedger,
    filter: &CategoryFilter,
    path: impl AsRef<Path>,
) -> Option<usize> {
    let path = path.as_ref();
    match Exporter::new(ledger).export_to_file(filter, path) {
        Ok(count) => {
            info!(rows = count, "Exported data to file: {}", path.display());
            Some(count)
        }
        Err(ExportError::Ledger(err)) => {
            warn!("Export skipped: {}", err);
            None
        }
        Err(err) => {
            error!("Error writing export file {}: {}", path.display(), err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use chrono::NaiveDate;

    #[derive(Default)]
    struct RecordingWriter {
        header: Vec<String>,
        rows: Vec<ExportRow>,
        finished: bool,
    }

    impl RowWriter for RecordingWriter {
        fn write_header(&mut self, columns: &[&str]) -> Result<(), ExportError> {
            self.header = columns.iter().map(|c| c.to_string()).collect();
            Ok(())
        }

        fn write_row(&mut self, row: &ExportRow) -> Result<(), ExportError> {
            self.rows.push(row.clone());
            Ok(())
        }

        fn finish(&mut self) -> Result<(), ExportError> {
            self.finished = true;
            Ok(())
        }
    }

    fn ledger() -> ExpenseLedger {
        let mut ledger = ExpenseLedger::new(&LedgerConfig::with_categories(["Food", "Rent"]));
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        ledger.add_expense("Rent", 500.0, day).unwrap();
        ledger.add_expense("Food", 12.5, day).unwrap();
        ledger
    }

    #[test]
    fn test_export_rows_to_custom_writer() {
        let ledger = ledger();
        let mut writer = RecordingWriter::default();

        let count = Exporter::new(&ledger)
            .export_rows(&CategoryFilter::All, &mut writer)
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(writer.header, vec!["Date", "Category", "Amount"]);
        assert_eq!(writer.rows[0].category, "Food");
        assert_eq!(writer.rows[1].category, "Rent");
        assert!(writer.finished);
    }

    #[test]
    fn test_export_csv_format() {
        let ledger = ledger();
        let mut out = Vec::new();

        Exporter::new(&ledger)
            .export_csv(&CategoryFilter::only("Food"), &mut out)
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Date,Category,Amount\n2024-01-01,Food,12.50\n"
        );
    }

    #[test]
    fn test_unknown_filter_writes_nothing() {
        let ledger = ledger();
        let mut writer = RecordingWriter::default();

        let result = Exporter::new(&ledger).export_rows(&CategoryFilter::only("Pets"), &mut writer);

        assert!(matches!(
            result,
            Err(ExportError::Ledger(LedgerError::UnknownCategory(_)))
        ));
        assert!(writer.header.is_empty());
        assert!(!writer.finished);
    }
}
