use chrono::NaiveDate;

use super::Amount;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A flattened (date, category, amount) row handed to a tabular writer.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub date: NaiveDate,
    pub category: String,
    pub amount: Amount,
}

impl ExportRow {
    /// The date column as written to the spreadsheet (ISO 8601).
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
}
