use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;

use crate::application::{ExpenseLedger, ShowStatisticsError};
use crate::config::LedgerConfig;
use crate::domain::{CategoryFilter, parse_amount, parse_date};
use crate::io::export_and_log;
use crate::logging::init_tracing;

/// Expense Ledger - track expenses by category and export them
#[derive(Parser, Debug)]
#[command(name = "expense-ledger")]
#[command(about = "Record expenses by category, show statistics and export to a spreadsheet")]
#[command(version)]
pub struct Cli {
    /// JSON config file with initial categories and the default export file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Initial category (repeatable); replaces the configured list
    #[arg(long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    /// Print statistics as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the ledger configuration from the config file and flags.
    pub fn ledger_config(&self) -> Result<LedgerConfig> {
        let mut config = match &self.config {
            Some(path) => LedgerConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => LedgerConfig::default(),
        };

        if !self.categories.is_empty() {
            config.categories = self.categories.clone();
        }

        Ok(config)
    }

    pub fn run(self) -> Result<()> {
        init_tracing(self.verbose);

        let config = self.ledger_config()?;
        let ledger = ExpenseLedger::new(&config);

        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut session = MenuSession::new(ledger, stdin.lock(), stdout.lock())
            .with_export_file(config.export_file)
            .with_json(self.json);
        session.run()
    }
}

const MENU: &str = "1. Add Expense\n2. Add Category\n3. Show Statistics\n4. Export to Spreadsheet\n5. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddExpense,
    AddCategory,
    ShowStatistics,
    Export,
    Exit,
}

impl MenuChoice {
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::AddExpense),
            "2" => Some(MenuChoice::AddCategory),
            "3" => Some(MenuChoice::ShowStatistics),
            "4" => Some(MenuChoice::Export),
            "5" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// The numbered interactive menu, driven by any line-based input.
///
/// Invalid input and rejected ledger operations print a message and return
/// to the menu. End of input ends the session like `Exit`.
pub struct MenuSession<R, W> {
    ledger: ExpenseLedger,
    input: R,
    output: W,
    export_file: String,
    json: bool,
}

impl<R: BufRead, W: Write> MenuSession<R, W> {
    pub fn new(ledger: ExpenseLedger, input: R, output: W) -> Self {
        Self {
            ledger,
            input,
            output,
            export_file: LedgerConfig::default().export_file,
            json: false,
        }
    }

    pub fn with_export_file(mut self, export_file: impl Into<String>) -> Self {
        self.export_file = export_file.into();
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn into_parts(self) -> (ExpenseLedger, W) {
        (self.ledger, self.output)
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(line) = self.read_line()? else {
                break;
            };

            match MenuChoice::from_input(&line) {
                Some(MenuChoice::AddExpense) => self.add_expense()?,
                Some(MenuChoice::AddCategory) => self.add_category()?,
                Some(MenuChoice::ShowStatistics) => self.show_statistics()?,
                Some(MenuChoice::Export) => self.export()?,
                Some(MenuChoice::Exit) => break,
                None => writeln!(self.output, "Invalid choice.")?,
            }
        }

        info!("Exiting application.");
        self.output.flush()?;
        Ok(())
    }

    /// Read one line without its trailing newline; `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()?;
        self.read_line()
    }

    fn add_expense(&mut self) -> Result<()> {
        let Some(category) = self.prompt("Enter category:")? else {
            return Ok(());
        };
        let Some(amount) = self.prompt("Enter amount:")? else {
            return Ok(());
        };
        let amount = match parse_amount(&amount) {
            Ok(amount) => amount,
            Err(err) => {
                writeln!(self.output, "Error: {}", err)?;
                return Ok(());
            }
        };
        let Some(date) = self.prompt("Enter date (yyyy-mm-dd):")? else {
            return Ok(());
        };
        let date = match parse_date(&date) {
            Ok(date) => date,
            Err(_) => {
                writeln!(self.output, "Error: date must be in YYYY-MM-DD format")?;
                return Ok(());
            }
        };

        match self.ledger.add_expense(category.trim(), amount, date) {
            Ok(()) => writeln!(self.output, "Expense added.")?,
            Err(err) => writeln!(self.output, "Error: {}", err)?,
        }
        Ok(())
    }

    fn add_category(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Enter new category name:")? else {
            return Ok(());
        };

        match self.ledger.add_category(name.trim()) {
            Ok(()) => writeln!(self.output, "Category added.")?,
            Err(err) => writeln!(self.output, "Error: {}", err)?,
        }
        Ok(())
    }

    fn show_statistics(&mut self) -> Result<()> {
        let Some(category) = self.prompt("Enter category (or press Enter for all):")? else {
            return Ok(());
        };
        let filter = CategoryFilter::from_input(&category);

        if self.json {
            match self.ledger.statistics(&filter) {
                Ok(report) => writeln!(self.output, "{}", serde_json::to_string_pretty(&report)?)?,
                Err(err) => writeln!(self.output, "Error: {}", err)?,
            }
            return Ok(());
        }

        match self.ledger.show_statistics(&filter, &mut self.output) {
            Ok(_) => {}
            Err(ShowStatisticsError::Ledger(err)) => writeln!(self.output, "Error: {}", err)?,
            Err(ShowStatisticsError::Io(err)) => {
                return Err(err).context("Failed to write statistics");
            }
        }
        Ok(())
    }

    fn export(&mut self) -> Result<()> {
        let Some(category) = self.prompt("Enter category (or press Enter for all):")? else {
            return Ok(());
        };
        let Some(file_name) = self.prompt("Enter file name:")? else {
            return Ok(());
        };

        let filter = CategoryFilter::from_input(&category);
        let file_name = match file_name.trim() {
            "" => self.export_file.clone(),
            name => name.to_string(),
        };

        match export_and_log(&self.ledger, &filter, &file_name) {
            Some(count) => writeln!(self.output, "Exported {} rows to {}", count, file_name)?,
            None => writeln!(self.output, "Export failed.")?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choice_from_input() {
        assert_eq!(MenuChoice::from_input("1"), Some(MenuChoice::AddExpense));
        assert_eq!(MenuChoice::from_input(" 5 "), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_input("6"), None);
        assert_eq!(MenuChoice::from_input("exit"), None);
        assert_eq!(MenuChoice::from_input(""), None);
    }

    #[test]
    fn test_cli_category_flags_replace_defaults() {
        let cli = Cli::parse_from([
            "expense-ledger",
            "--category",
            "Books",
            "--category",
            "Games",
        ]);
        let config = cli.ledger_config().unwrap();
        assert_eq!(config.categories, vec!["Books", "Games"]);
        assert_eq!(config.export_file, "expenses.csv");
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["expense-ledger"]);
        assert!(!cli.json);
        assert!(!cli.verbose);
        assert_eq!(cli.ledger_config().unwrap(), LedgerConfig::default());
    }

    #[test]
    fn test_cli_missing_config_file_fails() {
        let cli = Cli::parse_from(["expense-ledger", "--config", "/nonexistent/ledger.json"]);
        assert!(cli.ledger_config().is_err());
    }
}
