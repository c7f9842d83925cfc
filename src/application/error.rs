use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Category already exists: {0}")]
    DuplicateCategory(String),

    #[error("Invalid category: {0}")]
    UnknownCategory(String),

    #[error("Category name must not be empty")]
    EmptyCategoryName,

    #[error("Amount must be a finite number, got {0}")]
    NonFiniteAmount(f64),
}
