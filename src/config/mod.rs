use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;

use crate::domain::default_categories;

pub const DEFAULT_EXPORT_FILE: &str = "expenses.csv";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings a ledger is constructed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Categories registered at construction, in order.
    pub categories: Vec<String>,
    /// File name used when an export does not name one.
    pub export_file: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            export_file: DEFAULT_EXPORT_FILE.into(),
        }
    }
}

impl LedgerConfig {
    pub fn with_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Load a JSON config file. Fields that are absent keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&data).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }
}
