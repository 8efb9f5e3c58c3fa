//! Source acquisition and row extraction
//!
//! Fetches the cross-reference workbook, records its integrity digest and
//! turns the first worksheet into a lazy sequence of [`Row`]s.

mod fetch;
mod spreadsheet;

pub use fetch::{download, file_digest, write_digest};
pub use spreadsheet::{open_rows, SpreadsheetRows};

use crate::graph::{GraphError, GraphResult};
use indexmap::IndexMap;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while acquiring or reading the source file
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("workbook {0} has no worksheets")]
    NoWorksheet(PathBuf),

    #[error("cannot derive a file name from URL '{0}'")]
    BadUrl(String),
}

/// Result type for source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// One spreadsheet row: column name to trimmed cell text, for every non-empty cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    /// 1-based line number in the sheet, counted from the sheet's first row
    pub line: usize,
    pub fields: IndexMap<String, String>,
}

impl Row {
    pub fn new(line: usize) -> Self {
        Self {
            line,
            fields: IndexMap::new(),
        }
    }

    /// Build a row from `(column, value)` pairs
    pub fn from_pairs<I, K, V>(line: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            line,
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Like [`Row::get`], but a missing column is an error
    pub fn require(&self, column: &str) -> GraphResult<&str> {
        self.get(column).ok_or_else(|| GraphError::MissingColumn {
            line: self.line,
            column: column.to_string(),
        })
    }
}
