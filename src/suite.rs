//! JSON position suites.
//!
//! A suite is a named catalog of positions for batch runs and regression
//! tracking:
//!
//! ```json
//! {
//!   "positions": [
//!     {"name": "classic", "grid": "724/506/831", "best_known": 26}
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::board::Board;
use crate::notation::{parse_board, ParseError};

/// A full suite parsed from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct Suite {
    pub positions: Vec<SuitePosition>,
}

/// A single named position.
#[derive(Debug, Clone, Deserialize)]
pub struct SuitePosition {
    pub name: String,
    /// Board in digit notation, e.g. "724/506/831".
    pub grid: String,
    /// Best known solution length, if recorded.
    #[serde(default)]
    pub best_known: Option<u32>,
}

/// Errors that can occur while loading a suite.
#[derive(Debug, thiserror::Error)]
pub enum SuiteError {
    #[error("failed to read suite file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse suite JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("position '{name}' has a bad grid: {source}")]
    BadGrid {
        name: String,
        #[source]
        source: ParseError,
    },
}

/// Loads a suite from a JSON file at the given path.
pub fn load_suite(path: &Path) -> Result<Suite, SuiteError> {
    let data = fs::read_to_string(path)?;
    load_suite_from_str(&data)
}

/// Loads a suite from a JSON string.
pub fn load_suite_from_str(json: &str) -> Result<Suite, SuiteError> {
    Ok(serde_json::from_str(json)?)
}

impl Suite {
    /// Parses every entry's grid, pairing each board with its name.
    pub fn boards(&self) -> Result<Vec<(String, Board)>, SuiteError> {
        self.positions
            .iter()
            .map(|p| {
                parse_board(&p.grid)
                    .map(|b| (p.name.clone(), b))
                    .map_err(|source| SuiteError::BadGrid {
                        name: p.name.clone(),
                        source,
                    })
            })
            .collect()
    }
}
