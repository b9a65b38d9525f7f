//! Configuration for loading orders and building the revenue report.

use crate::constants::{DEFAULT_DATE_FORMAT, DEFAULT_DELIMITER, DEFAULT_TOP_N, RESERVED_DELIMITERS};
use crate::error::{Result, RevenueError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Global configuration for a report run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// strftime-style pattern used to parse `order_date`
    pub date_format: String,

    /// Number of customers kept in the top customers ranking
    pub top_n: usize,

    /// Field separator of the input file
    pub delimiter: u8,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            top_n: DEFAULT_TOP_N,
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl ReportConfig {
    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Reject settings the loader or reducers cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(RevenueError::configuration(
                "top customer count must be at least 1",
            ));
        }

        if !self.date_format.contains('%') {
            return Err(RevenueError::configuration(format!(
                "date format '{}' contains no strftime specifiers",
                self.date_format
            )));
        }

        if !self.delimiter.is_ascii() || RESERVED_DELIMITERS.contains(&self.delimiter) {
            return Err(RevenueError::configuration(format!(
                "delimiter {:?} cannot be used as a field separator",
                self.delimiter as char
            )));
        }

        debug!("Validated report configuration: {:?}", self);
        Ok(())
    }
}
