//! Error handling for order loading and revenue aggregation.
//!
//! Loader failures and reducer failures are distinct variants so the
//! report can decide what to print for each without losing the cause.

use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RevenueError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("File not found: {path}. Please check the file path.")]
    FileNotFound { path: PathBuf },

    #[error("The file {path} is empty. Please provide a valid CSV file.")]
    EmptyFile { path: PathBuf },

    #[error("Error parsing the file {path}: {reason}. Please ensure the file is a valid CSV.")]
    InvalidCsv { path: PathBuf, reason: String },

    #[error("Failed to compute {aggregate}: {source}")]
    Aggregation {
        aggregate: &'static str,
        #[source]
        source: PolarsError,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl RevenueError {
    /// Wrap a polars failure raised while computing the named aggregate
    pub fn aggregation(aggregate: &'static str, source: PolarsError) -> Self {
        Self::Aggregation { aggregate, source }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RevenueError>;
