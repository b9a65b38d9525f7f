//! Order file loading.
//!
//! Reads the delimited input file into an [`OrderTable`]. Column types are
//! inferred from the whole file; no schema validation happens here, so a
//! missing or malformed column only surfaces when a reducer reads it.

use crate::config::ReportConfig;
use crate::constants::{MISSING_VALUE_TOKENS, REQUIRED_COLUMNS};
use crate::error::{Result, RevenueError};
use crate::models::OrderTable;
use polars::prelude::*;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load orders from `file_path`
pub fn load_orders(file_path: &Path, config: &ReportConfig) -> Result<OrderTable> {
    if !file_path.exists() {
        return Err(RevenueError::FileNotFound {
            path: file_path.to_path_buf(),
        });
    }

    let metadata = fs::metadata(file_path)?;
    if metadata.len() == 0 {
        return Err(RevenueError::EmptyFile {
            path: file_path.to_path_buf(),
        });
    }

    debug!(
        "Reading {} ({} bytes, delimiter {:?})",
        file_path.display(),
        metadata.len(),
        config.delimiter as char
    );

    let delimiter = config.delimiter;
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .map_parse_options(|options| {
            options
                .with_separator(delimiter)
                .with_null_values(Some(missing_values()))
        })
        .try_into_reader_with_file_path(Some(file_path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|error| classify_read_error(file_path, error))?;

    let table = OrderTable::new(frame);
    info!(
        "Loaded {} orders from {}",
        table.height(),
        file_path.display()
    );
    let columns = table.column_names();
    debug!("Columns: {:?}", columns);

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|required| !columns.iter().any(|column| column.as_str() == *required))
        .collect();
    if !missing.is_empty() {
        warn!(
            "{} has no {:?} column(s); aggregates that read them will fail",
            file_path.display(),
            missing
        );
    }

    Ok(table)
}

/// Tokens the reader turns into nulls in every column
fn missing_values() -> NullValues {
    NullValues::AllColumns(
        MISSING_VALUE_TOKENS
            .iter()
            .copied()
            .map(PlSmallStr::from_static)
            .collect(),
    )
}

/// Map a reader failure onto the loader's error kinds
fn classify_read_error(file_path: &Path, error: PolarsError) -> RevenueError {
    match error {
        PolarsError::NoData(_) => RevenueError::EmptyFile {
            path: file_path.to_path_buf(),
        },
        other => RevenueError::InvalidCsv {
            path: file_path.to_path_buf(),
            reason: other.to_string(),
        },
    }
}
