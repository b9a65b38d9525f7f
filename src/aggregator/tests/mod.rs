//! Tests for the revenue reducers
//!
//! Fixtures are written to temporary CSV files and loaded through the
//! real loader so column types match what a user's file produces.


use crate::config::ReportConfig;
use crate::loader::load_orders;
use crate::models::OrderTable;
use std::io::Write;
use tempfile::NamedTempFile;

pub const HEADER: &str = "order_date,product_id,customer_id,product_price,quantity";

/// Orders from the reference scenario: two January orders for C1, one February order for C2
pub const SAMPLE_ROWS: &[&str] = &[
    "2024-01-05,P1,C1,10.00,2",
    "2024-01-20,P2,C1,5.00,1",
    "2024-02-01,P1,C2,10.00,1",
];

/// Load a table from CSV text using the given configuration
pub fn table_with_config(content: &str, config: &ReportConfig) -> OrderTable {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    load_orders(file.path(), config).unwrap()
}

/// Load a table from a header line plus data rows
pub fn table_from_rows(header: &str, rows: &[&str]) -> OrderTable {
    let mut content = String::from(header);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    table_with_config(&content, &ReportConfig::default())
}

pub fn sample_table() -> OrderTable {
    table_from_rows(HEADER, SAMPLE_ROWS)
}

pub fn assert_revenue(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("group missing from aggregate");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected revenue {}, got {}",
        expected,
        actual
    );
}
