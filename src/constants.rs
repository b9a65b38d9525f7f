//! Application constants for the order revenue report
//!
//! Column names expected in the input file, names of derived columns,
//! and default values for configuration.

// =============================================================================
// Input Columns
// =============================================================================

pub const ORDER_DATE: &str = "order_date";
pub const PRODUCT_ID: &str = "product_id";
pub const CUSTOMER_ID: &str = "customer_id";
pub const PRODUCT_PRICE: &str = "product_price";
pub const QUANTITY: &str = "quantity";

/// Columns the reducers read; anything else in the file is ignored
pub const REQUIRED_COLUMNS: &[&str] = &[ORDER_DATE, PRODUCT_ID, CUSTOMER_ID, PRODUCT_PRICE, QUANTITY];

// =============================================================================
// Derived Columns
// =============================================================================

pub const REVENUE: &str = "revenue";
pub const ORDER_YEAR: &str = "order_year";
pub const ORDER_MONTH: &str = "order_month";

// =============================================================================
// Defaults
// =============================================================================

pub const DEFAULT_INPUT_PATH: &str = "orders.csv";
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_DELIMITER: u8 = b',';

/// Cell values read as missing, in addition to empty cells
pub const MISSING_VALUE_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Field separators the CSV reader cannot use
pub const RESERVED_DELIMITERS: &[u8] = &[b'"', b'\n', b'\r'];
