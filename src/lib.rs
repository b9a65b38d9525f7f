//! Order Revenue Library
//!
//! Computes revenue aggregates from a CSV file of order records.
//!
//! This library provides tools for:
//! - Loading order files into an in-memory polars table
//! - Summing `product_price * quantity` per calendar month, product and customer
//! - Ranking the highest-revenue customers
//! - Rendering the aggregates as a plain-text report

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod constants;
pub mod dates;
pub mod error;
pub mod loader;
pub mod models;
pub mod report;

pub use aggregator::RevenueAggregator;
pub use config::ReportConfig;
pub use error::{Result, RevenueError};
pub use models::{Aggregate, MonthPeriod, OrderTable};
pub use report::{ReportOutcome, RevenueReport};
