//! Report assembly and text rendering.
//!
//! [`generate`] runs the whole pipeline for one input file: load, compute
//! the four aggregates, and hand back a [`ReportOutcome`]. Rendering is a
//! pure `Display` over already computed results, so nothing here prints.

use crate::aggregator::RevenueAggregator;
use crate::config::ReportConfig;
use crate::error::{Result, RevenueError};
use crate::loader::load_orders;
use crate::models::{Aggregate, MonthPeriod};
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

pub const NO_DATA_MESSAGE: &str = "No data available to process.";

/// Gap between the key column and the revenue column
const COLUMN_GAP: &str = "    ";

/// The four aggregates for one order table
#[derive(Debug)]
pub struct RevenueReport {
    pub monthly: Result<Aggregate<MonthPeriod>>,
    pub products: Result<Aggregate<String>>,
    pub customers: Result<Aggregate<String>>,
    pub top_customers: Result<Aggregate<String>>,
    top_n: usize,
}

impl RevenueReport {
    /// Run every reducer and keep each result, failed or not
    pub fn build(aggregator: &RevenueAggregator<'_>) -> Self {
        let report = Self {
            monthly: aggregator.monthly_revenue(),
            products: aggregator.product_revenue(),
            customers: aggregator.customer_revenue(),
            top_customers: aggregator.top_customers(),
            top_n: aggregator.config().top_n,
        };

        for error in report.failures() {
            warn!("{}", error);
        }

        report
    }

    /// Errors from any reducer that failed
    pub fn failures(&self) -> Vec<&RevenueError> {
        [
            self.monthly.as_ref().err(),
            self.products.as_ref().err(),
            self.customers.as_ref().err(),
            self.top_customers.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RevenueReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_section(
            f,
            "Monthly Revenue:",
            "monthly revenue",
            "No data available to calculate monthly revenue.",
            &self.monthly,
        )?;
        writeln!(f)?;
        write_section(
            f,
            "Product Revenue:",
            "product revenue",
            "No data available to calculate product revenue.",
            &self.products,
        )?;
        writeln!(f)?;
        write_section(
            f,
            "Customer Revenue:",
            "customer revenue",
            "No data available to calculate customer revenue.",
            &self.customers,
        )?;
        writeln!(f)?;
        write_section(
            f,
            &format!("Top {} Customers by Revenue:", self.top_n),
            "top customers",
            "No data available to identify top customers.",
            &self.top_customers,
        )
    }
}

fn write_section<K: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    name: &str,
    placeholder: &str,
    result: &Result<Aggregate<K>>,
) -> fmt::Result {
    writeln!(f, "{}", title)?;
    match result {
        Ok(aggregate) if !aggregate.is_empty() => write_listing(f, aggregate),
        Ok(_) => writeln!(f, "{}", placeholder),
        Err(error) => {
            writeln!(f, "An error occurred while computing {}: {}", name, cause(error))?;
            writeln!(f, "{}", placeholder)
        }
    }
}

/// Keys left-aligned, revenue right-aligned with two decimals
fn write_listing<K: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    aggregate: &Aggregate<K>,
) -> fmt::Result {
    let rows: Vec<(String, String)> = aggregate
        .iter()
        .map(|(key, revenue)| (key.to_string(), format!("{:.2}", revenue)))
        .collect();
    let key_width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

    for (key, value) in &rows {
        writeln!(
            f,
            "{:<key_width$}{}{:>value_width$}",
            key,
            COLUMN_GAP,
            value,
            key_width = key_width,
            value_width = value_width
        )?;
    }
    Ok(())
}

/// Underlying reason for a reducer failure, without the wrapper text
fn cause(error: &RevenueError) -> String {
    match error {
        RevenueError::Aggregation { source, .. } => source.to_string(),
        other => other.to_string(),
    }
}

/// Result of running the report pipeline over one file
#[derive(Debug)]
pub enum ReportOutcome {
    /// Nothing to aggregate; carries the load failure if there was one
    NoData(Option<RevenueError>),
    Complete(RevenueReport),
}

/// Load `file_path` and compute every aggregate
///
/// Load failures and empty tables never reach the reducers.
pub fn generate(file_path: &Path, config: &ReportConfig) -> ReportOutcome {
    let table = match load_orders(file_path, config) {
        Ok(table) => table,
        Err(error) => {
            warn!("Could not load {}: {}", file_path.display(), error);
            return ReportOutcome::NoData(Some(error));
        }
    };

    if table.is_empty() {
        info!("{} contains no orders", file_path.display());
        return ReportOutcome::NoData(None);
    }

    let aggregator = RevenueAggregator::new(&table, config);
    ReportOutcome::Complete(RevenueReport::build(&aggregator))
}

impl fmt::Display for ReportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportOutcome::NoData(Some(error)) => {
                writeln!(f, "{}", error)?;
                writeln!(f, "{}", NO_DATA_MESSAGE)
            }
            ReportOutcome::NoData(None) => writeln!(f, "{}", NO_DATA_MESSAGE),
            ReportOutcome::Complete(report) => write!(f, "{}", report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::error::{ErrString, PolarsError};

    fn report_with(
        monthly: Result<Aggregate<MonthPeriod>>,
        customers: Result<Aggregate<String>>,
    ) -> RevenueReport {
        let top_customers = match &customers {
            Ok(aggregate) => Ok(aggregate.top(10)),
            Err(_) => Err(RevenueError::aggregation(
                "customer revenue",
                PolarsError::ColumnNotFound(ErrString::from("quantity")),
            )),
        };
        RevenueReport {
            monthly,
            products: Ok(Aggregate::new(vec![
                ("P1".to_string(), 30.0),
                ("P2".to_string(), 5.0),
            ])),
            customers,
            top_customers,
            top_n: 10,
        }
    }

    #[test]
    fn test_render_listing_layout() {
        let report = report_with(
            Ok(Aggregate::new(vec![
                (MonthPeriod::new(2024, 1), 25.0),
                (MonthPeriod::new(2024, 2), 10.0),
            ])),
            Ok(Aggregate::new(vec![
                ("C1".to_string(), 25.0),
                ("C2".to_string(), 10.0),
            ])),
        );

        let expected = "\
Monthly Revenue:
2024-01    25.00
2024-02    10.00

Product Revenue:
P1    30.00
P2     5.00

Customer Revenue:
C1    25.00
C2    10.00

Top 10 Customers by Revenue:
C1    25.00
C2    10.00
";
        assert_eq!(report.render(), expected);
        assert!(report.failures().is_empty());
    }

    #[test]
    fn test_render_placeholder_for_empty_aggregate() {
        let report = report_with(
            Ok(Aggregate::empty()),
            Ok(Aggregate::new(vec![("C1".to_string(), 1.0)])),
        );

        let rendered = report.render();

        assert!(rendered.starts_with(
            "Monthly Revenue:\nNo data available to calculate monthly revenue.\n\nProduct Revenue:\n"
        ));
    }

    #[test]
    fn test_render_failed_aggregate() {
        let report = report_with(
            Ok(Aggregate::new(vec![(MonthPeriod::new(2024, 1), 1.0)])),
            Err(RevenueError::aggregation(
                "customer revenue",
                PolarsError::ColumnNotFound(ErrString::from("quantity")),
            )),
        );

        let rendered = report.render();

        assert!(rendered.contains(
            "Customer Revenue:\nAn error occurred while computing customer revenue: "
        ));
        assert!(rendered.contains("No data available to calculate customer revenue.\n"));
        assert!(rendered.contains("No data available to identify top customers.\n"));
        assert_eq!(report.failures().len(), 2);
    }

    #[test]
    fn test_no_data_outcome_rendering() {
        let outcome = ReportOutcome::NoData(None);
        assert_eq!(outcome.to_string(), "No data available to process.\n");

        let outcome = ReportOutcome::NoData(Some(RevenueError::FileNotFound {
            path: "orders.csv".into(),
        }));
        let rendered = outcome.to_string();
        assert!(rendered.starts_with("File not found: orders.csv"));
        assert!(rendered.ends_with("No data available to process.\n"));
    }
}
