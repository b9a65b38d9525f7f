//! Revenue reducers over the loaded order table.
//!
//! Each reducer builds its own lazy plan from the shared [`OrderTable`]
//! and sums `product_price * quantity` per group. None of them writes back
//! to the table, so they can run in any order with identical results.

use crate::config::ReportConfig;
use crate::constants::{
    CUSTOMER_ID, ORDER_DATE, ORDER_MONTH, ORDER_YEAR, PRODUCT_ID, PRODUCT_PRICE, QUANTITY, REVENUE,
};
use crate::dates::order_month;
use crate::error::{Result, RevenueError};
use crate::models::{Aggregate, MonthPeriod, OrderTable};
use polars::prelude::*;
use tracing::debug;

/// Computes the revenue aggregates for one order table
pub struct RevenueAggregator<'a> {
    table: &'a OrderTable,
    config: &'a ReportConfig,
}

impl<'a> RevenueAggregator<'a> {
    pub fn new(table: &'a OrderTable, config: &'a ReportConfig) -> Self {
        Self { table, config }
    }

    pub fn config(&self) -> &ReportConfig {
        self.config
    }

    /// Revenue per calendar month, ascending
    ///
    /// Orders whose date does not parse with the configured format are
    /// left out of this aggregate only.
    pub fn monthly_revenue(&self) -> Result<Aggregate<MonthPeriod>> {
        let aggregate = "monthly revenue";
        let frame = self
            .with_order_months()
            .and_then(|frame| {
                frame
                    .lazy()
                    .filter(col(ORDER_YEAR).is_not_null())
                    .group_by([col(ORDER_YEAR), col(ORDER_MONTH)])
                    .agg([revenue_sum()])
                    .sort([ORDER_YEAR, ORDER_MONTH], SortMultipleOptions::default())
                    .collect()
            })
            .map_err(|e| RevenueError::aggregation(aggregate, e))?;

        let entries =
            month_entries(&frame).map_err(|e| RevenueError::aggregation(aggregate, e))?;
        debug!("Computed {} over {} months", aggregate, entries.len());

        Ok(Aggregate::new(entries))
    }

    /// Revenue per product, ascending by product id
    pub fn product_revenue(&self) -> Result<Aggregate<String>> {
        self.revenue_by(PRODUCT_ID, "product revenue")
    }

    /// Revenue per customer, ascending by customer id
    pub fn customer_revenue(&self) -> Result<Aggregate<String>> {
        self.revenue_by(CUSTOMER_ID, "customer revenue")
    }

    /// Highest-revenue customers, at most `top_n` of them
    ///
    /// Customers with equal revenue stay in ascending customer id order.
    pub fn top_customers(&self) -> Result<Aggregate<String>> {
        let customers = self.customer_revenue()?;
        let top = customers.top(self.config.top_n);
        debug!(
            "Selected {} of {} customers by revenue",
            top.len(),
            customers.len()
        );
        Ok(top)
    }

    /// Group by `key`, sum revenue, sort by key in its loaded dtype
    fn revenue_by(&self, key: &str, aggregate: &'static str) -> Result<Aggregate<String>> {
        let frame = self
            .table
            .lazy()
            .filter(col(key).is_not_null())
            .group_by([col(key)])
            .agg([revenue_sum()])
            .sort([key], SortMultipleOptions::default())
            .select([col(key).cast(DataType::String), col(REVENUE)])
            .collect()
            .map_err(|e| RevenueError::aggregation(aggregate, e))?;

        let entries =
            keyed_entries(&frame, key).map_err(|e| RevenueError::aggregation(aggregate, e))?;
        debug!("Computed {} over {} groups", aggregate, entries.len());

        Ok(Aggregate::new(entries))
    }

    /// Copy of the orders with `order_year`/`order_month` derived from `order_date`
    ///
    /// Both are null where the date does not parse. The shared table is
    /// left untouched.
    fn with_order_months(&self) -> PolarsResult<DataFrame> {
        let raw_dates = self
            .table
            .frame()
            .column(ORDER_DATE)?
            .cast(&DataType::String)?;
        let months: Vec<Option<MonthPeriod>> = raw_dates
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|raw| raw.and_then(|raw| order_month(raw, &self.config.date_format)))
            .collect();

        let undated = months.iter().filter(|month| month.is_none()).count();
        if undated > 0 {
            debug!(
                "Excluding {} of {} orders with a missing or unparseable {} from monthly revenue",
                undated,
                months.len(),
                ORDER_DATE
            );
        }

        let years: Vec<Option<i32>> = months.iter().map(|m| m.map(|m| m.year)).collect();
        let month_numbers: Vec<Option<i32>> =
            months.iter().map(|m| m.map(|m| m.month as i32)).collect();

        let mut frame = self.table.frame().clone();
        frame.with_column(Series::new(ORDER_YEAR.into(), years))?;
        frame.with_column(Series::new(ORDER_MONTH.into(), month_numbers))?;
        Ok(frame)
    }
}

/// Sum of `product_price * quantity` for the current group
///
/// Strict casts make a non-numeric price or quantity fail the aggregation
/// instead of silently dropping the row.
fn revenue_sum() -> Expr {
    (col(PRODUCT_PRICE).strict_cast(DataType::Float64)
        * col(QUANTITY).strict_cast(DataType::Float64))
    .sum()
    .alias(REVENUE)
}

fn keyed_entries(frame: &DataFrame, key: &str) -> PolarsResult<Vec<(String, f64)>> {
    let keys = frame.column(key)?.as_materialized_series().str()?;
    let revenue = frame.column(REVENUE)?.as_materialized_series().f64()?;

    Ok(keys
        .into_iter()
        .zip(revenue.into_iter())
        .filter_map(|(key, revenue)| key.map(|key| (key.to_string(), revenue.unwrap_or(0.0))))
        .collect())
}

fn month_entries(frame: &DataFrame) -> PolarsResult<Vec<(MonthPeriod, f64)>> {
    let years = frame.column(ORDER_YEAR)?.as_materialized_series().i32()?;
    let months = frame.column(ORDER_MONTH)?.as_materialized_series().i32()?;
    let revenue = frame.column(REVENUE)?.as_materialized_series().f64()?;

    Ok(years
        .into_iter()
        .zip(months.into_iter())
        .zip(revenue.into_iter())
        .filter_map(|((year, month), revenue)| match (year, month) {
            (Some(year), Some(month)) => Some((
                MonthPeriod::new(year, month as u32),
                revenue.unwrap_or(0.0),
            )),
            _ => None,
        })
        .collect())
}

#[cfg(test)]
mod tests;
