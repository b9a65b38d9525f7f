//! Core data structures for revenue reporting.
//!
//! Defines the loaded order table, the calendar month key used for
//! monthly grouping, and the keyed revenue aggregate every reducer returns.

use polars::prelude::{DataFrame, IntoLazy, LazyFrame};
use std::borrow::Borrow;
use std::fmt;

/// Orders loaded from the input file
///
/// The frame is never modified after loading. Reducers build their own
/// lazy plans over a clone, which shares the underlying buffers.
#[derive(Debug, Clone)]
pub struct OrderTable {
    frame: DataFrame,
}

impl OrderTable {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Number of order rows
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Lazy view over the orders for building an aggregation plan
    pub fn lazy(&self) -> LazyFrame {
        self.frame.clone().lazy()
    }
}

/// Calendar month an order falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthPeriod {
    pub year: i32,
    pub month: u32,
}

impl MonthPeriod {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Revenue summed per group key, in the order the reducer produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate<K> {
    entries: Vec<(K, f64)>,
}

impl<K> Aggregate<K> {
    pub fn new(entries: Vec<(K, f64)>) -> Self {
        Self { entries }
    }

    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[(K, f64)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.entries.iter().map(|(key, revenue)| (key, *revenue))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Sum of revenue across all groups
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, revenue)| revenue).sum()
    }

    /// Revenue recorded for `key`, if the group exists
    pub fn get<Q>(&self, key: &Q) -> Option<f64>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate.borrow() == key)
            .map(|(_, revenue)| *revenue)
    }
}

impl<K: Clone> Aggregate<K> {
    /// Highest-revenue groups first, at most `n` of them
    ///
    /// The sort is stable, so groups with equal revenue keep their
    /// current relative order.
    pub fn top(&self, n: usize) -> Self {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));
        entries.truncate(n);
        Self { entries }
    }
}

impl<K> Default for Aggregate<K> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Aggregate<String> {
        Aggregate::new(vec![
            ("C1".to_string(), 25.0),
            ("C2".to_string(), 10.0),
            ("C3".to_string(), 40.0),
            ("C4".to_string(), 10.0),
        ])
    }

    #[test]
    fn test_month_period_display_is_zero_padded() {
        assert_eq!(MonthPeriod::new(2024, 1).to_string(), "2024-01");
        assert_eq!(MonthPeriod::new(987, 12).to_string(), "0987-12");
    }

    #[test]
    fn test_month_period_orders_by_year_then_month() {
        assert!(MonthPeriod::new(2023, 12) < MonthPeriod::new(2024, 1));
        assert!(MonthPeriod::new(2024, 2) > MonthPeriod::new(2024, 1));
    }

    #[test]
    fn test_lookup_and_total() {
        let aggregate = sample();
        assert_eq!(aggregate.len(), 4);
        assert_eq!(aggregate.get("C3"), Some(40.0));
        assert_eq!(aggregate.get("C9"), None);
        assert_eq!(aggregate.total(), 85.0);
    }

    #[test]
    fn test_top_sorts_descending_and_keeps_tie_order() {
        let top = sample().top(3);
        let keys: Vec<&str> = top.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["C3", "C1", "C2"]);
    }

    #[test]
    fn test_top_with_more_slots_than_groups() {
        let top = sample().top(10);
        assert_eq!(top.len(), 4);
        assert!(Aggregate::<String>::empty().top(10).is_empty());
    }
}
