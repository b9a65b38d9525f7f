//! Command-line interface components.

use crate::config::ReportConfig;
use crate::constants::{DEFAULT_DATE_FORMAT, DEFAULT_INPUT_PATH, DEFAULT_TOP_N};
use crate::error::{Result, RevenueError};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "order_revenue")]
#[command(about = "Compute monthly, product and customer revenue from an orders CSV file")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the orders CSV file
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    /// Number of customers listed in the top customers section
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,

    /// strftime pattern for the order_date column
    #[arg(long, default_value = DEFAULT_DATE_FORMAT)]
    pub date_format: String,

    /// Field delimiter of the input file
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Build a validated report configuration from the arguments
    pub fn to_config(&self) -> Result<ReportConfig> {
        if !self.delimiter.is_ascii() {
            return Err(RevenueError::configuration(format!(
                "delimiter '{}' is not a single-byte character",
                self.delimiter
            )));
        }

        let config = ReportConfig::default()
            .with_top_n(self.top)
            .with_date_format(self.date_format.clone())
            .with_delimiter(self.delimiter as u8);
        config.validate()?;

        Ok(config)
    }

    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["order_revenue"]).unwrap();

        assert_eq!(args.input, Path::new("orders.csv"));
        assert_eq!(args.log_level(), "warn");
        assert_eq!(args.to_config().unwrap(), ReportConfig::default());
    }

    #[test]
    fn test_all_options() {
        let args = Args::try_parse_from([
            "order_revenue",
            "data/q1.csv",
            "--top",
            "5",
            "--date-format",
            "%d/%m/%Y",
            "--delimiter",
            ";",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.input, Path::new("data/q1.csv"));
        assert_eq!(args.log_level(), "debug");

        let config = args.to_config().unwrap();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.date_format, "%d/%m/%Y");
        assert_eq!(config.delimiter, b';');
    }

    #[test]
    fn test_invalid_options_rejected() {
        let args = Args::try_parse_from(["order_revenue", "--top", "0"]).unwrap();
        assert!(args.to_config().is_err());

        let args = Args::try_parse_from(["order_revenue", "--delimiter", "é"]).unwrap();
        assert!(args.to_config().is_err());

        assert!(Args::try_parse_from(["order_revenue", "--top", "many"]).is_err());
    }
}
