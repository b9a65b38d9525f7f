use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use order_revenue::cli::Args;
use order_revenue::report;
use std::process;
use tracing::debug;

fn main() {
    let args = Args::parse();
    setup_logging(&args);

    // Data problems are reported in the output and still exit 0
    if let Err(error) = run(&args) {
        eprintln!("{} {:#}", "Error:".bright_red().bold(), error);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.to_config().context("Invalid command-line options")?;
    debug!("Generating report for {}", args.input.display());

    let outcome = report::generate(&args.input, &config);
    print!("{}", outcome);

    Ok(())
}

/// Set up structured logging on stderr so stdout carries only the report
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("order_revenue={}", args.log_level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", args.log_level());
}
