use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod category;
mod dashboard;
mod error;
mod filter;
mod loader;
mod models;
mod ranking;
mod report;
mod rfm;
#[cfg(test)]
mod testutil;

use dashboard::Dashboard;
use filter::DateWindow;
use models::OrderRecord;

#[derive(Parser)]
#[command(name = "order-analytics")]
#[command(about = "RFM and product category analytics over e-commerce orders", long_about = None)]
struct Cli {
    /// Merged order-line CSV
    #[arg(long, env = "ORDERS_CSV", default_value = "all_df.csv", global = true)]
    csv: PathBuf,
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct WindowArgs {
    /// First purchase date to include (YYYY-MM-DD), defaults to the earliest order
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Last purchase date to include (YYYY-MM-DD), defaults to the latest order
    #[arg(long)]
    end: Option<NaiveDate>,
    /// Rows per top/bottom ranking
    #[arg(long, default_value_t = 5)]
    limit: usize,
}

impl WindowArgs {
    fn build(&self, records: &[OrderRecord]) -> anyhow::Result<Dashboard> {
        let window = DateWindow::resolve(self.start, self.end, filter::dataset_bounds(records))?;
        let view = Dashboard::build(records, window, self.limit)?;
        Ok(view)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the purchase date range covered by the dataset
    Range,
    /// Print headline figures for a date window
    Summary {
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Generate a markdown dashboard report
    Report {
        #[command(flatten)]
        window: WindowArgs,
        #[arg(long, default_value = "dashboard.md")]
        out: PathBuf,
    },
    /// Export the full dashboard view as JSON
    Export {
        #[command(flatten)]
        window: WindowArgs,
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let records = loader::load_csv(&cli.csv)
        .with_context(|| format!("failed to load orders from {}", cli.csv.display()))?;

    match cli.command {
        Commands::Range => match filter::dataset_bounds(&records) {
            Some(bounds) => println!(
                "{} order lines from {} to {}.",
                records.len(),
                bounds.start,
                bounds.end
            ),
            None => println!("No orders found in {}.", cli.csv.display()),
        },
        Commands::Summary { window } => {
            let view = window.build(&records)?;
            if view.is_empty() {
                println!(
                    "No orders found between {} and {}.",
                    view.window.start, view.window.end
                );
                return Ok(());
            }
            print!("{}", report::build_summary(&view));
        }
        Commands::Report { window, out } => {
            let view = window.build(&records)?;
            std::fs::write(&out, report::build_report(&view))
                .with_context(|| format!("failed to write {}", out.display()))?;
            info!(path = %out.display(), "report written");
            println!("Report written to {}.", out.display());
        }
        Commands::Export { window, out } => {
            let view = window.build(&records)?;
            let json = report::build_json(&view)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Dashboard exported to {}.", path.display());
                }
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}
