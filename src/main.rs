mod commands;
mod records;
mod render;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use parlamento_core::CalendarMonth;
use parlamento_core::config::SiteConfig;

#[derive(Parser)]
#[command(name = "parlamento")]
#[command(about = "Preview the El Parlamento events calendar and section reveals")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month grid, highlighting days with events
    Grid {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// JSON file with the events API payload
        #[arg(short, long)]
        records: Option<PathBuf>,

        /// Print the grid cells as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Select a day and list its events
    Day {
        /// Day to select (YYYY-MM-DD)
        date: String,

        /// JSON file with the events API payload
        #[arg(short, long)]
        records: PathBuf,

        /// Refuse days in the past, as the booking form does
        #[arg(long)]
        booking: bool,

        /// Print the selection as JSON
        #[arg(long)]
        json: bool,
    },
    /// Simulate scrolling a section into view and play its reveal
    Reveal {
        /// Number of elements in the section
        #[arg(short, long, default_value_t = 3)]
        targets: usize,

        /// Delay added per element (e.g. "150ms"), defaults to config
        #[arg(short, long, value_parser = humantime::parse_duration)]
        step: Option<Duration>,

        /// Visible fraction needed to reveal, defaults to config
        #[arg(long)]
        threshold: Option<f64>,

        /// Also print interpolated frames every this often (e.g. "100ms")
        #[arg(long, value_parser = humantime::parse_duration)]
        frames: Option<Duration>,
    },
    /// Show the configuration file location and effective settings
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = SiteConfig::load()?;

    match cli.command {
        Commands::Grid {
            month,
            records,
            json,
        } => {
            let month = resolve_month(month.as_deref())?;
            commands::grid::run(&config, month, records.as_deref(), json)
        }
        Commands::Day {
            date,
            records,
            booking,
            json,
        } => commands::day::run(&config, &date, &records, booking, json),
        Commands::Reveal {
            targets,
            step,
            threshold,
            frames,
        } => commands::reveal::run(&config, targets, step, threshold, frames).await,
        Commands::Config => commands::config::run(&config),
    }
}

fn resolve_month(month: Option<&str>) -> Result<CalendarMonth> {
    match month {
        Some(raw) => CalendarMonth::parse(raw)
            .ok_or_else(|| anyhow::anyhow!("Invalid month '{}'. Expected YYYY-MM", raw)),
        None => Ok(CalendarMonth::of(parlamento_core::CalendarDate::today())),
    }
}
