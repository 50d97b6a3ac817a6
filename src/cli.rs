use clap::Parser;
use std::path::PathBuf;

use crate::application::dto::OutputFormat;
use crate::application::read_models::{Column, SortSpec};
use crate::shipment_tracking::domain::ShipmentStatus;
use chrono::NaiveDate;

/// Build shipment dashboards from a backend or a JSON snapshot
#[derive(Parser, Debug)]
#[command(name = "shipment-atlas")]
#[command(version)]
#[command(
    about = "Aggregate shipment bookings by port, compute dashboard indicators and track vessels at sea",
    long_about = None
)]
pub struct Args {
    /// JSON snapshot of shipment records (array, or object with a "records" array)
    #[arg(short, long, value_name = "FILE", conflicts_with = "backend_url")]
    pub input: Option<PathBuf>,

    /// Base URL of the shipment backend REST API
    #[arg(long, value_name = "URL")]
    pub backend_url: Option<String>,

    /// JSON file with vessel positions (array, or object with "positions" and "history")
    #[arg(long, value_name = "FILE")]
    pub positions: Option<PathBuf>,

    /// Output format: json or markdown
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Only records of this season (e.g. "2024-2025")
    #[arg(long)]
    pub season: Option<String>,

    /// Only records of these clients. Can be specified multiple times
    #[arg(long = "client", value_name = "NAME")]
    pub clients: Vec<String>,

    #[arg(long)]
    pub executive: Option<String>,

    /// pending, confirmed or cancelled
    #[arg(long)]
    pub status: Option<ShipmentStatus>,

    #[arg(long)]
    pub carrier: Option<String>,

    #[arg(long)]
    pub species: Option<String>,

    /// Earliest ETD date, inclusive (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub etd_from: Option<NaiveDate>,

    /// Latest ETD date, inclusive (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub etd_to: Option<NaiveDate>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month_ingress: Option<u32>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month_etd: Option<u32>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month_eta: Option<u32>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=53))]
    pub week_ingress: Option<u32>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=53))]
    pub week_etd: Option<u32>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=53))]
    pub week_eta: Option<u32>,

    /// Records with an ingress, ETD or ETA in this year
    #[arg(long)]
    pub year: Option<i32>,

    /// Sort the shipments table: <column>[:asc|:desc]
    #[arg(long, value_name = "COLUMN[:asc|:desc]", value_parser = parse_sort)]
    pub sort: Option<SortSpec>,

    /// Hide a column of the shipments table. Can be specified multiple times
    #[arg(long = "hide", value_name = "COLUMN")]
    pub hidden_columns: Vec<Column>,

    /// Keep polling vessel positions and re-render until Ctrl-C
    #[arg(long)]
    pub watch: bool,

    /// Follow a single vessel on the detail polling interval (implies --watch)
    #[arg(long, value_name = "NAME")]
    pub vessel: Option<String>,

    /// Path to config file (default: auto-discover shipment-atlas.config.yml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Polling requested, either for the whole dashboard or one vessel.
    pub fn watching(&self) -> bool {
        self.watch || self.vessel.is_some()
    }
}

/// Parses `<column>[:asc|:desc]`; a bare column sorts ascending.
fn parse_sort(value: &str) -> Result<SortSpec, String> {
    let (column, direction) = match value.rsplit_once(':') {
        Some((column, direction)) => (column, Some(direction)),
        None => (value, None),
    };
    let column: Column = column.parse()?;
    let descending = match direction.map(|d| d.trim().to_lowercase()) {
        None => false,
        Some(d) if d == "asc" => false,
        Some(d) if d == "desc" => true,
        Some(d) => {
            return Err(format!(
                "Invalid sort direction: {}. Please specify 'asc' or 'desc'",
                d
            ))
        }
    };
    Ok(SortSpec { column, descending })
}
