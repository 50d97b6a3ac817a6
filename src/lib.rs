//! shipment-atlas - shipment aggregation and vessel tracking for
//! freight-forwarding dashboards
//!
//! This library turns booking records into what a logistics dashboard
//! shows: destination and origin ports on a map, status counters, management
//! indicators, a filterable shipments table and the vessels currently at sea.
//! It follows hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`shipment_tracking`): Records, port lookups and pure services
//! - **Application Layer** (`application`): Use cases, read models and the dashboard session
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use shipment_atlas::prelude::*;
//! use chrono::Utc;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<()> {
//! // Create adapters
//! let shipments = JsonSnapshotReader::new(PathBuf::from("records.json"));
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = BuildDashboardUseCase::new(
//!     shipments,
//!     None::<JsonPositionsFile>,
//!     progress_reporter,
//! );
//!
//! // Execute
//! let request = DashboardRequest::new(FilterSelection::default(), false, Utc::now());
//! let response = use_case.execute(request).await?;
//!
//! // Format output
//! let report = DashboardReportBuilder::build(&response.session, &response.load_summary);
//! let output = MarkdownFormatter::new().format(&report)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod ports;
pub mod shared;
pub mod shipment_tracking;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, JsonPositionsFile, JsonSnapshotReader, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::adapters::outbound::network::{BackendClient, CachingPositionRepository};
    pub use crate::application::dto::{
        DashboardRequest, DashboardResponse, LoadSummary, OutputFormat,
    };
    pub use crate::application::read_models::{DashboardReport, DashboardReportBuilder};
    pub use crate::application::session::DashboardSession;
    pub use crate::application::use_cases::{BuildDashboardUseCase, VesselTracker};
    pub use crate::ports::outbound::{
        DashboardFormatter, OutputPresenter, ProgressReporter, ShipmentRepository,
        VesselPositionRepository,
    };
    pub use crate::shipment_tracking::domain::{
        ActiveVessel, FilterSelection, RawShipmentRecord, ShipmentRecord, ShipmentStatus,
        VesselPosition,
    };
    pub use crate::shared::Result;
}
