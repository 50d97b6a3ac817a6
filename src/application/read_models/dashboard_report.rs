//! Query-side view of one dashboard computation
//!
//! This is what formatters render. It is a denormalized snapshot: every
//! field is already computed, nothing refers back to the session.

use super::map_view::Rgba;
use super::table_view::TableView;
use crate::shipment_tracking::domain::{
    ActiveVessel, CoordinateSource, FilterSelection, FulfillmentState, OriginPortStats, PortCounts,
};
use crate::shipment_tracking::services::{
    DashboardCounts, FilterOptions, KpiMetrics, SeasonSummary, UnlocatedPort,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub selection: FilterSelection,
    pub counts: DashboardCounts,
    pub kpis: KpiMetrics,
    pub seasons: SeasonSummary,
    pub options: FilterOptions,
    pub destinations: Vec<DestinationView>,
    pub countries: Vec<CountryView>,
    pub origins: Vec<OriginPortStats>,
    pub vessels: Vec<ActiveVessel>,
    pub excluded: ExclusionSummary,
    /// Shipments grid; rendered by the Markdown formatter only
    #[serde(skip)]
    pub table: TableView,
}

/// One destination marker as reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DestinationView {
    pub port: String,
    pub country: Option<String>,
    pub coordinates: [f64; 2],
    pub coordinate_source: CoordinateSource,
    pub state: FulfillmentState,
    pub fill: Rgba,
    pub radius: f64,
    pub counts: PortCounts,
}

/// One destination country as reported, with its per-port breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryView {
    pub country: String,
    pub coordinates: [f64; 2],
    pub state: FulfillmentState,
    pub fill: Rgba,
    pub radius: f64,
    pub counts: PortCounts,
    pub ports: BTreeMap<String, PortCounts>,
}

/// Records that did not reach some part of the report, and why.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExclusionSummary {
    /// Soft-deleted rows dropped at load time
    pub deleted: usize,
    /// Rows without a reference dropped at load time
    pub missing_reference: usize,
    /// Rows failing the current filter selection
    pub filtered_out: usize,
    /// Filtered rows left off the destination layer for lack of a port
    pub missing_destination_port: usize,
    pub unlocated_destinations: Vec<UnlocatedPort>,
    pub unlocated_origins: Vec<UnlocatedPort>,
    /// Distinct raw status values counted as pending
    pub unrecognized_statuses: Vec<String>,
}
