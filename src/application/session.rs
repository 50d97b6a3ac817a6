//! Explicit application state for one dashboard
//!
//! The session owns the normalized records, the user's selections and the
//! reference time, plus everything derived from them. Every setter
//! recomputes all derived views from scratch.

use crate::application::read_models::{
    DestinationLayer, HoverState, MapMode, MapView, TableState, TableView,
};
use crate::shared::Result;
use crate::shipment_tracking::domain::{ActiveVessel, FilterSelection, ShipmentRecord};
use crate::shipment_tracking::services::{
    AggregationEngine, CountryAggregation, DashboardCounts, DashboardStats,
    DestinationAggregation, FilterOptions, FilterPipeline, KpiCalculator, KpiMetrics,
    OriginAggregation, SeasonSummary,
};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
struct DerivedViews {
    filtered: Vec<ShipmentRecord>,
    options: FilterOptions,
    destinations: DestinationAggregation,
    countries: CountryAggregation,
    origins: OriginAggregation,
    seasons: SeasonSummary,
    counts: DashboardCounts,
    kpis: KpiMetrics,
    map: MapView,
    table: TableView,
}

impl DerivedViews {
    fn compute(
        records: &[ShipmentRecord],
        selection: &FilterSelection,
        now: DateTime<Utc>,
        vessels: &[ActiveVessel],
        hover: &HoverState,
        map_mode: MapMode,
        table_state: &TableState,
    ) -> Self {
        let filtered = FilterPipeline::apply(records, selection);
        let destinations = AggregationEngine::aggregate_destinations(&filtered, now);
        let countries = AggregationEngine::aggregate_countries(&filtered, now);
        let origins = AggregationEngine::origin_ports(&filtered);
        let layer = match map_mode {
            MapMode::Port => DestinationLayer::Ports(&destinations.destinations),
            MapMode::Country => DestinationLayer::Countries(&countries.countries),
        };
        let map = MapView::build(layer, &origins.ports, vessels, hover);
        let table = TableView::build(&filtered, table_state);

        Self {
            options: FilterPipeline::options(records, selection.season.as_deref()),
            seasons: AggregationEngine::season_buckets(records),
            counts: DashboardStats::compute(records),
            kpis: KpiCalculator::calculate(&filtered, now),
            filtered,
            destinations,
            countries,
            origins,
            map,
            table,
        }
    }
}

/// State of one open dashboard.
///
/// Counters and season buckets cover every loaded record; the map, the grid
/// and the KPIs cover the filtered subset.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    records: Vec<ShipmentRecord>,
    selection: FilterSelection,
    now: DateTime<Utc>,
    vessels: Vec<ActiveVessel>,
    hover: HoverState,
    map_mode: MapMode,
    table_state: TableState,
    derived: DerivedViews,
}

impl DashboardSession {
    /// Opens a session over `records`
    ///
    /// # Errors
    /// Returns a validation error if `selection` is invalid
    pub fn new(
        records: Vec<ShipmentRecord>,
        selection: FilterSelection,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        selection.validate()?;
        let vessels = Vec::new();
        let hover = HoverState::default();
        let map_mode = MapMode::default();
        let table_state = TableState::default();
        let derived = DerivedViews::compute(
            &records,
            &selection,
            now,
            &vessels,
            &hover,
            map_mode,
            &table_state,
        );

        Ok(Self {
            records,
            selection,
            now,
            vessels,
            hover,
            map_mode,
            table_state,
            derived,
        })
    }

    fn recompute(&mut self) {
        self.derived = DerivedViews::compute(
            &self.records,
            &self.selection,
            self.now,
            &self.vessels,
            &self.hover,
            self.map_mode,
            &self.table_state,
        );
    }

    pub fn set_records(&mut self, records: Vec<ShipmentRecord>) {
        self.records = records;
        self.recompute();
    }

    /// Replaces the filter selection; an invalid selection leaves the
    /// session untouched.
    pub fn set_selection(&mut self, selection: FilterSelection) -> Result<()> {
        selection.validate()?;
        self.selection = selection;
        self.recompute();
        Ok(())
    }

    pub fn set_now(&mut self, now: DateTime<Utc>) {
        self.now = now;
        self.recompute();
    }

    pub fn set_vessels(&mut self, vessels: Vec<ActiveVessel>) {
        self.vessels = vessels;
        self.recompute();
    }

    pub fn set_hover(&mut self, hover: HoverState) {
        self.hover = hover;
        self.recompute();
    }

    /// Switches the map between per-port and per-country destinations. The
    /// hover is kept; a destination hover only sticks if the name exists in
    /// the new mode.
    pub fn set_map_mode(&mut self, map_mode: MapMode) {
        self.map_mode = map_mode;
        self.recompute();
    }

    pub fn set_table_state(&mut self, table_state: TableState) {
        self.table_state = table_state;
        self.recompute();
    }

    pub fn records(&self) -> &[ShipmentRecord] {
        &self.records
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn vessels(&self) -> &[ActiveVessel] {
        &self.vessels
    }

    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    pub fn map_mode(&self) -> MapMode {
        self.map_mode
    }

    pub fn table_state(&self) -> &TableState {
        &self.table_state
    }

    pub fn filtered(&self) -> &[ShipmentRecord] {
        &self.derived.filtered
    }

    pub fn options(&self) -> &FilterOptions {
        &self.derived.options
    }

    pub fn destinations(&self) -> &DestinationAggregation {
        &self.derived.destinations
    }

    pub fn countries(&self) -> &CountryAggregation {
        &self.derived.countries
    }

    pub fn origins(&self) -> &OriginAggregation {
        &self.derived.origins
    }

    pub fn seasons(&self) -> &SeasonSummary {
        &self.derived.seasons
    }

    pub fn counts(&self) -> &DashboardCounts {
        &self.derived.counts
    }

    pub fn kpis(&self) -> &KpiMetrics {
        &self.derived.kpis
    }

    pub fn map(&self) -> &MapView {
        &self.derived.map
    }

    pub fn table(&self) -> &TableView {
        &self.derived.table
    }
}
