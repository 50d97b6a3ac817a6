//! Headless render model for the shipments grid
//!
//! Everything happens in memory over the already-filtered record set:
//! column visibility, sorting, per-column text filters, a global filter, the
//! date panel and the virtualized row window.

use crate::shipment_tracking::domain::{FilterSelection, ShipmentRecord, ShipmentStatus};
use crate::shipment_tracking::services::FilterPipeline;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Estimated row height in pixels.
pub const ROW_HEIGHT: f64 = 40.0;
/// Rows rendered above and below the viewport.
pub const OVERSCAN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Reference,
    Executive,
    IngressedAt,
    Shipper,
    Booking,
    Containers,
    Carrier,
    Vessel,
    OriginPort,
    DestinationPort,
    Etd,
    Eta,
    TransitDays,
    Status,
    Species,
    Temperature,
    Depot,
    Season,
}

/// Columns that cannot be hidden.
pub const ALWAYS_VISIBLE: [Column; 2] = [Column::Reference, Column::Booking];

enum SortValue<'a> {
    Text(String),
    Number(Option<f64>),
    Date(Option<DateTime<Utc>>),
    Borrowed(&'a str),
}

impl Column {
    pub const ALL: [Column; 18] = [
        Column::Reference,
        Column::Executive,
        Column::IngressedAt,
        Column::Shipper,
        Column::Booking,
        Column::Containers,
        Column::Carrier,
        Column::Vessel,
        Column::OriginPort,
        Column::DestinationPort,
        Column::Etd,
        Column::Eta,
        Column::TransitDays,
        Column::Status,
        Column::Species,
        Column::Temperature,
        Column::Depot,
        Column::Season,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Column::Reference => "reference",
            Column::Executive => "executive",
            Column::IngressedAt => "ingressed_at",
            Column::Shipper => "shipper",
            Column::Booking => "booking",
            Column::Containers => "containers",
            Column::Carrier => "carrier",
            Column::Vessel => "vessel",
            Column::OriginPort => "origin_port",
            Column::DestinationPort => "destination_port",
            Column::Etd => "etd",
            Column::Eta => "eta",
            Column::TransitDays => "transit_days",
            Column::Status => "status",
            Column::Species => "species",
            Column::Temperature => "temperature",
            Column::Depot => "depot",
            Column::Season => "season",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Column::Reference => "Ref",
            Column::Executive => "Executive",
            Column::IngressedAt => "Ingressed",
            Column::Shipper => "Shipper",
            Column::Booking => "Booking",
            Column::Containers => "Containers",
            Column::Carrier => "Carrier",
            Column::Vessel => "Vessel",
            Column::OriginPort => "POL",
            Column::DestinationPort => "POD",
            Column::Etd => "ETD",
            Column::Eta => "ETA",
            Column::TransitDays => "TT",
            Column::Status => "Status",
            Column::Species => "Species",
            Column::Temperature => "Temperature",
            Column::Depot => "Depot",
            Column::Season => "Season",
        }
    }

    pub fn is_always_visible(&self) -> bool {
        ALWAYS_VISIBLE.contains(self)
    }

    /// Display text of this column for one record.
    pub fn cell(&self, record: &ShipmentRecord) -> String {
        match self {
            Column::Reference => record.reference.clone(),
            Column::Executive => record.executive.clone(),
            Column::IngressedAt => format_date(record.ingressed_at),
            Column::Shipper => record.shipper.clone(),
            Column::Booking => record.booking.clone(),
            Column::Containers => record.containers.join(" "),
            Column::Carrier => record.carrier.clone(),
            Column::Vessel => match &record.voyage {
                Some(voyage) => format!("{} [{}]", record.vessel, voyage),
                None => record.vessel.clone(),
            },
            Column::OriginPort => record.origin_port.clone(),
            Column::DestinationPort => record.destination_port.clone(),
            Column::Etd => format_date(record.etd),
            Column::Eta => format_date(record.eta),
            Column::TransitDays => format_number(record.planned_transit_days),
            Column::Status => record.status.stored_label().to_string(),
            Column::Species => record.species.clone(),
            Column::Temperature => format_number(record.temperature),
            Column::Depot => record.depot.clone(),
            Column::Season => record.season.clone().unwrap_or_default(),
        }
    }

    fn sort_value<'a>(&self, record: &'a ShipmentRecord) -> SortValue<'a> {
        match self {
            Column::IngressedAt => SortValue::Date(record.ingressed_at),
            Column::Etd => SortValue::Date(record.etd),
            Column::Eta => SortValue::Date(record.eta),
            Column::TransitDays => SortValue::Number(record.planned_transit_days),
            Column::Temperature => SortValue::Number(record.temperature),
            Column::Containers => SortValue::Number(Some(record.container_count() as f64)),
            Column::Reference => SortValue::Borrowed(&record.reference),
            other => SortValue::Text(other.cell(record).to_lowercase()),
        }
    }

    /// Ascending comparison; absent dates and numbers sort after present ones.
    fn compare(&self, a: &ShipmentRecord, b: &ShipmentRecord) -> Ordering {
        match (self.sort_value(a), self.sort_value(b)) {
            (SortValue::Date(x), SortValue::Date(y)) => {
                compare_present_first(x, y, |x, y| x.cmp(y))
            }
            (SortValue::Number(x), SortValue::Number(y)) => {
                compare_present_first(x, y, |x, y| x.total_cmp(y))
            }
            (SortValue::Borrowed(x), SortValue::Borrowed(y)) => x.cmp(y),
            (SortValue::Text(x), SortValue::Text(y)) => x.cmp(&y),
            _ => Ordering::Equal,
        }
    }
}

impl std::str::FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Column::ALL
            .into_iter()
            .find(|c| c.id() == wanted)
            .ok_or_else(|| {
                let ids: Vec<&str> = Column::ALL.iter().map(|c| c.id()).collect();
                format!("Unknown column: {}. Valid columns: {}", s, ids.join(", "))
            })
    }
}

fn compare_present_first<T, F>(a: Option<T>, b: Option<T>, cmp: F) -> Ordering
where
    F: Fn(&T, &T) -> Ordering,
{
    match (a, b) {
        (Some(a), Some(b)) => cmp(&a, &b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn format_date(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn format_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub column: Column,
    pub descending: bool,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            column: Column::Reference,
            descending: true,
        }
    }
}

/// Month/week/year selections of the grid's date panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatePanel {
    pub month_ingress: Option<u32>,
    pub month_etd: Option<u32>,
    pub month_eta: Option<u32>,
    pub week_ingress: Option<u32>,
    pub week_etd: Option<u32>,
    pub week_eta: Option<u32>,
    pub year: Option<i32>,
}

impl DatePanel {
    pub fn active_count(&self) -> usize {
        [
            self.month_ingress,
            self.month_etd,
            self.month_eta,
            self.week_ingress,
            self.week_etd,
            self.week_eta,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count()
            + usize::from(self.year.is_some())
    }

    fn as_selection(&self) -> FilterSelection {
        FilterSelection {
            month_ingress: self.month_ingress,
            month_etd: self.month_etd,
            month_eta: self.month_eta,
            week_ingress: self.week_ingress,
            week_etd: self.week_etd,
            week_eta: self.week_eta,
            year: self.year,
            ..FilterSelection::default()
        }
    }
}

/// User-controlled grid state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    hidden: BTreeSet<Column>,
    column_filters: BTreeMap<Column, String>,
    pub sort: Option<SortSpec>,
    pub global_filter: Option<String>,
    pub date_panel: DatePanel,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            hidden: BTreeSet::new(),
            column_filters: BTreeMap::new(),
            sort: Some(SortSpec::default()),
            global_filter: None,
            date_panel: DatePanel::default(),
        }
    }
}

impl TableState {
    /// Shows or hides a column. Returns false, leaving the state unchanged,
    /// for columns that are always visible.
    pub fn set_visible(&mut self, column: Column, visible: bool) -> bool {
        if column.is_always_visible() {
            return false;
        }
        if visible {
            self.hidden.remove(&column);
        } else {
            self.hidden.insert(column);
        }
        true
    }

    pub fn toggle_column(&mut self, column: Column) -> bool {
        let visible = self.hidden.contains(&column);
        self.set_visible(column, visible)
    }

    pub fn visible_columns(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|c| !self.hidden.contains(c))
            .collect()
    }

    /// Sets a case-insensitive "contains" filter on a column; a blank value
    /// clears it.
    pub fn set_column_filter(&mut self, column: Column, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.column_filters.remove(&column);
        } else {
            self.column_filters.insert(column, value.to_lowercase());
        }
    }

    pub fn clear_filters(&mut self) {
        self.column_filters.clear();
        self.global_filter = None;
        self.date_panel = DatePanel::default();
    }

    pub fn active_filter_count(&self) -> usize {
        self.column_filters.len() + self.date_panel.active_count()
    }

    fn accepts(&self, record: &ShipmentRecord, date_selection: &FilterSelection) -> bool {
        let columns_pass = self
            .column_filters
            .iter()
            .all(|(column, needle)| column.cell(record).to_lowercase().contains(needle));
        if !columns_pass {
            return false;
        }

        if let Some(needle) = self
            .global_filter
            .as_deref()
            .map(|g| g.trim().to_lowercase())
            .filter(|g| !g.is_empty())
        {
            let hit = self
                .visible_columns()
                .iter()
                .any(|c| c.cell(record).to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        FilterPipeline::matches(record, date_selection)
    }
}

/// Row highlight, by booking status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowTone {
    Cancelled,
    Pending,
    Normal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnHeader {
    pub id: &'static str,
    pub label: &'static str,
    pub hideable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub reference: String,
    pub tone: RowTone,
    /// One entry per visible column, in header order
    pub cells: Vec<String>,
}

/// Slice of rows to render for a scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VirtualWindow {
    pub start: usize,
    pub end: usize,
    pub offset_top: f64,
    pub total_height: f64,
}

impl VirtualWindow {
    pub fn compute(row_count: usize, scroll_top: f64, viewport_height: f64) -> Self {
        let total_height = row_count as f64 * ROW_HEIGHT;
        if row_count == 0 {
            return Self {
                start: 0,
                end: 0,
                offset_top: 0.0,
                total_height,
            };
        }

        let scroll_top = scroll_top.clamp(0.0, total_height);
        let first = ((scroll_top / ROW_HEIGHT).floor() as usize).min(row_count - 1);
        let last = (((scroll_top + viewport_height.max(0.0)) / ROW_HEIGHT).ceil() as usize)
            .clamp(first + 1, row_count);

        let start = first.saturating_sub(OVERSCAN);
        let end = (last + OVERSCAN).min(row_count);
        Self {
            start,
            end,
            offset_top: start as f64 * ROW_HEIGHT,
            total_height,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableView {
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<TableRow>,
    /// Rows before the grid's own filters
    pub source_rows: usize,
    pub active_filters: usize,
}

impl TableView {
    pub fn build(records: &[ShipmentRecord], state: &TableState) -> Self {
        let columns = state.visible_columns();
        let date_selection = state.date_panel.as_selection();

        let mut kept: Vec<&ShipmentRecord> = records
            .iter()
            .filter(|r| state.accepts(r, &date_selection))
            .collect();

        if let Some(sort) = state.sort {
            kept.sort_by(|a, b| {
                let ordering = sort.column.compare(a, b);
                if sort.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }

        let rows = kept
            .into_iter()
            .map(|record| TableRow {
                reference: record.reference.clone(),
                tone: match record.status {
                    ShipmentStatus::Cancelled => RowTone::Cancelled,
                    ShipmentStatus::Pending => RowTone::Pending,
                    ShipmentStatus::Confirmed => RowTone::Normal,
                },
                cells: columns.iter().map(|c| c.cell(record)).collect(),
            })
            .collect();

        TableView {
            columns: columns
                .iter()
                .map(|c| ColumnHeader {
                    id: c.id(),
                    label: c.label(),
                    hideable: !c.is_always_visible(),
                })
                .collect(),
            rows,
            source_rows: records.len(),
            active_filters: state.active_filter_count(),
        }
    }

    /// Rows to render for a viewport, with the window that produced them.
    pub fn window(&self, scroll_top: f64, viewport_height: f64) -> (VirtualWindow, &[TableRow]) {
        let window = VirtualWindow::compute(self.rows.len(), scroll_top, viewport_height);
        (window, &self.rows[window.start..window.end])
    }
}
