//! Read models for CQRS-lite pattern
//!
//! View-optimized structs derived from the domain: the map layers, the
//! shipments grid and the report handed to formatters.

pub mod dashboard_report;
pub mod dashboard_report_builder;
pub mod map_view;
pub mod table_view;

pub use dashboard_report::{CountryView, DashboardReport, DestinationView, ExclusionSummary};
pub use dashboard_report_builder::DashboardReportBuilder;
pub use map_view::{DestinationLayer, HoverState, HoverTarget, MapMode, MapView, Tooltip};
pub use table_view::{Column, SortSpec, TableState, TableView, VirtualWindow};
