use crate::shipment_tracking::domain::FilterSelection;
use chrono::{DateTime, Utc};

/// DashboardRequest - Internal request DTO for the build-dashboard use case
#[derive(Debug, Clone)]
pub struct DashboardRequest {
    /// Filters applied to the record set before aggregation
    pub selection: FilterSelection,
    /// Whether to look up AIS positions for vessels with open bookings
    pub include_vessels: bool,
    /// Reference time for ETD/ETA classification and open-booking detection
    pub now: DateTime<Utc>,
}

impl DashboardRequest {
    pub fn new(selection: FilterSelection, include_vessels: bool, now: DateTime<Utc>) -> Self {
        Self {
            selection,
            include_vessels,
            now,
        }
    }
}
