use crate::application::session::DashboardSession;
use crate::shipment_tracking::services::VesselGroup;

/// Records dropped before the dashboard was computed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub fetched: usize,
    pub deleted: usize,
    pub missing_reference: usize,
    pub unknown_statuses: Vec<String>,
}

/// DashboardResponse - Internal response DTO from the build-dashboard use case
///
/// Carries the live session so callers can keep interacting with it (change
/// filters, hover markers, refresh vessels) without refetching records.
#[derive(Debug, Clone)]
pub struct DashboardResponse {
    pub session: DashboardSession,
    pub load_summary: LoadSummary,
    /// Vessels with open bookings, used to seed the vessel tracker
    pub vessel_groups: Vec<VesselGroup>,
}

impl DashboardResponse {
    pub fn new(
        session: DashboardSession,
        load_summary: LoadSummary,
        vessel_groups: Vec<VesselGroup>,
    ) -> Self {
        Self {
            session,
            load_summary,
            vessel_groups,
        }
    }
}
