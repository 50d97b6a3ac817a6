/// Use cases module containing application business logic orchestration
mod build_dashboard;
mod track_vessels;

pub use build_dashboard::BuildDashboardUseCase;
pub use track_vessels::{
    apply_refresh, load_active_vessels, stop_signal, VesselSnapshot, VesselTracker,
    DASHBOARD_POLL_INTERVAL, VESSEL_DETAIL_POLL_INTERVAL,
};
