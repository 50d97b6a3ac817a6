use super::track_vessels::load_active_vessels;
use crate::application::dto::{DashboardRequest, DashboardResponse, LoadSummary};
use crate::application::session::DashboardSession;
use crate::ports::outbound::{ProgressReporter, ShipmentRepository, VesselPositionRepository};
use crate::shared::Result;
use crate::shipment_tracking::services::{NormalizedBatch, RecordNormalizer, VesselAssembler};

/// BuildDashboardUseCase - loads shipments and computes the dashboard
///
/// Orchestrates the whole pipeline with generic dependency injection:
/// fetch raw rows, normalize them, open a [`DashboardSession`] over the
/// filtered set and, when a position source is configured, join open
/// bookings with live vessel positions.
///
/// # Type Parameters
/// * `SR` - ShipmentRepository implementation
/// * `VR` - VesselPositionRepository implementation (optional)
/// * `PR` - ProgressReporter implementation
pub struct BuildDashboardUseCase<SR, VR, PR> {
    shipment_repository: SR,
    position_repository: Option<VR>,
    progress_reporter: PR,
}

impl<SR, VR, PR> BuildDashboardUseCase<SR, VR, PR>
where
    SR: ShipmentRepository,
    VR: VesselPositionRepository,
    PR: ProgressReporter,
{
    /// Creates a new BuildDashboardUseCase with injected dependencies
    pub fn new(
        shipment_repository: SR,
        position_repository: Option<VR>,
        progress_reporter: PR,
    ) -> Self {
        Self {
            shipment_repository,
            position_repository,
            progress_reporter,
        }
    }

    /// Executes the build-dashboard use case
    ///
    /// # Arguments
    /// * `request` - Filter selection, vessel lookup flag and reference time
    ///
    /// # Returns
    /// DashboardResponse holding the live session and what was dropped on load
    ///
    /// # Errors
    /// Returns an error if:
    /// - The filter selection is invalid
    /// - Shipment records cannot be fetched
    /// - Vessel positions are requested but cannot be fetched
    pub async fn execute(&self, request: DashboardRequest) -> Result<DashboardResponse> {
        request.selection.validate()?;

        let (batch, fetched) = self.load_records().await?;
        let load_summary = LoadSummary {
            fetched,
            deleted: batch.deleted,
            missing_reference: batch.missing_reference,
            unknown_statuses: batch.unknown_statuses,
        };

        let mut session = DashboardSession::new(batch.records, request.selection, request.now)?;
        self.report_filtering(&session);
        self.report_unlocated(&session);

        let vessel_groups = VesselAssembler::group(session.records(), request.now);
        if request.include_vessels {
            if let Some(repository) = &self.position_repository {
                self.progress_reporter.report(&format!(
                    "🛰️  Looking up positions for {} vessel(s) with open bookings...",
                    vessel_groups.len()
                ));
                let vessels = load_active_vessels(
                    repository,
                    &self.progress_reporter,
                    vessel_groups.clone(),
                    request.now,
                )
                .await?;
                let located = vessels.iter().filter(|v| v.coordinates().is_some()).count();
                self.progress_reporter.report(&format!(
                    "✅ Located {} of {} active vessel(s)",
                    located,
                    vessels.len()
                ));
                session.set_vessels(vessels);
            }
        }

        Ok(DashboardResponse::new(session, load_summary, vessel_groups))
    }

    /// Fetches and normalizes records, reporting what was dropped
    ///
    /// # Returns
    /// The normalized batch and the number of raw rows fetched
    async fn load_records(&self) -> Result<(NormalizedBatch, usize)> {
        self.progress_reporter.report("📖 Loading shipment records...");
        let raws = self.shipment_repository.fetch_shipments().await?;
        let fetched = raws.len();

        let batch = RecordNormalizer::normalize_batch(raws);
        self.progress_reporter.report(&format!(
            "✅ Loaded {} shipment record(s)",
            batch.records.len()
        ));

        if batch.deleted > 0 || batch.missing_reference > 0 {
            self.progress_reporter.report(&format!(
                "   Skipped {} deleted record(s) and {} record(s) without reference",
                batch.deleted, batch.missing_reference
            ));
        }
        if !batch.unknown_statuses.is_empty() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Unrecognized status value(s) counted as pending: {}",
                batch.unknown_statuses.join(", ")
            ));
        }

        Ok((batch, fetched))
    }

    fn report_filtering(&self, session: &DashboardSession) {
        if session.selection().is_empty() {
            return;
        }
        self.progress_reporter.report(&format!(
            "🔍 {} of {} record(s) match the selected filters",
            session.filtered().len(),
            session.records().len()
        ));
    }

    /// Unknown ports are left off the map only; they still count elsewhere.
    fn report_unlocated(&self, session: &DashboardSession) {
        for unlocated in &session.destinations().unlocated {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: No coordinates for destination '{}' ({} record(s)); left off the map",
                unlocated.port, unlocated.records
            ));
        }
        for unlocated in &session.origins().unlocated {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: No coordinates for origin port '{}' ({} record(s)); left off the map",
                unlocated.port, unlocated.records
            ));
        }
    }
}
