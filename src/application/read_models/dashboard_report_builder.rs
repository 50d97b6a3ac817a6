//! Builder for constructing DashboardReport from a live session

use super::dashboard_report::{CountryView, DashboardReport, DestinationView, ExclusionSummary};
use super::map_view::{destination_fill, destination_radius};
use crate::application::dto::LoadSummary;
use crate::application::session::DashboardSession;
use crate::shipment_tracking::domain::{CountryAggregate, PortAggregate};
use uuid::Uuid;

/// Turns the session's derived state into a formatter-ready report.
pub struct DashboardReportBuilder;

impl DashboardReportBuilder {
    /// Builds a report of the session as it is now
    ///
    /// # Arguments
    /// * `session` - Session holding records, selection and derived views
    /// * `load_summary` - What was dropped while loading records
    ///
    /// # Returns
    /// A report stamped with a fresh id and the session's reference time
    pub fn build(session: &DashboardSession, load_summary: &LoadSummary) -> DashboardReport {
        let destinations = session.destinations();
        let origins = session.origins();

        DashboardReport {
            report_id: Uuid::new_v4(),
            generated_at: session.now(),
            selection: session.selection().clone(),
            counts: *session.counts(),
            kpis: session.kpis().clone(),
            seasons: session.seasons().clone(),
            options: session.options().clone(),
            destinations: destinations
                .destinations
                .iter()
                .map(Self::destination_view)
                .collect(),
            countries: session
                .countries()
                .countries
                .iter()
                .map(Self::country_view)
                .collect(),
            origins: origins.ports.clone(),
            vessels: session.vessels().to_vec(),
            excluded: ExclusionSummary {
                deleted: load_summary.deleted,
                missing_reference: load_summary.missing_reference,
                filtered_out: session.records().len() - session.filtered().len(),
                missing_destination_port: destinations.missing_port,
                unlocated_destinations: destinations.unlocated.clone(),
                unlocated_origins: origins.unlocated.clone(),
                unrecognized_statuses: load_summary.unknown_statuses.clone(),
            },
            table: session.table().clone(),
        }
    }

    fn destination_view(aggregate: &PortAggregate) -> DestinationView {
        let state = aggregate.fulfillment();
        DestinationView {
            port: aggregate.port.clone(),
            country: aggregate.country.clone(),
            coordinates: aggregate.coordinates.as_lon_lat(),
            coordinate_source: aggregate.coordinate_source,
            state,
            fill: destination_fill(state, false),
            radius: destination_radius(aggregate.counts.total, false),
            counts: aggregate.counts,
        }
    }

    fn country_view(aggregate: &CountryAggregate) -> CountryView {
        let state = aggregate.fulfillment();
        CountryView {
            country: aggregate.country.clone(),
            coordinates: aggregate.coordinates.as_lon_lat(),
            state,
            fill: destination_fill(state, false),
            radius: destination_radius(aggregate.counts.total, false),
            counts: aggregate.counts,
            ports: aggregate.ports.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shipment_tracking::domain::{
        FilterSelection, FulfillmentState, ShipmentRecord, ShipmentStatus,
    };
    use chrono::{Duration, TimeZone, Utc};

    fn record(reference: &str, pod: &str, status: ShipmentStatus) -> ShipmentRecord {
        let mut record = ShipmentRecord::empty(reference);
        record.destination_port = pod.to_string();
        record.status = status;
        record.status_recognized = true;
        record
    }

    #[test]
    fn test_build_report_from_session() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let mut shanghai = record("A1", "SHANGHAI", ShipmentStatus::Confirmed);
        shanghai.etd = Some(now - Duration::days(1));
        shanghai.shipper = "ACME".to_string();
        let mut other = record("A2", "ATLANTIS", ShipmentStatus::Confirmed);
        other.shipper = "ACME".to_string();
        let mut filtered = record("A3", "SHANGHAI", ShipmentStatus::Cancelled);
        filtered.shipper = "OTHER".to_string();

        let selection = FilterSelection {
            clients: vec!["ACME".to_string()],
            ..FilterSelection::default()
        };
        let session =
            DashboardSession::new(vec![shanghai, other, filtered], selection, now).unwrap();
        let summary = LoadSummary {
            fetched: 5,
            deleted: 1,
            missing_reference: 1,
            unknown_statuses: vec!["ROLEADO".to_string()],
        };

        let report = DashboardReportBuilder::build(&session, &summary);

        assert_eq!(report.generated_at, now);
        assert_eq!(report.counts.total_records, 3);
        assert_eq!(report.destinations.len(), 1);
        let shanghai = &report.destinations[0];
        assert_eq!(shanghai.port, "SHANGHAI");
        assert_eq!(shanghai.state, FulfillmentState::Departed);
        assert_eq!(shanghai.counts.total, 1);
        assert_eq!(report.countries.len(), 1);
        assert_eq!(report.countries[0].country, "CHINA");
        assert_eq!(report.countries[0].ports["SHANGHAI"].total, 1);
        assert_eq!(report.excluded.filtered_out, 1);
        assert_eq!(report.excluded.deleted, 1);
        assert_eq!(report.excluded.unlocated_destinations.len(), 1);
        assert_eq!(report.excluded.unlocated_destinations[0].port, "ATLANTIS");
        assert_eq!(report.excluded.unrecognized_statuses, vec!["ROLEADO"]);
        assert_eq!(report.table.rows.len(), 2);
    }
}
