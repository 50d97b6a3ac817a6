/// Integration tests for the application layer
mod test_utilities;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use shipment_atlas::application::read_models::{Column, TableState};
use shipment_atlas::prelude::*;
use test_utilities::mocks::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn use_case(
    shipments: MockShipmentRepository,
    positions: Option<MockVesselPositionRepository>,
    reporter: MockProgressReporter,
) -> BuildDashboardUseCase<
    MockShipmentRepository,
    MockVesselPositionRepository,
    MockProgressReporter,
> {
    BuildDashboardUseCase::new(shipments, positions, reporter)
}

#[tokio::test]
async fn test_shanghai_totals_exclude_pending() {
    let shipments = MockShipmentRepository::new()
        .with_row(json!({"ref_asli": "A1", "pod": "SHANGHAI", "estado": "CONFIRMADO", "etd": "2024-05-31"}))
        .with_row(json!({"ref_asli": "A2", "pod": "SHANGHAI", "estado": "PENDIENTE"}))
        .with_row(json!({"ref_asli": "A3", "pod": "SHANGHAI", "estado": "CANCELADO", "etd": "2024-06-02"}));

    let response = use_case(shipments, None, MockProgressReporter::new())
        .execute(DashboardRequest::new(FilterSelection::default(), false, now()))
        .await
        .unwrap();

    let destinations = &response.session.destinations().destinations;
    assert_eq!(destinations.len(), 1);
    let shanghai = &destinations[0];
    assert_eq!(shanghai.port, "SHANGHAI");
    assert_eq!(shanghai.counts.total, 2);
    assert_eq!(shanghai.counts.pending, 1);
    assert_eq!(shanghai.counts.etd_passed, 1);
    assert_eq!(shanghai.counts.etd_future, 1);
}

#[tokio::test]
async fn test_client_filter_keeps_only_that_client() {
    let shipments = MockShipmentRepository::new()
        .with_row(json!({"ref_asli": "A1", "shipper": "ACME", "pod": "ROTTERDAM", "estado": "CONFIRMADO"}))
        .with_row(json!({"ref_asli": "A2", "shipper": "OTHER", "pod": "ROTTERDAM", "estado": "CONFIRMADO"}))
        .with_row(json!({"ref_asli": "A3", "shipper": "ACME", "pod": "SHANGHAI", "estado": "PENDIENTE"}));

    let selection = FilterSelection {
        clients: vec!["ACME".to_string()],
        ..FilterSelection::default()
    };
    let response = use_case(shipments, None, MockProgressReporter::new())
        .execute(DashboardRequest::new(selection, false, now()))
        .await
        .unwrap();

    let filtered = response.session.filtered();
    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|r| r.shipper == "ACME"));
    assert_eq!(response.session.counts().total_records, 3);
}

#[tokio::test]
async fn test_missing_destination_still_counted() {
    let shipments = MockShipmentRepository::new()
        .with_row(json!({"ref_asli": "A1", "pod": "SHANGHAI", "estado": "CONFIRMADO"}))
        .with_row(json!({"ref_asli": "A2", "estado": "CONFIRMADO", "contenedor": "MSCU1234567 MSCU7654321"}));

    let response = use_case(shipments, None, MockProgressReporter::new())
        .execute(DashboardRequest::new(FilterSelection::default(), false, now()))
        .await
        .unwrap();

    let session = &response.session;
    assert_eq!(session.destinations().destinations.len(), 1);
    assert_eq!(session.destinations().missing_port, 1);
    assert_eq!(session.counts().total_records, 2);
    assert_eq!(session.counts().confirmed, 2);
    assert_eq!(session.counts().total_containers, 2);
}

#[tokio::test]
async fn test_deleted_and_unreferenced_rows_are_dropped() {
    let shipments = MockShipmentRepository::new()
        .with_row(json!({"ref_asli": "A1", "pod": "SHANGHAI", "estado": "CONFIRMADO"}))
        .with_row(json!({"ref_asli": "A2", "pod": "SHANGHAI", "deleted_at": "2024-05-01T00:00:00Z"}))
        .with_row(json!({"pod": "SHANGHAI", "estado": "CONFIRMADO"}));
    let reporter = MockProgressReporter::new();

    let response = use_case(shipments, None, reporter.clone())
        .execute(DashboardRequest::new(FilterSelection::default(), false, now()))
        .await
        .unwrap();

    assert_eq!(response.session.records().len(), 1);
    assert_eq!(response.load_summary.fetched, 3);
    assert_eq!(response.load_summary.deleted, 1);
    assert_eq!(response.load_summary.missing_reference, 1);
    assert!(reporter
        .get_messages()
        .iter()
        .any(|m| m.contains("Skipped 1 deleted record(s) and 1 record(s) without reference")));
}

#[tokio::test]
async fn test_unknown_status_counted_as_pending_with_warning() {
    let shipments = MockShipmentRepository::new()
        .with_row(json!({"ref_asli": "A1", "pod": "SHANGHAI", "estado": "ROLEADO"}))
        .with_row(json!({"ref_asli": "A2", "pod": "SHANGHAI", "estado": "confirmado"}));
    let reporter = MockProgressReporter::new();

    let response = use_case(shipments, None, reporter.clone())
        .execute(DashboardRequest::new(FilterSelection::default(), false, now()))
        .await
        .unwrap();

    assert_eq!(response.session.counts().pending, 1);
    assert_eq!(response.session.counts().confirmed, 1);
    assert_eq!(response.load_summary.unknown_statuses, vec!["ROLEADO"]);
    assert!(reporter
        .warnings()
        .iter()
        .any(|w| w.contains("counted as pending: ROLEADO")));
}

#[tokio::test]
async fn test_unlocated_destination_warns() {
    let shipments = MockShipmentRepository::new()
        .with_row(json!({"ref_asli": "A1", "pod": "ATLANTIS", "estado": "CONFIRMADO"}));
    let reporter = MockProgressReporter::new();

    let response = use_case(shipments, None, reporter.clone())
        .execute(DashboardRequest::new(FilterSelection::default(), false, now()))
        .await
        .unwrap();

    assert!(response.session.destinations().destinations.is_empty());
    assert_eq!(response.session.counts().total_records, 1);
    assert!(reporter
        .warnings()
        .iter()
        .any(|w| w.contains("No coordinates for destination 'ATLANTIS'")));
}

#[tokio::test]
async fn test_invalid_selection_rejected() {
    let selection = FilterSelection {
        month_etd: Some(13),
        ..FilterSelection::default()
    };
    let result = use_case(MockShipmentRepository::new(), None, MockProgressReporter::new())
        .execute(DashboardRequest::new(selection, false, now()))
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_repository_failure_is_terminal() {
    let result = use_case(
        MockShipmentRepository::with_failure(),
        None,
        MockProgressReporter::new(),
    )
    .execute(DashboardRequest::new(FilterSelection::default(), false, now()))
    .await;

    let err = result.err().unwrap().to_string();
    assert!(err.contains("Mock shipment repository failure"));
}

#[tokio::test]
async fn test_active_vessels_joined_with_positions() {
    let shipments = MockShipmentRepository::new()
        .with_row(json!({
            "ref_asli": "A1", "booking": "BK1", "nave_inicial": "MSC ANNA",
            "pod": "ROTTERDAM", "estado": "CONFIRMADO",
            "etd": "2024-05-20", "eta": "2024-06-20", "contenedor": "[\"MSCU1234567\"]"
        }))
        .with_row(json!({
            "ref_asli": "A2", "booking": "BK2", "nave_inicial": "OLD SHIP",
            "pod": "ROTTERDAM", "estado": "CONFIRMADO", "eta": "2024-05-01"
        }));
    let positions = MockVesselPositionRepository::new()
        .with_position("MSC ANNA", 10.5, -30.25, "2024-06-01T10:00:00Z")
        .with_track_point("MSC ANNA", 0.0, -40.0, "2024-05-25T00:00:00Z");

    let response = use_case(shipments, Some(positions), MockProgressReporter::new())
        .execute(DashboardRequest::new(FilterSelection::default(), true, now()))
        .await
        .unwrap();

    let vessels = response.session.vessels();
    assert_eq!(vessels.len(), 1);
    let anna = &vessels[0];
    assert_eq!(anna.vessel_name, "MSC ANNA");
    assert_eq!(anna.last_lat, Some(10.5));
    assert_eq!(anna.bookings, vec!["BK1"]);
    assert_eq!(anna.containers, vec!["MSCU1234567"]);
    assert_eq!(anna.track.len(), 2);
    assert_eq!(response.session.map().vessels.points.len(), 1);
}

#[tokio::test]
async fn test_track_history_failure_is_not_fatal() {
    let shipments = MockShipmentRepository::new().with_row(json!({
        "ref_asli": "A1", "nave_inicial": "MSC ANNA", "pod": "ROTTERDAM", "estado": "CONFIRMADO"
    }));
    let positions = MockVesselPositionRepository::new()
        .with_position("MSC ANNA", 10.5, -30.25, "2024-06-01T10:00:00Z")
        .failing_history();
    let reporter = MockProgressReporter::new();

    let response = use_case(shipments, Some(positions), reporter.clone())
        .execute(DashboardRequest::new(FilterSelection::default(), true, now()))
        .await
        .unwrap();

    assert_eq!(response.session.vessels().len(), 1);
    assert!(reporter
        .warnings()
        .iter()
        .any(|w| w.contains("Failed to load vessel track history")));
}

#[tokio::test]
async fn test_position_failure_is_fatal() {
    let shipments = MockShipmentRepository::new().with_row(json!({
        "ref_asli": "A1", "nave_inicial": "MSC ANNA", "pod": "ROTTERDAM", "estado": "CONFIRMADO"
    }));
    let positions = MockVesselPositionRepository::new().failing_positions();

    let result = use_case(shipments, Some(positions), MockProgressReporter::new())
        .execute(DashboardRequest::new(FilterSelection::default(), true, now()))
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_vessels_skipped_when_not_requested() {
    let shipments = MockShipmentRepository::new().with_row(json!({
        "ref_asli": "A1", "nave_inicial": "MSC ANNA", "pod": "ROTTERDAM", "estado": "CONFIRMADO"
    }));
    let positions = MockVesselPositionRepository::new();
    let calls = positions.position_calls.clone();

    let response = use_case(shipments, Some(positions), MockProgressReporter::new())
        .execute(DashboardRequest::new(FilterSelection::default(), false, now()))
        .await
        .unwrap();

    assert!(response.session.vessels().is_empty());
    assert_eq!(response.vessel_groups.len(), 1);
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_report_reflects_table_state() {
    let shipments = MockShipmentRepository::new()
        .with_row(json!({"ref_asli": "A1", "ejecutivo": "ANA", "pod": "ROTTERDAM", "estado": "CONFIRMADO"}))
        .with_row(json!({"ref_asli": "A2", "ejecutivo": "LUIS", "pod": "ROTTERDAM", "estado": "CONFIRMADO"}));

    let response = use_case(shipments, None, MockProgressReporter::new())
        .execute(DashboardRequest::new(FilterSelection::default(), false, now()))
        .await
        .unwrap();

    let mut session = response.session;
    let mut state = TableState::default();
    state.set_column_filter(Column::Executive, "ana");
    state.set_visible(Column::Depot, false);
    session.set_table_state(state);

    let report = DashboardReportBuilder::build(&session, &response.load_summary);
    assert_eq!(report.table.rows.len(), 1);
    assert_eq!(report.table.rows[0].reference, "A1");
    assert!(report.table.columns.iter().all(|c| c.id != "depot"));
    assert_eq!(report.destinations[0].counts.total, 2);
}
