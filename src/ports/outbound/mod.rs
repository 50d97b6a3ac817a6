/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (snapshots, backend, console, etc.).
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;
pub mod shipment_repository;
pub mod vessel_position_repository;

pub use formatter::DashboardFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use shipment_repository::ShipmentRepository;
pub use vessel_position_repository::VesselPositionRepository;
