/// Mock implementations for testing
mod mock_position_repository;
mod mock_progress_reporter;
mod mock_shipment_repository;

pub use mock_position_repository::MockVesselPositionRepository;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_shipment_repository::MockShipmentRepository;
