/// Network adapters for the shipment backend
mod backend_client;
mod caching_position_repository;

pub use backend_client::BackendClient;
pub use caching_position_repository::CachingPositionRepository;
