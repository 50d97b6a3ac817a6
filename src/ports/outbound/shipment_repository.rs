use crate::shared::Result;
use crate::shipment_tracking::domain::RawShipmentRecord;
use async_trait::async_trait;

/// ShipmentRepository port for loading shipment records
///
/// Implementations return the live (not soft-deleted) rows exactly as the
/// backend stores them; normalization happens in the domain layer.
#[async_trait]
pub trait ShipmentRepository: Send + Sync {
    /// Fetches every live shipment record
    ///
    /// # Returns
    /// The raw rows, in whatever order the source returns them
    ///
    /// # Errors
    /// Returns an error if:
    /// - The snapshot file cannot be read or parsed
    /// - The backend request fails or returns a non-success status
    async fn fetch_shipments(&self) -> Result<Vec<RawShipmentRecord>>;
}

#[async_trait]
impl<T: ShipmentRepository + ?Sized> ShipmentRepository for std::sync::Arc<T> {
    async fn fetch_shipments(&self) -> Result<Vec<RawShipmentRecord>> {
        (**self).fetch_shipments().await
    }
}
