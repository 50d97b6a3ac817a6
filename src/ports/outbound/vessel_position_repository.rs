use crate::shared::Result;
use crate::shipment_tracking::domain::{VesselPosition, VesselTrackPoint};
use async_trait::async_trait;

/// VesselPositionRepository port for reading AIS positions
///
/// Positions are owned by an external tracking feed; this port only reads the
/// last known position table and the position history.
#[async_trait]
pub trait VesselPositionRepository: Send + Sync {
    /// Fetches the last known position for each named vessel
    ///
    /// # Arguments
    /// * `vessel_names` - Vessels to look up; unknown names are simply absent
    ///   from the result
    ///
    /// # Errors
    /// Returns an error if the position source cannot be read
    async fn fetch_positions(&self, vessel_names: &[String]) -> Result<Vec<VesselPosition>>;

    /// Fetches historical position samples for the named vessels
    ///
    /// # Arguments
    /// * `vessel_names` - Vessels whose tracks should be returned
    ///
    /// # Returns
    /// Track points tagged with their vessel name, oldest first
    ///
    /// # Errors
    /// Returns an error if the history source cannot be read
    async fn fetch_track_history(&self, vessel_names: &[String])
        -> Result<Vec<VesselTrackPoint>>;
}

#[async_trait]
impl<T: VesselPositionRepository + ?Sized> VesselPositionRepository for std::sync::Arc<T> {
    async fn fetch_positions(&self, vessel_names: &[String]) -> Result<Vec<VesselPosition>> {
        (**self).fetch_positions(vessel_names).await
    }

    async fn fetch_track_history(
        &self,
        vessel_names: &[String],
    ) -> Result<Vec<VesselTrackPoint>> {
        (**self).fetch_track_history(vessel_names).await
    }
}
