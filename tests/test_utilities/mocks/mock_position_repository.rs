use async_trait::async_trait;
use shipment_atlas::prelude::*;
use shipment_atlas::shipment_tracking::domain::VesselTrackPoint;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock VesselPositionRepository with canned positions and history
#[derive(Default)]
pub struct MockVesselPositionRepository {
    pub positions: Vec<VesselPosition>,
    pub history: Vec<VesselTrackPoint>,
    pub fail_positions: bool,
    pub fail_history: bool,
    pub position_calls: Arc<AtomicUsize>,
}

impl MockVesselPositionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, vessel_name: &str, lat: f64, lon: f64, at: &str) -> Self {
        self.positions.push(VesselPosition {
            vessel_name: vessel_name.to_string(),
            last_lat: Some(lat),
            last_lon: Some(lon),
            last_position_at: Some(at.to_string()),
            ..VesselPosition::default()
        });
        self
    }

    pub fn with_track_point(mut self, vessel_name: &str, lat: f64, lon: f64, at: &str) -> Self {
        self.history.push(VesselTrackPoint {
            vessel_name: vessel_name.to_string(),
            lat,
            lon,
            position_at: at.to_string(),
        });
        self
    }

    pub fn failing_positions(mut self) -> Self {
        self.fail_positions = true;
        self
    }

    pub fn failing_history(mut self) -> Self {
        self.fail_history = true;
        self
    }

    pub fn position_call_count(&self) -> usize {
        self.position_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VesselPositionRepository for MockVesselPositionRepository {
    async fn fetch_positions(&self, vessel_names: &[String]) -> Result<Vec<VesselPosition>> {
        self.position_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_positions {
            anyhow::bail!("Mock position feed unavailable");
        }
        Ok(self
            .positions
            .iter()
            .filter(|p| vessel_names.contains(&p.vessel_name))
            .cloned()
            .collect())
    }

    async fn fetch_track_history(
        &self,
        vessel_names: &[String],
    ) -> Result<Vec<VesselTrackPoint>> {
        if self.fail_history {
            anyhow::bail!("Mock history unavailable");
        }
        Ok(self
            .history
            .iter()
            .filter(|p| vessel_names.contains(&p.vessel_name))
            .cloned()
            .collect())
    }
}
