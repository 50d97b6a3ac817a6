use async_trait::async_trait;
use serde_json::Value;
use shipment_atlas::prelude::*;

/// Mock ShipmentRepository serving rows written as JSON
pub struct MockShipmentRepository {
    pub rows: Vec<Value>,
    pub should_fail: bool,
}

impl MockShipmentRepository {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            should_fail: false,
        }
    }

    /// Adds one backend row; any JSON object the backend could return.
    pub fn with_row(mut self, row: Value) -> Self {
        self.rows.push(row);
        self
    }

    pub fn with_failure() -> Self {
        Self {
            rows: Vec::new(),
            should_fail: true,
        }
    }
}

impl Default for MockShipmentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShipmentRepository for MockShipmentRepository {
    async fn fetch_shipments(&self) -> Result<Vec<RawShipmentRecord>> {
        if self.should_fail {
            anyhow::bail!("Mock shipment repository failure");
        }

        self.rows
            .iter()
            .map(|row| Ok(serde_json::from_value(row.clone())?))
            .collect()
    }
}
