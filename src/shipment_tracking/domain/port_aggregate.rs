use super::geo::{CoordinateSource, Coordinates};
use super::shipment::ShipmentStatus;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-destination counters.
///
/// `total` only counts confirmed and cancelled records; pending records are
/// tracked in `pending` but never contribute to it. The ETD/ETA split is taken
/// over every aggregated record that carries the date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PortCounts {
    pub confirmed: usize,
    pub pending: usize,
    pub cancelled: usize,
    pub etd_passed: usize,
    pub etd_future: usize,
    pub eta_passed: usize,
    pub eta_future: usize,
    pub total: usize,
}

impl PortCounts {
    pub fn record_status(&mut self, status: ShipmentStatus) {
        match status {
            ShipmentStatus::Confirmed => {
                self.confirmed += 1;
                self.total += 1;
            }
            ShipmentStatus::Cancelled => {
                self.cancelled += 1;
                self.total += 1;
            }
            ShipmentStatus::Pending => self.pending += 1,
        }
    }

    /// Map colour bucket for these counts.
    pub fn fulfillment(&self) -> FulfillmentState {
        if self.eta_passed > 0 {
            FulfillmentState::Arrived
        } else if self.etd_passed > 0 {
            FulfillmentState::Departed
        } else {
            FulfillmentState::Scheduled
        }
    }
}

/// Map colour bucket of a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentState {
    /// At least one aggregated arrival already happened
    Arrived,
    /// Something departed, nothing arrived yet
    Departed,
    Scheduled,
}

/// Shipments grouped by destination port. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortAggregate {
    /// Uppercased, trimmed destination port name
    pub port: String,
    /// Country detected for the port, if any
    pub country: Option<String>,
    pub coordinates: Coordinates,
    pub coordinate_source: CoordinateSource,
    pub counts: PortCounts,
}

impl PortAggregate {
    pub fn fulfillment(&self) -> FulfillmentState {
        self.counts.fulfillment()
    }
}

/// Shipments grouped by destination country, drawn at the country's
/// coordinates. `counts` is the sum of the nested per-port counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryAggregate {
    pub country: String,
    pub coordinates: Coordinates,
    /// Keyed by uppercased destination port
    pub ports: BTreeMap<String, PortCounts>,
    pub counts: PortCounts,
}

impl CountryAggregate {
    pub fn fulfillment(&self) -> FulfillmentState {
        self.counts.fulfillment()
    }
}

/// Embarkation statistics for one port of loading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OriginPortStats {
    pub port: String,
    pub coordinates: Coordinates,
    /// Every record loading here, whatever its status
    pub shipments: usize,
    /// Distinct depots, sorted
    pub depots: Vec<String>,
}

/// Count of records per normalized season label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonBucket {
    pub season: String,
    pub records: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregate_with(counts: PortCounts) -> PortAggregate {
        PortAggregate {
            port: "SHANGHAI".to_string(),
            country: Some("CHINA".to_string()),
            coordinates: Coordinates::new(121.5, 31.2),
            coordinate_source: CoordinateSource::Port,
            counts,
        }
    }

    #[test]
    fn test_pending_never_adds_to_total() {
        let mut counts = PortCounts::default();
        counts.record_status(ShipmentStatus::Confirmed);
        counts.record_status(ShipmentStatus::Pending);
        counts.record_status(ShipmentStatus::Cancelled);

        assert_eq!(counts.total, 2);
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.total, counts.confirmed + counts.cancelled);
    }

    #[test]
    fn test_fulfillment_prefers_arrival() {
        let aggregate = aggregate_with(PortCounts {
            eta_passed: 1,
            etd_passed: 3,
            ..PortCounts::default()
        });
        assert_eq!(aggregate.fulfillment(), FulfillmentState::Arrived);
    }

    #[test]
    fn test_fulfillment_departed_and_scheduled() {
        let departed = aggregate_with(PortCounts {
            etd_passed: 1,
            eta_future: 1,
            ..PortCounts::default()
        });
        assert_eq!(departed.fulfillment(), FulfillmentState::Departed);

        let scheduled = aggregate_with(PortCounts {
            etd_future: 2,
            ..PortCounts::default()
        });
        assert_eq!(scheduled.fulfillment(), FulfillmentState::Scheduled);
    }
}
