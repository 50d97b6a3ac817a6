use crate::shipment_tracking::domain::{ShipmentRecord, ShipmentStatus};
use serde::Serialize;
use std::collections::HashMap;

/// Headline counters shown above the dashboard.
///
/// Several rows can share a reference; only the most recently updated row
/// of each reference is counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardCounts {
    /// Rows fetched, before deduplication
    pub total_records: usize,
    /// Distinct references
    pub total_references: usize,
    pub total_containers: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub cancelled: usize,
    /// References whose status was not recognized (already counted as pending)
    pub unrecognized_status: usize,
}

/// DashboardStats computes the non-geographic counters.
pub struct DashboardStats;

impl DashboardStats {
    pub fn compute(records: &[ShipmentRecord]) -> DashboardCounts {
        let mut latest: HashMap<&str, &ShipmentRecord> = HashMap::new();
        for record in records {
            latest
                .entry(record.reference.as_str())
                .and_modify(|existing| {
                    if record.updated_at > existing.updated_at {
                        *existing = record;
                    }
                })
                .or_insert(record);
        }

        let mut counts = DashboardCounts {
            total_records: records.len(),
            total_references: latest.len(),
            ..DashboardCounts::default()
        };

        for record in latest.values() {
            counts.total_containers += record.container_count();
            match record.status {
                ShipmentStatus::Pending => counts.pending += 1,
                ShipmentStatus::Confirmed => counts.confirmed += 1,
                ShipmentStatus::Cancelled => counts.cancelled += 1,
            }
            if !record.status_recognized {
                counts.unrecognized_status += 1;
            }
        }

        counts
    }
}
