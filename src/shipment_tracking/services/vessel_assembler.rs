use super::record_normalizer::parse_timestamp;
use crate::shipment_tracking::domain::{
    ActiveVessel, ShipmentRecord, ShipmentStatus, VesselPosition, VesselTrackPoint,
};
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::HashMap;

const PLACEHOLDER: &str = "-";

/// Open bookings on one vessel, before positions are joined in.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselGroup {
    pub vessel_name: String,
    pub earliest_etd: Option<DateTime<Utc>>,
    pub earliest_eta: Option<DateTime<Utc>>,
    /// Distinct destination ports in first-seen order
    pub destinations: Vec<String>,
    pub bookings: Vec<String>,
    pub containers: Vec<String>,
}

/// VesselAssembler builds the active-vessel list shown on the map.
pub struct VesselAssembler;

impl VesselAssembler {
    /// Groups open bookings by vessel.
    ///
    /// A record is open when it is not cancelled and its ETA is unknown or
    /// still ahead of `now`. Vessels are returned in first-seen order.
    pub fn group(records: &[ShipmentRecord], now: DateTime<Utc>) -> Vec<VesselGroup> {
        let mut groups: Vec<VesselGroup> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for record in records {
            if record.status == ShipmentStatus::Cancelled
                || record.eta.is_some_and(|eta| eta <= now)
            {
                continue;
            }
            let name = record.vessel.trim();
            if name.is_empty() {
                continue;
            }

            let slot = *index.entry(name.to_string()).or_insert_with(|| {
                groups.push(VesselGroup {
                    vessel_name: name.to_string(),
                    earliest_etd: None,
                    earliest_eta: None,
                    destinations: Vec::new(),
                    bookings: Vec::new(),
                    containers: Vec::new(),
                });
                groups.len() - 1
            });
            let group = &mut groups[slot];

            group.earliest_etd = earliest(group.earliest_etd, record.etd);
            group.earliest_eta = earliest(group.earliest_eta, record.eta);
            push_distinct(&mut group.destinations, record.destination_port.trim());
            push_distinct(&mut group.bookings, record.booking.trim());
            for container in &record.containers {
                push_distinct(&mut group.containers, container.trim());
            }
        }

        groups
    }

    /// Joins vessel groups with their last position and track history.
    ///
    /// The last known position is appended to the track when it is newer
    /// than the last history point, or when either timestamp is missing or
    /// unreadable.
    pub fn join(
        groups: Vec<VesselGroup>,
        positions: &[VesselPosition],
        history: &[VesselTrackPoint],
        now: DateTime<Utc>,
    ) -> Vec<ActiveVessel> {
        let positions: HashMap<&str, &VesselPosition> = positions
            .iter()
            .map(|p| (p.vessel_name.trim(), p))
            .collect();

        let mut tracks: HashMap<&str, Vec<VesselTrackPoint>> = HashMap::new();
        for point in history {
            tracks
                .entry(point.vessel_name.trim())
                .or_default()
                .push(point.clone());
        }

        groups
            .into_iter()
            .map(|group| {
                let position = positions.get(group.vessel_name.as_str()).copied();
                let mut track = tracks.remove(group.vessel_name.as_str()).unwrap_or_default();
                track.sort_by(|a, b| a.position_at.cmp(&b.position_at));

                if let Some(position) = position {
                    Self::extend_track(&mut track, position, now);
                }

                ActiveVessel {
                    last_lat: position.and_then(|p| p.last_lat),
                    last_lon: position.and_then(|p| p.last_lon),
                    last_position_at: position.and_then(|p| p.last_position_at.clone()),
                    last_api_call_at: position.and_then(|p| p.last_api_call_at.clone()),
                    etd: group.earliest_etd.map(iso),
                    eta: group.earliest_eta.map(iso),
                    destination: Some(group.destinations.join(" / ")).filter(|d| !d.is_empty()),
                    bookings: group.bookings,
                    containers: group.containers,
                    track,
                    vessel_name: group.vessel_name,
                }
            })
            .collect()
    }

    fn extend_track(
        track: &mut Vec<VesselTrackPoint>,
        position: &VesselPosition,
        now: DateTime<Utc>,
    ) {
        let (Some(lat), Some(lon)) = (position.last_lat, position.last_lon) else {
            return;
        };

        let latest_history = track.last().and_then(|p| parse_timestamp(&p.position_at));
        let last_position = position.last_position_at.as_deref().and_then(parse_timestamp);
        let append = match (latest_history, last_position) {
            (Some(history), Some(last)) => last > history,
            _ => true,
        };

        if append {
            track.push(VesselTrackPoint {
                vessel_name: String::new(),
                lat,
                lon,
                position_at: position
                    .last_position_at
                    .clone()
                    .unwrap_or_else(|| iso(now)),
            });
        }
    }
}

fn earliest(
    current: Option<DateTime<Utc>>,
    candidate: Option<DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    match (current, candidate) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

fn push_distinct(values: &mut Vec<String>, value: &str) {
    if !value.is_empty() && value != PLACEHOLDER && !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

fn iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
