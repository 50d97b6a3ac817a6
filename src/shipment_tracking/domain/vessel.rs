use super::geo::Coordinates;
use super::raw_record::{lenient_f64, lenient_text};
use serde::{Deserialize, Serialize};

/// Last known AIS position of a vessel, as stored in the positions table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct VesselPosition {
    pub vessel_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub imo: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub mmsi: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub last_lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub last_lon: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub last_position_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub last_api_call_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub course: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub navigational_status: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub eta_utc: Option<String>,
}

impl VesselPosition {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.last_lon, self.last_lat) {
            (Some(lon), Some(lat)) => Some(Coordinates::new(lon, lat)),
            _ => None,
        }
    }
}

/// One historical position sample.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VesselTrackPoint {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vessel_name: String,
    pub lat: f64,
    pub lon: f64,
    pub position_at: String,
}

/// A vessel currently carrying at least one open booking, joined with its
/// last known position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveVessel {
    pub vessel_name: String,
    pub last_lat: Option<f64>,
    pub last_lon: Option<f64>,
    pub last_position_at: Option<String>,
    pub last_api_call_at: Option<String>,
    pub etd: Option<String>,
    pub eta: Option<String>,
    pub destination: Option<String>,
    pub bookings: Vec<String>,
    pub containers: Vec<String>,
    pub track: Vec<VesselTrackPoint>,
}

impl ActiveVessel {
    /// Position to draw, or `None` when the vessel has never been located.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.last_lon, self.last_lat) {
            (Some(lon), Some(lat)) => Some(Coordinates::new(lon, lat)),
            _ => None,
        }
    }
}
