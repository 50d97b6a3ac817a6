use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Booking status. Persisted values are Spanish (`PENDIENTE`, `CONFIRMADO`,
/// `CANCELADO`); the dashboard also accepts a few legacy synonyms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl ShipmentStatus {
    /// Parses a stored status. Returns `None` for anything unrecognized,
    /// including the empty string.
    pub fn recognize(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "PENDIENTE" | "EN PROCESO" | "PENDING" => Some(ShipmentStatus::Pending),
            "CONFIRMADO" | "COMPLETADO" | "CONFIRMED" => Some(ShipmentStatus::Confirmed),
            "CANCELADO" | "RECHAZADO" | "CANCELLED" | "CANCELED" => {
                Some(ShipmentStatus::Cancelled)
            }
            _ => None,
        }
    }

    /// Parses a stored status, counting unrecognized values as pending.
    pub fn parse_or_pending(raw: &str) -> Self {
        Self::recognize(raw).unwrap_or(ShipmentStatus::Pending)
    }

    /// The value as persisted by the backend.
    pub fn stored_label(&self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "PENDIENTE",
            ShipmentStatus::Confirmed => "CONFIRMADO",
            ShipmentStatus::Cancelled => "CANCELADO",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShipmentStatus::Pending => write!(f, "PENDING"),
            ShipmentStatus::Confirmed => write!(f, "CONFIRMED"),
            ShipmentStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl std::str::FromStr for ShipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::recognize(s).ok_or_else(|| {
            format!(
                "Invalid status: {}. Please specify 'pending', 'confirmed' or 'cancelled'",
                s
            )
        })
    }
}

/// One booking / container movement after normalization.
///
/// Text fields are trimmed and empty when absent; dates that could not be
/// parsed are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipmentRecord {
    pub id: Option<String>,
    /// Internal reference (one per booking; several rows can share it)
    pub reference: String,
    pub booking: String,
    pub carrier: String,
    /// Initial vessel with any "[voyage]" suffix removed
    pub vessel: String,
    pub voyage: Option<String>,
    pub origin_port: String,
    pub destination_port: String,
    pub depot: String,
    pub shipper: String,
    pub executive: String,
    pub species: String,
    /// Reefer set point in °C
    pub temperature: Option<f64>,
    pub planned_transit_days: Option<f64>,
    pub status: ShipmentStatus,
    /// False when the stored status was empty or not one of the known values
    pub status_recognized: bool,
    pub ingressed_at: Option<DateTime<Utc>>,
    pub etd: Option<DateTime<Utc>>,
    pub eta: Option<DateTime<Utc>>,
    pub containers: Vec<String>,
    pub season: Option<String>,
    pub week_ingress: Option<u32>,
    pub week_etd: Option<u32>,
    pub week_eta: Option<u32>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ShipmentRecord {
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// Minimal record used as a starting point by builders and tests.
    pub fn empty(reference: impl Into<String>) -> Self {
        Self {
            id: None,
            reference: reference.into(),
            booking: String::new(),
            carrier: String::new(),
            vessel: String::new(),
            voyage: None,
            origin_port: String::new(),
            destination_port: String::new(),
            depot: String::new(),
            shipper: String::new(),
            executive: String::new(),
            species: String::new(),
            temperature: None,
            planned_transit_days: None,
            status: ShipmentStatus::Pending,
            status_recognized: false,
            ingressed_at: None,
            etd: None,
            eta: None,
            containers: Vec::new(),
            season: None,
            week_ingress: None,
            week_etd: None,
            week_eta: None,
            updated_at: None,
            deleted_at: None,
        }
    }
}
