use crate::shipment_tracking::domain::{RawShipmentRecord, ShipmentRecord, ShipmentStatus};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Result of normalizing a batch of backend rows.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub records: Vec<ShipmentRecord>,
    /// Soft-deleted rows that were dropped
    pub deleted: usize,
    /// Rows without a reference that were dropped
    pub missing_reference: usize,
    /// Distinct non-empty status values that were not recognized, sorted
    pub unknown_statuses: Vec<String>,
}

/// RecordNormalizer turns raw backend rows into `ShipmentRecord`s.
///
/// Nothing here fails: a malformed optional field becomes empty or `None`.
pub struct RecordNormalizer;

impl RecordNormalizer {
    /// Normalizes every row, dropping soft-deleted rows and rows without a
    /// reference the same way the backend query does.
    pub fn normalize_batch(raws: Vec<RawShipmentRecord>) -> NormalizedBatch {
        let mut batch = NormalizedBatch::default();

        for raw in raws {
            if raw.is_soft_deleted() {
                batch.deleted += 1;
                continue;
            }
            let raw_status = raw.estado.clone().unwrap_or_default();
            let record = Self::normalize(raw);

            if record.reference.is_empty() {
                batch.missing_reference += 1;
                continue;
            }

            let raw_status = raw_status.trim();
            if !record.status_recognized
                && !raw_status.is_empty()
                && !batch.unknown_statuses.iter().any(|s| s == raw_status)
            {
                batch.unknown_statuses.push(raw_status.to_string());
            }
            batch.records.push(record);
        }

        batch.unknown_statuses.sort();
        batch
    }

    /// Normalizes a single row.
    pub fn normalize(raw: RawShipmentRecord) -> ShipmentRecord {
        let status_text = raw.estado.as_deref().unwrap_or("");
        let recognized = ShipmentStatus::recognize(status_text);

        let (vessel, bracket_voyage) =
            split_vessel_voyage(raw.nave_inicial.as_deref().unwrap_or(""));
        let voyage = non_empty(raw.viaje).or(bracket_voyage);

        ShipmentRecord {
            id: non_empty(raw.id),
            reference: text(raw.ref_asli),
            booking: text(raw.booking),
            carrier: text(raw.naviera),
            vessel,
            voyage,
            origin_port: text(raw.pol),
            destination_port: text(raw.pod),
            depot: text(raw.deposito),
            shipper: text(raw.shipper),
            executive: text(raw.ejecutivo),
            species: text(raw.especie),
            temperature: raw.temperatura,
            planned_transit_days: raw.tt,
            status: recognized.unwrap_or(ShipmentStatus::Pending),
            status_recognized: recognized.is_some(),
            ingressed_at: raw.ingresado.as_deref().and_then(parse_timestamp),
            etd: raw.etd.as_deref().and_then(parse_timestamp),
            eta: raw.eta.as_deref().and_then(parse_timestamp),
            containers: parse_containers(raw.contenedor.as_ref()),
            season: raw.temporada.as_deref().and_then(normalize_season),
            week_ingress: raw.semana_ingreso,
            week_etd: raw.semana_zarpe,
            week_eta: raw.semana_arribo,
            updated_at: raw.updated_at.as_deref().and_then(parse_timestamp),
            deleted_at: raw.deleted_at.as_deref().and_then(parse_timestamp),
        }
    }
}

fn text(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    Some(text(value)).filter(|v| !v.is_empty())
}

/// Flattens the container column into identifiers.
///
/// Arrays and JSON-encoded arrays are flattened element by element; any
/// other string is split on whitespace. Empty tokens are dropped.
pub fn parse_containers(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => tokens_of_array(items),
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Array(items)) => tokens_of_array(&items),
            _ => tokens(s),
        },
        _ => Vec::new(),
    }
}

fn tokens_of_array(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .flat_map(|s| tokens(&s))
        .collect()
}

fn tokens(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_string).collect()
}

const SEASON_PREFIX: &str = "temporada";

/// Strips any leading "Temporada " (case-insensitive) and trims.
///
/// Returns `None` when nothing remains. Applying it to its own output is a
/// no-op.
pub fn normalize_season(label: &str) -> Option<String> {
    let mut rest = label.trim();
    loop {
        let Some(head) = rest.get(..SEASON_PREFIX.len()) else {
            break;
        };
        let tail = &rest[SEASON_PREFIX.len()..];
        if !head.eq_ignore_ascii_case(SEASON_PREFIX) || !tail.starts_with(char::is_whitespace) {
            break;
        }
        rest = tail.trim_start();
    }
    Some(rest.trim().to_string()).filter(|s| !s.is_empty())
}

/// Parses the timestamp shapes the backend has produced over time.
///
/// Date-only values are taken as midnight UTC. Returns `None` for anything
/// else rather than failing.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    for format in ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}

/// Splits `"MSC ANNA [FA123W]"` into the vessel name and the bracketed
/// voyage.
pub fn split_vessel_voyage(raw: &str) -> (String, Option<String>) {
    let trimmed = raw.trim();
    if let (Some(open), true) = (trimmed.rfind('['), trimmed.ends_with(']')) {
        let inner = trimmed[open + 1..trimmed.len() - 1].trim();
        if !inner.is_empty() {
            return (
                trimmed[..open].trim_end().to_string(),
                Some(inner.to_string()),
            );
        }
    }
    (trimmed.to_string(), None)
}
