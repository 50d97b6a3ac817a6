use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A shipment row exactly as the backend returns it.
///
/// Column names follow the backend schema; English aliases are accepted for
/// hand-written snapshots. Every scalar is read leniently: strings, numbers and
/// booleans become text, anything else becomes `None`. The container column is
/// kept as raw JSON because it has been stored as a string, a JSON-encoded
/// string and an array over time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawShipmentRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, alias = "reference", deserialize_with = "lenient_text")]
    pub ref_asli: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub booking: Option<String>,
    #[serde(default, alias = "carrier", deserialize_with = "lenient_text")]
    pub naviera: Option<String>,
    #[serde(default, alias = "vessel", deserialize_with = "lenient_text")]
    pub nave_inicial: Option<String>,
    #[serde(default, alias = "voyage", deserialize_with = "lenient_text")]
    pub viaje: Option<String>,
    #[serde(default, alias = "origin_port", deserialize_with = "lenient_text")]
    pub pol: Option<String>,
    #[serde(default, alias = "destination_port", deserialize_with = "lenient_text")]
    pub pod: Option<String>,
    #[serde(default, alias = "depot", deserialize_with = "lenient_text")]
    pub deposito: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub shipper: Option<String>,
    #[serde(default, alias = "executive", deserialize_with = "lenient_text")]
    pub ejecutivo: Option<String>,
    #[serde(default, alias = "species", deserialize_with = "lenient_text")]
    pub especie: Option<String>,
    #[serde(default, alias = "temperature", deserialize_with = "lenient_f64")]
    pub temperatura: Option<f64>,
    /// Planned transit time in days
    #[serde(default, alias = "transit_days", deserialize_with = "lenient_f64")]
    pub tt: Option<f64>,
    #[serde(default, alias = "status", deserialize_with = "lenient_text")]
    pub estado: Option<String>,
    #[serde(default, alias = "ingressed_at", deserialize_with = "lenient_text")]
    pub ingresado: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub etd: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub eta: Option<String>,
    #[serde(default, alias = "containers")]
    pub contenedor: Option<Value>,
    #[serde(default, alias = "season", deserialize_with = "lenient_text")]
    pub temporada: Option<String>,
    #[serde(default, alias = "week_ingress", deserialize_with = "lenient_week")]
    pub semana_ingreso: Option<u32>,
    #[serde(default, alias = "week_etd", deserialize_with = "lenient_week")]
    pub semana_zarpe: Option<u32>,
    #[serde(default, alias = "week_eta", deserialize_with = "lenient_week")]
    pub semana_arribo: Option<u32>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub deleted_at: Option<String>,
}

impl RawShipmentRecord {
    /// True when the row carries any soft-delete marker.
    ///
    /// The backend only keeps rows with `deleted_at IS NULL`, so any
    /// non-blank value counts, readable timestamp or not. A literal `false`
    /// is the one marker that means "kept".
    pub fn is_soft_deleted(&self) -> bool {
        self.deleted_at
            .as_deref()
            .map(str::trim)
            .is_some_and(|marker| !marker.is_empty() && !marker.eq_ignore_ascii_case("false"))
    }
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_text))
}

fn lenient_week<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let week = match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|w| u32::try_from(w).ok()),
        Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    Ok(week.filter(|w| (1..=53).contains(w)))
}

pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_delete_marker() {
        let row = |json: &str| serde_json::from_str::<RawShipmentRecord>(json).unwrap();

        assert!(row(r#"{"deleted_at": "2024-02-01T00:00:00Z"}"#).is_soft_deleted());
        assert!(row(r#"{"deleted_at": "2024-02-01 10:00"}"#).is_soft_deleted());
        assert!(row(r#"{"deleted_at": true}"#).is_soft_deleted());
        assert!(!row(r#"{"deleted_at": false}"#).is_soft_deleted());
        assert!(!row(r#"{"deleted_at": "  "}"#).is_soft_deleted());
        assert!(!row(r#"{"deleted_at": null}"#).is_soft_deleted());
        assert!(!row(r#"{}"#).is_soft_deleted());
    }

    #[test]
    fn test_deserialize_backend_row() {
        let json = r#"{
            "id": 42,
            "ref_asli": "A0042",
            "booking": "BK123",
            "naviera": "MSC",
            "pod": "SHANGHAI",
            "estado": "CONFIRMADO",
            "etd": "2024-01-10",
            "contenedor": "[\"MSCU1234567\", \"MSCU7654321\"]",
            "temporada": "Temporada 2024-2025",
            "semana_zarpe": "2",
            "temperatura": "-0.5",
            "tt": 32
        }"#;

        let raw: RawShipmentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(raw.id.as_deref(), Some("42"));
        assert_eq!(raw.ref_asli.as_deref(), Some("A0042"));
        assert_eq!(raw.naviera.as_deref(), Some("MSC"));
        assert_eq!(raw.semana_zarpe, Some(2));
        assert_eq!(raw.temperatura, Some(-0.5));
        assert_eq!(raw.tt, Some(32.0));
        assert!(matches!(raw.contenedor, Some(Value::String(_))));
    }

    #[test]
    fn test_english_aliases() {
        let json = r#"{"reference": "R1", "destination_port": "ROTTERDAM", "status": "CANCELADO", "containers": ["A", "B"]}"#;
        let raw: RawShipmentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(raw.ref_asli.as_deref(), Some("R1"));
        assert_eq!(raw.pod.as_deref(), Some("ROTTERDAM"));
        assert_eq!(raw.estado.as_deref(), Some("CANCELADO"));
        assert!(matches!(raw.contenedor, Some(Value::Array(_))));
    }

    #[test]
    fn test_unexpected_shapes_become_none() {
        let json = r#"{"ref_asli": {"nested": true}, "pod": [1, 2], "semana_ingreso": "week 3", "etd": null}"#;
        let raw: RawShipmentRecord = serde_json::from_str(json).unwrap();
        assert!(raw.ref_asli.is_none());
        assert!(raw.pod.is_none());
        assert!(raw.semana_ingreso.is_none());
        assert!(raw.etd.is_none());
    }

    #[test]
    fn test_week_out_of_range_dropped() {
        let raw: RawShipmentRecord =
            serde_json::from_str(r#"{"semana_arribo": 60, "semana_ingreso": 0}"#).unwrap();
        assert!(raw.semana_arribo.is_none());
        assert!(raw.semana_ingreso.is_none());
    }

    #[test]
    fn test_unknown_columns_ignored() {
        let raw: RawShipmentRecord =
            serde_json::from_str(r#"{"ref_asli": "A1", "co2": 5, "flete": "PREPAID"}"#).unwrap();
        assert_eq!(raw.ref_asli.as_deref(), Some("A1"));
    }
}
