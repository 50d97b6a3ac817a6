use crate::ports::outbound::{ShipmentRepository, VesselPositionRepository};
use crate::shared::error::AtlasError;
use crate::shared::file_guard::{inspect_input_file, MAX_SNAPSHOT_SIZE};
use crate::shared::Result;
use crate::shipment_tracking::domain::{RawShipmentRecord, VesselPosition, VesselTrackPoint};
use async_trait::async_trait;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Accepted top-level shapes of a shipment snapshot.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotDocument {
    Rows(Vec<RawShipmentRecord>),
    Wrapped { records: Vec<RawShipmentRecord> },
}

/// Accepted top-level shapes of a positions file.
#[derive(Deserialize)]
#[serde(untagged)]
enum PositionsDocument {
    Positions(Vec<VesselPosition>),
    Wrapped {
        #[serde(default)]
        positions: Vec<VesselPosition>,
        #[serde(default)]
        history: Vec<VesselTrackPoint>,
    },
}

fn read_guarded(path: &Path, description: &str) -> Result<String> {
    if matches!(fs::symlink_metadata(path), Err(e) if e.kind() == ErrorKind::NotFound) {
        return Err(AtlasError::SnapshotNotFound {
            path: path.to_path_buf(),
            suggestion: format!(
                "Export the {} to JSON first, or pass --backend-url to read them live",
                description
            ),
        }
        .into());
    }

    inspect_input_file(path, description, MAX_SNAPSHOT_SIZE)?;
    fs::read_to_string(path).map_err(|e| {
        AtlasError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    })
}

/// JsonSnapshotReader adapter reading shipment rows from a JSON export
///
/// The file holds either an array of rows or an object with a `records`
/// array. Soft-deleted rows are passed through; the normalizer drops and
/// counts them.
pub struct JsonSnapshotReader {
    path: PathBuf,
}

impl JsonSnapshotReader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn parse(&self, content: &str) -> Result<Vec<RawShipmentRecord>> {
        let document: SnapshotDocument =
            serde_json::from_str(content).map_err(|e| AtlasError::SnapshotParseError {
                path: self.path.clone(),
                details: e.to_string(),
            })?;
        Ok(match document {
            SnapshotDocument::Rows(rows) => rows,
            SnapshotDocument::Wrapped { records } => records,
        })
    }
}

#[async_trait]
impl ShipmentRepository for JsonSnapshotReader {
    async fn fetch_shipments(&self) -> Result<Vec<RawShipmentRecord>> {
        let content = read_guarded(&self.path, "shipment records")?;
        self.parse(&content)
    }
}

/// JsonPositionsFile adapter serving vessel positions from a JSON file
///
/// The file holds either an array of positions or an object with
/// `positions` and `history` arrays. It is re-read on every call, so an
/// external process can keep it current while the tracker polls.
pub struct JsonPositionsFile {
    path: PathBuf,
}

impl JsonPositionsFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn load(&self) -> Result<(Vec<VesselPosition>, Vec<VesselTrackPoint>)> {
        let content = read_guarded(&self.path, "vessel positions")?;
        let document: PositionsDocument =
            serde_json::from_str(&content).map_err(|e| AtlasError::FileReadError {
                path: self.path.clone(),
                details: format!("Invalid positions JSON: {}", e),
            })?;
        Ok(match document {
            PositionsDocument::Positions(positions) => (positions, Vec::new()),
            PositionsDocument::Wrapped { positions, history } => (positions, history),
        })
    }
}

fn is_wanted(name: &str, vessel_names: &[String]) -> bool {
    vessel_names.iter().any(|wanted| wanted.trim() == name.trim())
}

#[async_trait]
impl VesselPositionRepository for JsonPositionsFile {
    async fn fetch_positions(&self, vessel_names: &[String]) -> Result<Vec<VesselPosition>> {
        let (positions, _) = self.load()?;
        Ok(positions
            .into_iter()
            .filter(|p| is_wanted(&p.vessel_name, vessel_names))
            .collect())
    }

    async fn fetch_track_history(
        &self,
        vessel_names: &[String],
    ) -> Result<Vec<VesselTrackPoint>> {
        let (_, mut history) = self.load()?;
        history.retain(|p| is_wanted(&p.vessel_name, vessel_names));
        history.sort_by(|a, b| a.position_at.cmp(&b.position_at));
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_reads_bare_array() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "records.json",
            r#"[{"ref_asli": "A1", "pod": "SHANGHAI"}, {"ref_asli": "A2", "deleted_at": "2024-01-01"}]"#,
        );

        let rows = JsonSnapshotReader::new(path).fetch_shipments().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].deleted_at.as_deref(), Some("2024-01-01"));
    }

    #[tokio::test]
    async fn test_reads_wrapped_records() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "records.json", r#"{"records": [{"ref_asli": "A1"}]}"#);

        let rows = JsonSnapshotReader::new(path).fetch_shipments().await.unwrap();
        assert_eq!(rows[0].ref_asli.as_deref(), Some("A1"));
    }

    #[tokio::test]
    async fn test_missing_snapshot() {
        let err = JsonSnapshotReader::new(PathBuf::from("/nonexistent/records.json"))
            .fetch_shipments()
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Shipment snapshot not found"));
        assert!(message.contains("💡 Hint:"));
    }

    #[tokio::test]
    async fn test_invalid_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "records.json", r#"{"rows": 3}"#);

        let err = JsonSnapshotReader::new(path).fetch_shipments().await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse shipment snapshot"));
    }

    #[tokio::test]
    async fn test_positions_file_filters_by_name() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "positions.json",
            r#"{
                "positions": [
                    {"vessel_name": "MSC ANNA", "last_lat": -33.0, "last_lon": -71.6},
                    {"vessel_name": "OTHER", "last_lat": 1.0, "last_lon": 1.0}
                ],
                "history": [
                    {"vessel_name": "MSC ANNA", "lat": -30.0, "lon": -72.0, "position_at": "2024-05-02T00:00:00Z"},
                    {"vessel_name": "MSC ANNA", "lat": -31.0, "lon": -72.0, "position_at": "2024-05-01T00:00:00Z"},
                    {"vessel_name": "OTHER", "lat": 0.0, "lon": 0.0, "position_at": "2024-05-01T00:00:00Z"}
                ]
            }"#,
        );
        let source = JsonPositionsFile::new(path);
        let names = vec!["MSC ANNA".to_string()];

        let positions = source.fetch_positions(&names).await.unwrap();
        assert_eq!(positions.len(), 1);

        let history = source.fetch_track_history(&names).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].position_at, "2024-05-01T00:00:00Z");
    }

    #[tokio::test]
    async fn test_positions_bare_array() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "positions.json", r#"[{"vessel_name": "MSC ANNA"}]"#);
        let source = JsonPositionsFile::new(path);
        let names = vec!["MSC ANNA".to_string()];

        assert_eq!(source.fetch_positions(&names).await.unwrap().len(), 1);
        assert!(source.fetch_track_history(&names).await.unwrap().is_empty());
    }
}
