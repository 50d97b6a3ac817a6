/// End-to-end tests for config file support
use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SNAPSHOT: &str = r#"[
  {"ref_asli": "A1", "shipper": "ACME", "pod": "ROTTERDAM", "estado": "CONFIRMADO",
   "temporada": "2024-2025"},
  {"ref_asli": "A2", "shipper": "OTHER", "pod": "SHANGHAI", "estado": "CONFIRMADO",
   "temporada": "2023-2024"}
]"#;

/// Create a temp directory holding a shipment snapshot
fn setup_project() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let snapshot = dir.path().join("records.json");
    fs::write(&snapshot, SNAPSHOT).unwrap();
    (dir, snapshot)
}

/// Write a config file into the project directory
fn write_config(dir: &Path, content: &str) {
    fs::write(dir.join("shipment-atlas.config.yml"), content).unwrap();
}

/// Write a config file at a custom path
fn write_config_at(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

fn run(dir: &Path, args: &[&str]) -> std::process::Output {
    cargo_bin_cmd!("shipment-atlas")
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

// ============================================================
// Auto-discovery tests
// ============================================================

mod auto_discovery_tests {
    use super::*;

    #[test]
    fn test_auto_discover_config_file() {
        let (dir, _) = setup_project();
        write_config(dir.path(), "format: markdown\n");

        let output = run(dir.path(), &["-i", "records.json"]);

        assert!(output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Auto-discovered config file"));
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("# Shipment Dashboard"));
    }

    #[test]
    fn test_no_config_file_uses_defaults() {
        let (dir, _) = setup_project();

        let output = run(dir.path(), &["-i", "records.json"]);

        assert!(output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(!stderr.contains("Auto-discovered config file"));
        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["counts"]["total_records"], 2);
    }
}

// ============================================================
// Explicit config tests
// ============================================================

mod explicit_config_tests {
    use super::*;

    #[test]
    fn test_explicit_config_path() {
        let (dir, _) = setup_project();
        let config_path = dir.path().join("custom.yml");
        write_config_at(&config_path, "format: markdown\n");

        let output = run(
            dir.path(),
            &["-i", "records.json", "--config", config_path.to_str().unwrap()],
        );

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("# Shipment Dashboard"));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(!stderr.contains("Auto-discovered config file"));
    }

    #[test]
    fn test_explicit_config_not_found() {
        let (dir, _) = setup_project();

        let output = run(
            dir.path(),
            &["-i", "records.json", "-c", "/nonexistent/config.yml"],
        );

        assert!(!output.status.success());
        assert_eq!(output.status.code(), Some(3));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Failed to read config file"));
    }
}

// ============================================================
// Merge tests
// ============================================================

mod merge_tests {
    use super::*;

    #[test]
    fn test_cli_format_overrides_config() {
        let (dir, _) = setup_project();
        write_config(dir.path(), "format: markdown\n");

        let output = run(dir.path(), &["-i", "records.json", "-f", "json"]);

        assert!(output.status.success());
        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["counts"]["total_records"], 2);
    }

    #[test]
    fn test_config_clients_filter() {
        let (dir, _) = setup_project();
        write_config(dir.path(), "clients:\n  - ACME\n");

        let output = run(dir.path(), &["-i", "records.json"]);

        assert!(output.status.success());
        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["selection"]["clients"], serde_json::json!(["ACME"]));
        let destinations = report["destinations"].as_array().unwrap();
        assert_eq!(destinations.len(), 1);
        assert_eq!(destinations[0]["port"], "ROTTERDAM");
    }

    #[test]
    fn test_cli_client_overrides_config_clients() {
        let (dir, _) = setup_project();
        write_config(dir.path(), "clients:\n  - ACME\n");

        let output = run(dir.path(), &["-i", "records.json", "--client", "OTHER"]);

        assert!(output.status.success());
        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["selection"]["clients"], serde_json::json!(["OTHER"]));
    }

    #[test]
    fn test_config_season() {
        let (dir, _) = setup_project();
        write_config(dir.path(), "season: Temporada 2023-2024\n");

        let output = run(dir.path(), &["-i", "records.json"]);

        assert!(output.status.success());
        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["kpis"]["total_bookings"], 1);
        assert_eq!(report["counts"]["total_records"], 2);
    }
}

// ============================================================
// Error handling tests
// ============================================================

mod error_tests {
    use super::*;

    #[test]
    fn test_invalid_yaml() {
        let (dir, _) = setup_project();
        write_config(dir.path(), "format: [invalid\n");

        let output = run(dir.path(), &["-i", "records.json"]);

        assert_eq!(output.status.code(), Some(3));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Failed to parse config file"));
    }

    #[test]
    fn test_empty_client_rejected() {
        let (dir, _) = setup_project();
        write_config(dir.path(), "clients:\n  - \"  \"\n");

        let output = run(dir.path(), &["-i", "records.json"]);

        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("clients[0] must not be empty"));
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let (dir, _) = setup_project();
        write_config(dir.path(), "dashboard_poll_seconds: 0\n");

        let output = run(dir.path(), &["-i", "records.json"]);

        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("dashboard_poll_seconds must be greater than zero"));
    }

    #[test]
    fn test_unknown_field_warning() {
        let (dir, _) = setup_project();
        write_config(dir.path(), "format: json\nrefresh_rate: 5\n");

        let output = run(dir.path(), &["-i", "records.json"]);

        assert!(output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Unknown config field 'refresh_rate'"));
    }
}
