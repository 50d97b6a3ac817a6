//! Configuration file support for shipment-atlas.
//!
//! Provides YAML-based configuration through `shipment-atlas.config.yml`
//! files, including data structures, file loading, validation and the merge
//! with command-line arguments.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::application::dto::OutputFormat;
use crate::application::use_cases::{DASHBOARD_POLL_INTERVAL, VESSEL_DETAIL_POLL_INTERVAL};
use crate::cli::Args;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "shipment-atlas.config.yml";

/// Environment variable holding the backend API key unless the config
/// names another one.
pub const DEFAULT_API_KEY_ENV: &str = "SHIPMENT_ATLAS_API_KEY";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<OutputFormat>,
    pub backend_url: Option<String>,
    /// Name of the environment variable holding the API key
    pub api_key_env: Option<String>,
    pub season: Option<String>,
    pub clients: Option<Vec<String>>,
    pub executive: Option<String>,
    pub dashboard_poll_seconds: Option<u64>,
    pub vessel_detail_poll_seconds: Option<u64>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref clients) = config.clients {
        for (i, client) in clients.iter().enumerate() {
            if client.trim().is_empty() {
                bail!(
                    "Invalid config: clients[{}] must not be empty.\n\n\
                     💡 Hint: List client names exactly as they appear in the shipment records.",
                    i
                );
            }
        }
    }

    for (name, value) in [
        ("dashboard_poll_seconds", config.dashboard_poll_seconds),
        ("vessel_detail_poll_seconds", config.vessel_detail_poll_seconds),
    ] {
        if value == Some(0) {
            bail!(
                "Invalid config: {} must be greater than zero.\n\n\
                 💡 Hint: Remove the field to use the default interval.",
                name
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Effective settings after merging CLI > config file > defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub format: OutputFormat,
    pub backend_url: Option<String>,
    pub api_key_env: String,
    pub season: Option<String>,
    pub clients: Vec<String>,
    pub executive: Option<String>,
    pub dashboard_poll_interval: Duration,
    pub vessel_detail_poll_interval: Duration,
}

impl Settings {
    /// Merges command-line arguments over an optional config file.
    pub fn merge(args: &Args, config: Option<&ConfigFile>) -> Self {
        let config_value = |f: fn(&ConfigFile) -> Option<String>| config.and_then(f);

        let clients = if !args.clients.is_empty() {
            args.clients.clone()
        } else {
            config
                .and_then(|c| c.clients.clone())
                .unwrap_or_default()
        };

        Self {
            format: args
                .format
                .or_else(|| config.and_then(|c| c.format))
                .unwrap_or_default(),
            backend_url: args
                .backend_url
                .clone()
                .or_else(|| config_value(|c| c.backend_url.clone())),
            api_key_env: config_value(|c| c.api_key_env.clone())
                .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string()),
            season: args
                .season
                .clone()
                .or_else(|| config_value(|c| c.season.clone())),
            clients,
            executive: args
                .executive
                .clone()
                .or_else(|| config_value(|c| c.executive.clone())),
            dashboard_poll_interval: config
                .and_then(|c| c.dashboard_poll_seconds)
                .map(Duration::from_secs)
                .unwrap_or(DASHBOARD_POLL_INTERVAL),
            vessel_detail_poll_interval: config
                .and_then(|c| c.vessel_detail_poll_seconds)
                .map(Duration::from_secs)
                .unwrap_or(VESSEL_DETAIL_POLL_INTERVAL),
        }
    }

    /// Reads the API key from the configured environment variable, if set.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}
