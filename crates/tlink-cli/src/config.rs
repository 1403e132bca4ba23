//! CLI configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Get the config file path (`TLINK_CONFIG` overrides the default location)
pub fn config_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os("TLINK_CONFIG") {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tlink")
        .join("config.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Composition table file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<PathBuf>,

    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Config {
    /// Load the config file, falling back to defaults if it is missing or invalid
    pub fn load() -> Self {
        let path = config_file_path();
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(_) => return Self::default(),
        };

        match toml::from_str(&text) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring invalid config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write the config file, creating its directory if needed
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_file_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string_pretty(self)?)?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["table", "format"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "table" => self.table.as_ref().map(|p| p.display().to_string()),
            "format" => self.format.clone(),
            _ => None,
        }
    }

    pub fn unset(&mut self, key: &str) {
        match key {
            "table" => self.table = None,
            "format" => self.format = None,
            _ => {}
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "table" => self.table = Some(PathBuf::from(value)),
            "format" => match value {
                "text" | "json" => self.format = Some(value.to_string()),
                _ => anyhow::bail!("Invalid format: {} (expected text or json)", value),
            },
            _ => anyhow::bail!(
                "Unknown config key: {}. Available keys: {}",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }
}
