//! Configuration file management for ais-decode.
//!
//! Reads/writes `~/.ais-decode/config.yaml` with router channel sizing,
//! the TCP feed address, and dashboard settings. Missing keys fall back
//! to their defaults, so a partial file is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{AisError, Result};

/// Full configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub router: RouterConfig,
    pub feed: FeedConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Capacity of each bounded channel around the router.
    pub channel_capacity: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// `host:port` of a TCP server emitting raw NMEA lines.
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub host: String,
    pub port: u16,
    /// Seconds between position snapshots.
    pub snapshot_interval_secs: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        RouterConfig {
            channel_capacity: 8192,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            host: "127.0.0.1".into(),
            port: 8080,
            snapshot_interval_secs: 5,
        }
    }
}

/// Get the config directory path (`~/.ais-decode/`).
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ais-decode")
}

/// Get the config file path.
pub fn config_file() -> PathBuf {
    config_dir().join("config.yaml")
}

/// Load config from `~/.ais-decode/config.yaml`.
///
/// Returns the default config if the file doesn't exist or can't be parsed.
pub fn load_config() -> Config {
    let path = config_file();
    if !path.exists() {
        return Config::default();
    }
    match load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            Config::default()
        }
    }
}

/// Load config from an explicit path.
pub fn load_from(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)?;
    parse_config(&text)
}

/// Save config to `~/.ais-decode/config.yaml`.
pub fn save_config(config: &Config) -> Result<PathBuf> {
    let path = config_file();
    save_to(config, &path)?;
    Ok(path)
}

/// Save config to an explicit path, creating parent directories.
pub fn save_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| AisError::Config(e.to_string()))?;
    }
    let text = to_yaml(config)?;
    std::fs::write(path, text).map_err(|e| AisError::Config(e.to_string()))?;
    Ok(())
}

fn parse_config(text: &str) -> Result<Config> {
    // An empty file deserializes as YAML null
    if text.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(text).map_err(|e| AisError::Config(e.to_string()))
}

/// Render config as commented YAML, as written by [`save_to`].
pub fn to_yaml(config: &Config) -> Result<String> {
    let body = serde_yaml::to_string(config).map_err(|e| AisError::Config(e.to_string()))?;
    Ok(format!("# ais-decode configuration\n\n{body}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.router.channel_capacity, 8192);
        assert!(config.feed.address.is_none());
        assert_eq!(config.dashboard.host, "127.0.0.1");
        assert_eq!(config.dashboard.port, 8080);
        assert_eq!(config.dashboard.snapshot_interval_secs, 5);
    }

    #[test]
    fn test_parse_config() {
        let text = r#"
router:
  channel_capacity: 256

feed:
  address: "153.44.253.27:5631"

dashboard:
  host: "0.0.0.0"
  port: 9090
  snapshot_interval_secs: 10
"#;
        let config = parse_config(text).unwrap();
        assert_eq!(config.router.channel_capacity, 256);
        assert_eq!(config.feed.address.as_deref(), Some("153.44.253.27:5631"));
        assert_eq!(config.dashboard.host, "0.0.0.0");
        assert_eq!(config.dashboard.port, 9090);
        assert_eq!(config.dashboard.snapshot_interval_secs, 10);
    }

    #[test]
    fn test_parse_partial_config() {
        let text = "dashboard:\n  port: 3000\n";
        let config = parse_config(text).unwrap();
        assert_eq!(config.dashboard.port, 3000);
        assert_eq!(config.dashboard.host, "127.0.0.1");
        assert_eq!(config.router.channel_capacity, 8192);
    }

    #[test]
    fn test_parse_null_values() {
        let text = "feed:\n  address: ~\n";
        let config = parse_config(text).unwrap();
        assert!(config.feed.address.is_none());
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_invalid() {
        let err = parse_config("dashboard:\n  port: not-a-port\n").unwrap_err();
        assert!(matches!(err, AisError::Config(_)));
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.feed.address = Some("localhost:10110".into());
        config.dashboard.port = 9090;
        save_to(&config, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# ais-decode configuration"));

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, AisError::Io(_)));
    }
}
