//! Server Configuration
//!
//! JSON configuration loaded at startup and handed to the server by
//! value; there is no ambient configuration state.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Which store backs the resources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-memory, lost on restart
    #[default]
    Memory,
    /// One JSON file per record under `data_dir`
    Disk,
}

/// One resource bound at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Resource name; becomes the route segment and store namespace
    pub name: String,

    /// API version (default: 1)
    #[serde(default = "default_version")]
    pub version: u32,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "127.0.0.1")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Store backend (default: memory)
    #[serde(default)]
    pub store: StoreBackend,

    /// Root directory for the disk store (default: "./data")
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Resources to bind (default: a single `post` resource at v1)
    #[serde(default = "default_resources")]
    pub resources: Vec<ResourceConfig>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_version() -> u32 {
    1
}

fn default_resources() -> Vec<ResourceConfig> {
    vec![ResourceConfig {
        name: "post".to_string(),
        version: 1,
    }]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            store: StoreBackend::default(),
            data_dir: default_data_dir(),
            resources: default_resources(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write this configuration to a JSON file
    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.resources.len(), 1);
        assert_eq!(config.resources[0].name, "post");
        assert_eq!(config.resources[0].version, 1);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 9000,
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ServerConfig =
            serde_json::from_str(r#"{"port": 3000, "store": "disk"}"#).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.store, StoreBackend::Disk);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.resources[0].name, "post");
    }

    #[test]
    fn test_resource_version_defaults_to_one() {
        let config: ServerConfig =
            serde_json::from_str(r#"{"resources": [{"name": "note"}]}"#).unwrap();

        assert_eq!(config.resources[0].version, 1);
    }

    #[test]
    fn test_write_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("restash.json");

        let config = ServerConfig {
            port: 4242,
            ..Default::default()
        };
        config.write(&path).unwrap();

        let loaded = ServerConfig::load(&path).unwrap();
        assert_eq!(loaded.port, 4242);
        assert_eq!(loaded.host, config.host);
    }
}
