//! Configuration management for busybeaver.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{BusybeaverError, Result};

/// Command-line arguments for busybeaver
#[derive(Parser, Debug)]
#[command(name = "busybeaver")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the mesh result dataset (JSON) to serve
    pub mesh_file: PathBuf,

    /// Host address to bind to
    #[arg(short = 'H', long, env = "BUSYBEAVER_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "BUSYBEAVER_PORT")]
    pub port: Option<u16>,

    /// Number of worker threads
    #[arg(short, long, env = "BUSYBEAVER_WORKERS")]
    pub workers: Option<usize>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "BUSYBEAVER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Dataset item to interpolate
    #[arg(short, long, env = "BUSYBEAVER_ITEM")]
    pub item: Option<String>,

    /// Time step of the item to interpolate
    #[arg(short, long, env = "BUSYBEAVER_TIME_INDEX")]
    pub time_index: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "BUSYBEAVER_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads (None = number of CPU cores)
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Interpolation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Item of the mesh dataset to interpolate
    #[serde(default = "default_item")]
    pub item: String,

    /// Time step to read the item at
    #[serde(default)]
    pub time_index: usize,

    /// Interpolate grids across worker threads
    #[serde(default = "default_parallel_grid")]
    pub parallel_grid: bool,

    /// Largest grid accepted by a single request
    #[serde(default = "default_max_grid_points")]
    pub max_grid_points: usize,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Data configuration
    #[serde(default)]
    pub data: DataConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, PathBuf)> {
        let args = Args::parse();
        Self::from_args(args)
    }

    /// Build the configuration from parsed arguments
    pub fn from_args(args: Args) -> Result<(Self, PathBuf)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        if let Some(host) = args.host {
            config.server.host = host;
        }
        if let Some(port) = args.port {
            config.server.port = port;
        }
        if args.workers.is_some() {
            config.server.workers = args.workers;
        }
        if let Some(item) = args.item {
            config.data.item = item;
        }
        if let Some(time_index) = args.time_index {
            config.data.time_index = time_index;
        }
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }

        Ok((config, args.mesh_file))
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.server.host = other.server.host;
        self.server.port = other.server.port;
        if other.server.workers.is_some() {
            self.server.workers = other.server.workers;
        }
        self.data = other.data;
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(BusybeaverError::Config {
                message: "Server host cannot be empty".to_string(),
            });
        }

        // 0 is not a valid port for users
        if self.server.port == 0 {
            return Err(BusybeaverError::Config {
                message: "Server port cannot be 0".to_string(),
            });
        }

        if self.server.workers == Some(0) {
            return Err(BusybeaverError::Config {
                message: "Worker count cannot be 0".to_string(),
            });
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(BusybeaverError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        if self.data.item.is_empty() {
            return Err(BusybeaverError::Config {
                message: "Item name cannot be empty".to_string(),
            });
        }

        if self.data.max_grid_points == 0 {
            return Err(BusybeaverError::Config {
                message: "max_grid_points must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            data: DataConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            item: default_item(),
            time_index: 0,
            parallel_grid: default_parallel_grid(),
            max_grid_points: default_max_grid_points(),
        }
    }
}

// Default value functions for serde
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_item() -> String {
    "Maximum water depth".to_string()
}

fn default_parallel_grid() -> bool {
    true
}

fn default_max_grid_points() -> usize {
    1_000_000
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.data.item, "Maximum water depth");
        assert_eq!(config.data.time_index, 0);
        assert!(config.data.parallel_grid);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_merge() {
        let mut config1 = Config::default();
        let mut config2 = Config::default();

        config2.server.port = 9000;
        config2.server.workers = Some(4);
        config2.data.time_index = 3;

        config1.merge(config2);

        assert_eq!(config1.server.port, 9000);
        assert_eq!(config1.server.workers, Some(4));
        assert_eq!(config1.data.time_index, 3);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"data": {"item": "Current speed"}}"#).unwrap();
        assert_eq!(config.data.item, "Current speed");
        assert_eq!(config.data.max_grid_points, 1_000_000);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_args_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"data": {"item": "Current speed", "time_index": 2}, "log_level": "debug"}"#,
        )
        .unwrap();

        let args = Args::parse_from([
            "busybeaver",
            "mesh.json",
            "--config",
            path.to_str().unwrap(),
            "--time-index",
            "5",
        ]);
        let (config, mesh_file) = Config::from_args(args).unwrap();

        assert_eq!(mesh_file, PathBuf::from("mesh.json"));
        assert_eq!(config.data.item, "Current speed");
        assert_eq!(config.data.time_index, 5);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_file_values_survive_without_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"server": {"host": "0.0.0.0", "port": 9000}, "log_level": "debug"}"#,
        )
        .unwrap();

        let config_path = path.to_str().unwrap();
        let args = Args::parse_from(["busybeaver", "mesh.json", "--config", config_path]);
        let (config, _) = Config::from_args(args).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.log_level, "debug");

        let args = Args::parse_from([
            "busybeaver",
            "mesh.json",
            "--config",
            config_path,
            "--port",
            "9100",
            "--log-level",
            "warn",
        ]);
        let (config, _) = Config::from_args(args).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_args_without_file_use_defaults() {
        let args = Args::parse_from(["busybeaver", "mesh.json"]);
        let (config, _) = Config::from_args(args).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_validation() {
        // Valid config should pass
        let config = Config::default();
        assert!(config.validate().is_ok());

        let mut config = Config::default();
        config.server.host = "".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.workers = Some(0);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.data.item = "".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.data.max_grid_points = 0;
        assert!(config.validate().is_err());
    }
}
