//! Configuration types for the Airwave server
//!
//! Loaded from YAML. Every section carries full defaults so the server can
//! start with no config file at all (memory backends, empty data).

use crate::device::DEFAULT_WORKER_TIMEOUT_SECS;
use crate::error::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete server configuration loaded from YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AirwaveConfig {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Track history source
    #[serde(default)]
    pub tracks: TracksConfig,

    /// Broadcast schedule source
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Device registration backend
    #[serde(default)]
    pub devices: DevicesConfig,
}

impl AirwaveConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field requirements
    pub fn validate(&self) -> Result<()> {
        if self.devices.backend == DeviceBackend::Http {
            self.devices.worker_endpoint()?;
        }
        Ok(())
    }
}

// ============================================================================
// Server Config
// ============================================================================

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

// ============================================================================
// Data Source Configs
// ============================================================================

/// Track history source settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TracksConfig {
    /// JSON file with the play history; absent means an empty history
    #[serde(default)]
    pub file: Option<String>,
}

/// Broadcast schedule source settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// YAML file with the weekly schedule; absent means an empty schedule
    #[serde(default)]
    pub file: Option<String>,
}

// ============================================================================
// Devices Config
// ============================================================================

/// Which registry implementation stores push tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceBackend {
    /// Keep tokens in process memory
    #[default]
    Memory,
    /// Forward tokens to the notification worker
    Http,
}

/// Device registration backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicesConfig {
    /// Registry implementation to use
    #[serde(default)]
    pub backend: DeviceBackend,

    /// Base URL of the notification worker (required for the http backend)
    #[serde(default)]
    pub worker_url: Option<String>,

    /// Per-request timeout for worker calls, in seconds
    #[serde(default = "default_worker_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl DevicesConfig {
    /// The worker base URL, parsed; required when the backend is http
    pub fn worker_endpoint(&self) -> Result<Url> {
        let raw = self
            .worker_url
            .as_deref()
            .ok_or_else(|| Error::missing_field("devices.worker_url"))?;
        Url::parse(raw).map_err(|e| Error::InvalidConfigValue {
            field: "devices.worker_url".to_string(),
            message: e.to_string(),
        })
    }

    /// Per-request timeout for worker calls
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for DevicesConfig {
    fn default() -> Self {
        Self {
            backend: DeviceBackend::default(),
            worker_url: None,
            request_timeout_secs: default_worker_timeout_secs(),
        }
    }
}

fn default_worker_timeout_secs() -> u64 {
    DEFAULT_WORKER_TIMEOUT_SECS
}
