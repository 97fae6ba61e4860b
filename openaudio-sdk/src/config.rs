//! Hub configuration
//!
//! Where the appliance lives and how often to poll it. Stored as JSON under
//! the user's config directory:
//!
//! ```json
//! { "host": "192.168.1.50", "scan_interval": 30, "cycle_timeout": 60 }
//! ```

use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SdkError};

pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_CYCLE_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubConfig {
    /// IP address or hostname of the appliance
    pub host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default = "default_scan_interval", with = "seconds")]
    pub scan_interval: Duration,
    /// A poll cycle running longer than this counts as failed
    #[serde(default = "default_cycle_timeout", with = "seconds")]
    pub cycle_timeout: Duration,
}

fn default_scan_interval() -> Duration {
    DEFAULT_SCAN_INTERVAL
}

fn default_cycle_timeout() -> Duration {
    DEFAULT_CYCLE_TIMEOUT
}

mod seconds {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

impl HubConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
            scan_interval: DEFAULT_SCAN_INTERVAL,
            cycle_timeout: DEFAULT_CYCLE_TIMEOUT,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_scan_interval(mut self, interval: Duration) -> Self {
        self.scan_interval = interval;
        self
    }

    pub fn with_cycle_timeout(mut self, timeout: Duration) -> Self {
        self.cycle_timeout = timeout;
        self
    }

    /// `host` or `host:port`, bracketing IPv6 literals when a port is set
    pub fn address(&self) -> String {
        match self.port {
            Some(port) if self.host.contains(':') => format!("[{}]:{}", self.host, port),
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !host_valid(&self.host) {
            return Err(SdkError::CannotConnect(self.host.clone()));
        }
        if self.scan_interval.is_zero() {
            return Err(SdkError::InvalidConfiguration(
                "scan interval must be at least one second".to_string(),
            ));
        }
        if self.cycle_timeout.is_zero() {
            return Err(SdkError::InvalidConfiguration(
                "cycle timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }

    /// `<config_dir>/openaudio/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("openaudio").join("config.json"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| SdkError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        tracing::debug!("Loaded hub config from {}", path.display());
        Ok(config)
    }

    /// Write as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        let io_error = |source: std::io::Error| SdkError::Config {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(io_error)?;
        tracing::debug!("Saved hub config to {}", path.display());
        Ok(())
    }

    pub fn load_default() -> Result<Self> {
        let path = Self::default_path().ok_or_else(|| {
            SdkError::InvalidConfiguration("no user config directory".to_string())
        })?;
        Self::load(&path)
    }
}

/// True for an IP literal or dot-separated labels of ASCII letters, digits
/// and hyphens
pub fn host_valid(host: &str) -> bool {
    if host.parse::<IpAddr>().is_ok() {
        return true;
    }
    host.split('.').all(|label| {
        !label.is_empty()
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

/// Scan interval as typed by a user, in whole seconds
pub fn parse_scan_interval(input: &str) -> Result<Duration> {
    let seconds: i64 = input.trim().parse().map_err(|_| {
        SdkError::InvalidConfiguration(format!("scan interval {:?} is not an integer", input))
    })?;
    if seconds <= 0 {
        return Err(SdkError::InvalidConfiguration(format!(
            "scan interval must be positive, got {}",
            seconds
        )));
    }
    Ok(Duration::from_secs(seconds as u64))
}
