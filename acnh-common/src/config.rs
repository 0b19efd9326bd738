//! Client configuration loading and validation
//!
//! Configuration is an explicit value handed to the catalog client at
//! construction. There is no process-wide state and no environment variable
//! lookup; a TOML file is the only external source.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Root of the remote catalog service
pub const DEFAULT_BASE_URL: &str = "https://acnhapi.com";
/// API version substituted into every request path
pub const DEFAULT_API_VERSION: u32 = 1;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_USER_AGENT: &str = "acnh-catalog/0.1.0 (https://github.com/acnh/acnh-catalog)";

/// Catalog client configuration
///
/// Every key is optional in TOML; missing keys take the compiled defaults.
///
/// ```toml
/// base_url = "https://acnhapi.com"
/// api_version = 1
/// timeout_secs = 30
/// connect_timeout_secs = 5
/// user_agent = "my-app/1.0"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Service root, without the version segment
    pub base_url: String,
    /// Value of the `{apiVersion}` path parameter
    pub api_version: u32,
    /// Total request timeout applied by the HTTP transport
    pub timeout_secs: u64,
    /// Connection establishment timeout applied by the HTTP transport
    pub connect_timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at a different service root (test servers, mirrors)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Load configuration from a TOML file
    ///
    /// A missing file is not an error: a warning is logged and defaults are
    /// returned. A file that exists but cannot be read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(
                path = %path.display(),
                "Config file not found, using compiled defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), base_url = %config.base_url, "Loaded client config");
        Ok(config)
    }

    /// Load configuration from the platform config directory
    ///
    /// Falls back to defaults when the platform has no config directory or
    /// the file is absent.
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) => Self::load(&path),
            None => {
                warn!("Could not determine config directory, using compiled defaults");
                Ok(Self::default())
            }
        }
    }

    /// Check that the configuration can produce a working transport
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "base_url must start with http:// or https:// (got {:?})",
                self.base_url
            )));
        }
        if self.api_version == 0 {
            return Err(Error::Config("api_version must be at least 1".to_string()));
        }
        if self.timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(Error::Config("timeouts must be greater than zero".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// `<config dir>/acnh/config.toml`, e.g. `~/.config/acnh/config.toml` on Linux
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("acnh").join("config.toml"))
}
