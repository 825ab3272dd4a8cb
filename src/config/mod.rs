//! Configuration loading and management
//!
//! The service reads one YAML file. Every section has defaults, so an empty
//! file (or no file at all) yields a working mock-mode setup.
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8080
//! mode: upstream
//! upstream:
//!   base_url: https://backend.internal/api
//!   refresh_token: "..."
//! auth:
//!   require_session: true
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::core::error::{AdminResult, ConfigError};

/// Where records come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Seeded in-memory collections generated at start-up
    #[default]
    Mock,
    /// Forward every store call to the upstream backend
    Upstream,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Mock => f.write_str("mock"),
            Mode::Upstream => f.write_str("upstream"),
        }
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(Mode::Mock),
            "upstream" => Ok(Mode::Upstream),
            other => Err(ConfigError::InvalidValue {
                field: "mode".to_string(),
                value: other.to_string(),
                message: "expected 'mock' or 'upstream'".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Upstream backend connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            access_token: None,
            refresh_token: None,
            timeout_secs: 10,
        }
    }
}

/// Mock dataset generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    pub seed: u64,
    /// Last day covered by generated settlements
    pub anchor_date: NaiveDate,
    /// Number of days of settlements, ending at `anchor_date`
    pub days: u32,
    pub users: usize,
    pub transactions: usize,
    pub revenue_details: usize,
    pub notifications: usize,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            anchor_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap_or_default(),
            days: 120,
            users: 120,
            transactions: 300,
            revenue_details: 400,
            notifications: 30,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Require an `accessToken` cookie on `/api/*`
    pub require_session: bool,
    /// Set the `Secure` attribute on issued cookies
    pub cookie_secure: bool,
}

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub server: ServerConfig,
    pub mode: Mode,
    pub upstream: UpstreamConfig,
    pub mock: MockConfig,
    pub auth: AuthConfig,
}

impl AdminConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> AdminResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> AdminResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load the file if it exists and apply environment overrides
    ///
    /// Call [`AdminConfig::validate`] once every override is in place.
    pub fn load(path: impl AsRef<Path>) -> AdminResult<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::from_yaml_file(path)?
        } else {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `BOUQUET_*` overrides read through `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> AdminResult<()> {
        if let Some(host) = lookup("BOUQUET_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("BOUQUET_PORT") {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "server.port".to_string(),
                value: port.clone(),
                message: "expected a port number".to_string(),
            })?;
        }
        if let Some(mode) = lookup("BOUQUET_MODE") {
            self.mode = mode.parse()?;
        }
        if let Some(url) = lookup("BOUQUET_UPSTREAM_URL") {
            self.upstream.base_url = url;
        }
        Ok(())
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> AdminResult<()> {
        if self.mode == Mode::Upstream && self.upstream.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "upstream.base_url".to_string(),
                value: String::new(),
                message: "required in upstream mode".to_string(),
            }
            .into());
        }
        if self.mock.days == 0 {
            return Err(ConfigError::InvalidValue {
                field: "mock.days".to_string(),
                value: "0".to_string(),
                message: "must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// `host:port` the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_yaml_is_default() {
        let config = AdminConfig::from_yaml_str("").unwrap();
        assert_eq!(config, AdminConfig::default());
        assert_eq!(config.mode, Mode::Mock);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.mock.seed, 42);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = AdminConfig::from_yaml_str(
            r#"
server:
  port: 8080
mode: upstream
upstream:
  base_url: http://backend.local
mock:
  days: 30
"#,
        )
        .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.mode, Mode::Upstream);
        assert_eq!(config.upstream.timeout_secs, 10);
        assert_eq!(config.mock.days, 30);
        assert_eq!(config.mock.users, 120);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = AdminConfig::from_yaml_str("server: [").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_upstream_mode_requires_base_url() {
        let config = AdminConfig {
            mode: Mode::Upstream,
            ..AdminConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("upstream.base_url"));
    }

    #[test]
    fn test_zero_days_rejected() {
        let mut config = AdminConfig::default();
        config.mock.days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("BOUQUET_HOST", "0.0.0.0"),
            ("BOUQUET_PORT", "9000"),
            ("BOUQUET_MODE", "Upstream"),
            ("BOUQUET_UPSTREAM_URL", "http://backend.local"),
        ]);
        let mut config = AdminConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.mode, Mode::Upstream);
        assert_eq!(config.upstream.base_url, "http://backend.local");
    }

    #[test]
    fn test_malformed_override_is_rejected() {
        let mut config = AdminConfig::default();
        let result = config.apply_overrides(|key| (key == "BOUQUET_PORT").then(|| "eighty".to_string()));
        assert!(result.is_err());

        let result = config.apply_overrides(|key| (key == "BOUQUET_MODE").then(|| "proxy".to_string()));
        assert!(result.is_err());
    }
}
