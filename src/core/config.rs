//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (optionally via a `.env` file) and overridden by
//! command-line flags in `main`.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default Obsidian Local REST API port (HTTP).
pub const DEFAULT_REST_API_URL: &str = "http://127.0.0.1:27123";

/// Default Omnisearch HTTP server port.
pub const DEFAULT_OMNI_SEARCH_URL: &str = "http://127.0.0.1:51361";

/// Default timeout for a single outbound HTTP call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Obsidian endpoints and credentials.
    pub obsidian: ObsidianConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Endpoints and credentials for the Obsidian services.
///
/// Immutable once the server is built; the client receives a copy at
/// construction time.
#[derive(Clone, Serialize, Deserialize)]
pub struct ObsidianConfig {
    /// Bearer token for the Local REST API.
    pub api_key: Option<String>,

    /// Base URL of the Local REST API (e.g. `http://127.0.0.1:27123`).
    pub base_url: Option<String>,

    /// Base URL of the Omnisearch HTTP server (e.g. `http://127.0.0.1:51361`).
    pub omni_search_base_url: Option<String>,

    /// Timeout applied to every outbound request, in seconds.
    pub timeout_secs: u64,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for ObsidianConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObsidianConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("omni_search_base_url", &self.omni_search_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ObsidianConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            omni_search_base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ObsidianConfig {
    /// Build a config pointing at explicit endpoints (used by tests and embedders).
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        omni_search_base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: Some(api_key.into()),
            base_url: Some(base_url.into()),
            omni_search_base_url: Some(omni_search_base_url.into()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Check that every value needed to reach both services is present.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.api_key.as_deref().is_none_or(str::is_empty) {
            missing.push("OBSIDIAN_API_KEY");
        }
        if self.base_url.as_deref().is_none_or(str::is_empty) {
            missing.push("OBSIDIAN_BASE_URL");
        }
        if self.omni_search_base_url.as_deref().is_none_or(str::is_empty) {
            missing.push("OBSIDIAN_OMNI_SEARCH_BASE_URL");
        }
        if !missing.is_empty() {
            return Err(Error::config(format!(
                "missing required environment variable(s): {}",
                missing.join(", ")
            )));
        }

        for (name, url) in [
            ("OBSIDIAN_BASE_URL", &self.base_url),
            ("OBSIDIAN_OMNI_SEARCH_BASE_URL", &self.omni_search_base_url),
        ] {
            if let Some(url) = url {
                reqwest::Url::parse(url)
                    .map_err(|e| Error::config(format!("{} is not a valid URL ({}): {}", name, url, e)))?;
            }
        }

        if self.timeout_secs == 0 {
            return Err(Error::config("OBSIDIAN_TIMEOUT_SECS must be greater than zero"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "obsidian-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            obsidian: ObsidianConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`); Obsidian settings use `OBSIDIAN_API_KEY`,
    /// `OBSIDIAN_BASE_URL`, `OBSIDIAN_OMNI_SEARCH_BASE_URL` and
    /// `OBSIDIAN_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(api_key) = std::env::var("OBSIDIAN_API_KEY") {
            config.obsidian.api_key = Some(api_key);
            info!("Obsidian API key loaded from environment");
        } else {
            warn!("OBSIDIAN_API_KEY not set - REST API calls will be rejected");
        }

        if let Ok(base_url) = std::env::var("OBSIDIAN_BASE_URL") {
            config.obsidian.base_url = Some(base_url);
        } else {
            warn!(
                "OBSIDIAN_BASE_URL not set (the Local REST API usually listens on {})",
                DEFAULT_REST_API_URL
            );
        }

        if let Ok(omni_url) = std::env::var("OBSIDIAN_OMNI_SEARCH_BASE_URL") {
            config.obsidian.omni_search_base_url = Some(omni_url);
        } else {
            warn!(
                "OBSIDIAN_OMNI_SEARCH_BASE_URL not set (Omnisearch usually listens on {})",
                DEFAULT_OMNI_SEARCH_URL
            );
        }

        if let Ok(timeout) = std::env::var("OBSIDIAN_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.obsidian.timeout_secs = secs,
                Err(_) => warn!(
                    "Ignoring invalid OBSIDIAN_TIMEOUT_SECS '{}', using {}s",
                    timeout, DEFAULT_TIMEOUT_SECS
                ),
            }
        }

        config
    }

    /// Validate the configuration before the server starts.
    pub fn validate(&self) -> Result<()> {
        self.obsidian.validate()
    }
}
