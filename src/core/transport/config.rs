//! Transport configuration types.

use serde::{Deserialize, Serialize};

use super::{TransportError, TransportResult};

/// Default port for the network transports.
pub const DEFAULT_PORT: u16 = 8888;

/// Default bind address for the network transports.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport (default for MCP).
    #[cfg(feature = "stdio")]
    Stdio,

    /// TCP socket transport with JSON-RPC messages.
    #[cfg(feature = "tcp")]
    Tcp(TcpConfig),

    /// HTTP transport with JSON-RPC over POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// TCP transport configuration.
#[cfg(feature = "tcp")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TcpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,
}

/// HTTP transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Path for JSON-RPC endpoint.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

#[cfg(any(feature = "tcp", feature = "http"))]
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

#[cfg(feature = "http")]
fn default_rpc_path() -> String {
    "/mcp".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            return Self::Stdio;
        }

        #[cfg(all(not(feature = "stdio"), feature = "tcp"))]
        {
            return Self::Tcp(TcpConfig::default());
        }

        #[cfg(all(not(feature = "stdio"), not(feature = "tcp"), feature = "http"))]
        {
            return Self::Http(HttpConfig::default());
        }

        #[cfg(not(any(feature = "stdio", feature = "tcp", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio, tcp, or http");
        }
    }
}

#[cfg(feature = "tcp")]
impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: default_host(),
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: default_host(),
            rpc_path: default_rpc_path(),
            enable_cors: default_cors(),
        }
    }
}

impl TransportConfig {
    /// Create a STDIO transport config.
    #[cfg(feature = "stdio")]
    pub fn stdio() -> Self {
        Self::Stdio
    }

    /// Create a TCP transport config.
    #[cfg(feature = "tcp")]
    pub fn tcp(port: u16, host: impl Into<String>) -> Self {
        Self::Tcp(TcpConfig {
            port,
            host: host.into(),
        })
    }

    /// Create an HTTP transport config.
    #[cfg(feature = "http")]
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Build a transport config from the command-line selection.
    ///
    /// `kind` is one of `stdio`, `tcp` or `http` (case-insensitive); the
    /// network transports bind to `host:port`. Selecting a transport whose
    /// feature was not compiled in is an error.
    pub fn from_cli(kind: &str, host: &str, port: u16) -> TransportResult<Self> {
        // Unused when only stdio is compiled in.
        let _ = (host, port);

        match kind.to_lowercase().as_str() {
            #[cfg(feature = "stdio")]
            "stdio" => Ok(Self::Stdio),
            #[cfg(feature = "tcp")]
            "tcp" => Ok(Self::tcp(port, host)),
            #[cfg(feature = "http")]
            "http" => Ok(Self::http(port, host)),
            other => Err(TransportError::unsupported(other)),
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "tcp")]
            Self::Tcp(cfg) => format!("TCP on {}:{}", cfg.host, cfg.port),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }

    /// Check if this transport is the standard STDIO mode.
    pub fn is_stdio(&self) -> bool {
        #[cfg(feature = "stdio")]
        {
            matches!(self, Self::Stdio)
        }
        #[cfg(not(feature = "stdio"))]
        {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "stdio")]
    #[test]
    fn test_default_is_stdio() {
        assert!(TransportConfig::default().is_stdio());
        assert!(TransportConfig::from_cli("STDIO", DEFAULT_HOST, DEFAULT_PORT)
            .unwrap()
            .is_stdio());
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_from_cli_uses_port() {
        let config = TransportConfig::from_cli("http", "0.0.0.0", 9999).unwrap();
        assert_eq!(config.description(), "HTTP on 0.0.0.0:9999/mcp");
        assert!(!config.is_stdio());
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_default_port() {
        assert_eq!(HttpConfig::default().port, 8888);
    }

    #[test]
    fn test_unknown_transport_rejected() {
        let err = TransportConfig::from_cli("carrier-pigeon", DEFAULT_HOST, DEFAULT_PORT)
            .unwrap_err();
        assert!(err.to_string().contains("carrier-pigeon"));
    }
}
