//! Server configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

use kyc_utils::LogFormat;

use crate::RpcError;

/// Configuration for the KYC server.
///
/// Can be loaded from a TOML file via [`ServerConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: IpAddr,

    /// HTTP port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Clear a challenge once it has been redeemed successfully.
    #[serde(default)]
    pub consume_on_success: bool,

    /// Echo the issued code in the structured-data issue response.
    #[serde(default = "default_true")]
    pub expose_code_hint: bool,

    /// Pre-register the sandbox identities at startup.
    #[serde(default = "default_true")]
    pub seed_sandbox: bool,

    /// Attach a permissive CORS layer.
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_listen_addr() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16 {
    5001
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, RpcError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| RpcError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, RpcError> {
        toml::from_str(s).map_err(|e| RpcError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, RpcError> {
        toml::to_string_pretty(self).map_err(|e| RpcError::Config(e.to_string()))
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.listen_addr, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            consume_on_success: false,
            expose_code_hint: default_true(),
            seed_sandbox: default_true(),
            enable_cors: default_true(),
        }
    }
}
