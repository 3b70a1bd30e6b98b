//! Process configuration, read once from the environment at start-up.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const BIND_ADDR_VAR: &str = "EMBER_BIND_ADDR";
pub const STORE_VAR: &str = "EMBER_STORE";
pub const REQUEST_TIMEOUT_VAR: &str = "EMBER_REQUEST_TIMEOUT_MS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("EMBER_BIND_ADDR: invalid socket address '{value}': {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("EMBER_STORE: unknown store '{0}' (expected 'memory' or 'unimplemented')")]
    Store(String),

    #[error("EMBER_REQUEST_TIMEOUT_MS: invalid timeout '{value}': {source}")]
    RequestTimeout {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("EMBER_REQUEST_TIMEOUT_MS: timeout must be greater than zero")]
    ZeroTimeout,
}

/// Which repository backend the composition root wires in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Process-local storage (dev/test).
    #[default]
    InMemory,
    /// No storage; every create fails with a downstream failure.
    Unimplemented,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in_memory" | "in-memory" => Ok(Self::InMemory),
            "unimplemented" | "none" => Ok(Self::Unimplemented),
            other => Err(ConfigError::Store(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
    /// Requests still running after this long have their cancellation token fired.
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            store: StoreBackend::default(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (unset keys use defaults).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|source| ConfigError::BindAddr {
            value: bind_raw.clone(),
            source,
        })?;

        let store = match lookup(STORE_VAR) {
            Some(v) => v.parse()?,
            None => {
                tracing::info!("{STORE_VAR} not set; using in-memory store");
                StoreBackend::InMemory
            }
        };

        let request_timeout = match lookup(REQUEST_TIMEOUT_VAR) {
            Some(v) => {
                let ms: u64 = v.trim().parse().map_err(|source| ConfigError::RequestTimeout {
                    value: v.clone(),
                    source,
                })?;
                if ms == 0 {
                    return Err(ConfigError::ZeroTimeout);
                }
                Duration::from_millis(ms)
            }
            None => Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        };

        Ok(Self {
            bind_addr,
            store,
            request_timeout,
        })
    }
}
