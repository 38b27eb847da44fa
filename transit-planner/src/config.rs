//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default address the server binds to.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Error from reading server configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset
    #[error("{0} is not set")]
    Missing(&'static str),

    /// A variable doesn't parse
    #[error("invalid {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Configuration for the HTTP server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Feed file to load at startup (`TIMETABLE_PATH`).
    pub timetable_path: PathBuf,

    /// Listen address (`BIND_ADDR`).
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let timetable_path = lookup("TIMETABLE_PATH")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing("TIMETABLE_PATH"))?;

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr.parse().map_err(|_| ConfigError::Invalid {
            name: "BIND_ADDR",
            value: bind_addr.clone(),
        })?;

        Ok(Self {
            timetable_path,
            bind_addr,
        })
    }
}
