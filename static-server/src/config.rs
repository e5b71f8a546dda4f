//! Configuration Serializer/Deserializer Types

use std::{net::SocketAddr, path::Path};

use actix_static::StaticConfig;
use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

/// Read all server configurations from a config file.
pub fn read_config(path: &Path) -> Result<Vec<ServerConfig>> {
    let s = std::fs::read_to_string(path).context("failed to read config")?;
    let configs: Vec<ServerConfig> = serde_yaml::from_str(&s).context("invalid config")?;
    match configs.is_empty() {
        true => Err(anyhow!("config: {path:?} is empty")),
        false => Ok(configs),
    }
}

/// Server specific configuration settings.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Disable configuration from initialization within server.
    pub disable: bool,
    /// List of configurations for binding server addresses.
    pub listen: Vec<ListenCfg>,
    /// Static file mount served ahead of the built-in routes.
    pub files: StaticConfig,
    /// Request logging toggle.
    ///
    /// Default is true
    pub log_requests: Option<bool>,
}

/// Server listener bindings configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListenCfg {
    /// Port server will bind to.
    pub port: u16,
    /// Host address server will bind to.
    pub host: Option<String>,
}

impl ListenCfg {
    #[inline]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or("0.0.0.0")
    }
    #[inline]
    pub fn address(&self) -> (String, u16) {
        (self.host().to_owned(), self.port)
    }
}

impl From<SocketAddr> for ListenCfg {
    fn from(value: SocketAddr) -> Self {
        Self {
            port: value.port(),
            host: Some(value.ip().to_string()),
        }
    }
}
