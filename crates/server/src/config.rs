//! Server configuration from the environment.

use crate::error::ServerError;
use classifier_facade::DEFAULT_MODEL_PATH;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Environment variable naming the model artifact.
pub const MODEL_PATH_VAR: &str = "EXOVET_MODEL_PATH";

/// Listen address and artifact location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT` and `EXOVET_MODEL_PATH`, falling back to defaults.
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ServerError::InvalidPort(raw.clone()))?,
            None => defaults.port,
        };
        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            model_path: lookup(MODEL_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ServerError::InvalidAddress(raw))
    }
}
