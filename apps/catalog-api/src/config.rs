//! Catalog API configuration module.
//!
//! ## Load Order (later overrides earlier)
//! 1. Default values
//! 2. TOML file named by `CATALOG_CONFIG`, if set
//! 3. Environment variables
//!
//! ```toml
//! # catalog.toml
//! bind_addr = "127.0.0.1"
//! port = 8080
//! backend = "redis"
//! redis_url = "redis://127.0.0.1/"
//! seed_demo_data = true
//! ```

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Which store holds the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local; contents are lost on restart.
    #[default]
    Memory,

    /// Redis key-value store at `redis_url`.
    Redis,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Redis => write!(f, "redis"),
        }
    }
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(StoreBackend::Memory),
            "redis" => Ok(StoreBackend::Redis),
            _ => Err(ConfigError::InvalidValue("CATALOG_BACKEND".to_string())),
        }
    }
}

/// Catalog API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Interface to listen on
    pub bind_addr: String,

    /// HTTP port
    pub port: u16,

    /// Storage backend
    pub backend: StoreBackend,

    /// Redis connection string; required when `backend` is redis
    pub redis_url: Option<String>,

    /// Load the demo products at startup
    pub seed_demo_data: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            bind_addr: "0.0.0.0".to_string(),
            port: 5000,
            backend: StoreBackend::Memory,
            redis_url: None,
            seed_demo_data: false,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from the optional file and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("CATALOG_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Reads a TOML file; keys it omits keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading catalog config from file");
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFailed(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// Parses TOML text; keys it omits keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Applies overrides from `lookup`, normally the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("CATALOG_BIND_ADDR") {
            self.bind_addr = addr;
        }

        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?;
        }

        if let Some(backend) = lookup("CATALOG_BACKEND") {
            self.backend = backend.parse()?;
            debug!(backend = %self.backend, "Overriding backend from environment");
        }

        if let Some(url) = lookup("REDIS_URL") {
            self.redis_url = Some(url);
        }

        if let Some(seed) = lookup("CATALOG_SEED_DEMO") {
            self.seed_demo_data = parse_flag(&seed)
                .ok_or_else(|| ConfigError::InvalidValue("CATALOG_SEED_DEMO".to_string()))?;
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend == StoreBackend::Redis && self.redis_url.is_none() {
            return Err(ConfigError::MissingRequired("REDIS_URL".to_string()));
        }

        self.socket_addr()?;
        Ok(())
    }

    /// Address the server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .bind_addr
            .parse()
            .map_err(|_| ConfigError::InvalidValue("CATALOG_BIND_ADDR".to_string()))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Failed to read config file {0}")]
    ReadFailed(String),

    #[error("Failed to parse config file: {0}")]
    ParseFailed(String),
}
