// ⚙️ Server Configuration
//
// Read from the environment (in order of precedence):
// 1. PORT, ENVIRONMENT, RUST_LOG
// 2. Default values (port 8000, development mode)

use std::net::{Ipv4Addr, SocketAddr};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8000;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid PORT value: {0:?}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Only the exact value "production" selects release mode
    pub fn parse(value: &str) -> Self {
        if value == "production" {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    /// Default log filter when RUST_LOG is unset
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Environment::Development => "debug",
            Environment::Production => "info",
        }
    }

    pub fn json_logs(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub environment: Environment,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let environment = Environment::default();
        ServerConfig {
            port: DEFAULT_PORT,
            environment,
            log_level: environment.default_log_level().to_string(),
        }
    }
}

impl ServerConfig {
    /// Load from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .map(|v| Environment::parse(&v))
            .unwrap_or_default();

        let port = match lookup("PORT").filter(|v| !v.is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        let log_level = lookup("RUST_LOG")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| environment.default_log_level().to_string());

        Ok(ServerConfig {
            port,
            environment,
            log_level,
        })
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Listen on all interfaces
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
