//! Server configuration.

use std::env;

const DEFAULT_PORT: u16 = 3000;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// MongoDB connection string. The in-memory store is used when unset.
    pub mongodb_uri: Option<String>,
    /// Database name inside the MongoDB deployment.
    pub database_name: String,
    /// Log level.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            mongodb_uri: None,
            database_name: "message_board".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            host: lookup("MESSAGE_BOARD_HOST").unwrap_or(defaults.host),
            port: lookup("MESSAGE_BOARD_PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or(defaults.port),
            mongodb_uri: lookup("MONGODB_URI").filter(|uri| !uri.trim().is_empty()),
            database_name: lookup("MESSAGE_BOARD_DATABASE").unwrap_or(defaults.database_name),
            log_level: lookup("MESSAGE_BOARD_LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
