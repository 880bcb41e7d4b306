//! Configuration management for the seat map server.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Unparseable values fall back to the default rather than aborting startup.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Show source and presentation configuration
    pub show: ShowConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

/// Show configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowConfig {
    /// URL or file path of the show descriptor
    pub source: String,
    /// Symbol printed in front of prices
    pub currency_symbol: String,
    /// Largest value offered by the seat-count selector (at least 1)
    pub max_selectable: usize,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            source: "seats.json".to_string(),
            currency_symbol: "₹".to_string(),
            max_selectable: 6,
        }
    }
}

impl ShowConfig {
    /// Whether `count` is a cap the selector offers
    #[must_use]
    pub fn allows_count(&self, count: usize) -> bool {
        (1..=self.max_selectable).contains(&count)
    }
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process environment
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = ShowConfig::default();

        Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: lookup("PORT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(8080),
                shutdown_timeout: lookup("SHUTDOWN_TIMEOUT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            },
            show: ShowConfig {
                source: lookup("SEATMAP_SHOW_SOURCE").unwrap_or(defaults.source),
                currency_symbol: lookup("SEATMAP_CURRENCY_SYMBOL")
                    .unwrap_or(defaults.currency_symbol),
                max_selectable: lookup("SEATMAP_MAX_SELECTABLE")
                    .and_then(|s| s.parse().ok())
                    .filter(|n| *n >= 1)
                    .unwrap_or(defaults.max_selectable),
            },
        }
    }

    /// Address to bind the listener to
    ///
    /// # Errors
    ///
    /// Returns an error if `host:port` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }

    /// Graceful shutdown timeout
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_timeout)
    }
}
