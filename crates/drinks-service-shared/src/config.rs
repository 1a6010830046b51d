//! Service configuration from environment variables.
//!
//! | Variable           | Default                      |
//! |--------------------|------------------------------|
//! | `MONGO_URL`        | `mongodb://localhost/drinks` |
//! | `SERVICE_PORT`     | `3000`                       |
//! | `STRICT_NOT_FOUND` | `false`                      |
//!
//! Logging and metrics have their own configs, see [`crate::logging`] and
//! [`crate::metrics`].

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use drinks_lib::DEFAULT_MONGO_URL;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Document store connection string.
    pub mongo_url: String,
    /// Port to bind on all interfaces.
    pub port: u16,
    /// Answer lookup misses with 404 instead of `200` and a `null` entity.
    pub strict_not_found: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            mongo_url: DEFAULT_MONGO_URL.to_string(),
            port: DEFAULT_PORT,
            strict_not_found: false,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let mongo_url = lookup("MONGO_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.mongo_url);

        let port = match lookup("SERVICE_PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid SERVICE_PORT, using default");
                defaults.port
            }),
            None => defaults.port,
        };

        let strict_not_found = lookup("STRICT_NOT_FOUND")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.strict_not_found);

        Self {
            mongo_url,
            port,
            strict_not_found,
        }
    }

    /// All interfaces on the configured port.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    /// The connection string with any credentials masked, for logging.
    pub fn redacted_mongo_url(&self) -> String {
        let Some((scheme, rest)) = self.mongo_url.split_once("://") else {
            return self.mongo_url.clone();
        };
        match rest.rsplit_once('@') {
            Some((_, host)) => format!("{}://***@{}", scheme, host),
            None => self.mongo_url.clone(),
        }
    }
}
