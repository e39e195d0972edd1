//! Process configuration, read once at startup.
//!
//! Nothing below the API layer reads the environment; these values are
//! injected into the engine and services when they are built.

use std::net::SocketAddr;

use thiserror::Error;

use glowcart_recommendations::{DEFAULT_LIMIT, MAX_LIMIT};

pub const BIND_ADDR_ENV: &str = "GLOWCART_BIND_ADDR";
pub const RECOMMENDATION_LIMIT_ENV: &str = "GLOWCART_RECOMMENDATION_LIMIT";
pub const NOTIFICATIONS_ENV: &str = "GLOWCART_NOTIFICATIONS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GLOWCART_BIND_ADDR: '{0}' is not a socket address")]
    BindAddr(String),

    #[error("GLOWCART_RECOMMENDATION_LIMIT: '{0}' must be an integer between 1 and 10")]
    RecommendationLimit(String),

    #[error("GLOWCART_NOTIFICATIONS: '{0}' must be on or off")]
    Notifications(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Suggestions returned when a request doesn't pass `limit`.
    pub recommendation_limit: usize,
    /// When off, `notify_customer` on status updates is ignored.
    pub notifications: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            recommendation_limit: DEFAULT_LIMIT,
            notifications: true,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup(BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::BindAddr(bind_raw.clone()))?;

        let recommendation_limit = match lookup(RECOMMENDATION_LIMIT_ENV) {
            None => DEFAULT_LIMIT,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if (1..=MAX_LIMIT).contains(&n) => n,
                _ => return Err(ConfigError::RecommendationLimit(raw)),
            },
        };

        let notifications = match lookup(NOTIFICATIONS_ENV) {
            None => true,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "on" | "true" | "1" => true,
                "off" | "false" | "0" => false,
                _ => return Err(ConfigError::Notifications(raw)),
            },
        };

        Ok(Self {
            bind_addr,
            recommendation_limit,
            notifications,
        })
    }
}
