//! Server settings, read once from the environment at start-up.

use std::net::SocketAddr;

use tracing::warn;

use medswap_inventory::DEFAULT_EXPIRY_WINDOW_DAYS;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind: SocketAddr,
    /// Horizon for "expiring soon" counts and badges.
    pub expiry_window_days: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            expiry_window_days: DEFAULT_EXPIRY_WINDOW_DAYS,
        }
    }
}

impl ApiConfig {
    /// `MEDSWAP_BIND` and `MEDSWAP_EXPIRY_WINDOW_DAYS`; invalid values are
    /// logged and replaced by defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("MEDSWAP_BIND").filter(|v| !v.trim().is_empty()) {
            match raw.trim().parse() {
                Ok(addr) => config.bind = addr,
                Err(_) => warn!(value = %raw, default = DEFAULT_BIND, "ignoring invalid MEDSWAP_BIND"),
            }
        }

        if let Some(raw) = lookup("MEDSWAP_EXPIRY_WINDOW_DAYS").filter(|v| !v.trim().is_empty()) {
            match raw.trim().parse::<u32>() {
                Ok(days) => config.expiry_window_days = days,
                Err(_) => warn!(value = %raw, "ignoring invalid MEDSWAP_EXPIRY_WINDOW_DAYS"),
            }
        }

        config
    }
}
