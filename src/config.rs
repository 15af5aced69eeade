//! Server settings read from the environment.
//!
//! A `.env` file in the working directory is loaded first, if present.
//! Variables: `ROSTER_HOST` (default `0.0.0.0`), `ROSTER_PORT` (default `7860`).

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 7860;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any variable source; bad values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: parse_or("ROSTER_HOST", lookup("ROSTER_HOST"), defaults.host),
            port: parse_or("ROSTER_PORT", lookup("ROSTER_PORT"), defaults.port),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr + std::fmt::Display>(
    key: &str,
    value: Option<String>,
    default: T,
) -> T {
    match value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring {}={:?}, using {}", key, raw, default);
            default
        }),
        None => default,
    }
}
