//! Server configuration from environment variables
//!
//! | variable    | default                                   |
//! |-------------|-------------------------------------------|
//! | `DATA_PATH` | `data/analisis_quimicos_validados.csv`    |
//! | `HOST`      | `0.0.0.0`                                 |
//! | `PORT`      | `8000`                                    |
//!
//! `RUST_LOG` is read by the tracing subscriber, not here.

use crate::error::{Result, SoilError};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "data/analisis_quimicos_validados.csv";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub data_path: PathBuf,
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (keeps tests off the process env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_path = lookup("DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let host = match lookup("HOST") {
            Some(h) => h
                .parse()
                .map_err(|_| SoilError::Config(format!("invalid HOST '{}'", h)))?,
            None => IpAddr::from([0, 0, 0, 0]),
        };

        let port = match lookup("PORT") {
            Some(p) => p
                .parse()
                .map_err(|_| SoilError::Config(format!("invalid PORT '{}'", p)))?,
            None => DEFAULT_PORT,
        };

        Ok(Self { data_path, host, port })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
