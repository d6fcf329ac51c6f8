use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use hl_core::{Error, Result};

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory served for static assets and the `index.html` fallback
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            static_dir: PathBuf::from("."),
        }
    }
}

impl ServerConfig {
    /// Optional:
    /// - `PORT` (default: 3000)
    /// - `HL_STATIC_DIR` (default: the working directory)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(port) = lookup("PORT").filter(|p| !p.trim().is_empty()) {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("PORT must be a port number, got {:?}", port)))?;
        }
        if let Some(dir) = lookup("HL_STATIC_DIR").filter(|d| !d.is_empty()) {
            config.static_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
