//! Server configuration.
//!
//! Everything has a default, so an empty file is a valid config:
//!
//! ```toml
//! addr = "0.0.0.0:3000"
//! max_body_size = 16384   # bytes buffered per request by collecting routes
//! ```

use std::net::SocketAddr;

use serde::Deserialize;

use crate::error::Error;

/// Body limit applied when a collecting route does not set its own.
pub const DEFAULT_MAX_BODY_SIZE: usize = 16 * 1024;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub addr: SocketAddr,
    pub max_body_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        let text = tokio::fs::read_to_string(path).await?;
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_all_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_toml("addr = \"127.0.0.1:8080\"\nmax_body_size = 1024\n").unwrap();
        assert_eq!(config.addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.max_body_size, 1024);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(Config::from_toml("port = 80"), Err(Error::Config(_))));
    }
}
