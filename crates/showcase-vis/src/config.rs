//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use showcase_site::snippet::DEFAULT_ASSET_URL;

use crate::error::{Error, Result};

/// Configuration for the playback server.
#[derive(Debug, Clone, PartialEq)]
pub struct VisConfig {
    /// HTTP listen address
    pub addr: SocketAddr,

    /// Directory holding the key/value store file
    pub data_dir: PathBuf,

    /// Asset fetched by the code snippet
    pub asset_url: String,

    /// Start every demo as soon as it is spawned
    pub autoplay: bool,
}

impl VisConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`VisConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("SHOWCASE_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let addr: SocketAddr = raw_addr
            .parse()
            .map_err(|_| Error::Config(format!("Invalid SHOWCASE_ADDR: {}", raw_addr)))?;

        let data_dir = PathBuf::from(
            lookup("SHOWCASE_DATA_DIR").unwrap_or_else(|| "./showcase-data".to_string()),
        );

        let asset_url =
            lookup("SHOWCASE_ASSET_URL").unwrap_or_else(|| DEFAULT_ASSET_URL.to_string());

        let autoplay = match lookup("SHOWCASE_AUTOPLAY") {
            None => true,
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| Error::Config(format!("Invalid SHOWCASE_AUTOPLAY: {}", raw)))?,
        };

        Ok(Self {
            addr,
            data_dir,
            asset_url,
            autoplay,
        })
    }

    /// Override the listen port, keeping the host.
    pub fn with_port(mut self, port: u16) -> Self {
        self.addr.set_port(port);
        self
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<VisConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        VisConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.data_dir, PathBuf::from("./showcase-data"));
        assert_eq!(config.asset_url, DEFAULT_ASSET_URL);
        assert!(config.autoplay);
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("SHOWCASE_ADDR", "127.0.0.1:8080"),
            ("SHOWCASE_DATA_DIR", "/tmp/showcase"),
            ("SHOWCASE_ASSET_URL", "http://localhost/a.css"),
            ("SHOWCASE_AUTOPLAY", "off"),
        ])
        .unwrap();
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/showcase"));
        assert_eq!(config.asset_url, "http://localhost/a.css");
        assert!(!config.autoplay);
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(matches!(
            config(&[("SHOWCASE_ADDR", "not an addr")]),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            config(&[("SHOWCASE_AUTOPLAY", "maybe")]),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn port_override_keeps_host() {
        let config = config(&[("SHOWCASE_ADDR", "127.0.0.1:8080")])
            .unwrap()
            .with_port(9000);
        assert_eq!(config.addr, "127.0.0.1:9000".parse().unwrap());
    }
}
