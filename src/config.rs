use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

/// Environment variable naming a YAML config file.
pub const CONFIG_ENV: &str = "HEARTH_CONFIG";
/// Environment variable overriding the listen address.
pub const LISTEN_ENV: &str = "LISTEN";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    /// Directory that `static/...` request paths are resolved against.
    pub static_root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            static_root: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Loads the file named by `HEARTH_CONFIG` (defaults when unset), then
    /// applies the `LISTEN` override.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file {}", path))?;
                Self::from_yaml_str(&raw)
                    .with_context(|| format!("failed to parse config file {}", path))?
            }
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var(LISTEN_ENV) {
            cfg.listen_addr = addr;
        }

        Ok(cfg)
    }

    pub fn from_yaml_str(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Splits `listen_addr` into host and port.
    pub fn host_port(&self) -> anyhow::Result<(&str, u16)> {
        let (host, port) = self
            .listen_addr
            .rsplit_once(':')
            .with_context(|| format!("listen address {:?} has no port", self.listen_addr))?;
        let port = port
            .parse()
            .with_context(|| format!("invalid port in {:?}", self.listen_addr))?;
        Ok((host, port))
    }
}
