//! Configuration management
//!
//! The configuration file is optional; every setting has a default.

use anyhow::{Context, Result};
use protocol::{CLIENT_SERIAL_LEN, DEFAULT_CLIENT_SERIAL};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub login: LoginConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub protocol: ProtocolConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginConfig {
    /// Serial sent with the login request, up to 16 ASCII characters
    #[serde(default = "default_client_serial")]
    pub client_serial: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Prefix console lines with the local time
    #[serde(default)]
    pub timestamps: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProtocolConfig {
    /// Drop packets that arrive out of the login sequence instead of
    /// handling them anyway
    #[serde(default)]
    pub strict_sequence: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            client_serial: default_client_serial(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_client_serial() -> String {
    DEFAULT_CLIENT_SERIAL.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .with_context(|| "Failed to parse config file")?;

        let serial = &config.login.client_serial;
        if !serial.is_ascii() || serial.len() > CLIENT_SERIAL_LEN {
            anyhow::bail!(
                "client_serial must be at most {} ASCII characters, got {:?}",
                CLIENT_SERIAL_LEN,
                serial
            );
        }

        Ok(config)
    }
}
