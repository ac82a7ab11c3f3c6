use std::net::{Ipv6Addr, SocketAddr};
use std::path::Path;

use serde::Deserialize;

fn default_digital_source() -> String {
    "tv:atsct".to_string()
}

fn default_analog_source() -> String {
    "tv:analog".to_string()
}

#[derive(Clone, Debug, Deserialize)]
pub struct AuthConfig {
    /// Compared against the X-Auth-Key header of every request.
    pub key: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DeviceConfig {
    pub host: String,
    pub psk: String,

    #[serde(default = "default_digital_source")]
    pub digital_source: String,

    #[serde(default = "default_analog_source")]
    pub analog_source: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: SocketAddr::from((Ipv6Addr::LOCALHOST, 3001)),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub auth: AuthConfig,

    pub device: DeviceConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file = std::fs::read_to_string(path)?;
        let config = toml::from_str(&file)?;

        Ok(config)
    }
}
