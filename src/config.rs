use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::shared_state::MonthClock;

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }

/// Environment variable overriding the listen port.
pub const PORT_ENV: &str = "PV_PORT";

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    /// Pins the seasonal month (1–12) instead of reading the local clock
    #[serde(default)]
    pub fixed_month: Option<u32>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        if let Some(month) = config.fixed_month {
            if !(1..=12).contains(&month) {
                return Err(format!("fixed_month must be between 1 and 12, got {}", month).into());
            }
        }
        Ok(config)
    }

    pub fn month_clock(&self) -> MonthClock {
        match self.fixed_month {
            Some(month) => {
                warn!("Seasonal month pinned to {} by configuration", month);
                MonthClock::Fixed(month)
            }
            None => MonthClock::System,
        }
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    /// `PV_PORT` overrides the port either way.
    pub fn load_or_default(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = if Path::new(path).exists() {
            info!("Loading configuration from {}", path);
            Self::load(path)?
        } else {
            info!("{} not found, using default configuration", path);
            Self::default()
        };
        config.apply_port_override(std::env::var(PORT_ENV).ok().as_deref());
        Ok(config)
    }

    fn apply_port_override(&mut self, value: Option<&str>) {
        if let Some(port) = value.and_then(|v| v.trim().parse::<u16>().ok()) {
            self.server.port = port;
        }
    }
}
