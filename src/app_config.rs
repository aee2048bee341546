use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::channel::{DTVCC_SERVICES, LINE21_CHANNELS};
use crate::replay::FaultPolicy;
use crate::renderer::RenderOptions;

/// Application configuration module
/// This module handles loading and validating the decoder settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Decode run settings
    #[serde(default)]
    pub decode: DecodeConfig,

    /// Transcript output settings
    #[serde(default)]
    pub render: RenderConfig,
}

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "ccinspect.json";

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct DecodeConfig {
    // @field: What to do with a decode fault
    #[serde(default)]
    pub fault_policy: FaultPolicy,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RenderConfig {
    // @field: Prefix caption boundaries with their time
    #[serde(default = "default_true")]
    pub timestamps: bool,

    // @field: Line 21 channels to print, empty for all non-empty ones
    #[serde(default)]
    pub channels: Vec<u8>,

    // @field: DTVCC services to print, empty for all non-empty ones
    #[serde(default)]
    pub services: Vec<u8>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            timestamps: true,
            channels: Vec::new(),
            services: Vec::new(),
        }
    }
}

impl RenderConfig {
    // @returns: Renderer options for these settings
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            timestamps: self.timestamps,
        }
    }

    // @returns: Whether a channel should be printed
    pub fn wants_channel(&self, channel: u8) -> bool {
        self.channels.is_empty() || self.channels.contains(&channel)
    }

    // @returns: Whether a service should be printed
    pub fn wants_service(&self, service: u8) -> bool {
        self.services.is_empty() || self.services.contains(&service)
    }
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if let Some(channel) = self
            .render
            .channels
            .iter()
            .find(|channel| !(1..=LINE21_CHANNELS).contains(&usize::from(**channel)))
        {
            return Err(anyhow!("Line 21 channel {} is out of range (1-{})", channel, LINE21_CHANNELS));
        }

        if let Some(service) = self
            .render
            .services
            .iter()
            .find(|service| !(1..=DTVCC_SERVICES).contains(&usize::from(**service)))
        {
            return Err(anyhow!("DTVCC service {} is out of range (1-{})", service, DTVCC_SERVICES));
        }

        Ok(())
    }

    /// Load the configuration from a JSON file, or the defaults if it does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }

        let file = File::open(path).context(format!("Failed to open config file: {}", path.display()))?;
        let config: Config = serde_json::from_reader(BufReader::new(file))
            .context(format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }
}
