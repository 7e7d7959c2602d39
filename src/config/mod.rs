//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - Environment variables
//! - CLI arguments

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod types;

use types::{ActionsConfig, BusConfig, BusType, GestureConfig, LoggingConfig};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Touch classification thresholds
    #[serde(default)]
    pub gesture: GestureConfig,
    /// D-Bus publication
    #[serde(default)]
    pub bus: BusConfig,
    /// Local action execution
    #[serde(default)]
    pub actions: ActionsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Command-line overrides applied on top of the loaded file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Drag threshold in device pixels
    pub drag_threshold_px: Option<f64>,
    /// Long-press threshold in milliseconds
    pub long_press_ms: Option<u64>,
    /// Bus to publish on
    pub bus: Option<BusType>,
    /// Disable local action execution
    pub disable_actions: bool,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Default config file location (`$XDG_CONFIG_HOME/touch-gestured/config.toml`)
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("/etc"))
            .join("touch-gestured")
            .join("config.toml")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let threshold = self.gesture.drag_threshold_px;
        if !threshold.is_finite() || threshold <= 0.0 {
            anyhow::bail!("Invalid drag threshold: {} (must be > 0)", threshold);
        }

        if self.gesture.long_press_ms == 0 {
            anyhow::bail!("Invalid long-press threshold: 0ms (must be > 0)");
        }

        if !self.bus.object_path.starts_with('/') {
            anyhow::bail!("Invalid D-Bus object path: {}", self.bus.object_path);
        }

        if !self.bus.service_name.contains('.') {
            anyhow::bail!("Invalid D-Bus service name: {}", self.bus.service_name);
        }

        if self.actions.queue_size == 0 {
            anyhow::bail!("Action queue size must be at least 1");
        }

        if self.actions.enabled && self.actions.command.trim().is_empty() {
            anyhow::bail!("Action command must not be empty");
        }

        if let Some(args) = &self.actions.long_press {
            if args.trim().is_empty() {
                anyhow::bail!("Long-press action must not be empty (omit it to disable)");
            }
        }

        for binding in &self.actions.bindings {
            if binding.fingers < 1 {
                anyhow::bail!("Invalid finger count in binding: {:?}", binding);
            }
            if binding.keys.trim().is_empty() {
                anyhow::bail!("Empty key chord in binding: {:?}", binding);
            }
            if !binding.direction.applies_to(binding.gesture) {
                anyhow::bail!(
                    "Direction {:?} is not valid for {:?}",
                    binding.direction,
                    binding.gesture
                );
            }
        }

        Ok(())
    }

    /// Override config with CLI arguments
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(px) = overrides.drag_threshold_px {
            self.gesture.drag_threshold_px = px;
        }
        if let Some(ms) = overrides.long_press_ms {
            self.gesture.long_press_ms = ms;
        }
        if let Some(bus) = overrides.bus {
            self.bus.connection = bus;
        }
        if overrides.disable_actions {
            self.actions.enabled = false;
        }

        self
    }
}
