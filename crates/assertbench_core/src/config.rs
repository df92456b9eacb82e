//! Configuration for assertbench runs.

use crate::collection::{validate_channels, ChannelSpec};
use crate::error::{HarnessError, Result};
use crate::types::{RunPolicy, WarmUp, DEFAULT_RESET_CYCLES, DEFAULT_WARMUP_CYCLES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "assertbench.toml";

/// Complete configuration of a harness run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HarnessConfig {
    /// Policy and warm-up settings.
    #[serde(default)]
    pub run: RunConfig,

    /// Scripted simulation settings.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Assertion channels present in the design.
    #[serde(default)]
    pub channels: Vec<ChannelConfig>,
}

impl HarnessConfig {
    /// Load configuration from a file, falling back to defaults if it is missing.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| HarnessError::ConfigError(format!("failed to read config: {}", e)))?;
            Self::from_toml(&content)
        } else {
            Ok(HarnessConfig::default())
        }
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: HarnessConfig = toml::from_str(content)
            .map_err(|e| HarnessError::ConfigError(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            HarnessError::ConfigError(format!("failed to serialize config: {}", e))
        })?;
        fs::write(path, content)
            .map_err(|e| HarnessError::ConfigError(format!("failed to write config: {}", e)))?;
        Ok(())
    }

    /// Checks channel slots and warm-up values.
    pub fn validate(&self) -> Result<()> {
        if self.run.reset_cycles == 0 {
            return Err(HarnessError::ConfigError(
                "run.reset_cycles must be at least 1".to_string(),
            ));
        }
        validate_channels(&self.channel_specs())?;
        for channel in &self.channels {
            if channel.fire_on.contains(&0) {
                return Err(HarnessError::ConfigError(format!(
                    "channel {}: fire_on ticks start at 1",
                    channel.index
                )));
            }
        }
        Ok(())
    }

    /// Channel descriptors in declaration order.
    pub fn channel_specs(&self) -> Vec<ChannelSpec> {
        self.channels.iter().map(ChannelConfig::spec).collect()
    }

    /// Reset and bulk step settings.
    pub fn warm_up(&self) -> WarmUp {
        WarmUp {
            reset_cycles: self.run.reset_cycles,
            step_cycles: self.run.warmup_cycles,
            blocking: self.run.warmup_blocking,
        }
    }
}

/// Policy and warm-up configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Which harness to run: "torture" or "global-reset" (default: torture).
    pub policy: RunPolicy,

    /// Cycles to hold the design in reset (default: 2).
    pub reset_cycles: u64,

    /// Cycles of the bulk warm-up step (default: 40000).
    pub warmup_cycles: u64,

    /// Wait for the warm-up step to retire before polling (default: false).
    pub warmup_blocking: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            policy: RunPolicy::Tolerant,
            reset_cycles: DEFAULT_RESET_CYCLES,
            warmup_cycles: DEFAULT_WARMUP_CYCLES,
            warmup_blocking: false,
        }
    }
}

/// Scripted simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Polling iterations before the simulation reports done (default: 100).
    pub iterations: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { iterations: 100 }
    }
}

/// One assertion channel, plus when the scripted backend should fire it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Bridge slot, 0 through 7.
    pub index: usize,

    /// Endpoint name (default: "assertN").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Assertion message table.
    #[serde(default)]
    pub messages: Vec<String>,

    /// Ticks on which the scripted endpoint fires, counted from 1.
    #[serde(default)]
    pub fire_on: Vec<u64>,
}

impl ChannelConfig {
    /// Channel descriptor for endpoint construction.
    pub fn spec(&self) -> ChannelSpec {
        let mut spec = ChannelSpec::new(self.index).with_messages(self.messages.iter().cloned());
        if let Some(name) = &self.name {
            spec.name = name.clone();
        }
        spec
    }
}
