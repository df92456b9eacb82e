use anyhow::{Context, Result};
use assertbench_core::{HarnessConfig, CONFIG_FILE_NAME};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Isolated directory holding a harness config file
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    /// Create an empty workspace
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new().context("Failed to create temp dir")?,
        })
    }

    /// Path of the config file inside the workspace
    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join(CONFIG_FILE_NAME)
    }

    /// Write raw TOML as the workspace config
    pub fn write_config(&self, toml: &str) -> Result<PathBuf> {
        let path = self.config_path();
        fs::write(&path, toml).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Load the workspace config (defaults if absent)
    pub fn load_config(&self) -> Result<HarnessConfig> {
        HarnessConfig::load(&self.config_path()).context("Failed to load config")
    }
}
