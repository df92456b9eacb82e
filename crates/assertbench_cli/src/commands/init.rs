//! Write a default harness configuration.

use anyhow::{bail, Context, Result};
use assertbench_core::{ChannelConfig, HarnessConfig};
use console::style;
use std::path::Path;

/// Write a starter config with a single assertion channel.
pub fn run(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let mut config = HarnessConfig::default();
    config.channels.push(ChannelConfig {
        index: 0,
        name: None,
        messages: vec!["assertion 0 fired".to_string()],
        fire_on: vec![3, 7],
    });
    config
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "{} Wrote default configuration to {}",
        style("✓").green(),
        path.display()
    );
    println!();
    println!("  Policy:          {}", config.run.policy);
    println!("  Reset cycles:    {}", config.run.reset_cycles);
    println!("  Warm-up cycles:  {}", config.run.warmup_cycles);
    println!("  Channels:        {}", config.channels.len());
    println!();
    println!(
        "Run it with {}",
        style("assertbench run").cyan()
    );

    Ok(())
}
