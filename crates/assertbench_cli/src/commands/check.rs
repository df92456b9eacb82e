//! Validate a harness configuration.

use anyhow::{Context, Result};
use assertbench_core::{HarnessConfig, MAX_ASSERT_CHANNELS};
use console::style;
use std::path::Path;

/// Load the config, validate it, and list its channels.
pub fn run(path: &Path) -> Result<()> {
    if !path.exists() {
        println!(
            "{} {} not found, checking defaults",
            style("ℹ").blue(),
            path.display()
        );
    }

    let config = match HarnessConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            if let Some(hint) = e.recovery_suggestion() {
                eprintln!("{} {}", style("Hint:").cyan(), hint);
            }
            return Err(e).with_context(|| format!("Invalid configuration {}", path.display()));
        }
    };

    println!("{}", style("Harness Configuration:").bold());
    println!("  Policy:           {}", style(config.run.policy).cyan());
    println!(
        "  Warm-up:          reset {} cycles, step {} cycles ({})",
        config.run.reset_cycles,
        config.run.warmup_cycles,
        if config.run.warmup_blocking {
            "blocking"
        } else {
            "non-blocking"
        }
    );
    println!("  Iterations:       {}", config.simulation.iterations);
    println!(
        "  Channels:         {}/{}",
        style(config.channels.len()).cyan(),
        MAX_ASSERT_CHANNELS
    );

    for (position, spec) in config.channel_specs().iter().enumerate() {
        println!(
            "    {} [{}] slot {} {} ({} messages)",
            style("•").dim(),
            position,
            spec.index,
            style(&spec.name).bold(),
            spec.messages.len()
        );
    }

    if config.channels.is_empty() {
        println!();
        println!(
            "{} No assertion channels: the harness will never observe a firing.",
            style("ℹ").blue()
        );
    }

    println!();
    println!("{} Configuration is valid", style("✓").green());
    Ok(())
}
