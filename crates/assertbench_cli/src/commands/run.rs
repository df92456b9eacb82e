//! Run command implementation.

use crate::OutputFormat;
use anyhow::{Context, Result};
use assertbench_core::{
    build_harness, scripted_backend, EventLog, HarnessConfig, RunOutcome, RunPolicy, SimEvent,
};
use chrono::Local;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::error;
use uuid::Uuid;

/// Summary of one harness run.
#[derive(Serialize)]
struct RunReport {
    run_id: Uuid,
    started_at: String,
    policy: RunPolicy,
    endpoints: Vec<String>,
    cycles_stepped: u64,
    elapsed_ms: u64,
    #[serde(flatten)]
    outcome: RunOutcome,
}

/// Run the configured scenario under `policy` (or the config's policy).
///
/// A fatal firing is reported and then aborts the process.
pub fn run(
    path: &Path,
    policy: Option<RunPolicy>,
    iterations: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let mut config = HarnessConfig::load(path)
        .with_context(|| format!("Failed to load configuration {}", path.display()))?;
    if let Some(policy) = policy {
        config.run.policy = policy;
    }
    if let Some(iterations) = iterations {
        config.simulation.iterations = iterations;
    }

    let log = EventLog::new();
    let (sim, endpoints) =
        scripted_backend(&config, &log).context("Failed to construct assertion endpoints")?;
    let names = endpoints.names();

    let started_at = Local::now().to_rfc3339();
    let start = Instant::now();

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!(
        "Running {} harness over {} endpoint(s)...",
        config.run.policy,
        names.len()
    ));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let mut harness = build_harness(config.run.policy, sim, endpoints, config.warm_up());
    let outcome = harness.run();
    pb.finish_and_clear();
    let outcome = outcome.context("Harness run failed")?;

    let cycles_stepped: u64 = log
        .events()
        .iter()
        .map(|e| match e {
            SimEvent::Step { cycles, .. } => *cycles,
            _ => 0,
        })
        .sum();

    let report = RunReport {
        run_id: Uuid::new_v4(),
        started_at,
        policy: config.run.policy,
        endpoints: names,
        cycles_stepped,
        elapsed_ms: start.elapsed().as_millis() as u64,
        outcome,
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report(&report),
    }

    if let RunOutcome::Aborted(firing) = &report.outcome {
        error!(%firing, "aborting on global reset condition");
        std::io::stdout().flush()?;
        std::process::abort();
    }

    Ok(())
}

fn print_report(report: &RunReport) {
    println!();
    println!("{}", style("Harness Report:").bold());
    println!("  Run:             {}", report.run_id);
    println!("  Started:         {}", report.started_at);
    println!("  Policy:          {}", style(report.policy).cyan());
    println!("  Cycles stepped:  {}", report.cycles_stepped);

    match &report.outcome {
        RunOutcome::Completed(stats) => {
            println!("  Iterations:      {}", style(stats.iterations).cyan());
            println!(
                "  Firings:         {}",
                if stats.total_firings() > 0 {
                    style(stats.total_firings()).yellow()
                } else {
                    style(stats.total_firings()).green()
                }
            );
            println!("  Resumes:         {}", stats.resumes);
            for (name, firings) in report.endpoints.iter().zip(&stats.firings) {
                println!("    {} {:<16} {}", style("•").dim(), name, firings);
            }
            println!();
            println!(
                "{} Simulation finished in {}ms",
                style("✓").green(),
                report.elapsed_ms
            );
        }
        RunOutcome::Aborted(firing) => {
            println!();
            println!(
                "{} {}",
                style("×").red().bold(),
                style("FATAL ASSERTION").red().bold()
            );
            println!("  Endpoint:        {} ({})", firing.endpoint, firing.name);
            println!("  Tick:            {}", firing.tick);
            if let Some(message) = &firing.message {
                println!("  Message:         {}", style(message).red());
            }
        }
    }
}
