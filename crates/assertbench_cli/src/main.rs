//! assertbench CLI - drives assertion endpoints of a simulated design.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "assertbench")]
#[command(about = "Assertion torture and global-reset-condition harness", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the harness configuration
    #[arg(short, long, global = true, default_value = assertbench_core::CONFIG_FILE_NAME)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Validate the configuration and list assertion channels
    Check,
    /// Run the harness against the scripted simulation
    Run {
        /// Run policy (overrides the config file)
        #[arg(short, long, value_enum)]
        policy: Option<PolicyArg>,
        /// Polling iterations before the simulation reports done (overrides the config file)
        #[arg(long)]
        iterations: Option<u64>,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Run policy as named on the command line.
#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Resume fired endpoints and keep running
    Torture,
    /// Abort on the first firing
    GlobalReset,
}

impl From<PolicyArg> for assertbench_core::RunPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Torture => assertbench_core::RunPolicy::Tolerant,
            PolicyArg::GlobalReset => assertbench_core::RunPolicy::Fatal,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    // Initialize tracing subscriber
    // Respects RUST_LOG environment variable (e.g., RUST_LOG=debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => commands::init::run(&cli.config, force),
        Commands::Check => commands::check::run(&cli.config),
        Commands::Run {
            policy,
            iterations,
            format,
        } => commands::run::run(&cli.config, policy.map(Into::into), iterations, format),
    }
}
