//! Core types shared by the harness variants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HarnessError;

/// Cycles the design is held in reset before warm-up.
pub const DEFAULT_RESET_CYCLES: u64 = 2;

/// Cycles issued by the bulk warm-up step.
pub const DEFAULT_WARMUP_CYCLES: u64 = 40_000;

/// What a harness does when an endpoint reports a fired assertion.
///
/// Fixed for the lifetime of a harness instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunPolicy {
    /// Drain the endpoint with `resume()` and keep polling ("torture").
    #[default]
    #[serde(rename = "torture")]
    Tolerant,

    /// End the run on the first firing ("global reset condition").
    #[serde(rename = "global-reset")]
    Fatal,
}

impl RunPolicy {
    /// Name used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunPolicy::Tolerant => "torture",
            RunPolicy::Fatal => "global-reset",
        }
    }
}

impl fmt::Display for RunPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunPolicy {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "torture" | "tolerant" => Ok(RunPolicy::Tolerant),
            "global-reset" | "fatal" => Ok(RunPolicy::Fatal),
            other => Err(HarnessError::ConfigError(format!(
                "unknown run policy '{}' (expected 'torture' or 'global-reset')",
                other
            ))),
        }
    }
}

/// Lifecycle of a harness run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessState {
    /// Constructed, nothing driven yet.
    NotStarted,

    /// Calling `init()` on every endpoint.
    Initializing,

    /// Design released from reset, polling loop active.
    Running,

    /// Simulation reported done, or a fatal firing ended the run.
    Finished,
}

impl HarnessState {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(&self, next: HarnessState) -> bool {
        matches!(
            (self, next),
            (HarnessState::NotStarted, HarnessState::Initializing)
                | (HarnessState::Initializing, HarnessState::Running)
                | (HarnessState::Running, HarnessState::Finished)
        )
    }
}

impl fmt::Display for HarnessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HarnessState::NotStarted => "NotStarted",
            HarnessState::Initializing => "Initializing",
            HarnessState::Running => "Running",
            HarnessState::Finished => "Finished",
        };
        f.write_str(name)
    }
}

/// Reset and bulk step issued between initialization and polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarmUp {
    /// Cycles held in reset.
    pub reset_cycles: u64,

    /// Cycles advanced by the bulk step.
    pub step_cycles: u64,

    /// Whether the bulk step waits for every cycle to retire.
    pub blocking: bool,
}

impl Default for WarmUp {
    fn default() -> Self {
        Self {
            reset_cycles: DEFAULT_RESET_CYCLES,
            step_cycles: DEFAULT_WARMUP_CYCLES,
            blocking: false,
        }
    }
}

/// Counters gathered over a run that reached `done()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Polling loop iterations (one tick of every endpoint each).
    pub iterations: u64,

    /// Firings observed per endpoint, indexed like the collection.
    pub firings: Vec<u64>,

    /// `resume()` calls issued across all endpoints.
    pub resumes: u64,
}

impl RunStats {
    pub(crate) fn with_endpoints(count: usize) -> Self {
        Self {
            iterations: 0,
            firings: vec![0; count],
            resumes: 0,
        }
    }

    /// Total firings across all endpoints.
    pub fn total_firings(&self) -> u64 {
        self.firings.iter().sum()
    }
}

/// The firing that ended a fatal-policy run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FatalFiring {
    /// Index of the endpoint in its collection.
    pub endpoint: usize,

    /// Endpoint name.
    pub name: String,

    /// Polling iteration (1-based) in which the firing was observed.
    pub tick: u64,

    /// Message from the endpoint's table, if it could name the assertion.
    pub message: Option<String>,
}

impl fmt::Display for FatalFiring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "assertion fired on endpoint {} ({}) at tick {}",
            self.endpoint, self.name, self.tick
        )?;
        if let Some(message) = &self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The simulation reported done.
    Completed(RunStats),

    /// A fatal-policy harness observed a firing.
    Aborted(FatalFiring),
}

impl RunOutcome {
    /// Whether the run ended on a fatal firing.
    pub fn is_aborted(&self) -> bool {
        matches!(self, RunOutcome::Aborted(_))
    }
}
