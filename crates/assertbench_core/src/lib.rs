//! assertbench Core Library
//!
//! Drives synthesized-assertion endpoints attached to a simulated design
//! under test, under one of two run policies:
//! - **torture**: fired endpoints are resumed and the run continues until the
//!   simulation reports done
//! - **global reset condition**: the first firing ends the run
//!
//! The simulation transport and the endpoints themselves are supplied by the
//! caller through the [`SimulationControl`] and [`AssertionEndpoint`] traits.
//!
//! # Quick Start
//!
//! ```
//! use assertbench_core::{
//!     ChannelSpec, EndpointCollection, EventLog, Harness, RunOutcome, ScriptedEndpoint,
//!     ScriptedSimulation, TortureHarness,
//! };
//!
//! let log = EventLog::new();
//! let sim = ScriptedSimulation::new(10, log.clone());
//!
//! let mut endpoints = EndpointCollection::new();
//! endpoints.push(Box::new(ScriptedEndpoint::new(ChannelSpec::new(0), [3, 7], log.clone())));
//!
//! let mut harness = TortureHarness::new(sim, endpoints);
//! match harness.run().unwrap() {
//!     RunOutcome::Completed(stats) => assert_eq!(stats.resumes, 2),
//!     RunOutcome::Aborted(_) => unreachable!(),
//! }
//! ```
//!
//! # Fatal policy
//!
//! A [`FatalAssertionHarness`] reports the first firing instead of draining
//! it. Aborting the process is left to the caller:
//!
//! ```
//! use assertbench_core::{
//!     ChannelSpec, EndpointCollection, EventLog, FatalAssertionHarness, Harness, ScriptedEndpoint,
//!     ScriptedSimulation,
//! };
//!
//! let log = EventLog::new();
//! let sim = ScriptedSimulation::new(10, log.clone());
//!
//! let mut endpoints = EndpointCollection::new();
//! endpoints.push(Box::new(ScriptedEndpoint::new(ChannelSpec::new(0), [5], log.clone())));
//!
//! let mut harness = FatalAssertionHarness::new(sim, endpoints);
//! assert!(harness.run().unwrap().is_aborted());
//! ```

mod collection;
mod config;
mod endpoint;
mod error;
mod harness;
mod scripted;
mod simulation;
mod types;

pub use collection::{validate_channels, ChannelSpec, EndpointCollection, MAX_ASSERT_CHANNELS};
pub use config::{ChannelConfig, HarnessConfig, RunConfig, SimulationConfig, CONFIG_FILE_NAME};
pub use endpoint::AssertionEndpoint;
pub use error::{HarnessError, Result};
pub use harness::{build_harness, FatalAssertionHarness, Harness, TortureHarness};
pub use scripted::{scripted_backend, EventLog, ScriptedEndpoint, ScriptedSimulation, SimEvent};
pub use simulation::SimulationControl;
pub use types::*;
