//! Deterministic in-process simulation backend.
//!
//! [`ScriptedSimulation`] finishes after a fixed number of polling
//! iterations and [`ScriptedEndpoint`] fires on a fixed set of ticks. Both
//! append every call they receive to a shared [`EventLog`], which lets a run
//! be replayed and inspected without a real design behind it.

use crate::collection::{ChannelSpec, EndpointCollection};
use crate::config::HarnessConfig;
use crate::endpoint::AssertionEndpoint;
use crate::error::{HarnessError, Result};
use crate::simulation::SimulationControl;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// One call observed by the scripted backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// `init()` on the endpoint for `channel`.
    Init { channel: usize },
    /// `reset(cycles)` on the simulation.
    Reset { cycles: u64 },
    /// `step(cycles, blocking)` on the simulation.
    Step { cycles: u64, blocking: bool },
    /// `done()` on the simulation and what it answered.
    Done { finished: bool },
    /// `tick()` number `tick` on the endpoint for `channel`.
    Tick { channel: usize, tick: u64 },
    /// `terminate()` on the endpoint for `channel` after tick `tick`.
    Terminate { channel: usize, tick: u64, fired: bool },
    /// `resume()` on the endpoint for `channel` after tick `tick`.
    Resume { channel: usize, tick: u64 },
}

/// Shared, ordered record of backend calls.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<SimEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: SimEvent) {
        self.events.borrow_mut().push(event);
    }

    /// Copy of every event so far.
    pub fn events(&self) -> Vec<SimEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Number of events matching `pred`.
    pub fn count(&self, pred: impl Fn(&SimEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }

    /// Position of the first event matching `pred`.
    pub fn position(&self, pred: impl Fn(&SimEvent) -> bool) -> Option<usize> {
        self.events.borrow().iter().position(|e| pred(e))
    }
}

/// Simulation that reports done after `iterations` polling iterations.
///
/// `done()` answers false `iterations` times, then true. With zero
/// iterations the run ends right after warm-up.
#[derive(Debug)]
pub struct ScriptedSimulation {
    iterations: u64,
    polls: u64,
    cycles_issued: u64,
    log: EventLog,
}

impl ScriptedSimulation {
    pub fn new(iterations: u64, log: EventLog) -> Self {
        Self {
            iterations,
            polls: 0,
            cycles_issued: 0,
            log,
        }
    }

    /// Clock cycles requested through `step()` so far.
    pub fn cycles_issued(&self) -> u64 {
        self.cycles_issued
    }
}

impl SimulationControl for ScriptedSimulation {
    fn reset(&mut self, cycles: u64) -> Result<()> {
        self.log.record(SimEvent::Reset { cycles });
        Ok(())
    }

    fn step(&mut self, cycles: u64, blocking: bool) -> Result<()> {
        self.cycles_issued = self.cycles_issued.saturating_add(cycles);
        self.log.record(SimEvent::Step { cycles, blocking });
        Ok(())
    }

    fn done(&mut self) -> Result<bool> {
        self.polls += 1;
        let finished = self.polls > self.iterations;
        self.log.record(SimEvent::Done { finished });
        Ok(finished)
    }
}

/// Endpoint whose latch is set on a fixed set of ticks.
///
/// Ticks are counted per endpoint starting at 1. Once set, the latch stays
/// set until `resume()`.
#[derive(Debug)]
pub struct ScriptedEndpoint {
    channel: ChannelSpec,
    fire_on: BTreeSet<u64>,
    initialized: bool,
    ticks: u64,
    firings: u64,
    latched: Option<usize>,
    log: EventLog,
}

impl ScriptedEndpoint {
    pub fn new(
        channel: ChannelSpec,
        fire_on: impl IntoIterator<Item = u64>,
        log: EventLog,
    ) -> Self {
        Self {
            channel,
            fire_on: fire_on.into_iter().collect(),
            initialized: false,
            ticks: 0,
            firings: 0,
            latched: None,
            log,
        }
    }

    /// Whether the fired latch is currently set.
    pub fn is_latched(&self) -> bool {
        self.latched.is_some()
    }

    /// Ticks received so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    fn failure(&self, reason: &str) -> HarnessError {
        HarnessError::EndpointFailed {
            index: self.channel.index,
            name: self.channel.name.clone(),
            reason: reason.to_string(),
        }
    }
}

impl AssertionEndpoint for ScriptedEndpoint {
    fn name(&self) -> &str {
        &self.channel.name
    }

    fn init(&mut self) -> Result<()> {
        self.initialized = true;
        self.ticks = 0;
        self.latched = None;
        self.log.record(SimEvent::Init {
            channel: self.channel.index,
        });
        Ok(())
    }

    fn tick(&mut self) -> Result<()> {
        if !self.initialized {
            return Err(self.failure("tick before init"));
        }
        self.ticks += 1;
        if self.fire_on.contains(&self.ticks) && self.latched.is_none() {
            // Cycle through the message table so each firing names an assertion.
            let assertion = match self.channel.messages.len() {
                0 => 0,
                n => (self.firings as usize) % n,
            };
            self.latched = Some(assertion);
            self.firings += 1;
        }
        self.log.record(SimEvent::Tick {
            channel: self.channel.index,
            tick: self.ticks,
        });
        Ok(())
    }

    fn terminate(&mut self) -> Result<bool> {
        let fired = self.is_latched();
        self.log.record(SimEvent::Terminate {
            channel: self.channel.index,
            tick: self.ticks,
            fired,
        });
        Ok(fired)
    }

    fn resume(&mut self) -> Result<()> {
        if self.latched.take().is_none() {
            return Err(self.failure("resume without a latched firing"));
        }
        self.log.record(SimEvent::Resume {
            channel: self.channel.index,
            tick: self.ticks,
        });
        Ok(())
    }

    fn fired_message(&self) -> Option<String> {
        self.latched
            .and_then(|assertion| self.channel.messages.get(assertion).cloned())
    }
}

/// Builds a scripted simulation and its endpoints from `config`.
///
/// Endpoints are constructed in channel declaration order and fire on each
/// channel's `fire_on` ticks.
pub fn scripted_backend(
    config: &HarnessConfig,
    log: &EventLog,
) -> Result<(ScriptedSimulation, EndpointCollection)> {
    let sim = ScriptedSimulation::new(config.simulation.iterations, log.clone());
    let mut fire_on = config.channels.iter().map(|c| c.fire_on.clone());
    let endpoints = EndpointCollection::from_channels(config.channel_specs(), |channel| {
        let ticks = fire_on.next().unwrap_or_default();
        let endpoint = ScriptedEndpoint::new(channel, ticks, log.clone());
        Ok(Box::new(endpoint) as Box<dyn AssertionEndpoint>)
    })?;
    Ok((sim, endpoints))
}
