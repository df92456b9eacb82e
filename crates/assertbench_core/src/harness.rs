//! Torture and global-reset-condition harnesses.
//!
//! Both harnesses share construction, initialization and the polling loop in
//! `Driver`. They differ only in the body applied when an endpoint reports a
//! firing:
//!
//! - [`TortureHarness`] drains the endpoint with `resume()` and keeps going,
//!   so every endpoint is still ticked in every iteration;
//! - [`FatalAssertionHarness`] stops at the first firing, before any later
//!   endpoint is ticked in that iteration, and never drains the latch.

use crate::collection::EndpointCollection;
use crate::endpoint::AssertionEndpoint;
use crate::error::{HarnessError, Result};
use crate::simulation::SimulationControl;
use crate::types::{FatalFiring, HarnessState, RunOutcome, RunPolicy, RunStats, WarmUp};
use tracing::{debug, error, info, trace};

/// A harness that can be driven once to completion.
pub trait Harness {
    /// Policy applied to fired endpoints.
    fn policy(&self) -> RunPolicy;

    /// Current lifecycle state.
    fn state(&self) -> HarnessState;

    /// Initializes endpoints, warms the design up and polls until the
    /// simulation is done or the policy ends the run.
    fn run(&mut self) -> Result<RunOutcome>;
}

/// What the loop body decided about a fired endpoint.
enum Flow {
    Resumed,
    Abort(FatalFiring),
}

/// State shared by both harness variants.
struct Driver<S> {
    sim: S,
    endpoints: EndpointCollection,
    warm_up: WarmUp,
    state: HarnessState,
}

impl<S: SimulationControl> Driver<S> {
    fn new(sim: S, endpoints: EndpointCollection) -> Self {
        Self {
            sim,
            endpoints,
            warm_up: WarmUp::default(),
            state: HarnessState::NotStarted,
        }
    }

    fn set_state(&mut self, next: HarnessState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(HarnessError::InvalidStateTransition {
                from: self.state.to_string(),
                to: next.to_string(),
            });
        }
        trace!(from = %self.state, to = %next, "harness state change");
        self.state = next;
        Ok(())
    }

    /// `NotStarted -> Initializing -> Running`.
    ///
    /// Every endpoint is initialized before the design is reset or stepped.
    fn start(&mut self, policy: RunPolicy) -> Result<()> {
        self.set_state(HarnessState::Initializing)?;
        info!(
            policy = %policy,
            endpoints = self.endpoints.len(),
            "initializing assertion endpoints"
        );
        for endpoint in self.endpoints.iter_mut() {
            endpoint.init()?;
        }

        self.set_state(HarnessState::Running)?;
        info!(
            reset_cycles = self.warm_up.reset_cycles,
            step_cycles = self.warm_up.step_cycles,
            blocking = self.warm_up.blocking,
            "releasing design from reset"
        );
        self.sim.reset(self.warm_up.reset_cycles)?;
        self.sim
            .step(self.warm_up.step_cycles, self.warm_up.blocking)?;
        Ok(())
    }

    /// Polls every endpoint, in collection order, until `done()`.
    ///
    /// `on_fired` runs for each endpoint whose latch is set right after its
    /// tick. Returning [`Flow::Abort`] ends the run before the next endpoint
    /// is ticked.
    fn poll<F>(&mut self, mut on_fired: F) -> Result<RunOutcome>
    where
        F: FnMut(usize, &mut dyn AssertionEndpoint, u64) -> Result<Flow>,
    {
        let mut stats = RunStats::with_endpoints(self.endpoints.len());
        let mut aborted = None;

        'run: while !self.sim.done()? {
            stats.iterations += 1;
            let tick = stats.iterations;
            trace!(tick, "polling assertion endpoints");

            for (index, endpoint) in self.endpoints.iter_mut().enumerate() {
                endpoint.tick()?;
                if !endpoint.terminate()? {
                    continue;
                }
                stats.firings[index] += 1;
                match on_fired(index, &mut **endpoint, tick)? {
                    Flow::Resumed => stats.resumes += 1,
                    Flow::Abort(firing) => {
                        aborted = Some(firing);
                        break 'run;
                    }
                }
            }
        }

        self.set_state(HarnessState::Finished)?;
        match aborted {
            Some(firing) => Ok(RunOutcome::Aborted(firing)),
            None => {
                info!(
                    iterations = stats.iterations,
                    firings = stats.total_firings(),
                    resumes = stats.resumes,
                    "simulation done"
                );
                Ok(RunOutcome::Completed(stats))
            }
        }
    }
}

/// Harness that tolerates assertion firings.
///
/// Fired endpoints are resumed in place; the run ends only when the
/// simulation reports done.
pub struct TortureHarness<S> {
    driver: Driver<S>,
}

impl<S: SimulationControl> TortureHarness<S> {
    /// Takes ownership of the simulation handle and the endpoints.
    pub fn new(sim: S, endpoints: EndpointCollection) -> Self {
        Self {
            driver: Driver::new(sim, endpoints),
        }
    }

    /// Overrides the reset and bulk step issued before polling.
    pub fn with_warm_up(mut self, warm_up: WarmUp) -> Self {
        self.driver.warm_up = warm_up;
        self
    }

    pub fn endpoints(&self) -> &EndpointCollection {
        &self.driver.endpoints
    }
}

impl<S: SimulationControl> Harness for TortureHarness<S> {
    fn policy(&self) -> RunPolicy {
        RunPolicy::Tolerant
    }

    fn state(&self) -> HarnessState {
        self.driver.state
    }

    fn run(&mut self) -> Result<RunOutcome> {
        self.driver.start(self.policy())?;
        self.driver.poll(|index, endpoint, tick| {
            let message = endpoint.fired_message();
            debug!(
                endpoint = index,
                name = endpoint.name(),
                tick,
                message = message.as_deref().unwrap_or("<unknown>"),
                "assertion fired, resuming"
            );
            endpoint.resume()?;
            Ok(Flow::Resumed)
        })
    }
}

/// Harness that treats any assertion firing as fatal.
///
/// Used for global reset conditions that must never fire: the first firing
/// ends the run with [`RunOutcome::Aborted`] and the latch is left as is.
pub struct FatalAssertionHarness<S> {
    driver: Driver<S>,
}

impl<S: SimulationControl> FatalAssertionHarness<S> {
    /// Takes ownership of the simulation handle and the endpoints.
    pub fn new(sim: S, endpoints: EndpointCollection) -> Self {
        Self {
            driver: Driver::new(sim, endpoints),
        }
    }

    /// Overrides the reset and bulk step issued before polling.
    pub fn with_warm_up(mut self, warm_up: WarmUp) -> Self {
        self.driver.warm_up = warm_up;
        self
    }

    pub fn endpoints(&self) -> &EndpointCollection {
        &self.driver.endpoints
    }
}

impl<S: SimulationControl> Harness for FatalAssertionHarness<S> {
    fn policy(&self) -> RunPolicy {
        RunPolicy::Fatal
    }

    fn state(&self) -> HarnessState {
        self.driver.state
    }

    fn run(&mut self) -> Result<RunOutcome> {
        self.driver.start(self.policy())?;
        self.driver.poll(|index, endpoint, tick| {
            let firing = FatalFiring {
                endpoint: index,
                name: endpoint.name().to_string(),
                tick,
                message: endpoint.fired_message(),
            };
            error!(
                endpoint = index,
                name = %firing.name,
                tick,
                message = firing.message.as_deref().unwrap_or("<unknown>"),
                "fatal assertion fired"
            );
            Ok(Flow::Abort(firing))
        })
    }
}

/// Builds the harness variant for `policy`.
pub fn build_harness<'a, S>(
    policy: RunPolicy,
    sim: S,
    endpoints: EndpointCollection,
    warm_up: WarmUp,
) -> Box<dyn Harness + 'a>
where
    S: SimulationControl + 'a,
{
    match policy {
        RunPolicy::Tolerant => Box::new(TortureHarness::new(sim, endpoints).with_warm_up(warm_up)),
        RunPolicy::Fatal => {
            Box::new(FatalAssertionHarness::new(sim, endpoints).with_warm_up(warm_up))
        }
    }
}
