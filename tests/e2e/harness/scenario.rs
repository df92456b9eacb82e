use super::assertions::Assertion;
use super::runner::ScenarioRunner;
use super::steps::ScenarioStep;
use assertbench_core::{HarnessState, RunPolicy, SimEvent, WarmUp};

/// Fluent DSL for building test scenarios
pub struct Scenario {
    name: String,
    steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Create a new scenario with the given name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            steps: Vec::new(),
        }
    }

    // ===== Design setup =====

    /// Add an endpoint that fires on the given ticks
    pub fn endpoint(mut self, fire_on: &[u64]) -> Self {
        self.steps.push(ScenarioStep::AddEndpoint {
            fire_on: fire_on.to_vec(),
            messages: Vec::new(),
        });
        self
    }

    /// Add an endpoint with a message table
    pub fn endpoint_with_messages(mut self, fire_on: &[u64], messages: &[&str]) -> Self {
        self.steps.push(ScenarioStep::AddEndpoint {
            fire_on: fire_on.to_vec(),
            messages: messages.iter().map(|m| m.to_string()).collect(),
        });
        self
    }

    /// Add `count` endpoints that never fire
    pub fn quiet_endpoints(mut self, count: usize) -> Self {
        for _ in 0..count {
            self = self.endpoint(&[]);
        }
        self
    }

    /// Replace the whole setup with a config file
    pub fn from_config(mut self, toml: &str) -> Self {
        self.steps.push(ScenarioStep::LoadConfig {
            toml: toml.to_string(),
        });
        self
    }

    // ===== Run control =====

    /// Run with the torture (tolerant) policy
    pub fn torture(mut self) -> Self {
        self.steps.push(ScenarioStep::Policy {
            policy: RunPolicy::Tolerant,
        });
        self
    }

    /// Run with the global-reset-condition (fatal) policy
    pub fn global_reset(mut self) -> Self {
        self.steps.push(ScenarioStep::Policy {
            policy: RunPolicy::Fatal,
        });
        self
    }

    /// Simulation reports done after this many polling iterations
    pub fn done_after(mut self, iterations: u64) -> Self {
        self.steps.push(ScenarioStep::Iterations { count: iterations });
        self
    }

    /// Override reset and bulk step
    pub fn warm_up(mut self, reset_cycles: u64, step_cycles: u64, blocking: bool) -> Self {
        self.steps.push(ScenarioStep::WarmUp {
            warm_up: WarmUp {
                reset_cycles,
                step_cycles,
                blocking,
            },
        });
        self
    }

    /// Run the harness now (assertions run it implicitly otherwise)
    pub fn run_harness(mut self) -> Self {
        self.steps.push(ScenarioStep::Run);
        self
    }

    // ===== Assertions =====

    /// Add an arbitrary assertion
    pub fn assert(mut self, assertion: Assertion) -> Self {
        self.steps.push(ScenarioStep::Assert { assertion });
        self
    }

    pub fn assert_completed(self) -> Self {
        self.assert(Assertion::Completed)
    }

    pub fn assert_aborted(self, endpoint: usize, tick: u64) -> Self {
        self.assert(Assertion::Aborted { endpoint, tick })
    }

    pub fn assert_abort_message(self, message: &str) -> Self {
        self.assert(Assertion::AbortMessage(message.to_string()))
    }

    pub fn assert_iterations(self, iterations: u64) -> Self {
        self.assert(Assertion::Iterations(iterations))
    }

    pub fn assert_finished(self) -> Self {
        self.assert(Assertion::FinalState(HarnessState::Finished))
    }

    pub fn assert_tick_count(self, channel: usize, count: usize) -> Self {
        self.assert(Assertion::TickCount { channel, count })
    }

    pub fn assert_not_ticked(self, channel: usize, tick: u64) -> Self {
        self.assert(Assertion::NotTicked { channel, tick })
    }

    pub fn assert_resumed_at(self, channel: usize, ticks: &[u64]) -> Self {
        self.assert(Assertion::ResumedAt {
            channel,
            ticks: ticks.to_vec(),
        })
    }

    pub fn assert_no_resume(self) -> Self {
        self.assert(Assertion::NoResume)
    }

    pub fn assert_no_endpoint_interaction(self) -> Self {
        self.assert(Assertion::NoEndpointInteraction)
    }

    pub fn assert_init_before_warm_up(self) -> Self {
        self.assert(Assertion::InitBeforeWarmUp)
    }

    pub fn assert_resumed_before_next_tick(self) -> Self {
        self.assert(Assertion::ResumedBeforeNextTick)
    }

    pub fn assert_sequence(self, events: &[SimEvent]) -> Self {
        self.assert(Assertion::Sequence(events.to_vec()))
    }

    pub fn assert_last_event(self, event: SimEvent) -> Self {
        self.assert(Assertion::LastEvent(event))
    }

    // ===== Execution =====

    /// Execute the scenario
    pub fn run(self) -> ScenarioResult {
        let mut runner = ScenarioRunner::new();

        match runner.execute(&self.steps) {
            Ok(()) => ScenarioResult {
                name: self.name,
                success: true,
                steps_executed: self.steps.len(),
                failure_step: None,
                error: None,
            },
            Err(e) => {
                let failure_step = runner.current_step();
                ScenarioResult {
                    name: self.name,
                    success: false,
                    steps_executed: failure_step,
                    failure_step: Some(failure_step),
                    error: Some(format!("{:#}", e)),
                }
            }
        }
    }
}

/// Result of running a scenario
#[derive(Debug)]
pub struct ScenarioResult {
    pub name: String,
    pub success: bool,
    pub steps_executed: usize,
    pub failure_step: Option<usize>,
    pub error: Option<String>,
}

impl ScenarioResult {
    /// Unwrap the result, panicking if it failed
    pub fn unwrap(self) {
        if !self.success {
            panic!(
                "Scenario '{}' failed at step {}: {}",
                self.name,
                self.failure_step.unwrap_or(0),
                self.error.unwrap_or_else(|| "unknown error".to_string())
            );
        }
    }

    /// Expect the result to be successful
    pub fn expect(self, msg: &str) {
        if !self.success {
            panic!(
                "{}: Scenario '{}' failed at step {}: {}",
                msg,
                self.name,
                self.failure_step.unwrap_or(0),
                self.error.unwrap_or_else(|| "unknown error".to_string())
            );
        }
    }

    /// Expect the scenario to fail, returning the error text
    pub fn expect_failure(self) -> String {
        if self.success {
            panic!("Scenario '{}' was expected to fail", self.name);
        }
        self.error.unwrap_or_default()
    }
}
