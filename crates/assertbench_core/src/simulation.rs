//! Simulation control capability consumed by the harness.

use crate::error::Result;

/// Clock, reset and completion primitives of the simulated design.
///
/// Implemented by the simulation transport. The harness drives it from a
/// single thread and never overlaps a step with an endpoint tick.
pub trait SimulationControl {
    /// Holds the design in reset for `cycles` cycles. Synchronous.
    fn reset(&mut self, cycles: u64) -> Result<()>;

    /// Advances the clock by `cycles`.
    ///
    /// With `blocking == false` the call may return before every cycle has
    /// retired. Callers must rely on [`SimulationControl::done`], not on this
    /// call returning, to learn that the run is over.
    fn step(&mut self, cycles: u64, blocking: bool) -> Result<()>;

    /// Whether the run has reached its end condition.
    fn done(&mut self) -> Result<bool>;
}

impl<S: SimulationControl + ?Sized> SimulationControl for Box<S> {
    fn reset(&mut self, cycles: u64) -> Result<()> {
        (**self).reset(cycles)
    }

    fn step(&mut self, cycles: u64, blocking: bool) -> Result<()> {
        (**self).step(cycles, blocking)
    }

    fn done(&mut self) -> Result<bool> {
        (**self).done()
    }
}
