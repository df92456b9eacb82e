//! Assertion-monitoring endpoint capability consumed by the harness.

use crate::error::Result;

/// One independently firable group of synthesized assertions.
///
/// An endpoint latches "fired" state when [`tick`](Self::tick) samples a
/// triggered condition on the design, and holds it until
/// [`resume`](Self::resume) drains it.
pub trait AssertionEndpoint {
    /// Name used in logs and fatal reports.
    fn name(&self) -> &str;

    /// One-time setup. Must run before the first `tick()` and before the
    /// design leaves reset.
    fn init(&mut self) -> Result<()>;

    /// Samples current design state into the fired latch.
    ///
    /// Not idempotent; ordering relative to simulation steps matters.
    fn tick(&mut self) -> Result<()>;

    /// Whether a monitored condition fired since the last `resume()`.
    fn terminate(&mut self) -> Result<bool>;

    /// Clears the latch and lets the design continue past the firing.
    fn resume(&mut self) -> Result<()>;

    /// Message describing the currently latched firing, looked up in the
    /// endpoint's message table. Reporting only.
    fn fired_message(&self) -> Option<String> {
        None
    }
}
