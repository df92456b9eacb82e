//! Error types for assertbench_core operations.

use thiserror::Error;

/// Core error type for harness operations.
///
/// Assertion firings are not errors: a tolerant firing is drained in place and
/// a fatal firing is reported through [`crate::RunOutcome::Aborted`]. These
/// variants cover the plumbing around the run loop.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// The simulation transport failed while resetting, stepping or polling.
    #[error("simulation transport error: {0}")]
    Transport(String),

    /// An assertion endpoint failed while being driven.
    #[error("assertion endpoint {index} ({name}) failed: {reason}")]
    EndpointFailed {
        /// Position of the endpoint in its collection
        index: usize,
        /// Endpoint name from its channel descriptor
        name: String,
        /// Description of the failure
        reason: String,
    },

    /// Invalid harness state transition.
    #[error("invalid state transition from {from} to {to}")]
    InvalidStateTransition {
        /// Source state
        from: String,
        /// Target state
        to: String,
    },

    /// More monitoring channels than the design has bridge slots for.
    #[error("too many assertion channels: {count} exceeds limit of {limit}")]
    TooManyChannels {
        /// Number of channels supplied
        count: usize,
        /// Maximum number of bridge slots
        limit: usize,
    },

    /// A channel index lies outside the available bridge slots.
    #[error("assertion channel index {index} out of range (max {max})")]
    ChannelOutOfRange {
        /// The offending index
        index: usize,
        /// Largest valid index
        max: usize,
    },

    /// Two channels claim the same bridge slot.
    #[error("duplicate assertion channel index {0}")]
    DuplicateChannel(usize),

    /// Configuration error (loading, parsing, invalid values).
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarnessError {
    /// Returns a user-friendly recovery suggestion for the error, if available.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidStateTransition { .. } => {
                Some("A harness runs exactly once. Construct a new harness for another run.")
            }
            Self::TooManyChannels { .. } | Self::ChannelOutOfRange { .. } => {
                Some("The design exposes assertion bridge slots 0 through 7 only.")
            }
            Self::DuplicateChannel(_) => {
                Some("Each [[channels]] entry in assertbench.toml needs a distinct index.")
            }
            Self::ConfigError(_) => Some("Run 'assertbench init' to write a default config."),
            _ => None,
        }
    }
}

/// Convenience Result type for assertbench_core operations.
pub type Result<T> = std::result::Result<T, HarnessError>;
