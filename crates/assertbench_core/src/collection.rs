//! Ordered, harness-owned set of assertion endpoints.

use crate::endpoint::AssertionEndpoint;
use crate::error::{HarnessError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Number of assertion bridge slots a design can expose.
pub const MAX_ASSERT_CHANNELS: usize = 8;

/// A monitoring channel present in the design under test.
///
/// Supplied by whoever built the design; the harness never discovers
/// channels at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSpec {
    /// Bridge slot, `0..MAX_ASSERT_CHANNELS`.
    pub index: usize,

    /// Human-readable endpoint name.
    pub name: String,

    /// Assertion message table for this channel, indexed by assertion id.
    #[serde(default)]
    pub messages: Vec<String>,
}

impl ChannelSpec {
    /// Creates a channel with a default `assertN` name and no messages.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            name: format!("assert{}", index),
            messages: Vec::new(),
        }
    }

    /// Sets the message table.
    pub fn with_messages<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.messages = messages.into_iter().map(Into::into).collect();
        self
    }
}

/// Checks that a channel list fits the bridge slots of one design.
pub fn validate_channels(channels: &[ChannelSpec]) -> Result<()> {
    if channels.len() > MAX_ASSERT_CHANNELS {
        return Err(HarnessError::TooManyChannels {
            count: channels.len(),
            limit: MAX_ASSERT_CHANNELS,
        });
    }

    let mut seen = HashSet::new();
    for channel in channels {
        if channel.index >= MAX_ASSERT_CHANNELS {
            return Err(HarnessError::ChannelOutOfRange {
                index: channel.index,
                max: MAX_ASSERT_CHANNELS - 1,
            });
        }
        if !seen.insert(channel.index) {
            return Err(HarnessError::DuplicateChannel(channel.index));
        }
    }

    Ok(())
}

/// Endpoints in polling order.
///
/// Insertion order is construction order, and defines the round-robin order
/// in which the harness ticks endpoints. An endpoint's identity is its
/// position here. Dropping the collection tears every endpoint down.
#[derive(Default)]
pub struct EndpointCollection {
    endpoints: Vec<Box<dyn AssertionEndpoint>>,
}

impl EndpointCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds one endpoint per channel, in channel order.
    ///
    /// Each channel descriptor (and with it the message table) is moved into
    /// `factory`, so the association is fixed at construction. An empty
    /// channel list yields a valid, empty collection.
    pub fn from_channels<F>(channels: Vec<ChannelSpec>, mut factory: F) -> Result<Self>
    where
        F: FnMut(ChannelSpec) -> Result<Box<dyn AssertionEndpoint>>,
    {
        validate_channels(&channels)?;

        let mut collection = Self::new();
        for channel in channels {
            debug!(
                index = channel.index,
                name = %channel.name,
                "constructing assertion endpoint"
            );
            collection.push(factory(channel)?);
        }
        Ok(collection)
    }

    /// Appends an endpoint at the end of the polling order.
    pub fn push(&mut self, endpoint: Box<dyn AssertionEndpoint>) {
        self.endpoints.push(endpoint);
    }

    /// Number of endpoints.
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Whether the collection holds no endpoints.
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Endpoint names in polling order.
    pub fn names(&self) -> Vec<String> {
        self.endpoints.iter().map(|e| e.name().to_string()).collect()
    }

    pub(crate) fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = &mut Box<dyn AssertionEndpoint>> + '_ {
        self.endpoints.iter_mut()
    }
}

impl std::fmt::Debug for EndpointCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointCollection")
            .field("endpoints", &self.names())
            .finish()
    }
}
