//! Types exchanged between the racer and its callers.

use std::future::Future;
use std::pin::Pin;

use crate::upstream::types::{Address, LookupError};

type CallFuture = Pin<Box<dyn Future<Output = Result<Address, LookupError>> + Send>>;

/// A single upstream attempt: an identity plus the not-yet-started call.
///
/// Owned by exactly one race; the future is consumed when the race runs it.
pub struct UpstreamCall {
    origin: String,
    future: CallFuture,
}

impl UpstreamCall {
    /// Wrap a call future under the given origin identity.
    pub fn new<F>(origin: impl Into<String>, future: F) -> Self
    where
        F: Future<Output = Result<Address, LookupError>> + Send + 'static,
    {
        Self {
            origin: origin.into(),
            future: Box::pin(future),
        }
    }

    /// The upstream identity reported if this call wins.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub(crate) fn into_parts(self) -> (String, CallFuture) {
        (self.origin, self.future)
    }
}

impl std::fmt::Debug for UpstreamCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamCall")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Outcome of one race, produced once and consumed once by the shaper.
#[derive(Debug)]
pub enum RaceOutcome {
    /// First upstream to complete with a decodable address.
    Success { address: Address, origin: String },

    /// Every upstream failed before the deadline. Carries the most
    /// recently reported error.
    Failure { error: LookupError },

    /// The deadline elapsed with no winner and calls still pending.
    TimedOut,
}
