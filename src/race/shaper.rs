//! Shaping of race outcomes into the caller-facing response.

use serde::{Deserialize, Serialize};

use crate::race::types::RaceOutcome;
use crate::upstream::types::Address;

/// Error message returned when no upstream answered before the deadline.
pub const TIMEOUT_MESSAGE: &str = "Timeout - Nenhuma das APIs respondeu";

/// External-facing lookup result, serialized as-is by the HTTP adapter.
///
/// `address` and `error` are mutually exclusive: at most one of them is
/// ever populated. `timeout_ms` is present only when the race timed out.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LookupResponse {
    /// Winning address, if any upstream succeeded in time.
    pub address: Option<Address>,

    /// Identity of the upstream that produced the address; empty when none did.
    #[serde(default)]
    pub api: String,

    /// Error description; empty (and omitted on the wire) on success.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,

    /// Configured deadline in milliseconds, populated only on timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<i64>,
}

/// Turn a race outcome into the response shape.
///
/// Pure and total: the match is exhaustive, so adding a `RaceOutcome`
/// variant without handling it here fails to compile. `timeout_ms` is the
/// configured deadline and is only echoed back on the timeout variant.
pub fn shape(outcome: RaceOutcome, timeout_ms: i64) -> LookupResponse {
    match outcome {
        RaceOutcome::Success { address, origin } => LookupResponse {
            address: Some(address),
            api: origin,
            ..LookupResponse::default()
        },
        RaceOutcome::Failure { error } => LookupResponse {
            error: error.to_string(),
            ..LookupResponse::default()
        },
        RaceOutcome::TimedOut => LookupResponse {
            error: TIMEOUT_MESSAGE.to_string(),
            timeout_ms: Some(timeout_ms),
            ..LookupResponse::default()
        },
    }
}
