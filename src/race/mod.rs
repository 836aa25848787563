//! Request-racing core.
//!
//! # Data Flow
//! ```text
//! lookup key + deadline
//!     → racer.rs (one task per upstream, first success wins)
//!     → RaceOutcome (Success | Failure | TimedOut)
//!     → shaper.rs (pure normalization)
//!     → LookupResponse
//! ```
//!
//! # Design Decisions
//! - Workers share nothing mutable except the cancel signal and the
//!   result channel
//! - A failing upstream never ends the race while others are pending
//! - The racer returns as soon as the outcome is decided; it never waits
//!   for cancelled laggards

pub mod racer;
pub mod shaper;
pub mod types;

pub use racer::race;
pub use shaper::{shape, LookupResponse, TIMEOUT_MESSAGE};
pub use types::{RaceOutcome, UpstreamCall};
