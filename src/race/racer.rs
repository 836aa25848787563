//! First-success-wins racing of upstream calls.
//!
//! # Responsibilities
//! - Launch one task per upstream call
//! - Resolve on first successful result, total failure, or deadline
//! - Cancel in-flight calls once the race is decided
//!
//! # Design Decisions
//! - Workers report over a channel sized to the number of calls, so a
//!   laggard's send never blocks even after the arbiter has returned
//! - A single watch channel carries the cancel signal; firing it drops
//!   the in-flight call futures, which aborts their HTTP requests
//! - An error from one upstream never ends the race while others are
//!   still pending

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant};

use crate::race::types::{RaceOutcome, UpstreamCall};
use crate::upstream::types::{Address, LookupError};

/// Race `calls` against each other and against `deadline`.
///
/// Resolves with the first successful address, with `Failure` as soon as
/// every call has failed, or with `TimedOut` once the deadline elapses,
/// whichever comes first. A zero deadline resolves as `TimedOut` before
/// any call can complete. Calls still in flight at resolution are
/// cancelled; the racer does not wait for them.
pub async fn race(deadline: Duration, calls: Vec<UpstreamCall>) -> RaceOutcome {
    let deadline_at = Instant::now() + deadline;
    let (cancel_tx, _) = watch::channel(());
    let (result_tx, mut result_rx) =
        mpsc::channel::<(String, Result<Address, LookupError>)>(calls.len().max(1));
    let mut pending = calls.len();

    for call in calls {
        let result_tx = result_tx.clone();
        let mut cancel_rx = cancel_tx.subscribe();
        let (origin, future) = call.into_parts();

        tokio::spawn(async move {
            tokio::select! {
                result = future => {
                    // The receiver may already be gone; that only means
                    // the race was decided without us.
                    let _ = result_tx.send((origin, result)).await;
                }
                _ = cancel_rx.changed() => {
                    tracing::trace!(origin = %origin, "upstream call cancelled");
                }
            }
        });
    }
    drop(result_tx);

    let mut last_error: Option<LookupError> = None;
    loop {
        tokio::select! {
            reported = result_rx.recv() => match reported {
                Some((origin, Ok(address))) => {
                    let _ = cancel_tx.send(());
                    return RaceOutcome::Success { address, origin };
                }
                Some((origin, Err(error))) => {
                    tracing::debug!(origin = %origin, error = %error, "upstream call failed");
                    last_error = Some(error);
                    pending = pending.saturating_sub(1);
                    if pending == 0 {
                        return RaceOutcome::Failure {
                            error: last_error.take().unwrap_or(LookupError::NoUpstreams),
                        };
                    }
                }
                // All senders gone without a winner: the race was started
                // with no calls, or every worker was already cancelled.
                None => {
                    return RaceOutcome::Failure {
                        error: last_error.take().unwrap_or(LookupError::NoUpstreams),
                    };
                }
            },
            _ = time::sleep_until(deadline_at) => {
                let _ = cancel_tx.send(());
                return RaceOutcome::TimedOut;
            }
        }
    }
}
