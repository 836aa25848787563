//! Core lookup boundary: one call per configured upstream, raced.

use std::time::{Duration, Instant};

use crate::config::schema::{ServiceConfig, UpstreamConfig};
use crate::observability::metrics;
use crate::race::{race, shape, LookupResponse, RaceOutcome, UpstreamCall};
use crate::upstream::providers::origin_of;
use crate::upstream::types::LookupResult;
use crate::upstream::UpstreamClient;

/// Request-scoped racing of the configured upstreams.
///
/// Holds everything that outlives a single request (client, upstream set,
/// deadline); each call to [`handle`](Self::handle) builds fresh
/// `UpstreamCall`s and discards them with the race.
pub struct LookupService {
    client: UpstreamClient,
    upstreams: Vec<UpstreamConfig>,
    deadline: Duration,
}

impl LookupService {
    pub fn new(config: &ServiceConfig) -> LookupResult<Self> {
        let client = UpstreamClient::new(Duration::from_millis(config.lookup.connect_timeout_ms))?;
        Ok(Self {
            client,
            upstreams: config.upstreams.clone(),
            deadline: Duration::from_millis(config.lookup.deadline_ms),
        })
    }

    /// Resolve one lookup: race every upstream, shape whatever comes back.
    ///
    /// Never fails outward; the worst outcome is a response carrying an
    /// error string.
    pub async fn handle(&self, cep: &str) -> LookupResponse {
        let started = Instant::now();
        let outcome = race(self.deadline, self.build_calls(cep)).await;

        match &outcome {
            RaceOutcome::Success { origin, .. } => {
                tracing::debug!(cep = %cep, api = %origin, elapsed = ?started.elapsed(), "lookup resolved");
                metrics::record_lookup("success", origin, started);
            }
            RaceOutcome::Failure { error } => {
                tracing::warn!(cep = %cep, error = %error, "all upstreams failed");
                metrics::record_lookup("failure", "", started);
            }
            RaceOutcome::TimedOut => {
                tracing::warn!(cep = %cep, deadline = ?self.deadline, "lookup timed out");
                metrics::record_lookup("timeout", "", started);
            }
        }

        shape(outcome, self.deadline.as_millis() as i64)
    }

    fn build_calls(&self, cep: &str) -> Vec<UpstreamCall> {
        self.upstreams
            .iter()
            .map(|upstream| {
                let url = upstream.url_for(cep);
                let origin = origin_of(&url);
                let client = self.client.clone();
                let kind = upstream.kind;
                UpstreamCall::new(origin, async move {
                    let body = client.fetch(&url).await?;
                    kind.parse(&body)
                })
            })
            .collect()
    }
}
