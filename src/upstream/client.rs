//! HTTP client for upstream fetches.

use std::time::Duration;

use crate::upstream::types::{LookupError, LookupResult};

/// Thin wrapper over a shared reqwest client.
///
/// One instance serves every race; reqwest clients are cheap to clone and
/// pool connections internally. Cancellation is cooperative: the racer
/// drops the fetch future, which aborts the underlying request.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
}

impl UpstreamClient {
    /// Build a client with the given connect timeout.
    ///
    /// No overall request timeout is set here; the race deadline bounds
    /// every call.
    pub fn new(connect_timeout: Duration) -> LookupResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        Ok(Self { http })
    }

    /// Fetch `url`, returning the raw body bytes.
    ///
    /// Any non-2xx status counts as a transport failure, same as a
    /// connection error.
    pub async fn fetch(&self, url: &str) -> LookupResult<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Transport(format!(
                "unexpected status {} from {}",
                status, url
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        Ok(body.to_vec())
    }
}
