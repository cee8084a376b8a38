//! Per-attempt context handed to the operation.

use crate::classify::RawFailure;
use crate::session::HEADER_REPLICA_SESSION_KEY;
use crate::tracker::EntityTracker;
use crate::transport::{Header, HttpResponse, Transport};
use serde::de::DeserializeOwned;

/// Everything an operation needs for one try: the endpoint it is bound to,
/// the headers for this attempt, the transport and the pending local state.
///
/// Operations must build their URLs from [`Attempt::url`] so that a redirect
/// to another datacenter takes effect when the operation is invoked again.
pub struct Attempt<'a> {
    transport: &'a dyn Transport,
    base_endpoint: &'a str,
    headers: &'a [Header],
    tracker: &'a mut EntityTracker,
    affinity: Option<String>,
}

impl<'a> Attempt<'a> {
    pub(crate) fn new(
        transport: &'a dyn Transport,
        base_endpoint: &'a str,
        headers: &'a [Header],
        tracker: &'a mut EntityTracker,
    ) -> Self {
        Self {
            transport,
            base_endpoint,
            headers,
            tracker,
            affinity: None,
        }
    }

    pub fn base_endpoint(&self) -> &str {
        self.base_endpoint
    }

    /// `path` resolved against the current base endpoint.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_endpoint.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn headers(&self) -> &[Header] {
        self.headers
    }

    pub fn tracker(&mut self) -> &mut EntityTracker {
        &mut *self.tracker
    }

    /// GET `url` with this attempt's headers.
    ///
    /// A non-2xx status becomes a [`RawFailure`] whose inner payload is the
    /// response body, so the classifier sees the service's error document.
    pub fn get(&mut self, url: &str) -> Result<HttpResponse, RawFailure> {
        let response = self
            .transport
            .get(url, self.headers)
            .map_err(|e| RawFailure::new(e.to_string()))?;
        if !response.is_success() {
            return Err(RawFailure::with_inner(
                format!("HTTP {}", response.status),
                response.body_text(),
            ));
        }
        if let Some(token) = response.header(HEADER_REPLICA_SESSION_KEY) {
            self.affinity = Some(token.to_string());
        }
        Ok(response)
    }

    /// GET `url` and decode the JSON body.
    pub fn get_json<T: DeserializeOwned>(&mut self, url: &str) -> Result<T, RawFailure> {
        let response = self.get(url)?;
        serde_json::from_slice(&response.body)
            .map_err(|e| RawFailure::new(format!("invalid response from {}: {}", url, e)))
    }

    pub(super) fn take_affinity(&mut self) -> Option<String> {
        self.affinity.take()
    }
}
