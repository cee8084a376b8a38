//! Request dispatcher: runs an operation with retries, redirection and cleanup.
//!
//! Each attempt gets a fresh credential, the session's affinity token and a new
//! correlation id. Failures are classified and routed by [`RetryPolicy`]:
//! availability errors are retried immediately up to the attempt budget,
//! binding redirection walks the alternate endpoints, everything else is
//! surfaced at once. Pending local state is detached after every attempt.

mod attempt;
mod error;
mod guard;
mod redirect;

pub use attempt::Attempt;
pub use error::DispatchError;

use crate::classify::{classify, ErrorKind, RawFailure};
use crate::credential::{authorization_header, CredentialError, CredentialProvider, TokenRequest};
use crate::policy::{RetryDecision, RetryPolicy};
use crate::session::{EndpointSession, HEADER_CLIENT_REQUEST_ID};
use crate::tracker::EntityTracker;
use crate::transport::{header_value, Transport};
use guard::PendingGuard;

/// Tenant identity used to request credentials and stamp requests.
#[derive(Debug, Clone)]
pub struct TenantSettings {
    pub authority: String,
    pub service_realm: String,
    pub issuing_resource: String,
    pub shared_secret: Option<String>,
    pub contract_version: String,
}

impl TenantSettings {
    fn token_request(&self) -> TokenRequest<'_> {
        TokenRequest {
            authority: &self.authority,
            service_realm: &self.service_realm,
            issuing_resource: &self.issuing_resource,
            shared_secret: self.shared_secret.as_deref(),
        }
    }
}

/// Executes operations against the directory for one logical client.
///
/// Not shared across threads: `execute` takes `&mut self` and attempts run
/// strictly one after another.
pub struct Dispatcher {
    session: EndpointSession,
    tenant: TenantSettings,
    credentials: Box<dyn CredentialProvider>,
    transport: Box<dyn Transport>,
    tracker: EntityTracker,
    policy: RetryPolicy,
}

impl Dispatcher {
    pub fn new(
        session: EndpointSession,
        tenant: TenantSettings,
        credentials: Box<dyn CredentialProvider>,
        transport: Box<dyn Transport>,
    ) -> Self {
        Self {
            session,
            tenant,
            credentials,
            transport,
            tracker: EntityTracker::new(),
            policy: RetryPolicy::default(),
        }
    }

    pub fn session(&self) -> &EndpointSession {
        &self.session
    }

    pub fn tenant(&self) -> &TenantSettings {
        &self.tenant
    }

    pub fn tracker(&self) -> &EntityTracker {
        &self.tracker
    }

    /// Drop every entity attached by earlier calls.
    pub fn release_tracked(&mut self) -> usize {
        self.tracker.detach_all()
    }

    /// Bind to `base_endpoint` again and drop the affinity token.
    pub fn reconnect(&mut self, base_endpoint: impl Into<String>) {
        self.session.reset(base_endpoint);
    }

    /// Run `op` until it succeeds, fails terminally, or the attempt budget is spent.
    pub fn execute<T, F>(&mut self, mut op: F) -> Result<T, DispatchError>
    where
        F: FnMut(&mut Attempt<'_>) -> Result<T, RawFailure>,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let failure = match self.run_attempt(&mut op)? {
                Ok(value) => return Ok(value),
                Err(failure) => failure,
            };

            let descriptor = classify(&failure);
            match self.policy.decide(attempt, &descriptor.kind) {
                RetryDecision::RetryNow => {
                    tracing::warn!(
                        "attempt {}/{} against {} failed with {}; retrying",
                        attempt,
                        max_attempts,
                        self.session.base_endpoint(),
                        descriptor.kind
                    );
                    if descriptor.kind == ErrorKind::ExpiredToken {
                        self.credentials.invalidate();
                    }
                }
                RetryDecision::Redirect => return self.follow_redirect(&descriptor, &mut op),
                RetryDecision::NoRetry => {
                    tracing::debug!(
                        "attempt {} failed with {}: {}",
                        attempt,
                        descriptor.kind,
                        failure
                    );
                    return Err(DispatchError::service(descriptor));
                }
            }
        }
    }

    /// One invocation of `op` with fresh headers. The outer error is a
    /// credential failure (the operation was not invoked); the inner result is
    /// the operation's own outcome.
    fn run_attempt<T, F>(&mut self, op: &mut F) -> Result<Result<T, RawFailure>, CredentialError>
    where
        F: FnMut(&mut Attempt<'_>) -> Result<T, RawFailure>,
    {
        let mut pending = PendingGuard::new(&mut self.tracker);

        let token = self.credentials.acquire(&self.tenant.token_request())?;
        let headers = self
            .session
            .request_headers(&authorization_header(&token), &self.tenant.contract_version);
        let span = tracing::info_span!(
            "attempt",
            request_id = %header_value(&headers, HEADER_CLIENT_REQUEST_ID).unwrap_or_default(),
            endpoint = %self.session.base_endpoint(),
        );
        let _entered = span.enter();

        let mut attempt = Attempt::new(
            self.transport.as_ref(),
            self.session.base_endpoint(),
            &headers,
            &mut pending,
        );
        tracing::debug!("invoking operation");
        let result = op(&mut attempt);
        let affinity = attempt.take_affinity();
        drop(attempt);
        drop(pending);

        if result.is_ok() {
            self.session.observe_affinity(affinity);
        }
        Ok(result)
    }
}
