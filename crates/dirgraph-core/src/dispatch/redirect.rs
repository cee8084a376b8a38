//! Binding redirection: walk the alternate datacenter endpoints.

use super::{Attempt, DispatchError, Dispatcher};
use crate::classify::{classify, ErrorDescriptor, RawFailure};

impl Dispatcher {
    /// Try each `Url*` candidate in service order, rebinding the session
    /// permanently before each try. The first success wins; on exhaustion the
    /// session stays bound to the last candidate.
    pub(super) fn follow_redirect<T, F>(
        &mut self,
        descriptor: &ErrorDescriptor,
        op: &mut F,
    ) -> Result<T, DispatchError>
    where
        F: FnMut(&mut Attempt<'_>) -> Result<T, RawFailure>,
    {
        let candidates: Vec<String> = descriptor
            .redirect_candidates()
            .map(str::to_string)
            .collect();
        if candidates.is_empty() {
            tracing::warn!("binding redirection without alternate endpoints: {}", descriptor.message);
        }

        for (i, candidate) in candidates.iter().enumerate() {
            let endpoint = self.session.rebind(candidate).to_string();
            tracing::info!(
                "binding redirection: rebound to {} ({}/{})",
                endpoint,
                i + 1,
                candidates.len()
            );
            match self.run_attempt(op) {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(failure)) => {
                    tracing::warn!(
                        "redirect candidate {} failed: {}",
                        endpoint,
                        classify(&failure).kind
                    );
                }
                Err(e) => {
                    tracing::warn!("redirect candidate {} failed: {}", endpoint, e);
                }
            }
        }

        Err(DispatchError::RedirectExhausted {
            attempted: candidates.len(),
        })
    }
}
