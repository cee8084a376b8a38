//! Retry policy: which error kinds are retried, redirected or aborted.

use crate::classify::ErrorKind;

/// What the dispatcher does with a classified failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyAction {
    /// Surface the failure now; retrying cannot change the outcome.
    Abort,
    /// Try the alternate endpoints carried in the error detail.
    Redirect,
    /// Try again immediately while attempts remain.
    Retry,
}

/// Decision for one failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    NoRetry,
    Redirect,
    RetryNow,
}

/// Fixed attempt budget with no backoff between attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

impl RetryPolicy {
    /// Partition of error kinds. Unrecognized kinds are never retried.
    pub fn action(kind: &ErrorKind) -> PolicyAction {
        match kind {
            ErrorKind::ReplicaUnavailable
            | ErrorKind::ExpiredToken
            | ErrorKind::ThrottledTemporarily => PolicyAction::Retry,
            ErrorKind::BindingRedirection => PolicyAction::Redirect,
            ErrorKind::Unauthorized
            | ErrorKind::UnknownAuthFailure
            | ErrorKind::UnsupportedToken
            | ErrorKind::ContractVersionMissing
            | ErrorKind::InvalidContractVersion
            | ErrorKind::HeaderNotSupported
            | ErrorKind::ObjectNotFound
            | ErrorKind::InternalServerError
            | ErrorKind::InvalidSessionKey
            | ErrorKind::BadRequest
            | ErrorKind::IdentityNotFound
            | ErrorKind::IdentityDisabled
            | ErrorKind::RequestDenied
            | ErrorKind::BindingRedirectionInternalError
            | ErrorKind::ThrottledPermanently
            | ErrorKind::UnsupportedQuery
            | ErrorKind::InvalidRequestUrl
            | ErrorKind::ResourceNotFound
            | ErrorKind::DuplicateKeyConflict
            | ErrorKind::UnsupportedMediaType
            | ErrorKind::Other(_) => PolicyAction::Abort,
        }
    }

    /// Decide what to do after `attempt` (1-based) failed with `kind`.
    pub fn decide(&self, attempt: u32, kind: &ErrorKind) -> RetryDecision {
        match Self::action(kind) {
            PolicyAction::Abort => RetryDecision::NoRetry,
            PolicyAction::Redirect => RetryDecision::Redirect,
            PolicyAction::Retry if attempt >= self.max_attempts => RetryDecision::NoRetry,
            PolicyAction::Retry => RetryDecision::RetryNow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_kinds_are_retried() {
        for kind in [
            ErrorKind::ReplicaUnavailable,
            ErrorKind::ExpiredToken,
            ErrorKind::ThrottledTemporarily,
        ] {
            assert_eq!(RetryPolicy::action(&kind), PolicyAction::Retry);
        }
    }

    #[test]
    fn domain_errors_abort() {
        for kind in [
            ErrorKind::BadRequest,
            ErrorKind::ObjectNotFound,
            ErrorKind::RequestDenied,
            ErrorKind::ThrottledPermanently,
            ErrorKind::ResourceNotFound,
            ErrorKind::BindingRedirectionInternalError,
            ErrorKind::Other("boom".to_string()),
        ] {
            assert_eq!(RetryPolicy::action(&kind), PolicyAction::Abort);
        }
    }

    #[test]
    fn redirection_is_its_own_action() {
        let p = RetryPolicy::default();
        assert_eq!(
            RetryPolicy::action(&ErrorKind::BindingRedirection),
            PolicyAction::Redirect
        );
        // Redirect ignores the remaining budget.
        assert_eq!(p.decide(3, &ErrorKind::BindingRedirection), RetryDecision::Redirect);
    }

    #[test]
    fn respects_max_attempts() {
        let p = RetryPolicy::default();
        assert_eq!(p.max_attempts, 3);
        assert_eq!(p.decide(1, &ErrorKind::ReplicaUnavailable), RetryDecision::RetryNow);
        assert_eq!(p.decide(2, &ErrorKind::ReplicaUnavailable), RetryDecision::RetryNow);
        assert_eq!(p.decide(3, &ErrorKind::ReplicaUnavailable), RetryDecision::NoRetry);
    }
}
