//! Terminal errors surfaced by the dispatcher.

use crate::classify::{ErrorDescriptor, ErrorKind};
use crate::credential::CredentialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// The service rejected the request, or retries ran out.
    #[error("{message}")]
    Service { kind: ErrorKind, message: String },
    /// Binding redirection offered endpoints and none of them worked.
    #[error("binding redirection failed after trying {attempted} alternate endpoint(s)")]
    RedirectExhausted { attempted: usize },
    /// The bearer credential could not be obtained. Never retried.
    #[error("failed to acquire credential: {0}")]
    Credential(#[from] CredentialError),
}

impl DispatchError {
    pub(crate) fn service(descriptor: ErrorDescriptor) -> Self {
        DispatchError::Service {
            kind: descriptor.kind,
            message: descriptor.message,
        }
    }

    /// The classified kind, for service failures.
    pub fn kind(&self) -> Option<&ErrorKind> {
        match self {
            DispatchError::Service { kind, .. } => Some(kind),
            _ => None,
        }
    }
}
