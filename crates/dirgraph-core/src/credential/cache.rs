//! Token cache in front of another provider.

use super::{CredentialError, CredentialProvider, TokenRequest};

/// Reuses the inner provider's token until it is invalidated.
#[derive(Debug)]
pub struct CachedCredential<P> {
    inner: P,
    cached: Option<String>,
}

impl<P: CredentialProvider> CachedCredential<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cached: None,
        }
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: CredentialProvider> CredentialProvider for CachedCredential<P> {
    fn acquire(&mut self, request: &TokenRequest<'_>) -> Result<String, CredentialError> {
        if let Some(token) = &self.cached {
            return Ok(token.clone());
        }
        let token = self.inner.acquire(request)?;
        self.cached = Some(token.clone());
        Ok(token)
    }

    fn invalidate(&mut self) {
        tracing::debug!("dropping cached credential");
        self.cached = None;
        self.inner.invalidate();
    }
}
