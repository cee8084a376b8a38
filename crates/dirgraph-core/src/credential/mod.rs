//! Bearer credential providers.
//!
//! Issuing the token is someone else's job (an identity service or a CLI that
//! talks to one); this module only obtains the issued value and turns it into
//! an `Authorization` header. The dispatcher asks for a credential once per
//! attempt and calls [`CredentialProvider::invalidate`] when the service says
//! the token has expired.

mod cache;
mod command;

pub use cache::CachedCredential;
pub use command::CommandToken;

use thiserror::Error;

/// What the issuing service needs to mint a token for the directory.
#[derive(Debug, Clone, Copy)]
pub struct TokenRequest<'a> {
    /// Tenant address at the token issuer.
    pub authority: &'a str,
    /// Realm of the directory service the token is for.
    pub service_realm: &'a str,
    /// Identity of the calling application.
    pub issuing_resource: &'a str,
    /// Shared secret of the calling application, if configured.
    pub shared_secret: Option<&'a str>,
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("credential environment variable {0} is not set")]
    MissingEnv(String),
    #[error("credential is empty")]
    Empty,
    #[error("failed to run credential command {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("credential command {program} exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("credential command output is not UTF-8")]
    InvalidOutput,
}

/// Supplies a bearer credential for each attempt.
pub trait CredentialProvider {
    fn acquire(&mut self, request: &TokenRequest<'_>) -> Result<String, CredentialError>;

    /// Drop any cached token so the next `acquire` obtains a fresh one.
    fn invalidate(&mut self) {}
}

impl<P: CredentialProvider + ?Sized> CredentialProvider for Box<P> {
    fn acquire(&mut self, request: &TokenRequest<'_>) -> Result<String, CredentialError> {
        (**self).acquire(request)
    }

    fn invalidate(&mut self) {
        (**self).invalidate()
    }
}

/// A fixed token, e.g. one pasted from another tool.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl CredentialProvider for StaticToken {
    fn acquire(&mut self, _request: &TokenRequest<'_>) -> Result<String, CredentialError> {
        non_empty(self.0.clone())
    }
}

/// Reads the token from an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialProvider for EnvToken {
    fn acquire(&mut self, _request: &TokenRequest<'_>) -> Result<String, CredentialError> {
        let value =
            std::env::var(&self.var).map_err(|_| CredentialError::MissingEnv(self.var.clone()))?;
        non_empty(value)
    }
}

fn non_empty(token: String) -> Result<String, CredentialError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(CredentialError::Empty);
    }
    Ok(token.to_string())
}

/// `Authorization` header value for `token`. Values that already carry a scheme pass through.
pub fn authorization_header(token: &str) -> String {
    let token = token.trim();
    match token.split_once(' ') {
        Some((scheme, _)) if scheme.eq_ignore_ascii_case("bearer") => token.to_string(),
        _ => format!("Bearer {}", token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(super) fn request() -> TokenRequest<'static> {
        TokenRequest {
            authority: "https://accounts.accesscontrol.windows.net/contoso.com",
            service_realm: "00000002-0000-0000-c000-000000000000/graph.windows.net@contoso.com",
            issuing_resource: "app@contoso.com",
            shared_secret: Some("c2VjcmV0"),
        }
    }

    #[test]
    fn authorization_header_adds_bearer_scheme() {
        assert_eq!(authorization_header("abc"), "Bearer abc");
        assert_eq!(authorization_header(" Bearer abc "), "Bearer abc");
        assert_eq!(authorization_header("bearer abc"), "bearer abc");
    }

    #[test]
    fn static_token_rejects_empty() {
        assert_eq!(StaticToken::new(" tok ").acquire(&request()).unwrap(), "tok");
        assert!(matches!(
            StaticToken::new("  ").acquire(&request()),
            Err(CredentialError::Empty)
        ));
    }

    #[test]
    fn env_token_reports_missing_variable() {
        let mut p = EnvToken::new("DIRGRAPH_TEST_TOKEN_THAT_IS_NEVER_SET");
        match p.acquire(&request()) {
            Err(CredentialError::MissingEnv(var)) => {
                assert_eq!(var, "DIRGRAPH_TEST_TOKEN_THAT_IS_NEVER_SET")
            }
            other => panic!("expected MissingEnv, got {:?}", other),
        }
    }
}
