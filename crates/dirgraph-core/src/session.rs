//! Endpoint session: the bound service endpoint and replica affinity token.
//!
//! Owned by the dispatcher. The base endpoint changes only when the service
//! redirects the tenant to another datacenter; the affinity token is refreshed
//! from every successful response that carries one and sent on every request
//! after that.

use crate::transport::Header;

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_DATA_CONTRACT_VERSION: &str = "x-ms-dirapi-data-contract-version";
pub const HEADER_REPLICA_SESSION_KEY: &str = "ocp-aad-session-key";
pub const HEADER_CLIENT_REQUEST_ID: &str = "client-request-id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSession {
    base_endpoint: String,
    tenant_address: String,
    affinity_token: Option<String>,
}

impl EndpointSession {
    /// New session bound to `base_endpoint` with no affinity.
    pub fn new(base_endpoint: impl Into<String>, tenant_address: impl Into<String>) -> Self {
        Self {
            base_endpoint: base_endpoint.into(),
            tenant_address: tenant_address.into(),
            affinity_token: None,
        }
    }

    pub fn base_endpoint(&self) -> &str {
        &self.base_endpoint
    }

    pub fn tenant_address(&self) -> &str {
        &self.tenant_address
    }

    pub fn affinity_token(&self) -> Option<&str> {
        self.affinity_token.as_deref()
    }

    /// Record the affinity token from a successful response. Empty values are ignored.
    pub fn observe_affinity(&mut self, token: Option<String>) {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.affinity_token = Some(token);
        }
    }

    /// Permanently bind to a redirect candidate; returns the new base endpoint.
    /// The path segment is the tenant's domain name, not the token issuer's tenant address.
    pub fn rebind(&mut self, candidate: &str) -> &str {
        self.base_endpoint = format!(
            "{}/{}",
            candidate.trim_end_matches('/'),
            self.tenant_address.trim_start_matches('/')
        );
        &self.base_endpoint
    }

    /// Reconnect: bind to `base_endpoint` again and forget the affinity token.
    pub fn reset(&mut self, base_endpoint: impl Into<String>) {
        self.base_endpoint = base_endpoint.into();
        self.affinity_token = None;
    }

    /// Outbound headers for one attempt.
    ///
    /// `authorization` is the full header value; a fresh correlation id is
    /// generated on every call.
    pub fn request_headers(&self, authorization: &str, contract_version: &str) -> Vec<Header> {
        let mut headers = vec![
            Header::new(HEADER_AUTHORIZATION, authorization),
            Header::new(HEADER_DATA_CONTRACT_VERSION, contract_version),
        ];
        if let Some(token) = self.affinity_token.as_deref().filter(|t| !t.is_empty()) {
            headers.push(Header::new(HEADER_REPLICA_SESSION_KEY, token));
        }
        headers.push(Header::new(
            HEADER_CLIENT_REQUEST_ID,
            uuid::Uuid::new_v4().to_string(),
        ));
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::header_value;

    #[test]
    fn new_session_has_no_affinity() {
        let s = EndpointSession::new("https://graph.example/contoso.com", "contoso.com");
        assert_eq!(s.base_endpoint(), "https://graph.example/contoso.com");
        assert!(s.affinity_token().is_none());
        let headers = s.request_headers("Bearer t", "0.8");
        assert!(header_value(&headers, HEADER_REPLICA_SESSION_KEY).is_none());
        assert_eq!(header_value(&headers, HEADER_AUTHORIZATION), Some("Bearer t"));
        assert_eq!(header_value(&headers, HEADER_DATA_CONTRACT_VERSION), Some("0.8"));
    }

    #[test]
    fn affinity_is_attached_once_observed() {
        let mut s = EndpointSession::new("https://graph.example/t", "t");
        s.observe_affinity(Some("replica-7".to_string()));
        let headers = s.request_headers("Bearer t", "0.8");
        assert_eq!(header_value(&headers, HEADER_REPLICA_SESSION_KEY), Some("replica-7"));

        // Missing or empty tokens do not clear the current one.
        s.observe_affinity(None);
        s.observe_affinity(Some(String::new()));
        assert_eq!(s.affinity_token(), Some("replica-7"));
    }

    #[test]
    fn correlation_id_is_fresh_per_attempt() {
        let s = EndpointSession::new("https://graph.example/t", "t");
        let a = s.request_headers("Bearer t", "0.8");
        let b = s.request_headers("Bearer t", "0.8");
        let id_a = header_value(&a, HEADER_CLIENT_REQUEST_ID).unwrap();
        let id_b = header_value(&b, HEADER_CLIENT_REQUEST_ID).unwrap();
        assert_ne!(id_a, id_b);
        assert!(uuid::Uuid::parse_str(id_a).is_ok());
    }

    #[test]
    fn rebind_joins_candidate_and_tenant() {
        let mut s = EndpointSession::new("https://graph.example/contoso.com", "contoso.com");
        assert_eq!(s.rebind("https://dc2/"), "https://dc2/contoso.com");
        assert_eq!(s.rebind("https://dc3"), "https://dc3/contoso.com");
        assert_eq!(s.base_endpoint(), "https://dc3/contoso.com");
    }

    #[test]
    fn reset_clears_affinity() {
        let mut s = EndpointSession::new("https://dc2/t", "t");
        s.observe_affinity(Some("k".to_string()));
        s.reset("https://graph.example/t");
        assert_eq!(s.base_endpoint(), "https://graph.example/t");
        assert!(s.affinity_token().is_none());
    }
}
