//! Error kinds reported by the directory service.

use std::fmt;

/// Stable category of a service failure.
///
/// Each recognized kind maps one-to-one to a wire code. Codes the client does
/// not know, and raw text that could not be parsed as an error document, are
/// carried verbatim in [`ErrorKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthorized,
    ExpiredToken,
    UnknownAuthFailure,
    UnsupportedToken,
    ContractVersionMissing,
    InvalidContractVersion,
    HeaderNotSupported,
    ObjectNotFound,
    InternalServerError,
    InvalidSessionKey,
    BadRequest,
    /// The replica serving the request is down; another replica may answer.
    ReplicaUnavailable,
    /// The tenant's data lives in another datacenter.
    BindingRedirection,
    IdentityNotFound,
    IdentityDisabled,
    RequestDenied,
    /// The service failed while computing the alternate datacenter endpoints.
    BindingRedirectionInternalError,
    ThrottledTemporarily,
    ThrottledPermanently,
    UnsupportedQuery,
    InvalidRequestUrl,
    ResourceNotFound,
    DuplicateKeyConflict,
    UnsupportedMediaType,
    /// Unrecognized code, or the raw failure text when nothing could be parsed.
    Other(String),
}

const CODES: &[(&str, ErrorKind)] = &[
    ("Authentication_Unauthorized", ErrorKind::Unauthorized),
    ("Authentication_ExpiredToken", ErrorKind::ExpiredToken),
    ("Authentication_Unknown", ErrorKind::UnknownAuthFailure),
    ("Authentication_UnsupportedTokenType", ErrorKind::UnsupportedToken),
    ("Headers_DataContractVersionMissing", ErrorKind::ContractVersionMissing),
    ("Headers_InvalidDataContractVersion", ErrorKind::InvalidContractVersion),
    ("Headers_HeaderNotSupported", ErrorKind::HeaderNotSupported),
    ("Directory_ObjectNotFound", ErrorKind::ObjectNotFound),
    ("Service_InternalServerError", ErrorKind::InternalServerError),
    ("Request_InvalidReplicaSessionKey", ErrorKind::InvalidSessionKey),
    ("Request_BadRequest", ErrorKind::BadRequest),
    ("Directory_ReplicaUnavailable", ErrorKind::ReplicaUnavailable),
    ("Directory_BindingRedirection", ErrorKind::BindingRedirection),
    ("Authorization_IdentityNotFound", ErrorKind::IdentityNotFound),
    ("Authorization_IdentityDisabled", ErrorKind::IdentityDisabled),
    ("Authorization_RequestDenied", ErrorKind::RequestDenied),
    (
        "Directory_BindingRedirectionInternalServerError",
        ErrorKind::BindingRedirectionInternalError,
    ),
    ("Request_ThrottledTemporarily", ErrorKind::ThrottledTemporarily),
    ("Request_ThrottledPermanently", ErrorKind::ThrottledPermanently),
    ("Request_UnsupportedQuery", ErrorKind::UnsupportedQuery),
    ("Request_InvalidRequestUrl", ErrorKind::InvalidRequestUrl),
    ("Request_ResourceNotFound", ErrorKind::ResourceNotFound),
    ("Request_MultipleObjectsWithSameKeyValue", ErrorKind::DuplicateKeyConflict),
    ("Request_MediaTypeNotSupported", ErrorKind::UnsupportedMediaType),
];

impl ErrorKind {
    /// Map a wire code to its kind. Unknown codes become [`ErrorKind::Other`].
    pub fn from_code(code: &str) -> Self {
        CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, kind)| kind.clone())
            .unwrap_or_else(|| ErrorKind::Other(code.to_string()))
    }

    /// The wire code for this kind (the carried text for `Other`).
    pub fn code(&self) -> &str {
        if let ErrorKind::Other(raw) = self {
            return raw;
        }
        CODES
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(c, _)| *c)
            .unwrap_or_default()
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, ErrorKind::Other(_))
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_recognized_code_maps_back_to_itself() {
        assert_eq!(CODES.len(), 24);
        for (code, kind) in CODES {
            assert_eq!(&ErrorKind::from_code(code), kind);
            assert_eq!(kind.code(), *code);
            assert!(kind.is_recognized());
        }
    }

    #[test]
    fn unknown_code_is_carried_verbatim() {
        let kind = ErrorKind::from_code("Directory_SomethingNew");
        assert_eq!(kind, ErrorKind::Other("Directory_SomethingNew".to_string()));
        assert_eq!(kind.code(), "Directory_SomethingNew");
        assert!(!kind.is_recognized());
    }

    #[test]
    fn codes_are_case_sensitive() {
        assert!(matches!(
            ErrorKind::from_code("request_badrequest"),
            ErrorKind::Other(_)
        ));
    }
}
