//! Error classification.
//!
//! Turns the opaque failure of an attempt into an [`ErrorDescriptor`] whose
//! [`ErrorKind`] drives the dispatcher's retry, redirect or abort decision.
//! Parsing is best effort: text that is not an error document degrades to an
//! `Other` kind carrying the raw text, so classification never fails.

mod document;
mod failure;
mod kind;

pub use document::{DetailEntry, ErrorDocument, ErrorMessage, InnerError};
pub use failure::RawFailure;
pub use kind::ErrorKind;

/// Detail entries whose name starts with this prefix hold redirect candidates.
pub const REDIRECT_URL_PREFIX: &str = "Url";

/// Fallback text for a failure that carried nothing at all.
const EMPTY_FAILURE: &str = "empty failure";

/// Structured result of classifying a [`RawFailure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDescriptor {
    pub kind: ErrorKind,
    pub message: String,
    pub detail: Vec<DetailEntry>,
    pub inner: Option<InnerError>,
}

impl ErrorDescriptor {
    /// Alternate endpoints offered by a binding redirection, in service order.
    pub fn redirect_candidates(&self) -> impl Iterator<Item = &str> {
        self.detail
            .iter()
            .filter(|d| d.item.starts_with(REDIRECT_URL_PREFIX))
            .map(|d| d.value.as_str())
    }
}

/// Classify a raw failure. Deterministic and infallible.
pub fn classify(failure: &RawFailure) -> ErrorDescriptor {
    classify_text(failure.payload())
}

/// Classify a bare payload string.
pub fn classify_text(text: &str) -> ErrorDescriptor {
    if let Some(doc) = document::parse_document(text) {
        if let Some(code) = doc.code.as_deref().filter(|c| !c.is_empty()) {
            let kind = ErrorKind::from_code(code);
            let message = doc
                .message
                .as_ref()
                .and_then(ErrorMessage::text)
                .filter(|m| !m.is_empty())
                .unwrap_or(code)
                .to_string();
            return ErrorDescriptor {
                kind,
                message,
                detail: doc.values.unwrap_or_default(),
                inner: doc.inner_error,
            };
        }
    }

    let text = match text.trim() {
        "" => EMPTY_FAILURE,
        _ => text,
    };
    ErrorDescriptor {
        kind: ErrorKind::Other(text.to_string()),
        message: text.to_string(),
        detail: Vec::new(),
        inner: None,
    }
}
