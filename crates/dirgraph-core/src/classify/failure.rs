//! Raw failure signal produced by a single attempt.

use std::fmt;

/// Failure returned by an operation before classification.
///
/// `message` is the outer description (e.g. `HTTP 400` or a curl error);
/// `inner` carries the nested payload, usually the response body holding the
/// service's error document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFailure {
    pub message: String,
    pub inner: Option<String>,
}

impl RawFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            inner: None,
        }
    }

    pub fn with_inner(message: impl Into<String>, inner: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            inner: Some(inner.into()),
        }
    }

    /// Text the classifier parses: the inner payload unless it is blank.
    pub fn payload(&self) -> &str {
        self.inner
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.message)
    }
}

impl fmt::Display for RawFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Some(inner) => write!(f, "{}: {}", self.message, inner),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for RawFailure {}
