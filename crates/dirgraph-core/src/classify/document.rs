//! Decode the service's JSON error document.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "odata.error", alias = "error")]
    error: ErrorDocument,
}

/// The `odata.error` body returned with a failed request.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDocument {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<ErrorMessage>,
    #[serde(default, rename = "innererror")]
    pub inner_error: Option<InnerError>,
    #[serde(default)]
    pub values: Option<Vec<DetailEntry>>,
}

/// Localized message. Older payloads send a bare string instead of an object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    Localized {
        #[serde(default)]
        lang: Option<String>,
        #[serde(default)]
        value: Option<String>,
    },
    Plain(String),
}

impl ErrorMessage {
    pub fn text(&self) -> Option<&str> {
        match self {
            ErrorMessage::Localized { value, .. } => value.as_deref(),
            ErrorMessage::Plain(s) => Some(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InnerError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "type")]
    pub error_type: Option<String>,
    #[serde(default)]
    pub stacktrace: Option<String>,
}

/// One named value from the `values` list (e.g. `Url1` -> alternate endpoint).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DetailEntry {
    #[serde(alias = "name")]
    pub item: String,
    pub value: String,
}

/// Parse `text` as an error document. Returns `None` for anything that is not one.
pub(crate) fn parse_document(text: &str) -> Option<ErrorDocument> {
    serde_json::from_str::<Envelope>(text.trim())
        .ok()
        .map(|envelope| envelope.error)
}
