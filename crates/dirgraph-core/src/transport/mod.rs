//! HTTP transport boundary.
//!
//! The dispatcher never talks to the network directly; it hands each attempt a
//! [`Transport`] that performs one GET with the attempt's headers. The
//! production implementation is [`CurlTransport`] (libcurl easy handle, one per
//! request). Tests substitute scripted transports.

mod easy;
mod parse;

pub use easy::{CurlOptions, CurlTransport};

use thiserror::Error;

/// One outbound or inbound HTTP header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Case-insensitive header lookup; the last occurrence wins.
pub fn header_value<'a>(headers: &'a [Header], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .rev()
        .find(|h| h.name.eq_ignore_ascii_case(name))
        .map(|h| h.value.as_str())
}

/// Response to a single GET.
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u32,
    pub headers: Vec<Header>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        header_value(&self.headers, name)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Failure below HTTP: the request never produced a status line.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Curl(#[from] curl::Error),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("{0}")]
    Other(String),
}

/// Performs a single GET against the directory service.
pub trait Transport {
    fn get(&self, url: &str, headers: &[Header]) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, url: &str, headers: &[Header]) -> Result<HttpResponse, TransportError> {
        (**self).get(url, headers)
    }
}
