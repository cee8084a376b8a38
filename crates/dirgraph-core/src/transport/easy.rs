//! libcurl transport: one easy handle per GET.

use super::parse::parse_header_lines;
use super::{Header, HttpResponse, Transport, TransportError};
use std::str;
use std::time::Duration;

/// Timeouts applied to every request. The dispatcher imposes none of its own.
#[derive(Debug, Clone, Copy)]
pub struct CurlOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Blocking transport backed by the `curl` crate.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    options: CurlOptions,
}

impl CurlTransport {
    pub fn new(options: CurlOptions) -> Self {
        Self { options }
    }
}

impl Transport for CurlTransport {
    fn get(&self, url: &str, headers: &[Header]) -> Result<HttpResponse, TransportError> {
        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)
            .map_err(|e| TransportError::InvalidRequest(format!("{}: {}", url, e)))?;
        easy.get(true)?;
        easy.connect_timeout(self.options.connect_timeout)?;
        easy.timeout(self.options.timeout)?;

        let mut list = curl::easy::List::new();
        list.append("Accept: application/json")?;
        for h in headers {
            list.append(&format!("{}: {}", h.name.trim(), h.value.trim()))?;
        }
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        tracing::debug!("GET {} -> HTTP {} ({} bytes)", url, status, body.len());

        Ok(HttpResponse {
            status,
            headers: parse_header_lines(&header_lines),
            body,
        })
    }
}
