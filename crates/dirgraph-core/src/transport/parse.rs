//! Parse raw response header lines collected by curl.

use super::Header;

/// Parse header lines into `Header`s.
///
/// curl reports every response it sees (`100 Continue`, redirects), so a new
/// status line discards the headers collected so far and only the final
/// response's headers are returned.
pub(crate) fn parse_header_lines(lines: &[String]) -> Vec<Header> {
    let mut headers = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            headers.clear();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push(Header::new(name.trim(), value.trim()));
        }
    }
    headers
}
