//! Splitting a raw response into head and body.
//!
//! The only strict rule is the header/body boundary: the first CRLF CRLF.
//! Everything before it is parsed best-effort into a status code and
//! headers; nothing there can make a response fail.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderMap, StatusCode};

use crate::Error;

/// Separator between the response head and body.
pub const HEADER_BOUNDARY: &[u8] = b"\r\n\r\n";

/// Offset of the first [`HEADER_BOUNDARY`] in `raw`.
pub fn find_boundary(raw: &[u8]) -> Option<usize> {
    raw.windows(HEADER_BOUNDARY.len())
        .position(|window| window == HEADER_BOUNDARY)
}

/// Copy out the body of a raw response.
///
/// The body is everything after the first CRLF CRLF. It is copied into a
/// new buffer, so the raw response can be dropped afterwards.
///
/// ```rust
/// use httpfs_http::extract_body;
///
/// let raw = b"HTTP/1.0 200 OK\r\nContent-Type: text/plain\r\n\r\nHELLO";
/// assert_eq!(&extract_body(raw).unwrap()[..], b"HELLO");
/// ```
pub fn extract_body(raw: &[u8]) -> Result<Bytes, Error> {
    let boundary = find_boundary(raw).ok_or(Error::MalformedResponse { len: raw.len() })?;
    Ok(body_after(raw, boundary))
}

fn body_after(raw: &[u8], boundary: usize) -> Bytes {
    Bytes::copy_from_slice(&raw[boundary + HEADER_BOUNDARY.len()..])
}

/// A response split into head and body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code, if the status line could be parsed.
    pub status: Option<StatusCode>,

    /// Protocol token of the status line, e.g. `HTTP/1.0`.
    pub version: Option<String>,

    /// Header lines that parsed as valid name/value pairs.
    pub headers: HeaderMap,

    pub body: Bytes,
}

impl HttpResponse {
    /// Check if the response status indicates success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_some_and(|s| s.is_success())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE)?.to_str().ok()
    }

    pub fn content_length(&self) -> Option<u64> {
        self.headers.get(CONTENT_LENGTH)?.to_str().ok()?.trim().parse().ok()
    }
}

/// Parse a raw response into status, headers and body.
///
/// Fails only when there is no header/body boundary.
pub fn parse_response(raw: &[u8]) -> Result<HttpResponse, Error> {
    let boundary = find_boundary(raw).ok_or(Error::MalformedResponse { len: raw.len() })?;
    let body = body_after(raw, boundary);

    let head = String::from_utf8_lossy(&raw[..boundary]);
    let mut lines = head.split("\r\n");

    let (version, status) = lines.next().map(parse_status_line).unwrap_or_default();

    let mut headers = HeaderMap::new();
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            tracing::trace!(line, "skipping header line without ':'");
            continue;
        };
        let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.trim().as_bytes()),
            HeaderValue::from_str(value.trim()),
        ) else {
            tracing::trace!(line, "skipping unparseable header line");
            continue;
        };
        headers.append(name, value);
    }

    Ok(HttpResponse {
        status,
        version,
        headers,
        body,
    })
}

fn parse_status_line(line: &str) -> (Option<String>, Option<StatusCode>) {
    let mut parts = line.splitn(3, ' ');
    let version = parts
        .next()
        .filter(|v| v.starts_with("HTTP/"))
        .map(str::to_string);
    let status = version
        .as_ref()
        .and_then(|_| parts.next())
        .and_then(|code| StatusCode::from_bytes(code.as_bytes()).ok());
    (version, status)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = b"HTTP/1.0 200 OK\r\nContent-Type: text/plain\r\n\r\nHELLO";

    #[test]
    fn body_after_first_boundary() {
        assert_eq!(extract_body(SAMPLE).unwrap(), Bytes::from_static(b"HELLO"));
    }

    #[test]
    fn missing_boundary_is_malformed() {
        let raw = b"HTTP/1.0 200 OK\r\nContent-Type: text/plain\r\nHELLO";
        let err = extract_body(raw).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { len } if len == raw.len()));
        assert!(parse_response(raw).is_err());
    }

    #[test]
    fn empty_response_is_malformed() {
        assert!(matches!(
            extract_body(b""),
            Err(Error::MalformedResponse { len: 0 })
        ));
    }

    #[test]
    fn later_boundaries_stay_in_body() {
        let raw = b"HTTP/1.0 200 OK\r\n\r\nfirst\r\n\r\nsecond";
        assert_eq!(&extract_body(raw).unwrap()[..], b"first\r\n\r\nsecond");
        assert_eq!(&parse_response(raw).unwrap().body[..], b"first\r\n\r\nsecond");
    }

    #[test]
    fn head_and_body_split_at_the_same_boundary() {
        let raw = b"HTTP/1.0 200 OK\r\nX-A: 1\r\n\r\nX-B: 2\r\n\r\ntail";
        let response = parse_response(raw).unwrap();
        assert_eq!(response.headers.len(), 1);
        assert!(response.headers.get("x-b").is_none());
        assert_eq!(&response.body[..], b"X-B: 2\r\n\r\ntail");
    }

    #[test]
    fn empty_body_after_boundary() {
        let raw = b"HTTP/1.0 204 No Content\r\n\r\n";
        assert!(extract_body(raw).unwrap().is_empty());
    }

    #[test]
    fn body_is_binary_safe() {
        let raw = b"HTTP/1.0 200 OK\r\n\r\n\x00\x01\xff";
        assert_eq!(&extract_body(raw).unwrap()[..], b"\x00\x01\xff");
    }

    #[test]
    fn parses_status_and_headers() {
        let response = parse_response(SAMPLE).unwrap();
        assert_eq!(response.status, Some(StatusCode::OK));
        assert_eq!(response.version.as_deref(), Some("HTTP/1.0"));
        assert_eq!(response.content_type(), Some("text/plain"));
        assert!(response.is_success());
        assert_eq!(&response.body[..], b"HELLO");
    }

    #[test]
    fn not_found_is_still_a_response() {
        let raw = b"HTTP/1.0 404 Not Found\r\nContent-Length: 9\r\n\r\nnot found";
        let response = parse_response(raw).unwrap();
        assert_eq!(response.status, Some(StatusCode::NOT_FOUND));
        assert!(!response.is_success());
        assert_eq!(response.content_length(), Some(9));
        assert_eq!(&response.body[..], b"not found");
    }

    #[test]
    fn garbage_head_keeps_body() {
        let raw = b"garbage\r\nno colon here\r\nX-Ok: yes\r\n\r\nbody";
        let response = parse_response(raw).unwrap();
        assert_eq!(response.status, None);
        assert_eq!(response.version, None);
        assert_eq!(response.headers.len(), 1);
        assert_eq!(response.headers["x-ok"], "yes");
        assert_eq!(&response.body[..], b"body");
    }

    #[test]
    fn repeated_headers_are_kept() {
        let raw = b"HTTP/1.0 200 OK\r\nSet-Cookie: a=1\r\nSet-Cookie: b=2\r\n\r\n";
        let response = parse_response(raw).unwrap();
        assert_eq!(response.headers.get_all("set-cookie").iter().count(), 2);
    }
}
