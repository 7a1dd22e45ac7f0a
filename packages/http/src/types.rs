use std::fmt;

use http::HeaderValue;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::Error;

/// Bytes escaped in the request target. `%` and `?` pass through so
/// names that already carry escapes or a query keep their meaning.
const PATH_ENCODE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Longest host name a target accepts.
pub const MAX_HOST_LEN: usize = 255;

/// Where a fetch goes: a host and the path requested from it.
///
/// Built fresh for every fetch from a namespace path such as
/// `example.com/docs/index.html`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTarget {
    host: String,
    path: String,
}

impl FetchTarget {
    /// Split a namespace path at its first `/` into host and request path.
    ///
    /// Without a `/` the whole string is the host and the request path is
    /// `/`.
    ///
    /// ```rust
    /// use httpfs_http::FetchTarget;
    ///
    /// let target = FetchTarget::split("example.com/a/b").unwrap();
    /// assert_eq!(target.host(), "example.com");
    /// assert_eq!(target.path(), "/a/b");
    ///
    /// let target = FetchTarget::split("example.com").unwrap();
    /// assert_eq!(target.path(), "/");
    /// ```
    pub fn split(full_path: &str) -> Result<Self, Error> {
        let (host, path) = match full_path.find('/') {
            Some(i) => full_path.split_at(i),
            None => (full_path, "/"),
        };
        Self::new(host, path)
    }

    /// Build a target from its parts, validating both.
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Result<Self, Error> {
        let host = host.into();
        let path = path.into();
        validate_host(&host)?;
        validate_path(&path)?;
        Ok(Self { host, path })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// The request path as looked up, before escaping.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The path as it goes on the request line, percent-encoded.
    pub fn request_target(&self) -> String {
        utf8_percent_encode(&self.path, PATH_ENCODE).to_string()
    }

    /// The complete HTTP/1.0 request sent for this target.
    pub fn request_head(&self, user_agent: &str) -> Result<String, Error> {
        HeaderValue::from_str(user_agent).map_err(|e| Error::InvalidUserAgent {
            user_agent: user_agent.to_string(),
            message: e.to_string(),
        })?;

        Ok(format!(
            "GET {} HTTP/1.0\r\nUser-Agent: {}\r\nHost: {}\r\n\r\n",
            self.request_target(),
            user_agent,
            self.host
        ))
    }
}

impl fmt::Display for FetchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "http://{}{}", self.host, self.request_target())
    }
}

fn validate_host(host: &str) -> Result<(), Error> {
    if host.is_empty() {
        return Err(Error::InvalidHost {
            host: host.to_string(),
            message: "empty host".to_string(),
        });
    }

    if host.len() > MAX_HOST_LEN {
        return Err(Error::HostTooLong {
            len: host.len(),
            max: MAX_HOST_LEN,
        });
    }

    url::Host::parse(host).map_err(|e| Error::InvalidHost {
        host: host.to_string(),
        message: e.to_string(),
    })?;

    Ok(())
}

fn validate_path(path: &str) -> Result<(), Error> {
    if !path.starts_with('/') {
        return Err(Error::InvalidRequestPath {
            path: path.to_string(),
            message: "must start with '/'".to_string(),
        });
    }

    if let Some(c) = path.chars().find(|c| matches!(c, '\r' | '\n' | '\0')) {
        return Err(Error::InvalidRequestPath {
            path: path.to_string(),
            message: format!("forbidden character {:?}", c),
        });
    }

    Ok(())
}
