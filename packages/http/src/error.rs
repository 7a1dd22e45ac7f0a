use std::io;
use std::net::SocketAddrV4;

use crate::resolve::ResolveError;

/// A failed fetch.
///
/// Every variant aborts the fetch; no partial response comes back with an
/// error. Running into the response size cap is not an error, see
/// [`Truncated`].
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid host {host:?}: {message}")]
    InvalidHost { host: String, message: String },

    #[error("host name of {len} bytes exceeds the limit of {max}")]
    HostTooLong { len: usize, max: usize },

    #[error("invalid request path {path:?}: {message}")]
    InvalidRequestPath { path: String, message: String },

    #[error("invalid user agent {user_agent:?}: {message}")]
    InvalidUserAgent { user_agent: String, message: String },

    #[error("could not resolve {host}: {source}")]
    Resolution {
        host: String,
        #[source]
        source: ResolveError,
    },

    #[error("could not create socket for {addr}: {source}")]
    SocketCreate {
        addr: SocketAddrV4,
        #[source]
        source: io::Error,
    },

    #[error("could not connect to {addr}: {source}")]
    Connect {
        addr: SocketAddrV4,
        #[source]
        source: io::Error,
    },

    #[error("send failed after {sent} of {total} bytes: {source}")]
    Send {
        sent: usize,
        total: usize,
        #[source]
        source: io::Error,
    },

    #[error("receive failed after {received} bytes: {source}")]
    Receive {
        received: usize,
        #[source]
        source: io::Error,
    },

    #[error("invalid response: no header/body boundary in {len} bytes")]
    MalformedResponse { len: usize },

    #[error("could not allocate a response buffer of {size} bytes")]
    AllocationFailed { size: usize },
}

impl Error {
    /// Whether this failure happened on the network rather than in the
    /// request or response.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Error::Resolution { .. }
                | Error::SocketCreate { .. }
                | Error::Connect { .. }
                | Error::Send { .. }
                | Error::Receive { .. }
        )
    }
}

/// The response filled the whole buffer before the peer closed.
///
/// The bytes up to the limit are still returned.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("response truncated: only the first {limit} bytes were kept")]
pub struct Truncated {
    pub limit: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::net::Ipv4Addr;

    #[test]
    fn send_error_keeps_io_source() {
        let e = Error::Send {
            sent: 3,
            total: 10,
            source: io::Error::new(io::ErrorKind::WriteZero, "zero-byte write"),
        };
        assert!(e.to_string().contains("3 of 10"));
        assert!(StdError::source(&e).is_some());
        assert!(e.is_network());
    }

    #[test]
    fn connect_error_names_address() {
        let e = Error::Connect {
            addr: SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 1), 80),
            source: io::Error::from(io::ErrorKind::ConnectionRefused),
        };
        assert!(e.to_string().contains("10.0.0.1:80"));
    }

    #[test]
    fn malformed_response_is_not_network() {
        let e = Error::MalformedResponse { len: 12 };
        assert!(e.to_string().starts_with("invalid response"));
        assert!(!e.is_network());
    }

    #[test]
    fn truncated_display() {
        let t = Truncated { limit: 2048 };
        assert_eq!(
            t.to_string(),
            "response truncated: only the first 2048 bytes were kept"
        );
    }
}
