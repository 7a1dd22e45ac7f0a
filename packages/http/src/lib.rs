//! # httpfs-http
//!
//! The fetch side of httpfs: a namespace path becomes one raw HTTP/1.0
//! GET over a fresh TCP connection.
//!
//! ```text
//! "example.com/docs/a.txt"
//!     -> FetchTarget { host: "example.com", path: "/docs/a.txt" }   (types)
//!     -> resolve, connect :80, send, receive up to 2 MiB            (executor)
//!     -> head / body split at the first CRLF CRLF                   (response)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use httpfs_http::{extract_body, Fetch, FetchConfig, FetchTarget, Fetcher};
//!
//! let fetcher = Fetcher::new(FetchConfig::default());
//! let target = FetchTarget::split("example.com/index.html")?;
//!
//! let raw = fetcher.fetch(&target)?;
//! if let Some(notice) = raw.truncated {
//!     eprintln!("{}", notice);
//! }
//! let body = extract_body(&raw.data)?;
//! # Ok::<(), httpfs_http::Error>(())
//! ```
//!
//! Responses are never cached and connections are never reused: every
//! fetch resolves, connects and allocates on its own.

pub mod buffer;
pub mod config;
pub mod error;
pub mod executor;
pub mod resolve;
pub mod response;
pub mod transport;
pub mod types;

// Re-export main types
pub use buffer::ResponseBuffer;
pub use config::FetchConfig;
pub use error::{Error, Truncated};
pub use executor::{receive_response, send_request, Fetch, Fetcher, RawResponse};
pub use resolve::{Resolve, ResolveError, StaticResolver, SystemResolver};
pub use response::{extract_body, parse_response, HttpResponse};
pub use transport::{Connect, ConnectError, TcpConnector};
pub use types::{FetchTarget, MAX_HOST_LEN};
