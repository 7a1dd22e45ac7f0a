//! The fetch engine.
//!
//! A fetch is one blocking HTTP/1.0 exchange on the calling thread:
//! resolve, connect, send the whole request, then read until the peer
//! closes or the response buffer is full. [`Fetch`] is the seam callers
//! program against so the engine can be replaced in tests.

use std::io::{self, Read, Write};
use std::net::SocketAddrV4;

use bytes::Bytes;

use crate::buffer::ResponseBuffer;
use crate::config::FetchConfig;
use crate::resolve::{Resolve, SystemResolver};
use crate::response::{parse_response, HttpResponse};
use crate::transport::{Connect, ConnectError, TcpConnector};
use crate::types::FetchTarget;
use crate::{Error, Truncated};

/// Raw bytes of one response, head included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub data: Bytes,
    /// Set when the buffer filled up before the peer closed.
    pub truncated: Option<Truncated>,
}

/// Trait for fetching a target.
///
/// Implementations can use the real network or canned responses for testing.
pub trait Fetch: Send + Sync {
    fn fetch(&self, target: &FetchTarget) -> Result<RawResponse, Error>;
}

/// Production fetch engine over plain TCP.
pub struct Fetcher<R = SystemResolver, C = TcpConnector> {
    resolver: R,
    connector: C,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Self {
        Self::with_parts(SystemResolver, TcpConnector, config)
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new(FetchConfig::default())
    }
}

impl<R: Resolve, C: Connect> Fetcher<R, C> {
    pub fn with_parts(resolver: R, connector: C, config: FetchConfig) -> Self {
        Self {
            resolver,
            connector,
            config,
        }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetch a namespace path such as `example.com/a/b` and parse the
    /// response.
    pub fn get(&self, full_path: &str) -> Result<(HttpResponse, Option<Truncated>), Error> {
        let target = FetchTarget::split(full_path)?;
        let raw = self.fetch(&target)?;
        let response = parse_response(&raw.data)?;
        Ok((response, raw.truncated))
    }

    fn open_stream(&self, target: &FetchTarget) -> Result<C::Stream, Error> {
        let timeout = self.config.timeout;
        let ip = self
            .resolver
            .resolve(target.host(), timeout)
            .map_err(|source| {
                if source.is_environment() {
                    tracing::error!(host = target.host(), error = %source, "name resolution unavailable");
                }
                Error::Resolution {
                    host: target.host().to_string(),
                    source,
                }
            })?;

        let addr = SocketAddrV4::new(ip, self.config.port);
        tracing::debug!(host = target.host(), %addr, "resolved host");

        self.connector
            .connect(addr, timeout)
            .map_err(|e| match e {
                ConnectError::Socket(source) => Error::SocketCreate { addr, source },
                ConnectError::Connect(source) => Error::Connect { addr, source },
            })
    }
}

impl<R: Resolve, C: Connect> Fetch for Fetcher<R, C> {
    fn fetch(&self, target: &FetchTarget) -> Result<RawResponse, Error> {
        let request = target.request_head(&self.config.user_agent)?;

        let mut stream = self.open_stream(target)?;
        tracing::debug!(%target, "sending request");

        send_request(&mut stream, request.as_bytes())?;
        let buffer = ResponseBuffer::with_capacity(self.config.max_response_size)?;
        let response = receive_response(&mut stream, buffer)?;
        drop(stream);

        tracing::debug!(
            %target,
            bytes = response.data.len(),
            truncated = response.truncated.is_some(),
            "fetch complete"
        );
        Ok(response)
    }
}

/// Write all of `request`, re-sending the unsent suffix after short writes.
///
/// A write that accepts zero bytes aborts the send.
pub fn send_request<W: Write + ?Sized>(stream: &mut W, request: &[u8]) -> Result<(), Error> {
    let total = request.len();
    let mut sent = 0;

    while sent < total {
        match stream.write(&request[sent..]) {
            Ok(0) => {
                return Err(Error::Send {
                    sent,
                    total,
                    source: io::Error::new(io::ErrorKind::WriteZero, "peer accepted zero bytes"),
                });
            }
            Ok(n) => sent += n.min(total - sent),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => return Err(Error::Send { sent, total, source }),
        }
    }

    stream
        .flush()
        .map_err(|source| Error::Send { sent, total, source })
}

/// Read into `buffer` until the peer closes or the buffer is full.
///
/// A full buffer is not an error: the bytes come back with a
/// [`Truncated`] notice.
pub fn receive_response<Rd: Read + ?Sized>(
    stream: &mut Rd,
    mut buffer: ResponseBuffer,
) -> Result<RawResponse, Error> {
    let mut truncated = None;

    loop {
        if buffer.is_full() {
            let notice = Truncated {
                limit: buffer.capacity(),
            };
            tracing::warn!(limit = notice.limit, "response too large, keeping only the first bytes");
            truncated = Some(notice);
            break;
        }

        match buffer.fill_from(stream) {
            Ok(0) => break,
            Ok(n) => tracing::trace!(bytes = n, total = buffer.len(), "received"),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(Error::Receive {
                    received: buffer.len(),
                    source,
                })
            }
        }
    }

    Ok(RawResponse {
        data: buffer.into_bytes(),
        truncated,
    })
}
