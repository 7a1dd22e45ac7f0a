//! TCP connection setup.

use std::io::{self, Read, Write};
use std::net::{SocketAddr, SocketAddrV4, TcpStream};
use std::time::Duration;

/// Why no connection could be set up.
#[derive(thiserror::Error, Debug)]
pub enum ConnectError {
    /// The socket could not be created or configured.
    #[error("socket setup failed: {0}")]
    Socket(#[source] io::Error),

    /// The socket exists but the peer could not be reached.
    #[error("connect failed: {0}")]
    Connect(#[source] io::Error),
}

/// Opens a fresh connection per fetch.
///
/// The returned stream is owned by the caller; dropping it releases the
/// socket.
pub trait Connect: Send + Sync {
    type Stream: Read + Write;

    /// Connect to `addr`. `timeout` bounds the connect itself and every
    /// later read or write on the stream; zero means no deadline.
    fn connect(&self, addr: SocketAddrV4, timeout: Duration) -> Result<Self::Stream, ConnectError>;
}

/// Plain TCP connector.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

impl Connect for TcpConnector {
    type Stream = TcpStream;

    fn connect(&self, addr: SocketAddrV4, timeout: Duration) -> Result<TcpStream, ConnectError> {
        let addr = SocketAddr::V4(addr);
        let stream = if timeout.is_zero() {
            TcpStream::connect(addr)
        } else {
            TcpStream::connect_timeout(&addr, timeout)
        }
        .map_err(classify_connect_error)?;

        let deadline = (!timeout.is_zero()).then_some(timeout);
        stream
            .set_read_timeout(deadline)
            .map_err(ConnectError::Socket)?;
        stream
            .set_write_timeout(deadline)
            .map_err(ConnectError::Socket)?;

        Ok(stream)
    }
}

fn classify_connect_error(source: io::Error) -> ConnectError {
    match source.kind() {
        io::ErrorKind::Unsupported
        | io::ErrorKind::PermissionDenied
        | io::ErrorKind::OutOfMemory
        | io::ErrorKind::InvalidInput => ConnectError::Socket(source),
        _ => ConnectError::Connect(source),
    }
}
