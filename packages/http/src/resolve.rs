//! Host name resolution.
//!
//! The fetch engine only needs one IPv4 address per host. Resolution is
//! behind the [`Resolve`] trait so the engine can be driven without DNS.

use std::ffi::{CStr, CString};
use std::io;
use std::net::Ipv4Addr;
use std::ptr;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// Why a host could not be resolved.
#[derive(thiserror::Error, Debug)]
pub enum ResolveError {
    /// The resolver answered, but not with this host.
    #[error("no such host: {source}")]
    NotFound {
        #[source]
        source: io::Error,
    },

    /// The host exists but only has non-IPv4 addresses.
    #[error("host has no IPv4 address")]
    NoIpv4Address,

    /// The resolver itself could not be used.
    #[error("name resolution unavailable ({source}); check the host resolver configuration")]
    Unavailable {
        #[source]
        source: io::Error,
    },

    #[error("name resolution timed out after {0:?}")]
    TimedOut(Duration),
}

impl ResolveError {
    /// Whether the failure points at the environment rather than the host.
    pub fn is_environment(&self) -> bool {
        matches!(self, ResolveError::Unavailable { .. })
    }
}

/// Turns a host name into an IPv4 address.
pub trait Resolve: Send + Sync {
    /// Resolve `host`, giving up after `timeout`. A zero timeout waits
    /// for as long as the resolver takes.
    fn resolve(&self, host: &str, timeout: Duration) -> Result<Ipv4Addr, ResolveError>;
}

/// Resolver backed by the operating system (`getaddrinfo`).
///
/// IPv4 literals are returned without a lookup. Lookups run on a helper
/// thread so the caller can stop waiting at the deadline; a lookup that
/// outlives its deadline finishes in the background and is discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl Resolve for SystemResolver {
    fn resolve(&self, host: &str, timeout: Duration) -> Result<Ipv4Addr, ResolveError> {
        if let Ok(ip) = host.parse::<Ipv4Addr>() {
            return Ok(ip);
        }

        if timeout.is_zero() {
            return lookup_ipv4(host);
        }

        let (tx, rx) = mpsc::channel();
        let query = host.to_string();
        thread::Builder::new()
            .name("httpfs-resolve".to_string())
            .spawn(move || {
                // The receiver is gone once the caller has timed out.
                let _ = tx.send(lookup_ipv4(&query));
            })
            .map_err(|source| ResolveError::Unavailable { source })?;

        match rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(ResolveError::TimedOut(timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(ResolveError::Unavailable {
                source: io::Error::other("resolver thread exited without an answer"),
            }),
        }
    }
}

fn lookup_ipv4(host: &str) -> Result<Ipv4Addr, ResolveError> {
    let name = CString::new(host).map_err(|e| ResolveError::NotFound {
        source: io::Error::new(io::ErrorKind::InvalidInput, e),
    })?;

    // SAFETY: an all-zero addrinfo is a valid "no preference" hints value.
    let mut hints: libc::addrinfo = unsafe { std::mem::zeroed() };
    hints.ai_family = libc::AF_INET;
    hints.ai_socktype = libc::SOCK_STREAM;

    let mut head: *mut libc::addrinfo = ptr::null_mut();
    // SAFETY: `name` and `hints` outlive the call; on success `head` is
    // owned by `AddrInfoList` and freed exactly once.
    let code = unsafe { libc::getaddrinfo(name.as_ptr(), ptr::null(), &hints, &mut head) };
    if code != 0 {
        return Err(classify_gai_error(code, io::Error::last_os_error()));
    }

    AddrInfoList(head)
        .first_ipv4()
        .ok_or(ResolveError::NoIpv4Address)
}

/// Result list of a successful `getaddrinfo`.
struct AddrInfoList(*mut libc::addrinfo);

impl AddrInfoList {
    fn first_ipv4(&self) -> Option<Ipv4Addr> {
        let mut cursor = self.0;
        while !cursor.is_null() {
            // SAFETY: every node of the list stays valid until freeaddrinfo.
            let entry = unsafe { &*cursor };
            if entry.ai_family == libc::AF_INET && !entry.ai_addr.is_null() {
                // SAFETY: AF_INET entries carry a sockaddr_in.
                let addr = unsafe { &*(entry.ai_addr as *const libc::sockaddr_in) };
                return Some(Ipv4Addr::from(u32::from_be(addr.sin_addr.s_addr)));
            }
            cursor = entry.ai_next;
        }
        None
    }
}

impl Drop for AddrInfoList {
    fn drop(&mut self) {
        if !self.0.is_null() {
            // SAFETY: the list came from getaddrinfo and is freed once.
            unsafe { libc::freeaddrinfo(self.0) };
        }
    }
}

/// Map a `getaddrinfo` failure code. `errno` is only meaningful for
/// `EAI_SYSTEM`.
fn classify_gai_error(code: i32, errno: io::Error) -> ResolveError {
    if code == libc::EAI_SYSTEM {
        return ResolveError::Unavailable { source: errno };
    }

    // SAFETY: gai_strerror returns a static NUL-terminated string.
    let message = unsafe { CStr::from_ptr(libc::gai_strerror(code)) }
        .to_string_lossy()
        .into_owned();
    let source = io::Error::other(message);

    match code {
        // The resolver gave no answer at all, rather than a negative one.
        libc::EAI_AGAIN | libc::EAI_FAIL | libc::EAI_MEMORY => {
            ResolveError::Unavailable { source }
        }
        _ => ResolveError::NotFound { source },
    }
}

/// Resolver that maps every host to one fixed address.
///
/// Useful to point a namespace at a local server or a specific backend
/// while keeping the original `Host` header.
#[derive(Debug, Clone, Copy)]
pub struct StaticResolver {
    addr: Ipv4Addr,
}

impl StaticResolver {
    pub fn new(addr: Ipv4Addr) -> Self {
        Self { addr }
    }
}

impl Resolve for StaticResolver {
    fn resolve(&self, _host: &str, _timeout: Duration) -> Result<Ipv4Addr, ResolveError> {
        Ok(self.addr)
    }
}
