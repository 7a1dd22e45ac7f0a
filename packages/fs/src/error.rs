//! Errors surfaced by the filesystem hooks.

use std::io;

use httpfs_http::{Error as FetchError, ResolveError};
use httpfs_namespace::{NamespaceError, NodeId, PathError};

/// A failed hook call.
#[derive(thiserror::Error, Debug)]
pub enum FsError {
    #[error(transparent)]
    Namespace(#[from] NamespaceError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The body could not be written to the caller's buffer.
    #[error("could not copy data to the caller: {0}")]
    CopyOut(#[source] io::Error),

    /// The node was forgotten, or never existed.
    #[error("no such node {0}")]
    NotFound(NodeId),

    /// The root is a directory and has no content to fetch.
    #[error("the root node cannot be opened")]
    IsRoot,
}

impl From<PathError> for FsError {
    fn from(e: PathError) -> Self {
        FsError::Namespace(e.into())
    }
}

impl FsError {
    /// The POSIX errno a filesystem host should report for this error.
    pub fn errno(&self) -> i32 {
        match self {
            FsError::Namespace(NamespaceError::Path(e)) => match e {
                PathError::NameTooLong { .. } | PathError::SegmentTooLong { .. } => {
                    libc::ENAMETOOLONG
                }
                PathError::PathTooDeep { .. } => libc::ELOOP,
                PathError::InvalidSegment { .. } => libc::EINVAL,
                PathError::BrokenChain(_) => libc::ENOENT,
            },
            FsError::Namespace(NamespaceError::UnknownNode(_)) => libc::ENOENT,
            FsError::Namespace(NamespaceError::RootNode) => libc::EBUSY,
            FsError::Namespace(NamespaceError::HasChildren { .. }) => libc::ENOTEMPTY,
            FsError::Fetch(e) => fetch_errno(e),
            FsError::CopyOut(_) => libc::EFAULT,
            FsError::NotFound(_) => libc::ENOENT,
            FsError::IsRoot => libc::EISDIR,
        }
    }
}

fn fetch_errno(e: &FetchError) -> i32 {
    match e {
        FetchError::InvalidHost { .. }
        | FetchError::InvalidRequestPath { .. }
        | FetchError::InvalidUserAgent { .. } => libc::EINVAL,
        FetchError::HostTooLong { .. } => libc::ENAMETOOLONG,
        FetchError::Resolution { source, .. } => match source {
            ResolveError::TimedOut(_) => libc::ETIMEDOUT,
            ResolveError::Unavailable { .. } => libc::EIO,
            ResolveError::NotFound { .. } | ResolveError::NoIpv4Address => libc::EHOSTUNREACH,
        },
        FetchError::SocketCreate { source, .. } => source.raw_os_error().unwrap_or(libc::EIO),
        FetchError::Connect { source, .. } => match source.kind() {
            io::ErrorKind::ConnectionRefused => libc::ECONNREFUSED,
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => libc::ETIMEDOUT,
            _ => source.raw_os_error().unwrap_or(libc::EIO),
        },
        FetchError::Send { source, .. } | FetchError::Receive { source, .. } => {
            match source.kind() {
                io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => libc::ETIMEDOUT,
                _ => libc::EIO,
            }
        }
        FetchError::MalformedResponse { .. } => libc::EIO,
        FetchError::AllocationFailed { .. } => libc::ENOMEM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, SocketAddrV4};

    #[test]
    fn name_too_long_is_enametoolong() {
        let e: FsError = PathError::NameTooLong { len: 300, max: 256 }.into();
        assert_eq!(e.errno(), libc::ENAMETOOLONG);
        assert!(e.to_string().contains("300"));
    }

    #[test]
    fn path_too_deep_is_eloop() {
        let e: FsError = PathError::PathTooDeep { max_depth: 20 }.into();
        assert_eq!(e.errno(), libc::ELOOP);
    }

    #[test]
    fn fetch_errors_map_to_network_errnos() {
        let addr = SocketAddrV4::new(Ipv4Addr::LOCALHOST, 80);
        let refused = FsError::Fetch(FetchError::Connect {
            addr,
            source: io::Error::from(io::ErrorKind::ConnectionRefused),
        });
        assert_eq!(refused.errno(), libc::ECONNREFUSED);

        let missing = FsError::Fetch(FetchError::Resolution {
            host: "nowhere.invalid".to_string(),
            source: ResolveError::NoIpv4Address,
        });
        assert_eq!(missing.errno(), libc::EHOSTUNREACH);

        let malformed = FsError::Fetch(FetchError::MalformedResponse { len: 3 });
        assert_eq!(malformed.errno(), libc::EIO);
    }

    #[test]
    fn allocation_failure_is_enomem() {
        let e = FsError::Fetch(FetchError::AllocationFailed { size: usize::MAX });
        assert_eq!(e.errno(), libc::ENOMEM);
    }

    #[test]
    fn copy_out_is_efault() {
        let e = FsError::CopyOut(io::Error::from(io::ErrorKind::BrokenPipe));
        assert_eq!(e.errno(), libc::EFAULT);
        assert!(e.to_string().contains("copy"));
    }
}
