//! # httpfs
//!
//! Remote HTTP resources as a read-only namespace: the path
//! `example.com/docs/a.txt` reads as the body of
//! `GET /docs/a.txt HTTP/1.0` sent to `example.com`.
//!
//! [`HttpFs`] is the hook surface a filesystem host drives:
//!
//! - `lookup` creates (or finds) a child node, without any network traffic
//! - `open` fetches the node's URL and returns an [`OpenHandle`] over the body
//! - `read` copies from the handle's cursor
//! - `release` drops the handle
//! - `forget` drops a node
//!
//! ## Example
//!
//! ```no_run
//! use httpfs::{HttpFs, NodeTable};
//!
//! let fs = HttpFs::default();
//! let mut nodes = NodeTable::new();
//!
//! let host = fs.lookup(&mut nodes, NodeTable::ROOT, "example.com")?;
//! let page = fs.lookup(&mut nodes, host, "index.html")?;
//!
//! let mut opened = fs.open(&nodes, page)?;
//! let mut out = Vec::new();
//! while fs.read(&mut opened.handle, 4096, &mut out)? > 0 {}
//! fs.release(opened.handle);
//! # Ok::<(), httpfs::FsError>(())
//! ```

mod config;
mod error;
mod fs;
mod handle;

pub use config::{ConfigError, HttpFsConfig};
pub use error::FsError;
pub use fs::{HttpFs, Opened};
pub use handle::OpenHandle;

pub use httpfs_http::{FetchConfig, Truncated};
pub use httpfs_namespace::{NodeId, NodeTable, PathLimits};
