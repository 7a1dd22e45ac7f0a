//! Filesystem hooks.

use std::io::Write;

use httpfs_http::{extract_body, Fetch, FetchConfig, FetchTarget, Fetcher, Truncated};
use httpfs_namespace::{NodeId, NodeTable};

use crate::config::HttpFsConfig;
use crate::handle::OpenHandle;
use crate::FsError;

/// Chunk size used by [`HttpFs::read_path`].
const READ_CHUNK: usize = 64 * 1024;

/// Result of a successful [`HttpFs::open`].
#[derive(Debug)]
pub struct Opened {
    pub handle: OpenHandle,
    /// Set when the response hit the size cap; the handle then holds only
    /// the body bytes that fit.
    pub truncated: Option<Truncated>,
}

/// The hook surface a filesystem host drives.
///
/// `HttpFs` holds no per-open state: every [`open`](Self::open) fetches
/// afresh, and the returned [`OpenHandle`] carries everything later reads
/// need. Nodes live in the host's [`NodeTable`].
///
/// Directories are optimistic: any valid name can be looked up under any
/// node, and whether a resource exists is only found out by opening it.
pub struct HttpFs<F = Fetcher> {
    fetcher: F,
}

impl HttpFs {
    pub fn new(config: FetchConfig) -> Self {
        Self::with_fetcher(Fetcher::new(config))
    }

    pub fn from_config(config: &HttpFsConfig) -> Self {
        Self::new(config.fetch_config())
    }
}

impl Default for HttpFs {
    fn default() -> Self {
        Self::new(FetchConfig::default())
    }
}

impl<F: Fetch> HttpFs<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Create or fetch the child `name` of `parent`.
    ///
    /// Never touches the network. Fails without creating a node when the
    /// name is invalid or the resulting path breaks the table's limits.
    pub fn lookup(
        &self,
        nodes: &mut NodeTable,
        parent: NodeId,
        name: &str,
    ) -> Result<NodeId, FsError> {
        let id = nodes.insert_child(parent, name).map_err(|e| {
            tracing::debug!(parent = %parent, name, error = %e, "lookup refused");
            e
        })?;
        Ok(id)
    }

    /// Fetch the resource behind `node` and open its body for reading.
    pub fn open(&self, nodes: &NodeTable, node: NodeId) -> Result<Opened, FsError> {
        let entry = nodes.get(node).ok_or(FsError::NotFound(node))?;
        if entry.is_root() {
            return Err(FsError::IsRoot);
        }

        let target = FetchTarget::split(entry.full_path())?;
        tracing::debug!(node = %node, %target, "opening");

        let raw = self.fetcher.fetch(&target).map_err(|e| {
            tracing::warn!(%target, error = %e, "fetch failed");
            e
        })?;
        let body = extract_body(&raw.data).map_err(|e| {
            tracing::warn!(%target, error = %e, "unusable response");
            e
        })?;
        drop(raw.data);

        tracing::debug!(node = %node, size = body.len(), "opened");
        Ok(Opened {
            handle: OpenHandle::new(body),
            truncated: raw.truncated,
        })
    }

    /// Copy up to `count` bytes from the handle's cursor into `dst`.
    ///
    /// `Ok(0)` marks the end of the body.
    pub fn read<W: Write + ?Sized>(
        &self,
        handle: &mut OpenHandle,
        count: usize,
        dst: &mut W,
    ) -> Result<usize, FsError> {
        handle.read(count, dst)
    }

    /// Close an open, freeing its body.
    pub fn release(&self, handle: OpenHandle) {
        tracing::trace!(size = handle.len(), read = handle.offset(), "released");
        drop(handle);
    }

    /// Node-destroy hook: drop `node` and its path.
    pub fn forget(&self, nodes: &mut NodeTable, node: NodeId) -> Result<(), FsError> {
        nodes.remove(node)?;
        Ok(())
    }

    /// Look up every segment of `path` from the root, then open, read to
    /// the end and release.
    ///
    /// Empty segments (leading, trailing or doubled slashes) are skipped.
    pub fn read_path(
        &self,
        nodes: &mut NodeTable,
        path: &str,
    ) -> Result<(Vec<u8>, Option<Truncated>), FsError> {
        let mut node = NodeTable::ROOT;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            node = self.lookup(nodes, node, segment)?;
        }

        let Opened {
            mut handle,
            truncated,
        } = self.open(nodes, node)?;

        let mut body = Vec::with_capacity(handle.len());
        while self.read(&mut handle, READ_CHUNK, &mut body)? > 0 {}
        self.release(handle);

        Ok((body, truncated))
    }
}
