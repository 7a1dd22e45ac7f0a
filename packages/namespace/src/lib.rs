//! # httpfs-namespace
//!
//! The lazily materialized namespace behind httpfs.
//!
//! Every entry of the namespace is a [`PathNode`]. Nodes are created one
//! segment at a time as the hosting framework looks them up, and each node
//! stores the full slash-joined path from the root at creation time:
//!
//! ```text
//! (root)                    ""
//!   example.com             "example.com"
//!     docs                  "example.com/docs"
//!       index.html          "example.com/docs/index.html"
//! ```
//!
//! The nodes themselves belong to the framework, modelled here by
//! [`NodeTable`]. The path builder only reads the parent chain through the
//! [`Ancestry`] trait.
//!
//! ## Example
//!
//! ```rust
//! use httpfs_namespace::NodeTable;
//!
//! let mut nodes = NodeTable::new();
//! let host = nodes.insert_child(NodeTable::ROOT, "example.com").unwrap();
//! let page = nodes.insert_child(host, "index.html").unwrap();
//!
//! assert_eq!(nodes.get(page).unwrap().full_path(), "example.com/index.html");
//! ```

mod error;
mod node;
mod path;

pub use error::{NamespaceError, PathError};
pub use node::{Ancestry, NodeId, NodeTable, PathNode};
pub use path::{build_full_path, reconstruct, validate_segment, PathLimits};
