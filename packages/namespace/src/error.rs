//! Error types for the namespace layer.

use crate::node::NodeId;

/// Errors produced while reconstructing a full path.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The reconstructed path would be longer than the configured bound.
    #[error("name too long: path of {len} bytes exceeds the limit of {max}")]
    NameTooLong { len: usize, max: usize },

    /// A single segment is longer than the configured bound.
    #[error("name too long: segment of {len} bytes exceeds the limit of {max}")]
    SegmentTooLong { len: usize, max: usize },

    /// The ancestor walk exceeded the depth bound.
    #[error("path too deep: more than {max_depth} segments")]
    PathTooDeep { max_depth: usize },

    /// The segment can never be part of a path.
    #[error("invalid segment {segment:?}: {message}")]
    InvalidSegment { segment: String, message: String },

    /// A node in the parent chain is not known to the tree.
    #[error("unknown node {0} in parent chain")]
    BrokenChain(NodeId),
}

/// Errors produced by the node table.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NamespaceError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("the root node cannot be removed")]
    RootNode,

    #[error("node {id} still has {children} child node(s)")]
    HasChildren { id: NodeId, children: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn name_too_long_display() {
        let e = PathError::NameTooLong { len: 300, max: 256 };
        let display = e.to_string();
        assert!(display.contains("name too long"));
        assert!(display.contains("300"));
        assert!(display.contains("256"));
    }

    #[test]
    fn path_too_deep_display() {
        let e = PathError::PathTooDeep { max_depth: 20 };
        assert_eq!(e.to_string(), "path too deep: more than 20 segments");
    }

    #[test]
    fn path_error_is_transparent_in_namespace_error() {
        let e: NamespaceError = PathError::PathTooDeep { max_depth: 3 }.into();
        assert!(matches!(e, NamespaceError::Path(_)));
        assert_eq!(e.to_string(), "path too deep: more than 3 segments");
    }

    #[test]
    fn has_children_display() {
        let e = NamespaceError::HasChildren {
            id: NodeId::from_raw(7),
            children: 2,
        };
        assert!(e.to_string().contains("#7"));
        assert!(StdError::source(&e).is_none());
    }
}
