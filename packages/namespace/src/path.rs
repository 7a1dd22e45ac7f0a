//! Full-path reconstruction from a chain of parent references.

use crate::error::PathError;
use crate::node::{Ancestry, NodeId};

/// Bounds applied while building a full path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathLimits {
    /// Maximum number of segments from the root to a leaf.
    pub max_depth: usize,
    /// Maximum length in bytes of the joined path.
    pub max_path_len: usize,
    /// Maximum length in bytes of a single segment.
    pub max_segment_len: usize,
}

impl PathLimits {
    pub const DEFAULT_MAX_DEPTH: usize = 20;
    pub const DEFAULT_MAX_PATH_LEN: usize = 256;
    pub const DEFAULT_MAX_SEGMENT_LEN: usize = 255;

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_path_len(mut self, max_path_len: usize) -> Self {
        self.max_path_len = max_path_len;
        self
    }
}

impl Default for PathLimits {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_path_len: Self::DEFAULT_MAX_PATH_LEN,
            max_segment_len: Self::DEFAULT_MAX_SEGMENT_LEN,
        }
    }
}

/// Check that `segment` can be used as one path segment.
///
/// Segments are non-empty, contain neither `/` nor NUL, and fit within
/// `limits.max_segment_len`.
pub fn validate_segment(segment: &str, limits: &PathLimits) -> Result<(), PathError> {
    if segment.is_empty() {
        return Err(PathError::InvalidSegment {
            segment: segment.to_string(),
            message: "empty segment".to_string(),
        });
    }

    if let Some(c) = segment.chars().find(|c| *c == '/' || *c == '\0') {
        return Err(PathError::InvalidSegment {
            segment: segment.to_string(),
            message: format!("invalid character {:?}", c),
        });
    }

    if segment.len() > limits.max_segment_len {
        return Err(PathError::SegmentTooLong {
            len: segment.len(),
            max: limits.max_segment_len,
        });
    }

    Ok(())
}

/// Build the full path of a new node called `name` under `parent`.
///
/// Walks the parent chain up to the root, then joins the collected
/// segments root-to-leaf with `/`. Fails with [`PathError::PathTooDeep`]
/// when more than `max_depth` segments are collected, and with
/// [`PathError::NameTooLong`] before the joined path would grow past
/// `max_path_len`.
///
/// # Example
///
/// ```rust
/// use httpfs_namespace::{build_full_path, NodeTable, PathLimits};
///
/// let mut nodes = NodeTable::new();
/// let a = nodes.insert_child(NodeTable::ROOT, "a").unwrap();
/// let b = nodes.insert_child(a, "b").unwrap();
///
/// let path = build_full_path(&nodes, b, "c", &PathLimits::default()).unwrap();
/// assert_eq!(path, "a/b/c");
/// ```
pub fn build_full_path<'a, A>(
    tree: &'a A,
    parent: NodeId,
    name: &'a str,
    limits: &PathLimits,
) -> Result<String, PathError>
where
    A: Ancestry + ?Sized,
{
    validate_segment(name, limits)?;

    let mut segments = vec![name];
    collect_ancestors(tree, parent, limits, &mut segments)?;
    join_segments(&segments, limits)
}

/// Rebuild the full path of an existing node.
///
/// The root (a node without a parent, or its own parent) yields the empty
/// path.
pub fn reconstruct<A>(tree: &A, leaf: NodeId, limits: &PathLimits) -> Result<String, PathError>
where
    A: Ancestry + ?Sized,
{
    match tree.parent(leaf) {
        None => Ok(String::new()),
        Some(parent) if parent == leaf => Ok(String::new()),
        Some(parent) => {
            let name = tree.name(leaf).ok_or(PathError::BrokenChain(leaf))?;
            build_full_path(tree, parent, name, limits)
        }
    }
}

/// Push segment names from `start` up to (excluding) the root, leaf first.
fn collect_ancestors<'a, A>(
    tree: &'a A,
    start: NodeId,
    limits: &PathLimits,
    segments: &mut Vec<&'a str>,
) -> Result<(), PathError>
where
    A: Ancestry + ?Sized,
{
    let mut current = start;
    loop {
        let parent = match tree.parent(current) {
            None => return Ok(()),
            Some(parent) if parent == current => return Ok(()),
            Some(parent) => parent,
        };

        if segments.len() >= limits.max_depth {
            return Err(PathError::PathTooDeep {
                max_depth: limits.max_depth,
            });
        }

        let name = tree.name(current).ok_or(PathError::BrokenChain(current))?;
        segments.push(name);
        current = parent;
    }
}

/// Join leaf-first `segments` root-to-leaf, bounded by `max_path_len`.
fn join_segments(segments: &[&str], limits: &PathLimits) -> Result<String, PathError> {
    let total = segments.iter().map(|s| s.len()).sum::<usize>() + segments.len().saturating_sub(1);

    let mut out = String::with_capacity(total.min(limits.max_path_len));
    for (i, segment) in segments.iter().rev().enumerate() {
        let separator = usize::from(i > 0);
        if out.len() + separator + segment.len() > limits.max_path_len {
            return Err(PathError::NameTooLong {
                len: total,
                max: limits.max_path_len,
            });
        }
        if separator == 1 {
            out.push('/');
        }
        out.push_str(segment);
    }

    Ok(out)
}
