//! Path nodes and the framework-owned node table.

use std::collections::HashMap;
use std::fmt;

use crate::error::NamespaceError;
use crate::path::{build_full_path, PathLimits};

/// Handle to a node in a [`NodeTable`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Read access to a parent-pointer tree.
///
/// This is all the path builder needs from whoever owns the nodes.
pub trait Ancestry {
    /// The segment name of `id`.
    fn name(&self, id: NodeId) -> Option<&str>;

    /// The parent of `id`. `None`, or `id` itself, marks the root.
    fn parent(&self, id: NodeId) -> Option<NodeId>;
}

/// One entry of the namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNode {
    name: String,
    parent: Option<NodeId>,
    full_path: String,
}

impl PathNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Non-owning reference to the parent node; `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The slash-joined path from the root, computed once at creation.
    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Owner of every [`PathNode`], standing in for the hosting framework's
/// directory-entry cache.
///
/// Children are indexed by name, so looking up the same segment twice under
/// the same parent returns the same node.
#[derive(Debug)]
pub struct NodeTable {
    nodes: HashMap<NodeId, PathNode>,
    children: HashMap<NodeId, HashMap<String, NodeId>>,
    next_id: u64,
    limits: PathLimits,
}

impl NodeTable {
    /// The root node, present in every table.
    pub const ROOT: NodeId = NodeId(1);

    pub fn new() -> Self {
        Self::with_limits(PathLimits::default())
    }

    pub fn with_limits(limits: PathLimits) -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(
            Self::ROOT,
            PathNode {
                name: String::new(),
                parent: None,
                full_path: String::new(),
            },
        );

        Self {
            nodes,
            children: HashMap::new(),
            next_id: Self::ROOT.0 + 1,
            limits,
        }
    }

    pub fn limits(&self) -> &PathLimits {
        &self.limits
    }

    pub fn get(&self, id: NodeId) -> Option<&PathNode> {
        self.nodes.get(&id)
    }

    /// The existing child `name` of `parent`, if any.
    pub fn child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children.get(&parent)?.get(name).copied()
    }

    /// Create or fetch the child `name` of `parent`.
    ///
    /// The full path is built before anything is inserted, so a failing
    /// build leaves the table untouched.
    pub fn insert_child(&mut self, parent: NodeId, name: &str) -> Result<NodeId, NamespaceError> {
        if !self.nodes.contains_key(&parent) {
            return Err(NamespaceError::UnknownNode(parent));
        }
        if let Some(existing) = self.child(parent, name) {
            return Ok(existing);
        }

        let full_path = build_full_path(self, parent, name, &self.limits)?;

        let id = NodeId(self.next_id);
        self.next_id += 1;

        tracing::debug!(node = %id, parent = %parent, path = %full_path, "created path node");

        self.nodes.insert(
            id,
            PathNode {
                name: name.to_string(),
                parent: Some(parent),
                full_path,
            },
        );
        self.children
            .entry(parent)
            .or_default()
            .insert(name.to_string(), id);

        Ok(id)
    }

    /// Remove a node, handing back its owned path.
    ///
    /// Nodes that still have children stay, as does the root.
    pub fn remove(&mut self, id: NodeId) -> Result<PathNode, NamespaceError> {
        if id == Self::ROOT {
            return Err(NamespaceError::RootNode);
        }
        if !self.nodes.contains_key(&id) {
            return Err(NamespaceError::UnknownNode(id));
        }

        let live_children = self.children.get(&id).map_or(0, HashMap::len);
        if live_children > 0 {
            return Err(NamespaceError::HasChildren {
                id,
                children: live_children,
            });
        }
        self.children.remove(&id);

        let node = self
            .nodes
            .remove(&id)
            .ok_or(NamespaceError::UnknownNode(id))?;

        if let Some(parent) = node.parent {
            if let Some(siblings) = self.children.get_mut(&parent) {
                siblings.remove(&node.name);
                if siblings.is_empty() {
                    self.children.remove(&parent);
                }
            }
        }

        tracing::debug!(node = %id, path = %node.full_path, "removed path node");
        Ok(node)
    }

    /// Number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for NodeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Ancestry for NodeTable {
    fn name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(&id).map(PathNode::name)
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(PathNode::parent)
    }
}
