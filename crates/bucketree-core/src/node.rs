//! Object and directory node types.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Unique identifier for a node within a tree.
///
/// Ids are indices into the owning tree's node storage and are only
/// meaningful for the tree instance that produced them. Trees are rebuilt
/// wholesale on every listing refresh, so ids must never be retained across
/// a rebuild; persistent state is keyed by path string instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Create a new NodeId from an index.
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    /// Index into the owning tree's node storage.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Type of tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// A stored object (leaf).
    File,
    /// A synthetic directory derived from a key prefix.
    Directory {
        /// Parent directory (None for the root).
        parent: Option<NodeId>,
        /// Child nodes in first-seen order.
        children: Vec<NodeId>,
    },
}

impl NodeKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, NodeKind::Directory { .. })
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File)
    }
}

/// A single file or directory in the derived tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectNode {
    /// Identifier of this node within its tree.
    pub id: NodeId,

    /// Final path segment (not the full path).
    pub name: CompactString,

    /// Full slash-joined path from the root. Empty for the root itself;
    /// for files this is the storage key exactly as listed.
    pub key: CompactString,

    /// Node type and linkage.
    pub kind: NodeKind,
}

impl ObjectNode {
    /// Create a new file node.
    pub fn new_file(
        id: NodeId,
        name: impl Into<CompactString>,
        key: impl Into<CompactString>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            key: key.into(),
            kind: NodeKind::File,
        }
    }

    /// Create a new directory node.
    pub fn new_directory(
        id: NodeId,
        name: impl Into<CompactString>,
        key: impl Into<CompactString>,
        parent: Option<NodeId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            key: key.into(),
            kind: NodeKind::Directory {
                parent,
                children: Vec::new(),
            },
        }
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Parent directory id. None for files and for the root.
    pub fn parent(&self) -> Option<NodeId> {
        match &self.kind {
            NodeKind::Directory { parent, .. } => *parent,
            NodeKind::File => None,
        }
    }

    /// Direct children in insertion order. Empty for files.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Directory { children, .. } => children,
            NodeKind::File => &[],
        }
    }

    /// Check if this node has no children.
    pub fn is_childless(&self) -> bool {
        self.children().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::new(42);
        assert_eq!(id.0, 42);
        assert_eq!(id.index(), 42);
    }

    #[test]
    fn test_file_node_creation() {
        let node = ObjectNode::new_file(NodeId::new(1), "notes.txt", "docs/notes.txt");
        assert!(node.is_file());
        assert!(!node.is_dir());
        assert_eq!(node.name, "notes.txt");
        assert_eq!(node.key, "docs/notes.txt");
        assert_eq!(node.parent(), None);
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_directory_node_creation() {
        let node = ObjectNode::new_directory(NodeId::new(2), "docs", "docs", Some(NodeId::new(0)));
        assert!(node.is_dir());
        assert!(!node.is_file());
        assert_eq!(node.parent(), Some(NodeId::new(0)));
        assert!(node.is_childless());
    }

    #[test]
    fn test_root_has_no_parent() {
        let root = ObjectNode::new_directory(NodeId::new(0), "root", "", None);
        assert_eq!(root.parent(), None);
        assert_eq!(root.key, "");
    }
}
