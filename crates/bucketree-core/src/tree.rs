//! Derived directory tree and the key-to-tree builder.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::node::{NodeId, NodeKind, ObjectNode};

/// Id of the synthetic root directory. The root always occupies slot zero.
pub const ROOT: NodeId = NodeId(0);

/// Directory tree derived from a flat object listing.
///
/// Object storage has no real directories; the hierarchy is synthesized from
/// "/"-delimited key prefixes. Nodes live in a flat arena owned by the tree
/// and link to each other by [`NodeId`]. The tree is rebuilt from scratch on
/// every listing refresh and never patched in place, so nothing outside the
/// tree may hold a `NodeId` across rebuilds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectTree {
    nodes: Vec<ObjectNode>,
}

impl ObjectTree {
    /// Create a tree containing only the root directory.
    pub fn new() -> Self {
        Self {
            nodes: vec![ObjectNode::new_directory(ROOT, "root", "", None)],
        }
    }

    /// Build a tree from a flat sequence of object keys.
    ///
    /// Each key is split on `/` and walked from the root one segment at a
    /// time. The final segment becomes a file when it ends in `.txt`; every
    /// other segment becomes (or reuses) a directory. Children keep
    /// first-seen order and names are unique within a directory, so feeding
    /// the same key twice is a no-op.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = Self::new();
        for key in keys {
            tree.insert_key(key.as_ref());
        }
        tree
    }

    fn insert_key(&mut self, key: &str) {
        if key.is_empty() {
            return;
        }

        let parts: Vec<&str> = key.split('/').collect();
        let mut current = ROOT;

        for (index, part) in parts.iter().enumerate() {
            let is_file = index == parts.len() - 1 && part.ends_with(".txt");

            if is_file {
                if self.child_by_name(current, part).is_none() {
                    let id = NodeId::new(self.nodes.len());
                    self.nodes.push(ObjectNode::new_file(id, *part, key));
                    self.push_child(current, id);
                }
            } else {
                match self.child_by_name(current, part) {
                    Some(child) if self.nodes[child.index()].is_dir() => current = child,
                    // A same-named file already occupies the slot; stop the walk.
                    Some(_) => return,
                    None => {
                        let id = NodeId::new(self.nodes.len());
                        let dir_key = parts[..=index].join("/");
                        self.nodes.push(ObjectNode::new_directory(
                            id,
                            *part,
                            dir_key,
                            Some(current),
                        ));
                        self.push_child(current, id);
                        current = id;
                    }
                }
            }
        }
    }

    fn child_by_name(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        self.children(dir)
            .iter()
            .copied()
            .find(|id| self.nodes[id.index()].name == name)
    }

    fn push_child(&mut self, dir: NodeId, child: NodeId) {
        if let NodeKind::Directory { children, .. } = &mut self.nodes[dir.index()].kind {
            children.push(child);
        }
    }

    /// Get a node by id. Ids from another tree instance are invalid here.
    pub fn node(&self, id: NodeId) -> &ObjectNode {
        &self.nodes[id.index()]
    }

    /// Get a node by id, or None when the id is out of range.
    pub fn get(&self, id: NodeId) -> Option<&ObjectNode> {
        self.nodes.get(id.index())
    }

    /// Direct children of a node in insertion order. Empty for files.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes[id.index()].children()
    }

    /// Parent of a node. None for the root and for files.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent()
    }

    /// Look up a directory by its full key. The empty key is the root.
    pub fn find_directory(&self, key: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|n| n.is_dir() && n.key == key)
            .map(|n| n.id)
    }

    /// Look up any node by its full key.
    pub fn find(&self, key: &str) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.key == key).map(|n| n.id)
    }

    /// Ancestor chain starting at `id` and ending at the root, both
    /// inclusive. Files have no parent link, so a file id yields only
    /// itself.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// Number of file nodes in the tree.
    pub fn file_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_file()).count()
    }

    /// Number of directories, excluding the synthetic root.
    pub fn directory_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_dir()).count() - 1
    }

    /// Iterate over all nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &ObjectNode> {
        self.nodes.iter()
    }
}

impl Default for ObjectTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Directory prefixes present in a key listing, in first-seen order.
///
/// The final segment of every key is dropped; each remaining prefix becomes
/// one entry. This feeds the creation panel's target-directory selector, so
/// a bucket with `docs/notes/a.txt` offers `docs` and `docs/notes`.
pub fn directory_prefixes<I, S>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut prefixes: IndexSet<String> = IndexSet::new();
    for key in keys {
        let mut parts: Vec<&str> = key.as_ref().split('/').collect();
        parts.pop();

        let mut path = String::new();
        for part in parts {
            if path.is_empty() {
                path = part.to_string();
            } else {
                path = format!("{path}/{part}");
            }
            prefixes.insert(path.clone());
        }
    }
    prefixes.into_iter().collect()
}
