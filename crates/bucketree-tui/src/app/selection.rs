//! Directory selection tracked by key.

use bucketree_core::{NodeId, ObjectTree, ROOT};

/// The currently selected directory, identified by its key.
///
/// Node ids are never retained across tree rebuilds. The selection
/// stores the directory key and resolves it against whatever tree is
/// current; a key that no longer exists resolves to the root.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected_key: String,
}

impl SelectionState {
    /// Key of the selected directory. Empty means the bucket root.
    pub fn key(&self) -> &str {
        &self.selected_key
    }

    /// Resolve the selection against a tree.
    pub fn resolve(&self, tree: &ObjectTree) -> NodeId {
        tree.find_directory(&self.selected_key).unwrap_or(ROOT)
    }

    /// Select a directory by key.
    pub fn select(&mut self, key: impl Into<String>) {
        self.selected_key = key.into();
    }

    /// Reset the selection to the bucket root.
    pub fn reset(&mut self) {
        self.selected_key.clear();
    }

    /// Move the selection to the parent directory.
    ///
    /// Returns `false` when already at the root.
    pub fn go_to_parent(&mut self, tree: &ObjectTree) -> bool {
        let current = self.resolve(tree);
        match tree.parent(current) {
            Some(parent) => {
                self.selected_key = tree.node(parent).key.to_string();
                true
            }
            None => false,
        }
    }
}
