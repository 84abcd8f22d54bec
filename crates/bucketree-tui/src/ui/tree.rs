//! Directory tree widget for the browser pane.

use std::collections::HashSet;

use compact_str::CompactString;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, StatefulWidget, Widget};

use bucketree_core::{NodeId, ObjectTree, ROOT};

use crate::theme::Theme;

/// State for the browser pane.
///
/// Expansion is keyed by directory key, not node id, so it survives tree
/// rebuilds. Keys that no longer exist after a rebuild are simply inert.
#[derive(Debug, Default, Clone)]
pub struct BrowserState {
    /// Cursor index in the flattened view.
    pub cursor: usize,
    /// Scroll offset.
    pub offset: usize,
    /// Set of expanded directory keys.
    pub expanded: HashSet<CompactString>,
}

impl BrowserState {
    /// Toggle expansion of a directory key.
    pub fn toggle_expand(&mut self, key: &str) {
        if !self.expanded.remove(key) {
            self.expanded.insert(CompactString::from(key));
        }
    }

    /// Check if a directory key is expanded.
    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }

    /// Expand every directory on the path from `id` up to the root, so the
    /// node is reachable in the flattened view.
    pub fn expand_ancestors(&mut self, tree: &ObjectTree, id: NodeId) {
        for ancestor in tree.ancestors(id) {
            self.expanded.insert(tree.node(ancestor).key.clone());
        }
    }

    /// Move cursor up.
    pub fn move_up(&mut self, count: usize) {
        self.cursor = self.cursor.saturating_sub(count);
    }

    /// Move cursor down.
    pub fn move_down(&mut self, count: usize, max: usize) {
        self.cursor = (self.cursor + count).min(max.saturating_sub(1));
    }

    /// Jump to top.
    pub fn jump_to_top(&mut self) {
        self.cursor = 0;
    }

    /// Jump to bottom.
    pub fn jump_to_bottom(&mut self, max: usize) {
        self.cursor = max.saturating_sub(1);
    }

    /// Clamp the cursor after the row count changed.
    pub fn clamp(&mut self, max: usize) {
        self.cursor = self.cursor.min(max.saturating_sub(1));
    }

    /// Ensure the cursor row is visible, adjusting offset if needed.
    pub fn ensure_visible(&mut self, viewport_height: usize) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + viewport_height {
            self.offset = self.cursor - viewport_height + 1;
        }
    }
}

/// A flattened visible row in the browser tree.
#[derive(Debug, Clone)]
pub struct BrowserRow {
    pub id: NodeId,
    /// Full directory key. Empty for the root row.
    pub key: CompactString,
    pub name: CompactString,
    pub depth: usize,
    pub expanded: bool,
    /// Whether the directory has subdirectories to reveal.
    pub expandable: bool,
    pub is_last_sibling: bool,
    pub parent_last_siblings: Vec<bool>,
}

/// Flatten the directory tree to visible rows based on expansion state.
///
/// Only directories appear here; files are shown in the entry pane.
pub fn flatten_rows(tree: &ObjectTree, state: &BrowserState) -> Vec<BrowserRow> {
    let mut rows = Vec::new();
    flatten_node(tree, ROOT, 0, true, Vec::new(), state, &mut rows);
    rows
}

fn flatten_node(
    tree: &ObjectTree,
    id: NodeId,
    depth: usize,
    is_last: bool,
    parent_last_siblings: Vec<bool>,
    state: &BrowserState,
    rows: &mut Vec<BrowserRow>,
) {
    let node = tree.node(id);
    let subdirs: Vec<NodeId> = node
        .children()
        .iter()
        .copied()
        .filter(|child| tree.node(*child).is_dir())
        .collect();
    let expandable = !subdirs.is_empty();
    let expanded = state.is_expanded(&node.key);

    let name = if id == ROOT {
        CompactString::from("/")
    } else {
        node.name.clone()
    };

    rows.push(BrowserRow {
        id,
        key: node.key.clone(),
        name,
        depth,
        expanded,
        expandable,
        is_last_sibling: is_last,
        parent_last_siblings: parent_last_siblings.clone(),
    });

    if expanded && expandable {
        let child_count = subdirs.len();
        for (i, child) in subdirs.into_iter().enumerate() {
            let child_is_last = i == child_count - 1;
            let mut child_parent_lasts = parent_last_siblings.clone();
            child_parent_lasts.push(is_last);

            flatten_node(
                tree,
                child,
                depth + 1,
                child_is_last,
                child_parent_lasts,
                state,
                rows,
            );
        }
    }
}

/// Browser pane widget showing the directory tree.
pub struct BrowserTree<'a> {
    tree: &'a ObjectTree,
    /// Key of the selected directory, kept highlighted even when the
    /// cursor moves elsewhere.
    selected_key: &'a str,
    loading: bool,
    focused: bool,
    theme: &'a Theme,
    block: Option<Block<'a>>,
}

impl<'a> BrowserTree<'a> {
    /// Create a new browser tree widget.
    pub fn new(
        tree: &'a ObjectTree,
        selected_key: &'a str,
        loading: bool,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            tree,
            selected_key,
            loading,
            focused,
            theme,
            block: None,
        }
    }

    /// Set the block (border) for the widget.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl StatefulWidget for BrowserTree<'_> {
    type State = BrowserState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner_area = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner_area.height == 0 || inner_area.width == 0 {
            return;
        }

        if self.loading {
            let placeholder =
                Paragraph::new("Loading files...").style(Style::default().fg(self.theme.muted));
            Widget::render(placeholder, inner_area, buf);
            return;
        }

        let rows = flatten_rows(self.tree, state);
        let viewport_height = inner_area.height as usize;

        state.clamp(rows.len());
        state.ensure_visible(viewport_height);

        let start = state.offset;
        let end = (start + viewport_height).min(rows.len());

        for (row_idx, item_idx) in (start..end).enumerate() {
            let row = &rows[item_idx];
            let y = inner_area.y + row_idx as u16;
            let is_cursor = item_idx == state.cursor;
            let is_selected = row.key == self.selected_key;

            // Build tree prefix
            let mut prefix = String::new();
            for &parent_is_last in &row.parent_last_siblings {
                prefix.push_str(if parent_is_last { "  " } else { "│ " });
            }
            if row.depth > 0 {
                prefix.push_str(if row.is_last_sibling {
                    "└─"
                } else {
                    "├─"
                });
            }

            let expand_indicator = if row.expandable {
                if row.expanded {
                    "▼ "
                } else {
                    "▶ "
                }
            } else {
                "  "
            };

            // Truncate name if needed
            let available = inner_area
                .width
                .saturating_sub(prefix.chars().count() as u16)
                .saturating_sub(expand_indicator.len() as u16) as usize;
            let name = if row.name.len() > available {
                let truncated_len = available.saturating_sub(1);
                format!("{}…", &row.name[..truncated_len])
            } else {
                row.name.to_string()
            };

            let line = Line::from(vec![
                Span::styled(prefix, self.theme.tree_lines),
                Span::styled(expand_indicator, Style::default().fg(self.theme.muted)),
                Span::styled(name, self.theme.directory),
            ]);

            // Cursor highlight wins over the selected-directory mark
            let line = if is_cursor && self.focused {
                line.style(self.theme.selected)
            } else if is_selected {
                line.style(self.theme.marked)
            } else {
                line
            };

            let line_area = Rect::new(inner_area.x, y, inner_area.width, 1);
            Widget::render(line, line_area, buf);
        }
    }
}
