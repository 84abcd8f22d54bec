//! Entry listing widget for the selected directory.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, StatefulWidget, Widget};

use bucketree_core::{NodeId, ObjectTree};

use crate::theme::Theme;

/// State for the entry pane.
#[derive(Debug, Default, Clone)]
pub struct DetailState {
    /// Cursor index into the directory's children.
    pub cursor: usize,
    /// Scroll offset.
    pub offset: usize,
}

impl DetailState {
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

    /// Reset cursor and scroll, for when a different directory is shown.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    /// Clamp the cursor after the entry count changed.
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

/// Entry pane widget listing the children of one directory.
pub struct DetailPane<'a> {
    tree: &'a ObjectTree,
    directory: NodeId,
    focused: bool,
    theme: &'a Theme,
    block: Option<Block<'a>>,
}

impl<'a> DetailPane<'a> {
    /// Create a new entry pane for a directory.
    pub fn new(tree: &'a ObjectTree, directory: NodeId, focused: bool, theme: &'a Theme) -> Self {
        Self {
            tree,
            directory,
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

impl StatefulWidget for DetailPane<'_> {
    type State = DetailState;

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

        let children = self.tree.children(self.directory);

        if children.is_empty() {
            let line = Line::from(Span::styled(
                "(empty)",
                Style::default().fg(self.theme.muted),
            ));
            let line_area = Rect::new(inner_area.x, inner_area.y, inner_area.width, 1);
            Widget::render(line, line_area, buf);
            return;
        }

        let viewport_height = inner_area.height as usize;
        state.clamp(children.len());
        state.ensure_visible(viewport_height);

        let start = state.offset;
        let end = (start + viewport_height).min(children.len());

        for (row_idx, item_idx) in (start..end).enumerate() {
            let node = self.tree.node(children[item_idx]);
            let y = inner_area.y + row_idx as u16;

            let line = if node.is_dir() {
                Line::from(Span::styled(
                    format!("{}/", node.name),
                    self.theme.directory,
                ))
            } else {
                Line::from(Span::styled(node.name.to_string(), self.theme.file))
            };

            let line = if self.focused && item_idx == state.cursor {
                line.style(self.theme.selected)
            } else {
                line
            };

            let line_area = Rect::new(inner_area.x, y, inner_area.width, 1);
            Widget::render(line, line_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_state_reset_and_clamp() {
        let mut state = DetailState::default();
        state.move_down(7, 20);
        state.offset = 3;
        assert_eq!(state.cursor, 7);

        state.clamp(4);
        assert_eq!(state.cursor, 3);

        state.reset();
        assert_eq!(state.cursor, 0);
        assert_eq!(state.offset, 0);
    }
}
