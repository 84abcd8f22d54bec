//! UI components and widgets.

mod detail;
mod help;
pub mod modals;
mod tree;

pub use detail::{DetailPane, DetailState};
pub use help::HelpOverlay;
pub use tree::{flatten_rows, BrowserRow, BrowserState, BrowserTree};

use ratatui::layout::{Constraint, Layout, Rect};

/// Layout areas for the application.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub header: Rect,
    pub browser: Rect,
    pub detail: Rect,
    pub footer: Rect,
}

impl AppLayout {
    /// Compute layout from terminal area.
    pub fn new(area: Rect) -> Self {
        let [header, content, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .areas(area);

        let [browser, detail] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(content);

        Self {
            header,
            browser,
            detail,
            footer,
        }
    }
}
