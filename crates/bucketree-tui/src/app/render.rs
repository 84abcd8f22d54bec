//! Application rendering.

use chrono::{DateTime, Local};
use itertools::Itertools;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use bucketree_core::{NodeId, ObjectTree};

use crate::theme::Theme;
use crate::ui::modals::{ConfigModal, ContentOverlay, CreateModal, DeleteConfirmModal};
use crate::ui::{AppLayout, BrowserState, BrowserTree, DetailPane, DetailState, HelpOverlay};

use super::forms::{ConfigForm, CreateForm};
use super::state::{
    AppMode, ContentView, FetchState, Pane, PendingDelete, StatusLevel, StatusMessage,
};

/// Render context containing all the state needed for rendering.
pub struct RenderContext<'a> {
    pub mode: AppMode,
    pub pane: Pane,
    pub theme: &'a Theme,
    pub bucket: &'a str,
    pub connected: bool,
    pub tree: &'a ObjectTree,
    pub selection_key: &'a str,
    pub selected_dir: NodeId,
    pub browser: &'a BrowserState,
    pub detail: &'a DetailState,
    pub fetch_state: FetchState,
    pub status: Option<&'a StatusMessage>,
    pub last_refresh: Option<DateTime<Local>>,
    pub create_form: &'a CreateForm,
    pub config_form: &'a ConfigForm,
    pub content_view: Option<&'a ContentView>,
    pub pending_delete: Option<&'a PendingDelete>,
}

/// Main render function for the application.
pub fn render_app(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    // Fill entire area with theme background color
    let base_style = Style::default()
        .bg(ctx.theme.background)
        .fg(ctx.theme.foreground);
    buf.set_style(area, base_style);

    let layout = AppLayout::new(area);

    render_header(ctx, layout.header, buf);
    render_browser(ctx, layout.browser, buf);
    render_detail(ctx, layout.detail, buf);
    render_footer(ctx, layout.footer, buf);

    // Render overlays
    match ctx.mode {
        AppMode::Help => {
            HelpOverlay::new(ctx.theme).render(area, buf);
        }
        AppMode::Create => {
            CreateModal::new(ctx.theme, ctx.create_form, ctx.status).render(area, buf);
        }
        AppMode::Config => {
            ConfigModal::new(ctx.theme, ctx.config_form, ctx.status).render(area, buf);
        }
        AppMode::Content => {
            if let Some(view) = ctx.content_view {
                ContentOverlay::new(ctx.theme, view).render(area, buf);
            }
        }
        AppMode::ConfirmDelete => {
            if let Some(pending) = ctx.pending_delete {
                DeleteConfirmModal::new(ctx.theme, pending).render(area, buf);
            }
        }
        _ => {}
    }
}

fn render_header(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let title = Span::styled(" bucketree ", ctx.theme.title.add_modifier(Modifier::BOLD));

    let stats = format!(
        " {}  {} files, {} folders ",
        ctx.bucket,
        ctx.tree.file_count(),
        ctx.tree.directory_count()
    );
    let stats_span = Span::styled(stats, ctx.theme.header);

    let refresh_span = match ctx.last_refresh {
        Some(at) => Span::styled(
            format!(" refreshed {} ", at.format("%H:%M:%S")),
            Style::default().fg(ctx.theme.muted),
        ),
        None => Span::raw(""),
    };

    let status_span = if let Some(status) = ctx.status {
        let color = match status.level {
            StatusLevel::Info => ctx.theme.info,
            StatusLevel::Success => ctx.theme.success,
            StatusLevel::Error => ctx.theme.error,
        };
        Span::styled(format!(" {} ", status.text), Style::default().fg(color))
    } else if !ctx.connected {
        Span::styled(
            " no credentials (press c) ",
            Style::default().fg(ctx.theme.warning),
        )
    } else {
        Span::raw("")
    };

    let line = Line::from(vec![
        title,
        Span::raw(" "),
        stats_span,
        refresh_span,
        status_span,
    ]);

    Paragraph::new(line).style(ctx.theme.header).render(area, buf);
}

fn render_browser(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let focused = ctx.mode == AppMode::Browse && ctx.pane == Pane::Browser;

    let tree_view = BrowserTree::new(
        ctx.tree,
        ctx.selection_key,
        ctx.fetch_state == FetchState::Loading,
        focused,
        ctx.theme,
    )
    .block(pane_block(ctx.theme, format!(" {} ", ctx.bucket), focused));

    let mut browser_state = ctx.browser.clone();
    ratatui::widgets::StatefulWidget::render(tree_view, area, buf, &mut browser_state);
}

fn render_detail(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let focused = ctx.mode == AppMode::Browse && ctx.pane == Pane::Detail;
    let node = ctx.tree.node(ctx.selected_dir);

    // Breadcrumb title for the selected directory
    let title = if node.key.is_empty() {
        " / ".to_string()
    } else {
        format!(" {} ", node.key.split('/').join(" / "))
    };

    let pane = DetailPane::new(ctx.tree, ctx.selected_dir, focused, ctx.theme)
        .block(pane_block(ctx.theme, title, focused));

    let mut detail_state = ctx.detail.clone();
    ratatui::widgets::StatefulWidget::render(pane, area, buf, &mut detail_state);
}

fn pane_block(theme: &Theme, title: String, focused: bool) -> Block<'static> {
    let border_style = if focused { theme.title } else { theme.border };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
        .title_style(theme.title)
}

fn render_footer(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let mut keys: Vec<(&str, &str)> = match ctx.mode {
        AppMode::Browse => {
            let mut v = vec![
                ("j/k", "Nav"),
                ("Enter", "Select"),
                ("Tab", "Pane"),
                ("o", "Expand"),
                ("Bksp", "Up"),
            ];
            if ctx.connected {
                v.push(("a", "New"));
                v.push(("R", "Refresh"));
                if ctx.pane == Pane::Detail {
                    v.push(("d", "Del"));
                }
            }
            v.push(("c", "Config"));
            v.push(("t", "Theme"));
            v
        }
        AppMode::Create | AppMode::Config => {
            vec![("Tab", "Next"), ("Enter", "Submit"), ("Esc", "Close")]
        }
        AppMode::Content => vec![("j/k", "Scroll"), ("Esc", "Close")],
        AppMode::ConfirmDelete => vec![("y", "Confirm"), ("n", "Cancel")],
        _ => vec![],
    };

    keys.extend([("?", "Help"), ("q", "Quit")]);

    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(format!(" {} ", key), ctx.theme.help_key),
                Span::styled(format!("{} ", desc), ctx.theme.help_desc),
            ]
        })
        .collect();

    let line = Line::from(spans);

    Paragraph::new(line).style(ctx.theme.footer).render(area, buf);
}
