//! Modal dialog widgets.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};
use strum::IntoEnumIterator;

use crate::app::forms::{ConfigForm, CreateForm};
use crate::app::input::InputState;
use crate::app::state::{
    ConfigField, ContentBody, ContentView, CreateField, PendingDelete, StatusLevel, StatusMessage,
};
use crate::theme::Theme;

/// Modal for creating a directory or a file.
pub struct CreateModal<'a> {
    theme: &'a Theme,
    form: &'a CreateForm,
    status: Option<&'a StatusMessage>,
}

impl<'a> CreateModal<'a> {
    /// Create a new creation modal.
    pub fn new(theme: &'a Theme, form: &'a CreateForm, status: Option<&'a StatusMessage>) -> Self {
        Self {
            theme,
            form,
            status,
        }
    }
}

impl Widget for CreateModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_width = 60.min(area.width.saturating_sub(4));
        let popup_height = if self.status.is_some() { 14 } else { 12 };
        let popup_height = popup_height.min(area.height.saturating_sub(4));

        let popup_x = (area.width.saturating_sub(popup_width)) / 2 + area.x;
        let popup_y = (area.height.saturating_sub(popup_height)) / 2 + area.y;

        let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(" Create ")
            .title_style(
                Style::default()
                    .fg(self.theme.info)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(self.theme.border);

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let max_visible = (inner.width as usize).saturating_sub(6);
        let mut lines = vec![];

        for field in CreateField::iter() {
            let focused = self.form.focus == field;
            let label_style = if focused {
                Style::default()
                    .fg(self.theme.info)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            lines.push(Line::from(vec![
                Span::styled(if focused { " > " } else { "   " }, label_style),
                Span::styled(field.to_string(), label_style),
            ]));

            if field == CreateField::Directory {
                let value_style = if focused {
                    self.theme.selected
                } else if self.form.target().is_empty() {
                    Style::default().fg(self.theme.muted)
                } else {
                    Style::default().fg(self.theme.info)
                };
                lines.push(Line::from(vec![
                    Span::raw("   "),
                    Span::styled(format!("\u{25c2} {} \u{25b8}", self.form.selected_label()), value_style),
                ]));
            } else if let Some(input) = self.form.input(field) {
                let mut spans = vec![Span::raw("   ")];
                spans.extend(input_spans(input, focused, max_visible));
                lines.push(Line::from(spans));
            }
        }

        if let Some(status) = self.status {
            lines.push(Line::raw(""));
            lines.push(status_line(status, self.theme));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled(" Enter ", self.theme.help_key),
            Span::raw("Create  "),
            Span::styled(" Tab ", self.theme.help_key),
            Span::raw("Next field  "),
            Span::styled(" Esc ", self.theme.help_key),
            Span::raw("Close"),
        ]));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Modal for editing the bucket connection settings.
pub struct ConfigModal<'a> {
    theme: &'a Theme,
    form: &'a ConfigForm,
    status: Option<&'a StatusMessage>,
}

impl<'a> ConfigModal<'a> {
    /// Create a new settings modal.
    pub fn new(theme: &'a Theme, form: &'a ConfigForm, status: Option<&'a StatusMessage>) -> Self {
        Self {
            theme,
            form,
            status,
        }
    }
}

impl Widget for ConfigModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let error_count = ConfigField::iter()
            .filter(|field| self.form.input(*field).error().is_some())
            .count() as u16;

        let popup_width = 60.min(area.width.saturating_sub(4));
        let popup_height = 14 + error_count + if self.status.is_some() { 2 } else { 0 };
        let popup_height = popup_height.min(area.height.saturating_sub(4));

        let popup_x = (area.width.saturating_sub(popup_width)) / 2 + area.x;
        let popup_y = (area.height.saturating_sub(popup_height)) / 2 + area.y;

        let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(" Connection Settings ")
            .title_style(
                Style::default()
                    .fg(self.theme.info)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(self.theme.border);

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let max_visible = (inner.width as usize).saturating_sub(6);
        let mut lines = vec![];

        for field in ConfigField::iter() {
            let focused = self.form.focus == field;
            let input = self.form.input(field);
            let label_style = if focused {
                Style::default()
                    .fg(self.theme.info)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            lines.push(Line::from(vec![
                Span::styled(if focused { " > " } else { "   " }, label_style),
                Span::styled(field.to_string(), label_style),
            ]));

            let mut spans = vec![Span::raw("   ")];
            spans.extend(input_spans(input, focused, max_visible));
            lines.push(Line::from(spans));

            if let Some(error) = input.error() {
                lines.push(Line::styled(
                    format!("   {error}"),
                    Style::default().fg(self.theme.error),
                ));
            }
        }

        if let Some(status) = self.status {
            lines.push(Line::raw(""));
            lines.push(status_line(status, self.theme));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled(" Enter ", self.theme.help_key),
            Span::raw("Save  "),
            Span::styled(" Tab ", self.theme.help_key),
            Span::raw("Next field  "),
            Span::styled(" Esc ", self.theme.help_key),
            Span::raw("Close"),
        ]));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Overlay showing the contents of one object.
pub struct ContentOverlay<'a> {
    theme: &'a Theme,
    view: &'a ContentView,
}

impl<'a> ContentOverlay<'a> {
    /// Create a new content overlay.
    pub fn new(theme: &'a Theme, view: &'a ContentView) -> Self {
        Self { theme, view }
    }
}

impl Widget for ContentOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_width = 72.min(area.width.saturating_sub(4));
        let popup_height = 20.min(area.height.saturating_sub(4));

        let popup_x = (area.width.saturating_sub(popup_width)) / 2 + area.x;
        let popup_y = (area.height.saturating_sub(popup_height)) / 2 + area.y;

        let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(format!(" {} ", self.view.name))
            .title_style(
                Style::default()
                    .fg(self.theme.info)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(self.theme.border);

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        if inner.height == 0 {
            return;
        }

        let body_area = Rect::new(
            inner.x,
            inner.y,
            inner.width,
            inner.height.saturating_sub(1),
        );

        match &self.view.body {
            ContentBody::Loading => {
                Paragraph::new("Loading content...")
                    .style(Style::default().fg(self.theme.muted))
                    .render(body_area, buf);
            }
            ContentBody::Loaded(text) if text.is_empty() => {
                Paragraph::new("No content")
                    .style(Style::default().fg(self.theme.muted))
                    .render(body_area, buf);
            }
            ContentBody::Loaded(text) => {
                Paragraph::new(text.as_str())
                    .scroll((self.view.scroll, 0))
                    .render(body_area, buf);
            }
            ContentBody::Failed => {
                Paragraph::new("Error loading file content.")
                    .style(Style::default().fg(self.theme.error))
                    .render(body_area, buf);
            }
        }

        let help_area = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
        let help = Line::from(vec![
            Span::styled(" j/k ", self.theme.help_key),
            Span::raw("Scroll  "),
            Span::styled(" Esc ", self.theme.help_key),
            Span::raw("Close"),
        ]);
        Widget::render(help, help_area, buf);
    }
}

/// Confirmation dialog for deletion.
pub struct DeleteConfirmModal<'a> {
    theme: &'a Theme,
    pending: &'a PendingDelete,
}

impl<'a> DeleteConfirmModal<'a> {
    /// Create a new delete confirmation modal.
    pub fn new(theme: &'a Theme, pending: &'a PendingDelete) -> Self {
        Self { theme, pending }
    }
}

impl Widget for DeleteConfirmModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_width = 60.min(area.width.saturating_sub(4));
        let popup_height = 8.min(area.height.saturating_sub(4));

        let popup_x = (area.width.saturating_sub(popup_width)) / 2 + area.x;
        let popup_y = (area.height.saturating_sub(popup_height)) / 2 + area.y;

        let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(" Confirm Deletion ")
            .title_style(
                Style::default()
                    .fg(self.theme.error)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.error));

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let noun = if self.pending.is_dir { "folder" } else { "file" };
        let lines = vec![
            Line::styled(
                format!("Delete {} {}?", noun, self.pending.name),
                Style::default()
                    .fg(self.theme.warning)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
            Line::styled(
                format!("  {}", self.pending.key),
                Style::default().fg(self.theme.muted),
            ),
            Line::raw(""),
            Line::from(vec![
                Span::styled(" y/Enter ", self.theme.help_key),
                Span::raw("Confirm  "),
                Span::styled(" n/Esc ", self.theme.help_key),
                Span::raw("Cancel"),
            ]),
        ];

        Paragraph::new(lines).render(inner, buf);
    }
}

fn status_line<'a>(status: &'a StatusMessage, theme: &Theme) -> Line<'a> {
    let color = match status.level {
        StatusLevel::Info => theme.info,
        StatusLevel::Success => theme.success,
        StatusLevel::Error => theme.error,
    };
    Line::styled(format!(" {}", status.text), Style::default().fg(color))
}

/// Build the spans for a text field, windowed around the cursor.
///
/// The cursor is drawn reversed and only when the field is focused.
fn input_spans(input: &InputState, focused: bool, max_visible: usize) -> Vec<Span<'static>> {
    let buffer = input.buffer();
    let cursor = input.cursor();

    let (visible_start, cursor_in_view) = if cursor >= max_visible {
        (cursor + 1 - max_visible, max_visible.saturating_sub(1))
    } else {
        (0, cursor)
    };

    let visible_end = (visible_start + max_visible).min(buffer.len());
    let visible_text: String = if buffer.is_empty() {
        String::new()
    } else {
        buffer
            .chars()
            .skip(visible_start)
            .take(visible_end - visible_start)
            .collect()
    };

    if !focused {
        return vec![Span::raw(visible_text)];
    }

    let mut spans = vec![];

    if visible_text.is_empty() {
        spans.push(Span::styled(
            " ",
            Style::default().add_modifier(Modifier::REVERSED),
        ));
    } else {
        let before: String = visible_text.chars().take(cursor_in_view).collect();
        if !before.is_empty() {
            spans.push(Span::raw(before));
        }

        let cursor_char: String = visible_text.chars().skip(cursor_in_view).take(1).collect();
        if cursor_char.is_empty() {
            spans.push(Span::styled(
                " ",
                Style::default().add_modifier(Modifier::REVERSED),
            ));
        } else {
            spans.push(Span::styled(
                cursor_char,
                Style::default().add_modifier(Modifier::REVERSED),
            ));
        }

        let after: String = visible_text.chars().skip(cursor_in_view + 1).collect();
        if !after.is_empty() {
            spans.push(Span::raw(after));
        }
    }

    spans
}
