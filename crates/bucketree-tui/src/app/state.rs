//! Application state types.

use std::time::Instant;

use strum::{Display, EnumCount, EnumIter, FromRepr, IntoEnumIterator};

use crate::app::constants::STATUS_TTL_MS;

/// Application mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppMode {
    /// Normal browsing mode.
    #[default]
    Browse,
    /// Help overlay is shown.
    Help,
    /// Creation form is open.
    Create,
    /// Connection settings form is open.
    Config,
    /// File content overlay is shown.
    Content,
    /// Waiting for delete confirmation.
    ConfirmDelete,
    /// Application should quit.
    Quit,
}

/// Which pane has keyboard focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pane {
    /// The directory tree on the left.
    #[default]
    Browser,
    /// The entry listing on the right.
    Detail,
}

impl Pane {
    /// Switch to the other pane.
    pub fn toggle(self) -> Self {
        match self {
            Pane::Browser => Pane::Detail,
            Pane::Detail => Pane::Browser,
        }
    }
}

/// Whether a bucket listing is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchState {
    /// No listing in progress.
    #[default]
    Idle,
    /// A listing request is running.
    Loading,
}

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

/// A message shown in the status area.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    /// When the message should disappear. `None` means it stays until
    /// replaced or dismissed.
    pub expires_at: Option<Instant>,
}

impl StatusMessage {
    /// An informational message without an expiry.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Info,
            expires_at: None,
        }
    }

    /// A success message that expires after a short delay.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Success,
            expires_at: Some(Instant::now() + std::time::Duration::from_millis(STATUS_TTL_MS)),
        }
    }

    /// An error message without an expiry.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Error,
            expires_at: None,
        }
    }

    /// Check whether the message has expired.
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}

/// Body of the file content overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBody {
    /// Fetch is still running.
    Loading,
    /// Content arrived.
    Loaded(String),
    /// Fetch failed.
    Failed,
}

/// State of the file content overlay.
#[derive(Debug, Clone)]
pub struct ContentView {
    /// Object key the overlay belongs to.
    pub key: String,
    /// Display name shown in the title.
    pub name: String,
    pub body: ContentBody,
    /// Vertical scroll offset.
    pub scroll: u16,
}

impl ContentView {
    /// A view in its initial loading state.
    pub fn loading(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            body: ContentBody::Loading,
            scroll: 0,
        }
    }

    /// Largest meaningful scroll offset for the current body.
    pub fn max_scroll(&self) -> u16 {
        match &self.body {
            ContentBody::Loaded(text) => text.lines().count().saturating_sub(1) as u16,
            _ => 0,
        }
    }
}

/// A delete awaiting confirmation.
#[derive(Debug, Clone)]
pub struct PendingDelete {
    pub key: String,
    pub name: String,
    pub is_dir: bool,
}

/// Fields of the creation form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumCount, EnumIter, FromRepr)]
pub enum CreateField {
    #[default]
    #[strum(to_string = "Target directory")]
    Directory,
    #[strum(to_string = "New directory")]
    NewDirectory,
    #[strum(to_string = "File name")]
    FileName,
    #[strum(to_string = "File content")]
    Content,
}

impl CreateField {
    /// Cycle to the next field.
    pub fn next(self) -> Self {
        Self::from_repr((self as usize + 1) % Self::iter().count()).unwrap_or_default()
    }

    /// Cycle to the previous field.
    pub fn prev(self) -> Self {
        let count = Self::iter().count();
        Self::from_repr((self as usize + count - 1) % count).unwrap_or_default()
    }
}

/// Fields of the connection settings form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumCount, EnumIter, FromRepr)]
pub enum ConfigField {
    #[default]
    #[strum(to_string = "AWS Access Key")]
    AccessKey,
    #[strum(to_string = "AWS Secret Key")]
    SecretKey,
    #[strum(to_string = "AWS Region")]
    Region,
    #[strum(to_string = "S3 Bucket Name")]
    Bucket,
    #[strum(to_string = "Endpoint URL (optional)")]
    Endpoint,
}

impl ConfigField {
    /// Cycle to the next field.
    pub fn next(self) -> Self {
        Self::from_repr((self as usize + 1) % Self::iter().count()).unwrap_or_default()
    }

    /// Cycle to the previous field.
    pub fn prev(self) -> Self {
        let count = Self::iter().count();
        Self::from_repr((self as usize + count - 1) % count).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pane_toggle() {
        assert_eq!(Pane::Browser.toggle(), Pane::Detail);
        assert_eq!(Pane::Detail.toggle(), Pane::Browser);
    }

    #[test]
    fn test_status_expiry() {
        let info = StatusMessage::info("Creating folder...");
        assert!(!info.is_expired(Instant::now() + std::time::Duration::from_secs(60)));

        let success = StatusMessage::success("Folder created at: docs/reports");
        assert!(!success.is_expired(Instant::now()));
        assert!(success.is_expired(Instant::now() + std::time::Duration::from_secs(60)));
    }

    #[test]
    fn test_create_field_cycling_wraps() {
        let mut field = CreateField::default();
        for _ in 0..CreateField::COUNT {
            field = field.next();
        }
        assert_eq!(field, CreateField::Directory);

        assert_eq!(CreateField::Directory.prev(), CreateField::Content);
        assert_eq!(CreateField::Content.next(), CreateField::Directory);
    }

    #[test]
    fn test_config_field_cycling_wraps() {
        assert_eq!(ConfigField::AccessKey.next(), ConfigField::SecretKey);
        assert_eq!(ConfigField::AccessKey.prev(), ConfigField::Endpoint);
        assert_eq!(ConfigField::Endpoint.next(), ConfigField::AccessKey);
    }

    #[test]
    fn test_content_view_scroll_limit() {
        let mut view = ContentView::loading("docs/notes.txt", "notes.txt");
        assert_eq!(view.max_scroll(), 0);

        view.body = ContentBody::Loaded("one\ntwo\nthree".to_string());
        assert_eq!(view.max_scroll(), 2);

        view.body = ContentBody::Failed;
        assert_eq!(view.max_scroll(), 0);
    }
}
