//! Terminal user interface for bucketree.
//!
//! This crate provides an interactive TUI for browsing an object-storage
//! bucket as a directory tree, built with ratatui.
//!
//! # Overview
//!
//! `bucketree-tui` renders the bucket as two panes:
//!
//! - **Browser pane** - Collapsible directory tree derived from object keys
//! - **Entry pane** - Files and subdirectories of the selected directory
//!
//! On top of browsing it offers a creation panel for new files and folder
//! placeholders, a read-only file content overlay, delete with confirmation,
//! and a settings form for the bucket credentials.
//!
//! # Usage
//!
//! ```rust,no_run
//! use bucketree_tui;
//!
//! // Run the TUI with credentials from the default location
//! bucketree_tui::run(None).unwrap();
//! ```
//!
//! # Keyboard Navigation
//!
//! - `j`/`k` - Move down/up
//! - `o`/`l` - Expand or collapse a directory
//! - `Enter` - Select directory / open file
//! - `Backspace` - Go to parent directory
//! - `Tab` - Switch pane
//! - `a` - Create file or folder
//! - `d` - Delete entry
//! - `R` - Refresh listing
//! - `c` - Edit credentials
//! - `?` - Help
//! - `q` - Quit

pub mod app;
mod event;
mod theme;
mod ui;

pub use app::{App, AppResult};
pub use theme::Theme;

/// Run the TUI application.
///
/// `config_path` overrides the default credentials file location.
pub fn run(config_path: Option<std::path::PathBuf>) -> AppResult<()> {
    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()?;

    let terminal = ratatui::init();
    let result = rt.block_on(App::new(config_path).run(terminal));
    ratatui::restore();

    // Shutdown runtime immediately to cancel background tasks
    rt.shutdown_timeout(std::time::Duration::from_millis(100));

    result
}
