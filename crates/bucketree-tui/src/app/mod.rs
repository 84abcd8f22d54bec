//! Main application state and logic.

mod constants;
pub mod forms;
pub mod input;
mod render;
mod selection;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyModifiers};
use futures::StreamExt;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tracing::info;

use bucketree_core::{directory_prefixes, BucketConfig, NodeId, ObjectTree};
use bucketree_ops::{
    start_create, start_delete, start_fetch_content, start_listing, ContentResult, CreateRequest,
    CreateResult, DeleteResult, ListingResult,
};
use bucketree_store::{ObjectStore, S3Store};

use crate::event::KeyAction;
use crate::theme::Theme;
use crate::ui::{flatten_rows, BrowserState, DetailState};

use self::constants::{PAGE_SIZE, TICK_INTERVAL_MS};
use self::forms::{ConfigForm, CreateForm};
use self::input::InputResult;
use self::render::{render_app, RenderContext};
use self::selection::SelectionState;
use self::state::{
    AppMode, ContentBody, ContentView, CreateField, FetchState, Pane, PendingDelete, StatusMessage,
};

/// Application result type.
pub type AppResult<T> = color_eyre::Result<T>;

/// Main application state.
pub struct App {
    /// Connected object store. None until credentials are complete.
    store: Option<Arc<dyn ObjectStore>>,
    /// Active bucket credentials.
    config: BucketConfig,
    /// Explicit credentials file override.
    config_path: Option<PathBuf>,
    /// Directory tree derived from the last listing.
    tree: ObjectTree,
    /// Current mode.
    mode: AppMode,
    /// Which pane has keyboard focus.
    pane: Pane,
    /// Color theme.
    theme: Theme,
    /// Selected directory, tracked by key.
    selection: SelectionState,
    /// Browser pane state.
    browser: BrowserState,
    /// Cached count of visible browser rows (to avoid flatten on every nav).
    cached_browser_len: usize,
    /// Entry pane state.
    detail: DetailState,
    /// Whether a listing is in flight.
    fetch_state: FetchState,
    /// Status message shown in the header or the open modal.
    status: Option<StatusMessage>,
    /// When the listing was last rebuilt.
    last_refresh: Option<DateTime<Local>>,
    /// Creation form state.
    create_form: CreateForm,
    /// Connection settings form state.
    config_form: ConfigForm,
    /// Content overlay state.
    content_view: Option<ContentView>,
    /// Delete awaiting confirmation.
    pending_delete: Option<PendingDelete>,
    /// Channel for the in-flight listing.
    listing_rx: Option<mpsc::Receiver<ListingResult>>,
    /// Channel for the in-flight create.
    create_rx: Option<mpsc::Receiver<CreateResult>>,
    /// Channel for the in-flight delete.
    delete_rx: Option<mpsc::Receiver<DeleteResult>>,
    /// Channel for the in-flight content fetch.
    content_rx: Option<mpsc::Receiver<ContentResult>>,
    /// Flag indicating UI needs redraw.
    needs_redraw: bool,
}

impl App {
    /// Create a new application, loading credentials from disk.
    ///
    /// Starts in browse mode when the stored credentials are complete,
    /// otherwise in the connection settings form.
    pub fn new(config_path: Option<PathBuf>) -> Self {
        let config = match &config_path {
            Some(path) => BucketConfig::load_from(path),
            None => BucketConfig::load(),
        }
        .unwrap_or_default();

        Self::from_parts(config, config_path)
    }

    fn from_parts(config: BucketConfig, config_path: Option<PathBuf>) -> Self {
        let store: Option<Arc<dyn ObjectStore>> = config
            .is_complete()
            .then(|| Arc::new(S3Store::connect(&config)) as Arc<dyn ObjectStore>);

        let mode = if store.is_some() {
            AppMode::Browse
        } else {
            AppMode::Config
        };

        let config_form = ConfigForm::from_config(&config);

        let mut browser = BrowserState::default();
        browser.toggle_expand("");

        let mut app = Self {
            store,
            config,
            config_path,
            tree: ObjectTree::new(),
            mode,
            pane: Pane::default(),
            theme: Theme::dark(),
            selection: SelectionState::default(),
            browser,
            cached_browser_len: 0,
            detail: DetailState::default(),
            fetch_state: FetchState::Idle,
            status: None,
            last_refresh: None,
            create_form: CreateForm::default(),
            config_form,
            content_view: None,
            pending_delete: None,
            listing_rx: None,
            create_rx: None,
            delete_rx: None,
            content_rx: None,
            needs_redraw: true,
        };

        app.update_cached_browser_len();

        app
    }

    /// Run the application with async event loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<()> {
        if self.store.is_some() {
            self.start_refresh();
        }

        let period = Duration::from_millis(TICK_INTERVAL_MS);
        let mut interval = tokio::time::interval(period);
        let mut events = EventStream::new();

        while self.mode != AppMode::Quit {
            if self.needs_redraw {
                terminal.draw(|frame| self.render(frame))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased;

                Some(Ok(event)) = events.next() => {
                    if let Event::Key(key_event) = event {
                        if key_event.kind == crossterm::event::KeyEventKind::Press {
                            self.dispatch_key(key_event);
                        }
                    }

                    // Drain any additional pending events
                    while crossterm::event::poll(Duration::ZERO)? {
                        if let Ok(Event::Key(key_event)) = crossterm::event::read() {
                            if key_event.kind == crossterm::event::KeyEventKind::Press {
                                self.dispatch_key(key_event);
                                if self.mode == AppMode::Quit {
                                    break;
                                }
                            }
                        }
                    }
                    self.needs_redraw = true;
                }

                Some(result) = async {
                    if let Some(rx) = &mut self.listing_rx {
                        rx.recv().await
                    } else {
                        std::future::pending().await
                    }
                } => {
                    self.handle_listing_result(result);
                    self.needs_redraw = true;
                }

                Some(result) = async {
                    if let Some(rx) = &mut self.create_rx {
                        rx.recv().await
                    } else {
                        std::future::pending().await
                    }
                } => {
                    self.handle_create_result(result);
                    self.needs_redraw = true;
                }

                Some(result) = async {
                    if let Some(rx) = &mut self.delete_rx {
                        rx.recv().await
                    } else {
                        std::future::pending().await
                    }
                } => {
                    self.handle_delete_result(result);
                    self.needs_redraw = true;
                }

                Some(result) = async {
                    if let Some(rx) = &mut self.content_rx {
                        rx.recv().await
                    } else {
                        std::future::pending().await
                    }
                } => {
                    self.handle_content_result(result);
                    self.needs_redraw = true;
                }

                _ = interval.tick() => {
                    self.expire_status();
                }
            }
        }

        Ok(())
    }

    /// Render the application to the frame.
    fn render(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }

    /// Route a key event based on the current mode.
    fn dispatch_key(&mut self, key: KeyEvent) {
        let action = KeyAction::from_key_event(key);

        // Ctrl-C always quits, even inside a form.
        if action == KeyAction::ForceQuit {
            self.mode = AppMode::Quit;
            return;
        }

        match self.mode {
            AppMode::Create => self.handle_create_key(key),
            AppMode::Config => self.handle_config_key(key),
            _ => self.handle_action(action),
        }
    }

    /// Handle a key action.
    fn handle_action(&mut self, action: KeyAction) {
        // Overlay modes swallow everything except their own keys
        match self.mode {
            AppMode::Help => {
                if matches!(
                    action,
                    KeyAction::ToggleHelp | KeyAction::Quit | KeyAction::Cancel
                ) {
                    self.mode = AppMode::Browse;
                }
                return;
            }
            AppMode::Content => {
                self.handle_content_action(action);
                return;
            }
            AppMode::ConfirmDelete => {
                match action {
                    KeyAction::Confirm | KeyAction::Select => self.execute_delete(),
                    KeyAction::Cancel | KeyAction::Quit => {
                        self.pending_delete = None;
                        self.mode = AppMode::Browse;
                    }
                    _ => {}
                }
                return;
            }
            _ => {}
        }

        match action {
            KeyAction::Quit | KeyAction::ForceQuit => self.mode = AppMode::Quit,
            KeyAction::Cancel => self.status = None,
            KeyAction::SwitchPane => self.pane = self.pane.toggle(),
            KeyAction::Refresh => self.start_refresh(),
            KeyAction::Create => self.open_create(),
            KeyAction::Configure => self.open_config(),
            KeyAction::ToggleTheme => self.theme = self.theme.toggle(),
            KeyAction::ToggleHelp => self.mode = AppMode::Help,
            KeyAction::GoToParent => self.go_to_parent(),
            KeyAction::MoveUp => self.move_cursor_up(1),
            KeyAction::MoveDown => self.move_cursor_down(1),
            KeyAction::PageUp => self.move_cursor_up(PAGE_SIZE),
            KeyAction::PageDown => self.move_cursor_down(PAGE_SIZE),
            KeyAction::JumpToTop => self.jump_to_top(),
            KeyAction::JumpToBottom => self.jump_to_bottom(),
            KeyAction::ToggleExpand => self.toggle_expand(),
            KeyAction::Select => self.activate(),
            KeyAction::Delete => self.request_delete(),
            KeyAction::Confirm | KeyAction::None => {}
        }
    }

    fn handle_content_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Cancel | KeyAction::Quit | KeyAction::Select => {
                self.mode = AppMode::Browse;
                self.content_view = None;
                self.content_rx = None;
            }
            KeyAction::MoveUp => self.scroll_content(-1),
            KeyAction::MoveDown => self.scroll_content(1),
            KeyAction::PageUp => self.scroll_content(-(PAGE_SIZE as i32)),
            KeyAction::PageDown => self.scroll_content(PAGE_SIZE as i32),
            KeyAction::JumpToTop => {
                if let Some(view) = &mut self.content_view {
                    view.scroll = 0;
                }
            }
            KeyAction::JumpToBottom => {
                if let Some(view) = &mut self.content_view {
                    view.scroll = view.max_scroll();
                }
            }
            _ => {}
        }
    }

    fn scroll_content(&mut self, delta: i32) {
        if let Some(view) = &mut self.content_view {
            let max = view.max_scroll() as i32;
            view.scroll = (view.scroll as i32 + delta).clamp(0, max) as u16;
        }
    }

    /// Handle a key in the creation form.
    fn handle_create_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.create_form.focus_next();
                return;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.create_form.focus_prev();
                return;
            }
            _ => {}
        }

        if self.create_form.focus == CreateField::Directory {
            match (key.code, key.modifiers) {
                (KeyCode::Esc, _) => self.mode = AppMode::Browse,
                (KeyCode::Enter, _) => self.submit_create(),
                (KeyCode::Left, _) | (KeyCode::Char('h' | 'k'), KeyModifiers::NONE) => {
                    self.create_form.cycle_option(false);
                    self.status = None;
                }
                (KeyCode::Right, _) | (KeyCode::Char('l' | 'j' | ' '), KeyModifiers::NONE) => {
                    self.create_form.cycle_option(true);
                    self.status = None;
                }
                _ => {}
            }
            return;
        }

        if let Some(input) = self.create_form.focused_input() {
            match input.handle_key(key) {
                InputResult::Submit(_) => self.submit_create(),
                InputResult::Cancel => self.mode = AppMode::Browse,
                InputResult::Continue => self.status = None,
            }
        }
    }

    /// Handle a key in the connection settings form.
    fn handle_config_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.config_form.focus_next();
                return;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.config_form.focus_prev();
                return;
            }
            _ => {}
        }

        match self.config_form.focused_input().handle_key(key) {
            InputResult::Submit(_) => self.save_config(),
            InputResult::Cancel => {
                // The form is the gate when no credentials exist yet
                if self.store.is_some() {
                    self.mode = AppMode::Browse;
                }
            }
            InputResult::Continue => {}
        }
    }

    fn open_create(&mut self) {
        self.status = None;
        self.mode = AppMode::Create;
    }

    fn open_config(&mut self) {
        self.config_form = ConfigForm::from_config(&self.config);
        self.status = None;
        self.mode = AppMode::Config;
    }

    /// Validate and persist the settings form, then reconnect.
    fn save_config(&mut self) {
        let config = match self.config_form.validate() {
            Some(config) => config,
            None => return,
        };

        let result = match &self.config_path {
            Some(path) => config.save_to(path),
            None => config.save(),
        };
        if let Err(err) = result {
            self.status = Some(StatusMessage::error(format!(
                "Failed to save configuration: {err}"
            )));
            return;
        }

        info!(bucket = %config.bucket_name, "credentials saved");

        self.store = Some(Arc::new(S3Store::connect(&config)) as Arc<dyn ObjectStore>);
        self.config = config;
        self.status = None;
        self.mode = AppMode::Browse;
        self.start_refresh();
    }

    fn move_cursor_up(&mut self, count: usize) {
        match self.pane {
            Pane::Browser => self.browser.move_up(count),
            Pane::Detail => self.detail.move_up(count),
        }
    }

    fn move_cursor_down(&mut self, count: usize) {
        match self.pane {
            Pane::Browser => self.browser.move_down(count, self.cached_browser_len),
            Pane::Detail => {
                let max = self.detail_entry_count();
                self.detail.move_down(count, max);
            }
        }
    }

    fn jump_to_top(&mut self) {
        match self.pane {
            Pane::Browser => self.browser.jump_to_top(),
            Pane::Detail => self.detail.jump_to_top(),
        }
    }

    fn jump_to_bottom(&mut self) {
        match self.pane {
            Pane::Browser => self.browser.jump_to_bottom(self.cached_browser_len),
            Pane::Detail => {
                let max = self.detail_entry_count();
                self.detail.jump_to_bottom(max);
            }
        }
    }

    fn detail_entry_count(&self) -> usize {
        let dir = self.selection.resolve(&self.tree);
        self.tree.children(dir).len()
    }

    /// Toggle expansion of the directory under the browser cursor.
    fn toggle_expand(&mut self) {
        if self.pane != Pane::Browser {
            return;
        }
        let rows = flatten_rows(&self.tree, &self.browser);
        if let Some(row) = rows.get(self.browser.cursor) {
            if row.expandable {
                let key = row.key.clone();
                self.browser.toggle_expand(&key);
                self.update_cached_browser_len();
            }
        }
    }

    /// Activate the entry under the cursor in the focused pane.
    fn activate(&mut self) {
        match self.pane {
            Pane::Browser => self.select_browser_row(),
            Pane::Detail => self.activate_detail_entry(),
        }
    }

    fn select_browser_row(&mut self) {
        let rows = flatten_rows(&self.tree, &self.browser);
        if let Some(row) = rows.get(self.browser.cursor) {
            let id = row.id;
            self.select_directory(id);
        }
    }

    /// Make a directory the selection and reveal it in the browser.
    fn select_directory(&mut self, id: NodeId) {
        let key = self.tree.node(id).key.to_string();
        self.selection.select(key);
        self.browser.expand_ancestors(&self.tree, id);
        self.detail.reset();
        self.update_cached_browser_len();
    }

    /// Open the entry under the detail cursor: descend into directories,
    /// view files.
    fn activate_detail_entry(&mut self) {
        let dir = self.selection.resolve(&self.tree);
        let entry = match self.tree.children(dir).get(self.detail.cursor) {
            Some(id) => *id,
            None => return,
        };
        let node = self.tree.node(entry);
        if node.is_dir() {
            self.select_directory(entry);
        } else {
            let key = node.key.to_string();
            let name = node.name.to_string();
            self.open_content(key, name);
        }
    }

    fn go_to_parent(&mut self) {
        if self.selection.go_to_parent(&self.tree) {
            let id = self.selection.resolve(&self.tree);
            self.browser.expand_ancestors(&self.tree, id);
            self.detail.reset();
            self.update_cached_browser_len();
        }
    }

    /// Open the content overlay for a file and start fetching its body.
    fn open_content(&mut self, key: String, name: String) {
        let store = match &self.store {
            Some(store) => store.clone(),
            None => return,
        };
        self.content_view = Some(ContentView::loading(key.clone(), name));
        self.content_rx = Some(start_fetch_content(
            store,
            self.config.bucket_name.clone(),
            key,
        ));
        self.mode = AppMode::Content;
    }

    /// Ask for confirmation before deleting the entry under the detail
    /// cursor. Directories must be empty.
    fn request_delete(&mut self) {
        if self.pane != Pane::Detail {
            return;
        }
        let dir = self.selection.resolve(&self.tree);
        let entry = match self.tree.children(dir).get(self.detail.cursor) {
            Some(id) => *id,
            None => return,
        };
        let node = self.tree.node(entry);
        if node.is_dir() && !node.is_childless() {
            return;
        }
        self.pending_delete = Some(PendingDelete {
            key: node.key.to_string(),
            name: node.name.to_string(),
            is_dir: node.is_dir(),
        });
        self.mode = AppMode::ConfirmDelete;
    }

    fn execute_delete(&mut self) {
        let pending = match self.pending_delete.take() {
            Some(pending) => pending,
            None => return,
        };
        self.mode = AppMode::Browse;

        let store = match &self.store {
            Some(store) => store.clone(),
            None => return,
        };
        self.delete_rx = Some(start_delete(
            store,
            self.config.bucket_name.clone(),
            pending.key,
        ));
    }

    /// Submit the creation form.
    ///
    /// An untouched form is ignored; invalid combinations surface as an
    /// error status without reaching the store.
    fn submit_create(&mut self) {
        if self.create_form.is_empty() {
            return;
        }
        let store = match &self.store {
            Some(store) => store.clone(),
            None => return,
        };

        let request = CreateRequest::builder()
            .target_key(self.create_form.target())
            .new_directory(self.create_form.new_directory.buffer())
            .file_name(self.create_form.file_name.buffer())
            .content(self.create_form.content.buffer())
            .build();

        match request {
            Ok(request) => {
                self.create_rx = Some(start_create(
                    store,
                    self.config.bucket_name.clone(),
                    request,
                ));
            }
            Err(err) => {
                self.status = Some(StatusMessage::error(err.to_string()));
            }
        }
    }

    /// Start a fresh bucket listing. A newer request replaces the
    /// receiver of a slower one, whose results are then dropped with it.
    fn start_refresh(&mut self) {
        let store = match &self.store {
            Some(store) => store.clone(),
            None => return,
        };
        self.fetch_state = FetchState::Loading;
        self.listing_rx = Some(start_listing(store, self.config.bucket_name.clone()));
    }

    /// Rebuild the tree from a finished listing.
    fn handle_listing_result(&mut self, result: ListingResult) {
        self.listing_rx = None;
        self.fetch_state = FetchState::Idle;

        match result {
            ListingResult::Completed(keys) => {
                self.tree = ObjectTree::from_keys(&keys);
                self.create_form.set_options(directory_prefixes(&keys));
                // Ids never survive a rebuild, so the selection falls
                // back to the root.
                self.selection.reset();
                let selected = self.selection.resolve(&self.tree);
                self.browser.expand_ancestors(&self.tree, selected);
                self.detail.reset();
                self.update_cached_browser_len();
                self.last_refresh = Some(Local::now());
            }
            ListingResult::Failed(_) => {
                // Keep showing the stale tree
            }
        }
    }

    fn handle_create_result(&mut self, result: CreateResult) {
        match result {
            CreateResult::Started { is_directory } => {
                let text = if is_directory {
                    "Creating folder..."
                } else {
                    "Creating file..."
                };
                self.status = Some(StatusMessage::info(text));
            }
            CreateResult::Created { is_directory, key } => {
                self.create_rx = None;
                let text = if is_directory {
                    format!("Folder created at: {key}")
                } else {
                    format!("File created successfully at: {key}")
                };
                self.status = Some(StatusMessage::success(text));
                self.create_form.clear();
                self.start_refresh();
            }
            CreateResult::Failed(_) => {
                self.create_rx = None;
                self.status = Some(StatusMessage::error("Creation failed"));
            }
        }
    }

    fn handle_delete_result(&mut self, result: DeleteResult) {
        self.delete_rx = None;
        match result {
            DeleteResult::Deleted { key } => {
                self.status = Some(StatusMessage::success(format!(
                    "File deleted successfully: {key}"
                )));
                self.start_refresh();
            }
            DeleteResult::Failed { .. } => {
                // Keep the stale listing; the entry is still there
            }
        }
    }

    fn handle_content_result(&mut self, result: ContentResult) {
        self.content_rx = None;
        let view = match &mut self.content_view {
            Some(view) => view,
            None => return,
        };
        match result {
            ContentResult::Loaded { key, content } => {
                // A result for a previously viewed file is stale
                if view.key == key {
                    view.body = ContentBody::Loaded(content);
                }
            }
            ContentResult::Failed { key, .. } => {
                if view.key == key {
                    view.body = ContentBody::Failed;
                }
            }
        }
    }

    fn update_cached_browser_len(&mut self) {
        self.cached_browser_len = flatten_rows(&self.tree, &self.browser).len();
        self.browser.clamp(self.cached_browser_len);
    }

    fn expire_status(&mut self) {
        if let Some(status) = &self.status {
            if status.is_expired(Instant::now()) {
                self.status = None;
                self.needs_redraw = true;
            }
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ctx = RenderContext {
            mode: self.mode,
            pane: self.pane,
            theme: &self.theme,
            bucket: &self.config.bucket_name,
            connected: self.store.is_some(),
            tree: &self.tree,
            selection_key: self.selection.key(),
            selected_dir: self.selection.resolve(&self.tree),
            browser: &self.browser,
            detail: &self.detail,
            fetch_state: self.fetch_state,
            status: self.status.as_ref(),
            last_refresh: self.last_refresh,
            create_form: &self.create_form,
            config_form: &self.config_form,
            content_view: self.content_view.as_ref(),
            pending_delete: self.pending_delete.as_ref(),
        };

        render_app(&ctx, area, buf);
    }
}
