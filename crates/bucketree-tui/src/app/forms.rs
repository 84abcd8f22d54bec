//! Form state for the creation and connection settings modals.

use bucketree_core::BucketConfig;

use crate::app::input::InputState;
use crate::app::state::{ConfigField, CreateField};

/// Label shown when no target directory has been picked.
pub const DIRECTORY_PLACEHOLDER: &str = "--Select a directory--";

/// State of the creation form.
#[derive(Debug, Clone, Default)]
pub struct CreateForm {
    /// Directory keys offered by the dropdown.
    options: Vec<String>,
    /// Selected dropdown entry. 0 is the placeholder, `i + 1` maps to
    /// `options[i]`.
    option_index: usize,
    pub new_directory: InputState,
    pub file_name: InputState,
    pub content: InputState,
    pub focus: CreateField,
}

impl CreateForm {
    /// Replace the dropdown options, keeping the current selection when
    /// the same directory still exists.
    pub fn set_options(&mut self, options: Vec<String>) {
        let current = self.target().to_string();
        self.options = options;
        self.option_index = if current.is_empty() {
            0
        } else {
            self.options
                .iter()
                .position(|key| *key == current)
                .map(|i| i + 1)
                .unwrap_or(0)
        };
    }

    /// Key of the selected target directory. Empty means none picked.
    pub fn target(&self) -> &str {
        match self.option_index.checked_sub(1) {
            Some(i) => &self.options[i],
            None => "",
        }
    }

    /// Label for the dropdown value line.
    pub fn selected_label(&self) -> &str {
        match self.option_index.checked_sub(1) {
            Some(i) => &self.options[i],
            None => DIRECTORY_PLACEHOLDER,
        }
    }

    /// Number of dropdown entries including the placeholder.
    pub fn option_count(&self) -> usize {
        self.options.len() + 1
    }

    /// Step the dropdown selection, wrapping at either end.
    pub fn cycle_option(&mut self, forward: bool) {
        let count = self.option_count();
        self.option_index = if forward {
            (self.option_index + 1) % count
        } else {
            (self.option_index + count - 1) % count
        };
    }

    /// Move focus to the next field.
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// Move focus to the previous field.
    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Input state of the focused field, if it is a text field.
    pub fn focused_input(&mut self) -> Option<&mut InputState> {
        match self.focus {
            CreateField::Directory => None,
            CreateField::NewDirectory => Some(&mut self.new_directory),
            CreateField::FileName => Some(&mut self.file_name),
            CreateField::Content => Some(&mut self.content),
        }
    }

    /// Input state for a text field, for rendering. None for the dropdown.
    pub fn input(&self, field: CreateField) -> Option<&InputState> {
        match field {
            CreateField::Directory => None,
            CreateField::NewDirectory => Some(&self.new_directory),
            CreateField::FileName => Some(&self.file_name),
            CreateField::Content => Some(&self.content),
        }
    }

    /// Whether every field is still untouched.
    pub fn is_empty(&self) -> bool {
        self.option_index == 0
            && self.new_directory.is_empty()
            && self.file_name.is_empty()
            && self.content.is_empty()
    }

    /// Reset every field, keeping the dropdown options.
    pub fn clear(&mut self) {
        self.option_index = 0;
        self.new_directory = InputState::new();
        self.file_name = InputState::new();
        self.content = InputState::new();
        self.focus = CreateField::default();
    }
}

/// State of the connection settings form.
#[derive(Debug, Clone, Default)]
pub struct ConfigForm {
    pub access_key: InputState,
    pub secret_key: InputState,
    pub region: InputState,
    pub bucket: InputState,
    pub endpoint: InputState,
    pub focus: ConfigField,
}

impl ConfigForm {
    /// Build a form prefilled from an existing configuration.
    pub fn from_config(config: &BucketConfig) -> Self {
        Self {
            access_key: InputState::with_initial(&config.access_key_id),
            secret_key: InputState::with_initial(&config.secret_access_key),
            region: InputState::with_initial(&config.region),
            bucket: InputState::with_initial(&config.bucket_name),
            endpoint: InputState::with_initial(config.endpoint_url.as_deref().unwrap_or("")),
            focus: ConfigField::default(),
        }
    }

    /// Build a configuration from the current field values.
    pub fn to_config(&self) -> BucketConfig {
        let endpoint = self.endpoint.buffer().trim();
        BucketConfig {
            access_key_id: self.access_key.buffer().trim().to_string(),
            secret_access_key: self.secret_key.buffer().trim().to_string(),
            region: self.region.buffer().trim().to_string(),
            bucket_name: self.bucket.buffer().trim().to_string(),
            endpoint_url: (!endpoint.is_empty()).then(|| endpoint.to_string()),
        }
    }

    /// Move focus to the next field.
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// Move focus to the previous field.
    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Input state of the focused field.
    pub fn focused_input(&mut self) -> &mut InputState {
        match self.focus {
            ConfigField::AccessKey => &mut self.access_key,
            ConfigField::SecretKey => &mut self.secret_key,
            ConfigField::Region => &mut self.region,
            ConfigField::Bucket => &mut self.bucket,
            ConfigField::Endpoint => &mut self.endpoint,
        }
    }

    /// Input state for a field, for rendering.
    pub fn input(&self, field: ConfigField) -> &InputState {
        match field {
            ConfigField::AccessKey => &self.access_key,
            ConfigField::SecretKey => &self.secret_key,
            ConfigField::Region => &self.region,
            ConfigField::Bucket => &self.bucket,
            ConfigField::Endpoint => &self.endpoint,
        }
    }

    /// Validate the form.
    ///
    /// Returns the configuration when every required field is filled,
    /// otherwise attaches an error message to each missing field.
    pub fn validate(&mut self) -> Option<BucketConfig> {
        let config = self.to_config();
        let errors = config.validate();
        if errors.is_empty() {
            return Some(config);
        }
        if let Some(message) = errors.access_key_id {
            self.access_key.set_error(message);
        }
        if let Some(message) = errors.secret_access_key {
            self.secret_key.set_error(message);
        }
        if let Some(message) = errors.region {
            self.region.set_error(message);
        }
        if let Some(message) = errors.bucket_name {
            self.bucket.set_error(message);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_set_options_preserves_selection() {
        let mut form = CreateForm::default();
        form.set_options(vec!["docs".to_string(), "media".to_string()]);
        form.cycle_option(true);
        form.cycle_option(true);
        assert_eq!(form.target(), "media");

        form.set_options(vec![
            "archive".to_string(),
            "docs".to_string(),
            "media".to_string(),
        ]);
        assert_eq!(form.target(), "media");

        form.set_options(vec!["docs".to_string()]);
        assert_eq!(form.target(), "");
        assert_eq!(form.selected_label(), DIRECTORY_PLACEHOLDER);
    }

    #[test]
    fn test_cycle_option_wraps() {
        let mut form = CreateForm::default();
        form.set_options(vec!["docs".to_string()]);
        assert_eq!(form.option_count(), 2);

        form.cycle_option(true);
        assert_eq!(form.target(), "docs");
        form.cycle_option(true);
        assert_eq!(form.target(), "");
        form.cycle_option(false);
        assert_eq!(form.target(), "docs");
    }

    #[test]
    fn test_create_form_is_empty() {
        let mut form = CreateForm::default();
        form.set_options(vec!["docs".to_string()]);
        assert!(form.is_empty());

        form.cycle_option(true);
        assert!(!form.is_empty());

        form.clear();
        assert!(form.is_empty());
        assert_eq!(form.option_count(), 2);
    }

    #[test]
    fn test_config_round_trip() {
        let config = BucketConfig {
            access_key_id: "AKIA123".to_string(),
            secret_access_key: "secret".to_string(),
            region: "eu-west-1".to_string(),
            bucket_name: "assets".to_string(),
            endpoint_url: Some("http://localhost:9000".to_string()),
        };
        let form = ConfigForm::from_config(&config);
        assert_eq!(form.to_config(), config);
    }

    #[test]
    fn test_validate_flags_missing_fields() {
        let mut form = ConfigForm::default();
        form.region = InputState::with_initial("eu-west-1");

        assert!(form.validate().is_none());
        assert_eq!(form.access_key.error(), Some("AWS Access Key is required"));
        assert_eq!(form.secret_key.error(), Some("AWS Secret Key is required"));
        assert!(form.region.error().is_none());
        assert_eq!(form.bucket.error(), Some("S3 Bucket Name is required"));

        // Typing into a field clears its error.
        form.access_key.handle_key(key_event(KeyCode::Char('A')));
        assert!(form.access_key.error().is_none());
        assert!(form.secret_key.error().is_some());
    }

    #[test]
    fn test_validate_accepts_complete_form() {
        let mut form = ConfigForm {
            access_key: InputState::with_initial("AKIA123"),
            secret_key: InputState::with_initial("secret"),
            region: InputState::with_initial("eu-west-1"),
            bucket: InputState::with_initial("assets"),
            endpoint: InputState::new(),
            focus: ConfigField::default(),
        };

        let config = form.validate().unwrap();
        assert_eq!(config.bucket_name, "assets");
        assert_eq!(config.endpoint_url, None);
    }
}
