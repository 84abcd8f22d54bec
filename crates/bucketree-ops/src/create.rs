//! Object and folder creation.

use std::sync::Arc;

use derive_builder::Builder;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use bucketree_store::ObjectStore;

use crate::OPERATION_CHANNEL_SIZE;

/// A validated create request from the creation panel.
///
/// The request is classified by its content: a blank body (after trimming)
/// creates a folder placeholder, anything else creates a text file. Built
/// through [`CreateRequestBuilder`], whose `build()` rejects the field
/// combinations the panel treats as invalid.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct CreateRequest {
    /// Key of the existing directory picked as the target, empty for none.
    #[builder(default)]
    pub target_key: String,

    /// New subdirectory path to create beneath the target.
    #[builder(default)]
    pub new_directory: String,

    /// File name; `.txt` is appended when missing.
    #[builder(default)]
    pub file_name: String,

    /// File body. Blank means the request creates a folder.
    #[builder(default)]
    pub content: String,
}

impl CreateRequestBuilder {
    fn validate(&self) -> Result<(), String> {
        let target_set = self.target_key.as_ref().is_some_and(|v| !v.is_empty());
        let new_dir_set = self.new_directory.as_ref().is_some_and(|v| !v.is_empty());
        let file_set = self.file_name.as_ref().is_some_and(|v| !v.is_empty());
        let content_set = self.content.as_ref().is_some_and(|v| !v.is_empty());

        if target_set && !(new_dir_set || file_set) {
            return Err("Add new directory or new file name.".to_string());
        }
        if file_set && !content_set {
            return Err("File content is required.".to_string());
        }
        Ok(())
    }
}

impl CreateRequest {
    /// Create a new request builder.
    pub fn builder() -> CreateRequestBuilder {
        CreateRequestBuilder::default()
    }

    /// Check whether this request creates a folder placeholder.
    pub fn is_directory(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Compose the storage key: target and new-directory segments joined
    /// with `/`, repeated slashes collapsed, `.txt` appended to file names
    /// that lack it.
    pub fn object_key(&self) -> String {
        let directory_path = if !self.target_key.is_empty() {
            if !self.new_directory.is_empty() {
                format!("{}/{}", self.target_key, self.new_directory)
            } else {
                self.target_key.clone()
            }
        } else {
            self.new_directory.clone()
        };
        let directory_path = collapse_slashes(directory_path.trim());

        if self.is_directory() {
            directory_path
        } else {
            let mut file_name = self.file_name.clone();
            if !file_name.ends_with(".txt") {
                file_name.push_str(".txt");
            }
            if directory_path.is_empty() {
                file_name
            } else {
                format!("{directory_path}/{file_name}")
            }
        }
    }

    /// Body to upload. Folder placeholders get an empty body.
    pub fn body(&self) -> &str {
        if self.is_directory() { "" } else { &self.content }
    }
}

fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !prev_slash {
                out.push(c);
            }
            prev_slash = true;
        } else {
            out.push(c);
            prev_slash = false;
        }
    }
    out
}

/// Result sent through the channel during a create operation.
#[derive(Debug, Clone)]
pub enum CreateResult {
    /// The put has been issued.
    Started { is_directory: bool },
    /// The object was written.
    Created { is_directory: bool, key: String },
    /// The put failed; the listing is not refreshed.
    Failed(String),
}

/// Start an async create operation.
///
/// Returns a receiver that yields a start notice followed by the terminal
/// result.
pub fn start_create(
    store: Arc<dyn ObjectStore>,
    bucket: String,
    request: CreateRequest,
) -> mpsc::Receiver<CreateResult> {
    let (tx, rx) = mpsc::channel(OPERATION_CHANNEL_SIZE);

    tokio::spawn(async move {
        create_impl(store, bucket, request, tx).await;
    });

    rx
}

async fn create_impl(
    store: Arc<dyn ObjectStore>,
    bucket: String,
    request: CreateRequest,
    tx: mpsc::Sender<CreateResult>,
) {
    let is_directory = request.is_directory();
    let key = request.object_key();

    let _ = tx.send(CreateResult::Started { is_directory }).await;

    match store.put_object(&bucket, &key, request.body()).await {
        Ok(()) => {
            debug!(key, is_directory, "created object");
            let _ = tx.send(CreateResult::Created { is_directory, key }).await;
        }
        Err(err) => {
            warn!(%err, key, "create failed");
            let _ = tx.send(CreateResult::Failed(err.to_string())).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_without_additions_is_rejected() {
        let err = CreateRequest::builder()
            .target_key("docs")
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "Add new directory or new file name.");
    }

    #[test]
    fn test_file_name_without_content_is_rejected() {
        let err = CreateRequest::builder()
            .file_name("notes")
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "File content is required.");
    }

    #[test]
    fn test_all_empty_builds_a_folder_request() {
        // The panel never submits this (the action is disabled), but the
        // builder itself accepts it.
        let request = CreateRequest::builder().build().unwrap();
        assert!(request.is_directory());
        assert_eq!(request.object_key(), "");
    }

    #[test]
    fn test_folder_key_joins_target_and_new_directory() {
        let request = CreateRequest::builder()
            .target_key("docs")
            .new_directory("drafts/april")
            .build()
            .unwrap();
        assert!(request.is_directory());
        assert_eq!(request.object_key(), "docs/drafts/april");
    }

    #[test]
    fn test_repeated_slashes_collapse() {
        let request = CreateRequest::builder()
            .new_directory("a//b///c")
            .build()
            .unwrap();
        assert_eq!(request.object_key(), "a/b/c");
    }

    #[test]
    fn test_file_key_appends_txt() {
        let request = CreateRequest::builder()
            .target_key("docs")
            .file_name("notes")
            .content("hello")
            .build()
            .unwrap();
        assert!(!request.is_directory());
        assert_eq!(request.object_key(), "docs/notes.txt");
    }

    #[test]
    fn test_existing_txt_suffix_is_kept() {
        let request = CreateRequest::builder()
            .file_name("notes.txt")
            .content("hello")
            .build()
            .unwrap();
        assert_eq!(request.object_key(), "notes.txt");
    }

    #[test]
    fn test_file_at_root_has_no_leading_slash() {
        let request = CreateRequest::builder()
            .file_name("top")
            .content("body")
            .build()
            .unwrap();
        assert_eq!(request.object_key(), "top.txt");
        assert_eq!(request.body(), "body");
    }

    #[test]
    fn test_whitespace_content_means_folder() {
        let request = CreateRequest::builder()
            .new_directory("docs")
            .file_name("ignored.txt")
            .content("   ")
            .build()
            .unwrap();
        assert!(request.is_directory());
        assert_eq!(request.object_key(), "docs");
        assert_eq!(request.body(), "");
    }
}
