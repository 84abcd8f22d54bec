//! File content retrieval.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use bucketree_store::ObjectStore;

use crate::OPERATION_CHANNEL_SIZE;

/// Result sent through the channel when a content fetch finishes.
#[derive(Debug, Clone)]
pub enum ContentResult {
    /// The object body as text.
    Loaded { key: String, content: String },
    /// The fetch failed.
    Failed { key: String, message: String },
}

/// Start an async fetch of one object's body.
pub fn start_fetch_content(
    store: Arc<dyn ObjectStore>,
    bucket: String,
    key: String,
) -> mpsc::Receiver<ContentResult> {
    let (tx, rx) = mpsc::channel(OPERATION_CHANNEL_SIZE);

    tokio::spawn(async move {
        fetch_content_impl(store, bucket, key, tx).await;
    });

    rx
}

async fn fetch_content_impl(
    store: Arc<dyn ObjectStore>,
    bucket: String,
    key: String,
    tx: mpsc::Sender<ContentResult>,
) {
    match store.get_object(&bucket, &key).await {
        Ok(content) => {
            debug!(key, bytes = content.len(), "content loaded");
            let _ = tx.send(ContentResult::Loaded { key, content }).await;
        }
        Err(err) => {
            warn!(%err, key, "content fetch failed");
            let message = err.to_string();
            let _ = tx.send(ContentResult::Failed { key, message }).await;
        }
    }
}
