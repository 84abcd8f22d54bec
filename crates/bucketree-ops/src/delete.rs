//! Object deletion.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};

use bucketree_store::ObjectStore;

use crate::OPERATION_CHANNEL_SIZE;

/// Result sent through the channel during a delete operation.
#[derive(Debug, Clone)]
pub enum DeleteResult {
    /// The object was removed.
    Deleted { key: String },
    /// The delete failed; the listing is not refreshed.
    Failed { key: String, message: String },
}

/// Start an async delete operation for a single key.
pub fn start_delete(
    store: Arc<dyn ObjectStore>,
    bucket: String,
    key: String,
) -> mpsc::Receiver<DeleteResult> {
    let (tx, rx) = mpsc::channel(OPERATION_CHANNEL_SIZE);

    tokio::spawn(async move {
        delete_impl(store, bucket, key, tx).await;
    });

    rx
}

async fn delete_impl(
    store: Arc<dyn ObjectStore>,
    bucket: String,
    key: String,
    tx: mpsc::Sender<DeleteResult>,
) {
    match store.delete_object(&bucket, &key).await {
        Ok(()) => {
            info!(key, "deleted object");
            let _ = tx.send(DeleteResult::Deleted { key }).await;
        }
        Err(err) => {
            warn!(%err, key, "delete failed");
            let message = err.to_string();
            let _ = tx.send(DeleteResult::Failed { key, message }).await;
        }
    }
}
