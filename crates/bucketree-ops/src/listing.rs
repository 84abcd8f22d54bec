//! Bucket listing.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use bucketree_store::ObjectStore;

use crate::OPERATION_CHANNEL_SIZE;

/// Result sent through the channel when a listing finishes.
#[derive(Debug, Clone)]
pub enum ListingResult {
    /// Full set of object keys in the bucket.
    Completed(Vec<String>),
    /// The listing failed; the previous tree stays on screen.
    Failed(String),
}

/// Start an async listing of every key in the bucket.
pub fn start_listing(store: Arc<dyn ObjectStore>, bucket: String) -> mpsc::Receiver<ListingResult> {
    let (tx, rx) = mpsc::channel(OPERATION_CHANNEL_SIZE);

    tokio::spawn(async move {
        listing_impl(store, bucket, tx).await;
    });

    rx
}

async fn listing_impl(store: Arc<dyn ObjectStore>, bucket: String, tx: mpsc::Sender<ListingResult>) {
    match store.list_objects(&bucket).await {
        Ok(keys) => {
            debug!(count = keys.len(), "listing completed");
            let _ = tx.send(ListingResult::Completed(keys)).await;
        }
        Err(err) => {
            warn!(%err, "listing failed");
            let _ = tx.send(ListingResult::Failed(err.to_string())).await;
        }
    }
}
