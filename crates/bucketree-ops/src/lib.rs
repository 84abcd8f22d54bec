//! Async bucket operations for bucketree.
//!
//! Every operation follows the same shape: a `start_*` function spawns the
//! work on the Tokio runtime and hands back an [`mpsc::Receiver`] that the
//! caller polls for progress and the terminal result. Results are plain
//! enums so the UI can match on them without touching store types.
//!
//! [`mpsc::Receiver`]: tokio::sync::mpsc::Receiver

mod content;
mod create;
mod delete;
mod listing;

pub use content::{start_fetch_content, ContentResult};
pub use create::{start_create, CreateRequest, CreateRequestBuilder, CreateRequestBuilderError, CreateResult};
pub use delete::{start_delete, DeleteResult};
pub use listing::{start_listing, ListingResult};

/// Buffer size for operation result channels.
pub const OPERATION_CHANNEL_SIZE: usize = 16;
