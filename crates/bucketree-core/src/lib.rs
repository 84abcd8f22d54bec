//! Core types and traits for bucketree.
//!
//! This crate provides the fundamental data structures used throughout
//! the bucketree ecosystem: the derived directory tree, the key-to-tree
//! builder, the credential record, and the error taxonomy.

mod config;
mod error;
mod node;
mod tree;

pub use config::{BucketConfig, ConfigErrors};
pub use error::{BucketError, StoreOperation};
pub use node::{NodeId, NodeKind, ObjectNode};
pub use tree::{ObjectTree, ROOT, directory_prefixes};
