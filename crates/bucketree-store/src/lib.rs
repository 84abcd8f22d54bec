//! Object storage clients for bucketree.
//!
//! The [`ObjectStore`] trait is the capability set the rest of the
//! application programs against. [`S3Store`] talks to real buckets;
//! [`MemoryStore`] backs tests and offline use.

mod contract;
mod memory;
mod s3;

pub use contract::ObjectStore;
pub use memory::MemoryStore;
pub use s3::S3Store;
