//! Storage collaborator contract.

use async_trait::async_trait;

use bucketree_core::BucketError;

/// Abstract object-storage capability set.
///
/// Any S3-shaped API satisfies this contract. Implementations are shared
/// across spawned operation tasks, so methods take `&self` and the trait
/// requires thread safety.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List every object key in the bucket.
    async fn list_objects(&self, bucket: &str) -> Result<Vec<String>, BucketError>;

    /// Fetch one object body as text. A missing object is an error, not an
    /// empty result.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<String, BucketError>;

    /// Write one object. An empty body creates a directory placeholder.
    async fn put_object(&self, bucket: &str, key: &str, content: &str) -> Result<(), BucketError>;

    /// Remove one object by exact key.
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), BucketError>;
}
