//! In-memory object store.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use bucketree_core::{BucketError, StoreOperation};

use crate::contract::ObjectStore;

/// Object store holding everything in memory.
///
/// Backs orchestration tests: it counts how often each operation is called
/// and can be switched into a failing state to exercise transport-error
/// paths. Keys list in lexicographic order, matching S3.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<BTreeMap<String, String>>,
    failing: AtomicBool,
    list_calls: AtomicUsize,
    get_calls: AtomicUsize,
    put_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with empty objects for the given keys.
    pub fn with_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        {
            let mut objects = store.lock_objects();
            for key in keys {
                objects.insert(key.into(), String::new());
            }
        }
        store
    }

    /// Insert or replace an object directly, bypassing the call counters.
    pub fn insert(&self, key: impl Into<String>, content: impl Into<String>) {
        self.lock_objects().insert(key.into(), content.into());
    }

    /// Make every subsequent call fail with a transport error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Check whether an object exists.
    pub fn contains(&self, key: &str) -> bool {
        self.lock_objects().contains_key(key)
    }

    /// Snapshot of the stored keys in lexicographic order.
    pub fn keys(&self) -> Vec<String> {
        self.lock_objects().keys().cloned().collect()
    }

    /// How many list calls have been made.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// How many get calls have been made.
    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    /// How many put calls have been made.
    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    /// How many delete calls have been made.
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    fn lock_objects(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.objects
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn check_failing(&self, operation: StoreOperation) -> Result<(), BucketError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(BucketError::transport(operation, "injected failure"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list_objects(&self, _bucket: &str) -> Result<Vec<String>, BucketError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing(StoreOperation::List)?;
        Ok(self.keys())
    }

    async fn get_object(&self, _bucket: &str, key: &str) -> Result<String, BucketError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing(StoreOperation::Get)?;
        self.lock_objects()
            .get(key)
            .cloned()
            .ok_or_else(|| BucketError::transport(StoreOperation::Get, format!("no such key: {key}")))
    }

    async fn put_object(&self, _bucket: &str, key: &str, content: &str) -> Result<(), BucketError> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing(StoreOperation::Put)?;
        self.lock_objects().insert(key.to_string(), content.to_string());
        Ok(())
    }

    async fn delete_object(&self, _bucket: &str, key: &str) -> Result<(), BucketError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing(StoreOperation::Delete)?;
        // Deleting a missing key succeeds, matching S3 semantics.
        self.lock_objects().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_listing_returns_sorted_keys() {
        let store = MemoryStore::with_keys(["b/two.txt", "a/one.txt"]);
        let keys = store.list_objects("bucket").await.unwrap();
        assert_eq!(keys, vec!["a/one.txt", "b/two.txt"]);
        assert_eq!(store.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_object_is_an_error() {
        let store = MemoryStore::new();
        let err = store.get_object("bucket", "nope.txt").await.unwrap_err();
        assert!(!err.is_validation());
    }

    #[tokio::test]
    async fn test_put_then_get_round_trips() {
        let store = MemoryStore::new();
        store
            .put_object("bucket", "notes/a.txt", "hello")
            .await
            .unwrap();
        let body = store.get_object("bucket", "notes/a.txt").await.unwrap();
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn test_delete_removes_the_object() {
        let store = MemoryStore::with_keys(["a.txt"]);
        store.delete_object("bucket", "a.txt").await.unwrap();
        assert!(!store.contains("a.txt"));
        assert_eq!(store.delete_calls(), 1);
    }

    #[tokio::test]
    async fn test_delete_of_missing_key_succeeds() {
        let store = MemoryStore::new();
        assert!(store.delete_object("bucket", "ghost.txt").await.is_ok());
    }

    #[tokio::test]
    async fn test_failure_injection_hits_every_operation() {
        let store = MemoryStore::with_keys(["a.txt"]);
        store.set_failing(true);

        assert!(store.list_objects("bucket").await.is_err());
        assert!(store.get_object("bucket", "a.txt").await.is_err());
        assert!(store.put_object("bucket", "b.txt", "x").await.is_err());
        assert!(store.delete_object("bucket", "a.txt").await.is_err());

        // Failed calls still count; the content is untouched.
        assert_eq!(store.put_calls(), 1);
        assert!(store.contains("a.txt"));
        assert!(!store.contains("b.txt"));
    }
}
