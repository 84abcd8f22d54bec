//! Integration tests driving the async operations against an in-memory store.

use std::sync::Arc;

use bucketree_ops::{
    start_create, start_delete, start_fetch_content, start_listing, ContentResult, CreateRequest,
    CreateResult, DeleteResult, ListingResult,
};
use bucketree_store::{MemoryStore, ObjectStore};

const BUCKET: &str = "test-bucket";

fn store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

#[test]
fn test_invalid_request_never_reaches_the_store() {
    let store = store();

    let err = CreateRequest::builder()
        .target_key("docs")
        .build()
        .unwrap_err();
    assert_eq!(err.to_string(), "Add new directory or new file name.");

    let err = CreateRequest::builder()
        .file_name("notes")
        .build()
        .unwrap_err();
    assert_eq!(err.to_string(), "File content is required.");

    assert_eq!(store.put_calls(), 0);
}

#[tokio::test]
async fn test_create_file_under_target() {
    let store = store();
    let request = CreateRequest::builder()
        .target_key("docs")
        .file_name("notes")
        .content("hello world")
        .build()
        .unwrap();

    let mut rx = start_create(store.clone() as Arc<dyn ObjectStore>, BUCKET.into(), request);

    match rx.recv().await {
        Some(CreateResult::Started { is_directory }) => assert!(!is_directory),
        other => panic!("expected Started, got {other:?}"),
    }
    match rx.recv().await {
        Some(CreateResult::Created { is_directory, key }) => {
            assert!(!is_directory);
            assert_eq!(key, "docs/notes.txt");
        }
        other => panic!("expected Created, got {other:?}"),
    }
    assert!(rx.recv().await.is_none());

    assert_eq!(store.put_calls(), 1);
    assert_eq!(
        store.get_object(BUCKET, "docs/notes.txt").await.unwrap(),
        "hello world"
    );
}

#[tokio::test]
async fn test_create_folder_writes_empty_placeholder() {
    let store = store();
    let request = CreateRequest::builder()
        .target_key("docs")
        .new_directory("drafts")
        .build()
        .unwrap();

    let mut rx = start_create(store.clone() as Arc<dyn ObjectStore>, BUCKET.into(), request);

    match rx.recv().await {
        Some(CreateResult::Started { is_directory }) => assert!(is_directory),
        other => panic!("expected Started, got {other:?}"),
    }
    match rx.recv().await {
        Some(CreateResult::Created { is_directory, key }) => {
            assert!(is_directory);
            assert_eq!(key, "docs/drafts");
        }
        other => panic!("expected Created, got {other:?}"),
    }

    assert_eq!(store.get_object(BUCKET, "docs/drafts").await.unwrap(), "");
}

#[tokio::test]
async fn test_whitespace_body_creates_folder_despite_file_name() {
    let store = store();
    let request = CreateRequest::builder()
        .new_directory("scratch")
        .file_name("ignored")
        .content("  \n ")
        .build()
        .unwrap();

    let mut rx = start_create(store.clone() as Arc<dyn ObjectStore>, BUCKET.into(), request);

    let _ = rx.recv().await;
    match rx.recv().await {
        Some(CreateResult::Created { is_directory, key }) => {
            assert!(is_directory);
            assert_eq!(key, "scratch");
        }
        other => panic!("expected Created, got {other:?}"),
    }
    assert!(store.contains("scratch"));
    assert!(!store.contains("scratch/ignored.txt"));
}

#[tokio::test]
async fn test_create_failure_reports_and_keeps_store_untouched() {
    let store = store();
    store.set_failing(true);

    let request = CreateRequest::builder()
        .file_name("doomed")
        .content("body")
        .build()
        .unwrap();

    let mut rx = start_create(store.clone() as Arc<dyn ObjectStore>, BUCKET.into(), request);

    let _ = rx.recv().await;
    match rx.recv().await {
        Some(CreateResult::Failed(message)) => {
            assert!(message.contains("put object failed"), "message: {message}");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(!store.contains("doomed.txt"));
}

#[tokio::test]
async fn test_delete_removes_the_key() {
    let store = store();
    store.insert("docs/gone.txt", "bye");

    let mut rx = start_delete(
        store.clone() as Arc<dyn ObjectStore>,
        BUCKET.into(),
        "docs/gone.txt".into(),
    );

    match rx.recv().await {
        Some(DeleteResult::Deleted { key }) => assert_eq!(key, "docs/gone.txt"),
        other => panic!("expected Deleted, got {other:?}"),
    }
    assert!(!store.contains("docs/gone.txt"));
    assert_eq!(store.delete_calls(), 1);
}

#[tokio::test]
async fn test_delete_failure_carries_the_key() {
    let store = store();
    store.insert("kept.txt", "still here");
    store.set_failing(true);

    let mut rx = start_delete(
        store.clone() as Arc<dyn ObjectStore>,
        BUCKET.into(),
        "kept.txt".into(),
    );

    match rx.recv().await {
        Some(DeleteResult::Failed { key, message }) => {
            assert_eq!(key, "kept.txt");
            assert!(message.contains("delete object failed"), "message: {message}");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(store.contains("kept.txt"));
}

#[tokio::test]
async fn test_listing_returns_every_key() {
    let store = store();
    store.insert("a.txt", "1");
    store.insert("docs/b.txt", "2");
    store.insert("docs/sub/c.txt", "3");

    let mut rx = start_listing(store.clone() as Arc<dyn ObjectStore>, BUCKET.into());

    match rx.recv().await {
        Some(ListingResult::Completed(keys)) => {
            assert_eq!(keys, vec!["a.txt", "docs/b.txt", "docs/sub/c.txt"]);
        }
        other => panic!("expected Completed, got {other:?}"),
    }
    assert_eq!(store.list_calls(), 1);
}

#[tokio::test]
async fn test_listing_failure_is_reported() {
    let store = store();
    store.set_failing(true);

    let mut rx = start_listing(store.clone() as Arc<dyn ObjectStore>, BUCKET.into());

    match rx.recv().await {
        Some(ListingResult::Failed(message)) => {
            assert!(message.contains("list objects failed"), "message: {message}");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_content_fetch_returns_the_body() {
    let store = store();
    store.insert("docs/readme.txt", "line one\nline two");

    let mut rx = start_fetch_content(
        store.clone() as Arc<dyn ObjectStore>,
        BUCKET.into(),
        "docs/readme.txt".into(),
    );

    match rx.recv().await {
        Some(ContentResult::Loaded { key, content }) => {
            assert_eq!(key, "docs/readme.txt");
            assert_eq!(content, "line one\nline two");
        }
        other => panic!("expected Loaded, got {other:?}"),
    }
    assert_eq!(store.get_calls(), 1);
}

#[tokio::test]
async fn test_content_fetch_of_missing_key_fails() {
    let store = store();

    let mut rx = start_fetch_content(
        store.clone() as Arc<dyn ObjectStore>,
        BUCKET.into(),
        "nowhere.txt".into(),
    );

    match rx.recv().await {
        Some(ContentResult::Failed { key, message }) => {
            assert_eq!(key, "nowhere.txt");
            assert!(message.contains("get object failed"), "message: {message}");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}
