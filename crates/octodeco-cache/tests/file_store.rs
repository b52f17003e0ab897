//! Durability tests for the file-backed store.

use octodeco_cache::{Cache, CacheError, FileStore, KvStore};
use tempfile::tempdir;

#[test]
fn test_values_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");

    {
        let store = FileStore::open(&path).unwrap();
        store.set("octodeco-cart", "[]").unwrap();
        store.set("octodeco-coupon", r#"{"code":"SAVE10"}"#).unwrap();
    }

    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.get("octodeco-cart").unwrap().as_deref(), Some("[]"));
    assert!(reopened.exists("octodeco-coupon").unwrap());
}

#[test]
fn test_missing_file_reads_empty() {
    let dir = tempdir().unwrap();
    let store = FileStore::open(dir.path().join("nested").join("s.json")).unwrap();
    assert_eq!(store.get("anything").unwrap(), None);
    assert!(!store.path().exists());
}

#[test]
fn test_delete_removes_key_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("s.json");
    let store = FileStore::open(&path).unwrap();
    store.set("a", "1").unwrap();
    store.set("b", "2").unwrap();
    store.delete("a").unwrap();

    let other = FileStore::open(&path).unwrap();
    assert_eq!(other.get("a").unwrap(), None);
    assert_eq!(other.get("b").unwrap().as_deref(), Some("2"));
}

#[test]
fn test_corrupt_file_is_store_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("s.json");
    std::fs::write(&path, "this is not json").unwrap();

    let store = FileStore::open(&path).unwrap();
    assert!(matches!(store.get("a"), Err(CacheError::StoreError(_))));
}

#[test]
fn test_open_directory_fails() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        FileStore::open(dir.path()),
        Err(CacheError::OpenError(_))
    ));
}

#[test]
fn test_typed_cache_over_file_store() {
    let dir = tempdir().unwrap();
    let cache = Cache::new(FileStore::open(dir.path().join("s.json")).unwrap());
    cache.set("quantities", &vec![1u32, 2, 3]).unwrap();

    let loaded: Vec<u32> = cache.get("quantities").unwrap().unwrap();
    assert_eq!(loaded, vec![1, 2, 3]);
}

#[test]
fn test_write_replaces_corrupt_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("s.json");
    std::fs::write(&path, "garbage").unwrap();

    let store = FileStore::open(&path).unwrap();
    store.set("octodeco-cart", "[]").unwrap();

    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.get("octodeco-cart").unwrap().as_deref(), Some("[]"));
}

#[test]
fn test_delete_repairs_corrupt_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("s.json");
    std::fs::write(&path, "{\"truncated\":").unwrap();

    let store = FileStore::open(&path).unwrap();
    store.delete("octodeco-coupon").unwrap();
    assert_eq!(store.get("octodeco-coupon").unwrap(), None);
}
