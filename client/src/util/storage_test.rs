use super::*;

#[test]
fn memory_storage_set_then_get() {
    let storage = MemoryStorage::new();
    storage.set_item("token", "abc").unwrap();
    assert_eq!(storage.get_item("token").as_deref(), Some("abc"));
    assert_eq!(storage.len(), 1);
}

#[test]
fn memory_storage_overwrites_existing_key() {
    let storage = MemoryStorage::new();
    storage.set_item("k", "1").unwrap();
    storage.set_item("k", "2").unwrap();
    assert_eq!(storage.get_item("k").as_deref(), Some("2"));
    assert_eq!(storage.len(), 1);
}

#[test]
fn memory_storage_remove_is_idempotent() {
    let storage = MemoryStorage::new();
    storage.set_item("k", "v").unwrap();
    storage.remove_item("k");
    storage.remove_item("k");
    assert!(storage.get_item("k").is_none());
    assert!(storage.is_empty());
}

#[test]
fn memory_storage_clones_share_entries() {
    let storage = MemoryStorage::new();
    let handle = storage.clone();
    storage.set_item("user", "{}").unwrap();
    assert_eq!(handle.get_item("user").as_deref(), Some("{}"));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_storage_is_empty_outside_browser() {
    let storage = BrowserStorage;
    assert_eq!(storage.set_item("token", "abc"), Err(StorageError::Unavailable));
    assert!(storage.get_item("token").is_none());
    storage.remove_item("token");
}
