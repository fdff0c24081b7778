#![forbid(unsafe_code)]

//! Key-value persistence collaborator.
//!
//! The host may or may not offer a string key-value store. When it does not,
//! [`resolve_storage`] installs [`NullStorage`], which accepts writes and
//! forgets them, so callers never have to check.

use std::cell::RefCell;
use std::rc::Rc;

use ahash::AHashMap;

/// Opaque string key-value store supplied by the host.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: &str);
}

/// Stand-in used when the host provides no storage: writes are dropped and
/// every read misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStorage;

impl KeyValueStore for NullStorage {
    fn get_item(&self, _key: &str) -> Option<String> {
        None
    }

    fn set_item(&self, _key: &str, _value: &str) {}
}

/// In-process storage backed by a hash map.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<AHashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

/// Use the host's store if there is one, otherwise a [`NullStorage`].
#[must_use]
pub fn resolve_storage(host: Option<Rc<dyn KeyValueStore>>) -> Rc<dyn KeyValueStore> {
    match host {
        Some(store) => store,
        None => {
            tracing::debug!(message = "storage.fallback", backend = "null");
            Rc::new(NullStorage)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_storage_forgets() {
        let store = NullStorage;
        store.set_item("k", "v");
        assert_eq!(store.get_item("k"), None);
    }

    #[test]
    fn memory_storage_round_trips() {
        let store = MemoryStorage::new();
        assert!(store.is_empty());
        store.set_item("k", "v");
        store.set_item("k", "w");
        assert_eq!(store.get_item("k").as_deref(), Some("w"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn resolve_prefers_host_store() {
        let host = Rc::new(MemoryStorage::new());
        let resolved = resolve_storage(Some(host.clone() as Rc<dyn KeyValueStore>));
        resolved.set_item("open", "1");
        assert_eq!(host.get_item("open").as_deref(), Some("1"));
    }

    #[test]
    fn resolve_without_host_installs_shim() {
        let resolved = resolve_storage(None);
        resolved.set_item("open", "1");
        assert_eq!(resolved.get_item("open"), None);
    }
}
