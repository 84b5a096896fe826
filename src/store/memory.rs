//! In-memory store, the analogue of browser local storage.

use rustc_hash::FxHashMap;

use super::{Store, StoreError};

/// Key-value store held in memory.
///
/// Can be switched to read-only to exercise the host's handling of a full
/// or disabled storage backend.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject all writes and removals from now on (or stop rejecting).
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the store empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.read_only {
            Err(StoreError::Unavailable("store is read-only".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Store for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write_remove() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());

        store.write("k", "v").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v"));
        assert_eq!(store.len(), 1);

        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.read("k").unwrap(), None);
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let mut store = MemoryStore::new();
        store.write("k", "v").unwrap();
        store.set_read_only(true);

        assert!(matches!(store.write("k", "w"), Err(StoreError::Unavailable(_))));
        assert!(matches!(store.remove("k"), Err(StoreError::Unavailable(_))));
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v"));
    }
}
