//=========================================================================
// File Store
//=========================================================================
//
// Global, shared pool of loaded files.
//
// Loaders write into it (possibly from another thread); the state
// manager only enumerates it. Keys keep insertion order so library
// rebuilds are deterministic.
//
//=========================================================================

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::File;

//=== FileStore ===========================================================

#[derive(Default)]
struct StoreInner {
    order: Vec<String>,
    files: HashMap<String, File>,
}

/// Cheaply cloneable handle to the shared file pool.
#[derive(Clone, Default)]
pub struct FileStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl FileStore {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Mutation (loader side) -------------------------------------------

    /// Inserts a file, replacing any file with the same key in place.
    pub fn add_file(&self, file: File) {
        let mut inner = self.write();
        let key = file.key().to_owned();
        if inner.files.insert(key.clone(), file).is_none() {
            inner.order.push(key);
        }
    }

    /// Removes a file; returns it if it was present.
    pub fn remove_file(&self, key: &str) -> Option<File> {
        let mut inner = self.write();
        let removed = inner.files.remove(key);
        if removed.is_some() {
            inner.order.retain(|k| k != key);
        }
        removed
    }

    //--- Queries ----------------------------------------------------------

    /// Snapshot of all keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.read().order.clone()
    }

    pub fn get_file(&self, key: &str) -> Option<File> {
        self.read().files.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.read().files.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    //--- Internal Helpers -------------------------------------------------

    // A panicking writer cannot leave the map half-updated, so poisoned
    // locks are recovered rather than propagated.
    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::FileKind;

    #[test]
    fn keys_keep_insertion_order() {
        let store = FileStore::new();
        store.add_file(File::new("b", FileKind::Data, vec![]));
        store.add_file(File::new("a", FileKind::Texture, vec![]));
        store.add_file(File::new("c", FileKind::Audio, vec![]));

        assert_eq!(store.keys(), vec!["b", "a", "c"]);
    }

    #[test]
    fn replacing_a_key_keeps_its_slot() {
        let store = FileStore::new();
        store.add_file(File::new("a", FileKind::Data, vec![1u8]));
        store.add_file(File::new("b", FileKind::Data, vec![]));
        store.add_file(File::new("a", FileKind::Data, vec![1u8, 2]));

        assert_eq!(store.keys(), vec!["a", "b"]);
        assert_eq!(store.get_file("a").map(|f| f.size()), Some(2));
    }

    #[test]
    fn clones_share_contents() {
        let store = FileStore::new();
        let loader_side = store.clone();
        loader_side.add_file(File::new("hero", FileKind::Texture, vec![]));

        assert!(store.contains("hero"));
        assert_eq!(store.len(), 1);

        assert!(store.remove_file("hero").is_some());
        assert!(loader_side.is_empty());
        assert!(store.remove_file("hero").is_none());
    }
}
