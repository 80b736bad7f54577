//! An in-memory registry.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use crate::class_id::ClassId;
use crate::error::{Error, Result};

use super::{key_path, normalize_key, RegistryFile, RegistryWriter, TypeRegistry};

/// A registry held in memory behind a read/write lock.
///
/// Useful for tests and for hosts that assemble their type table at startup.
///
/// # Examples
///
/// ```
/// use fsns::registry::{MemoryRegistry, TypeRegistry};
///
/// let registry = MemoryRegistry::new()
///     .with_value(".txt", "txtfile")
///     .with_value("txtfile\\AlwaysShowExt", "");
/// assert_eq!(registry.lookup(".TXT", None).unwrap().as_deref(), Some("txtfile"));
/// assert!(registry.lookup("TxtFile", Some("alwaysshowext")).unwrap().is_some());
/// ```
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    values: RwLock<HashMap<String, String>>,
    blocked: RwLock<HashSet<ClassId>>,
}

fn fold(path: &str) -> String {
    path.to_lowercase()
}

fn poisoned() -> Error {
    Error::RegistryUnavailable {
        reason: "registry lock poisoned".into(),
    }
}

impl MemoryRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with_value(self, key: &str, value: &str) -> Self {
        if let Ok(mut values) = self.values.write() {
            values.insert(fold(&normalize_key(key)), value.to_string());
        }
        self
    }

    /// Builder-style block.
    #[must_use]
    pub fn with_blocked(self, class: ClassId) -> Self {
        if let Ok(mut blocked) = self.blocked.write() {
            blocked.insert(class);
        }
        self
    }

    /// Build a registry from an import file.
    ///
    /// # Errors
    ///
    /// Returns an error if a class id in the file is malformed.
    pub fn from_file(file: &RegistryFile) -> Result<Self> {
        let registry = Self::new();
        file.apply_to(&registry)?;
        Ok(registry)
    }

    /// Remove a key. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        Ok(values.remove(&fold(&normalize_key(key))).is_some())
    }
}

impl TypeRegistry for MemoryRegistry {
    fn lookup(&self, key: &str, subkey: Option<&str>) -> Result<Option<String>> {
        let values = self.values.read().map_err(|_| poisoned())?;
        Ok(values.get(&fold(&key_path(key, subkey))).cloned())
    }

    fn is_blocked(&self, class: &ClassId) -> Result<bool> {
        let blocked = self.blocked.read().map_err(|_| poisoned())?;
        Ok(blocked.contains(class))
    }
}

impl RegistryWriter for MemoryRegistry {
    fn set_value(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        values.insert(fold(&normalize_key(key)), value.to_string());
        Ok(())
    }

    fn block(&self, class: &ClassId) -> Result<()> {
        let mut blocked = self.blocked.write().map_err(|_| poisoned())?;
        blocked.insert(*class);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let registry = MemoryRegistry::new();
        assert_eq!(registry.lookup(".xyz", None).unwrap(), None);
        assert_eq!(registry.lookup(".xyz", Some("CLSID")).unwrap(), None);
    }

    #[test]
    fn test_set_and_remove() {
        let registry = MemoryRegistry::new();
        registry.set_value("/.Md/", "markdown").unwrap();
        assert_eq!(registry.lookup(".md", None).unwrap().as_deref(), Some("markdown"));
        assert!(registry.remove(".MD").unwrap());
        assert!(!registry.remove(".md").unwrap());
    }

    #[test]
    fn test_blocked() {
        let class = ClassId::parse("{0000AAAA-0000-0000-0000-000000000000}").unwrap();
        let registry = MemoryRegistry::new().with_blocked(class);
        assert!(registry.is_blocked(&class).unwrap());
    }

    #[test]
    fn test_shared_across_threads() {
        let registry = std::sync::Arc::new(MemoryRegistry::new().with_value(".rs", "rustfile"));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = std::sync::Arc::clone(&registry);
                std::thread::spawn(move || registry.lookup(".rs", None).unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().as_deref(), Some("rustfile"));
        }
    }
}
