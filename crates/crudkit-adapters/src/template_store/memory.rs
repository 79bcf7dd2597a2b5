//! In-memory template store with built-in stubs.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use crudkit_core::{
    application::{ApplicationError, ports::TemplateStore},
    error::CrudkitResult,
};

use crate::builtin_templates;

/// Thread-safe in-memory stub store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<BTreeMap<String, String>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the built-in stubs loaded.
    pub fn with_builtin() -> CrudkitResult<Self> {
        let store = Self::new();
        store.load_builtin()?;
        Ok(store)
    }

    /// Load built-in stubs, replacing any stub of the same name.
    pub fn load_builtin(&self) -> CrudkitResult<()> {
        for (name, text) in builtin_templates::BUILTIN_STUBS {
            self.insert(name, text)?;
        }
        Ok(())
    }

    /// Insert or replace a stub.
    pub fn insert(&self, name: impl Into<String>, text: impl Into<String>) -> CrudkitResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(name.into(), text.into());
        Ok(())
    }

    /// Remove a stub, returning whether it was present.
    pub fn remove(&self, name: &str) -> CrudkitResult<bool> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.remove(name).is_some())
    }

    /// Get the number of stubs.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateStore for InMemoryStore {
    fn get_template(&self, name: &str) -> CrudkitResult<String> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.get(name).cloned().ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    fn list(&self) -> CrudkitResult<Vec<String>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crudkit_core::error::CrudkitError;

    #[test]
    fn builtin_store_serves_every_stub() {
        let store = InMemoryStore::with_builtin().unwrap();
        assert_eq!(store.len(), 6);
        assert!(store.get_template("model").unwrap().contains("{{modelName}}"));
    }

    #[test]
    fn list_is_sorted() {
        let store = InMemoryStore::with_builtin().unwrap();
        let names = store.list().unwrap();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn missing_stub_is_not_found() {
        let store = InMemoryStore::new();
        assert!(store.is_empty());
        let err = store.get_template("model").unwrap_err();
        assert!(matches!(
            err,
            CrudkitError::Application(ApplicationError::TemplateNotFound { ref name }) if name == "model"
        ));
    }

    #[test]
    fn insert_overrides_and_clones_share_state() {
        let store = InMemoryStore::with_builtin().unwrap();
        let handle = store.clone();
        handle.insert("model", "custom {{modelName}}").unwrap();

        assert_eq!(store.get_template("model").unwrap(), "custom {{modelName}}");
        assert!(store.remove("model").unwrap());
        assert!(!store.remove("model").unwrap());
    }
}
