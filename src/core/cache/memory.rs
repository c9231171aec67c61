//! In-memory corpus store for testing.

use super::{validate_name, CorpusStore};
use crate::core::corpus::CorpusPool;
use crate::error::CacheError;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

/// In-memory corpus store
///
/// Useful for tests and sessions that should leave nothing on disk.
#[derive(Default)]
pub struct InMemoryCorpusStore {
    entries: RwLock<BTreeMap<String, CorpusPool>>,
}

impl InMemoryCorpusStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn not_found(name: &str) -> CacheError {
        CacheError::NotFound {
            name: name.to_string(),
            path: PathBuf::from("memory"),
        }
    }

    fn poisoned() -> CacheError {
        CacheError::Corrupted {
            path: PathBuf::from("memory"),
            reason: "lock poisoned".to_string(),
        }
    }
}

impl CorpusStore for InMemoryCorpusStore {
    fn save(&self, name: &str, pool: &CorpusPool) -> Result<(), CacheError> {
        validate_name(name)?;
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        entries.insert(name.to_string(), pool.clone());
        Ok(())
    }

    fn load(&self, name: &str) -> Result<CorpusPool, CacheError> {
        validate_name(name)?;
        let entries = self.entries.read().map_err(|_| Self::poisoned())?;
        entries.get(name).cloned().ok_or_else(|| Self::not_found(name))
    }

    fn exists(&self, name: &str) -> Result<bool, CacheError> {
        validate_name(name)?;
        let entries = self.entries.read().map_err(|_| Self::poisoned())?;
        Ok(entries.contains_key(name))
    }

    fn list(&self) -> Result<Vec<String>, CacheError> {
        let entries = self.entries.read().map_err(|_| Self::poisoned())?;
        Ok(entries.keys().cloned().collect())
    }

    fn remove(&self, name: &str) -> Result<(), CacheError> {
        validate_name(name)?;
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        entries
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(name))
    }
}
