//! Corpus store trait definition.

use crate::core::corpus::CorpusPool;
use crate::error::CacheError;

/// A place where corpora are kept under a name.
///
/// Implementations must hand back exactly the records that were saved
/// (order aside) and fail with [`CacheError::NotFound`] for unknown names.
pub trait CorpusStore: Send + Sync {
    /// Persist a corpus, replacing any cache with the same name
    fn save(&self, name: &str, pool: &CorpusPool) -> Result<(), CacheError>;

    /// Restore a corpus saved earlier
    fn load(&self, name: &str) -> Result<CorpusPool, CacheError>;

    /// Whether a cache with this name exists
    fn exists(&self, name: &str) -> Result<bool, CacheError>;

    /// Names of all saved caches, sorted
    fn list(&self) -> Result<Vec<String>, CacheError>;

    /// Delete a cache. Removing an unknown name fails with `NotFound`.
    fn remove(&self, name: &str) -> Result<(), CacheError>;
}
