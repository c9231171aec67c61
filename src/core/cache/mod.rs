//! # Cache Module
//!
//! Saves a built corpus under a name so later sessions can skip the folder
//! walk and EXIF reads.
//!
//! ## Format
//! Each cache is a JSON document with an explicit format tag and version:
//!
//! ```json
//! {
//!   "format": "photo-date-game/corpus",
//!   "version": 1,
//!   "saved_at": "2024-05-01T10:00:00Z",
//!   "records": [{ "path": "/photos/a.jpg", "captured_at": "2019:07:04 18:30:00" }]
//! }
//! ```
//!
//! Loading only ever parses data. A document from another version is
//! refused with [`CacheError::VersionMismatch`] instead of being misread.
//!
//! ## Backends
//! - `FileCorpusStore` - one JSON file per cache name
//! - `InMemoryCorpusStore` - for testing

mod file;
mod memory;
mod traits;

pub use file::FileCorpusStore;
pub use memory::InMemoryCorpusStore;
pub use traits::CorpusStore;

use crate::core::corpus::{CorpusPool, ImageRecord};
use crate::core::timestamp::Timestamp;
use crate::error::CacheError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Tag identifying a corpus cache document
pub const CACHE_FORMAT: &str = "photo-date-game/corpus";

/// Schema version written by this build
pub const CACHE_VERSION: u32 = 1;

/// Fields every version of the document carries
#[derive(Debug, Deserialize)]
struct CacheHeader {
    format: String,
    version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheDocument {
    format: String,
    version: u32,
    saved_at: DateTime<Utc>,
    records: Vec<CachedRecord>,
}

/// Timestamps stay strings here so one bad record cannot sink the load
#[derive(Debug, Serialize, Deserialize)]
struct CachedRecord {
    path: PathBuf,
    captured_at: String,
}

/// A decoded cache and the records that had to be dropped
#[derive(Debug)]
pub(crate) struct DecodedCorpus {
    pub pool: CorpusPool,
    pub dropped: Vec<PathBuf>,
}

pub(crate) fn encode(pool: &CorpusPool) -> Result<Vec<u8>, CacheError> {
    let document = CacheDocument {
        format: CACHE_FORMAT.to_string(),
        version: CACHE_VERSION,
        saved_at: Utc::now(),
        records: pool
            .iter()
            .map(|record| CachedRecord {
                path: record.path().to_path_buf(),
                captured_at: record.captured_at().to_string(),
            })
            .collect(),
    };

    serde_json::to_vec_pretty(&document).map_err(|e| CacheError::SerializationFailed(e.to_string()))
}

pub(crate) fn decode(name: &str, path: &Path, bytes: &[u8]) -> Result<DecodedCorpus, CacheError> {
    let corrupted = |reason: String| CacheError::Corrupted {
        path: path.to_path_buf(),
        reason,
    };

    let header: CacheHeader = serde_json::from_slice(bytes).map_err(|e| corrupted(e.to_string()))?;
    if header.format != CACHE_FORMAT {
        return Err(corrupted(format!("unexpected format '{}'", header.format)));
    }
    if header.version != CACHE_VERSION {
        return Err(CacheError::VersionMismatch {
            name: name.to_string(),
            found: header.version,
            expected: CACHE_VERSION,
        });
    }

    let document: CacheDocument = serde_json::from_slice(bytes).map_err(|e| corrupted(e.to_string()))?;

    let mut pool = CorpusPool::new();
    let mut dropped = Vec::new();
    for record in document.records {
        match Timestamp::parse(&record.captured_at) {
            Ok(captured_at) => pool.push(ImageRecord::new(record.path, captured_at)),
            Err(_) => dropped.push(record.path),
        }
    }

    Ok(DecodedCorpus { pool, dropped })
}

/// Reject names that could escape the storage directory
pub fn validate_name(name: &str) -> Result<(), CacheError> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);

    if invalid {
        Err(CacheError::InvalidName {
            name: name.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Where caches live unless the user picks another directory
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("photo-date-game").join("corpora"))
        .unwrap_or_else(|| PathBuf::from("cache"))
}
