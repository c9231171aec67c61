//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted while preparing a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Corpus building events
    Scan(ScanEvent),
    /// Corpus cache events
    Cache(CacheEvent),
}

/// Events while building the image corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Building has started
    Started { roots: Vec<PathBuf> },
    /// A configured root folder does not exist and was skipped
    RootMissing { root: PathBuf },
    /// Periodic progress within a single root
    Progress(ScanProgress),
    /// A file could not be walked, building continues
    Error { path: PathBuf, message: String },
    /// Building completed
    Completed {
        total_images: usize,
        skipped_images: usize,
    },
}

/// Progress information within one root folder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanProgress {
    /// Root folder being walked
    pub root: PathBuf,
    /// Files visited so far in this root (images or not)
    pub files_scanned: usize,
    /// Dated images admitted so far in this root
    pub images_found: usize,
}

/// Events from the corpus cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CacheEvent {
    /// A corpus was written
    Saved { name: String, records: usize },
    /// A corpus was restored
    Loaded { name: String, records: usize },
    /// A stored record was dropped because its date was malformed
    RecordDropped { name: String, path: PathBuf },
}
