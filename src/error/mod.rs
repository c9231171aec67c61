//! # Error Module
//!
//! User-friendly error types for the photo date game.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, cache names, the text that was typed
//! - **Recovery hints** - suggest how to fix when possible

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum PhotoGameError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("Date error: {0}")]
    Date(#[from] DateFormatError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Setup error: {0}")]
    Setup(#[from] SetupError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Errors that occur while walking the photo folders
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read folder list {path}: {source}")]
    RootList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A timestamp that does not follow `YYYY:MM:DD HH:MM:SS`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid date '{input}': {reason}. Expected format 'YYYY:MM:DD HH:MM:SS'")]
pub struct DateFormatError {
    pub input: String,
    pub reason: String,
}

/// Why no capture time could be read from an image
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Failed to open image file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unreadable metadata in {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("No capture time recorded in {path}")]
    MissingTimestamp { path: PathBuf },

    #[error("Capture time in {path} is malformed: {source}")]
    InvalidTimestamp {
        path: PathBuf,
        #[source]
        source: DateFormatError,
    },
}

/// Errors that occur with the corpus cache
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("No cache named '{name}' at {path}. Run without a cache to rebuild it.")]
    NotFound { name: String, path: PathBuf },

    #[error("Cache '{name}' uses format version {found}, expected {expected}. Rebuild the cache.")]
    VersionMismatch {
        name: String,
        found: u32,
        expected: u32,
    },

    #[error("Invalid cache name '{name}': use a plain name without path separators")]
    InvalidName { name: String },

    #[error("Cache corruption detected at {path}: {reason}. Delete this file and try again.")]
    Corrupted { path: PathBuf, reason: String },

    #[error("Failed to access cache file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize corpus: {0}")]
    SerializationFailed(String),
}

/// Errors that prevent a game from being created
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("No images with a capture date were found. Check your folders or cache.")]
    EmptyPool,

    #[error("Invalid number of players '{raw}': need at least one player")]
    InvalidPlayerCount { raw: String },
}

/// Errors raised while a game session is running
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("The game has already ended")]
    Ended,

    #[error("Failed to read player input: {0}")]
    Input(#[from] std::io::Error),

    #[error(transparent)]
    Setup(#[from] SetupError),
}

/// Answer to a yes/no prompt that is neither yes nor no
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    #[error("Unrecognized answer '{raw}': please answer y or n")]
    Unrecognized { raw: String },
}

/// Errors from launching the external image viewer
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Failed to launch viewer '{program}' for {path}: {source}")]
    Launch {
        program: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, PhotoGameError>;
