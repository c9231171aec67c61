//! JSON file backend for persistent storage.

use super::{decode, encode, validate_name, CorpusStore};
use crate::core::corpus::CorpusPool;
use crate::error::CacheError;
use crate::events::{null_sender, CacheEvent, Event, EventSender};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, warn};

const EXTENSION: &str = "json";

/// Stores each corpus as `<root>/<name>.json`
pub struct FileCorpusStore {
    root: PathBuf,
    events: EventSender,
}

impl FileCorpusStore {
    /// Use `root` as the storage directory. It is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            events: null_sender(),
        }
    }

    /// Report saves and loads through `events`
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = events;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing the cache called `name`
    pub fn path_for(&self, name: &str) -> Result<PathBuf, CacheError> {
        validate_name(name)?;
        Ok(self.root.join(format!("{}.{}", name, EXTENSION)))
    }

    fn io_error(path: &Path, source: std::io::Error) -> CacheError {
        CacheError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl CorpusStore for FileCorpusStore {
    fn save(&self, name: &str, pool: &CorpusPool) -> Result<(), CacheError> {
        let path = self.path_for(name)?;

        // Any real failure surfaces from the write below
        if let Err(e) = fs::create_dir_all(&self.root) {
            warn!(dir = %self.root.display(), error = %e, "could not create cache directory");
        }

        let bytes = encode(pool)?;

        // Stage beside the target, then rename over it
        let mut staged = NamedTempFile::new_in(&self.root).map_err(|e| Self::io_error(&self.root, e))?;
        staged
            .write_all(&bytes)
            .map_err(|e| Self::io_error(staged.path(), e))?;
        staged
            .persist(&path)
            .map_err(|e| Self::io_error(&path, e.error))?;

        info!(name, records = pool.len(), path = %path.display(), "corpus cache saved");
        self.events.send(Event::Cache(CacheEvent::Saved {
            name: name.to_string(),
            records: pool.len(),
        }));

        Ok(())
    }

    fn load(&self, name: &str) -> Result<CorpusPool, CacheError> {
        let path = self.path_for(name)?;

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CacheError::NotFound {
                    name: name.to_string(),
                    path,
                })
            }
            Err(e) => return Err(Self::io_error(&path, e)),
        };

        let decoded = decode(name, &path, &bytes)?;

        for dropped in &decoded.dropped {
            warn!(name, path = %dropped.display(), "dropping cached image with malformed date");
            self.events.send(Event::Cache(CacheEvent::RecordDropped {
                name: name.to_string(),
                path: dropped.clone(),
            }));
        }

        info!(name, records = decoded.pool.len(), "corpus cache loaded");
        self.events.send(Event::Cache(CacheEvent::Loaded {
            name: name.to_string(),
            records: decoded.pool.len(),
        }));

        Ok(decoded.pool)
    }

    fn exists(&self, name: &str) -> Result<bool, CacheError> {
        Ok(self.path_for(name)?.is_file())
    }

    fn list(&self) -> Result<Vec<String>, CacheError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Self::io_error(&self.root, e)),
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == EXTENSION))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
            .collect();
        names.sort();

        Ok(names)
    }

    fn remove(&self, name: &str) -> Result<(), CacheError> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(CacheError::NotFound {
                name: name.to_string(),
                path,
            }),
            Err(e) => Err(Self::io_error(&path, e)),
        }
    }
}
