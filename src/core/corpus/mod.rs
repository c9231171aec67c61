//! # Corpus Module
//!
//! The pool of dated images a game draws from.

use crate::core::timestamp::Timestamp;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// A photo whose capture time is known
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRecord {
    path: PathBuf,
    captured_at: Timestamp,
}

impl ImageRecord {
    pub fn new(path: impl Into<PathBuf>, captured_at: Timestamp) -> Self {
        Self {
            path: path.into(),
            captured_at,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn captured_at(&self) -> Timestamp {
        self.captured_at
    }
}

/// All images eligible for a game.
///
/// Order carries no meaning; sampling is uniform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusPool {
    records: Vec<ImageRecord>,
}

impl CorpusPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: ImageRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageRecord> {
        self.records.iter()
    }

    /// Pick one record uniformly at random.
    ///
    /// The pool is not modified, so repeated calls may return the same image.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&ImageRecord> {
        self.records.choose(rng)
    }

    /// Whether both pools hold the same records, ignoring order
    pub fn same_records(&self, other: &CorpusPool) -> bool {
        let ours: HashSet<&ImageRecord> = self.records.iter().collect();
        let theirs: HashSet<&ImageRecord> = other.records.iter().collect();
        ours == theirs
    }
}

impl From<Vec<ImageRecord>> for CorpusPool {
    fn from(records: Vec<ImageRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<ImageRecord> for CorpusPool {
    fn from_iter<I: IntoIterator<Item = ImageRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl Extend<ImageRecord> for CorpusPool {
    fn extend<I: IntoIterator<Item = ImageRecord>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl IntoIterator for CorpusPool {
    type Item = ImageRecord;
    type IntoIter = std::vec::IntoIter<ImageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a CorpusPool {
    type Item = &'a ImageRecord;
    type IntoIter = std::slice::Iter<'a, ImageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
