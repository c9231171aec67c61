//! # Scanner Module
//!
//! Turns a list of photo folders into a corpus of dated images.
//!
//! ## Supported Formats
//! - JPEG (.jpg, .jpeg)
//! - PNG (.png)
//!
//! Extensions are matched case-insensitively. A file is only admitted to the
//! corpus when a capture time can be read from its EXIF block; everything
//! else is counted as skipped.
//!
//! ## Example
//! ```rust,ignore
//! use photo_date_game::core::scanner::{read_root_list, BuildConfig, CorpusBuilder};
//!
//! let roots = read_root_list("folders.txt".as_ref())?;
//! let result = CorpusBuilder::new(BuildConfig::default()).build(&roots);
//! println!("{} dated photos", result.pool.len());
//! ```

mod filter;
mod roots;
mod walker;

pub use filter::ImageFilter;
pub use roots::{parse_root_list, read_root_list};
pub use walker::{BuildConfig, CorpusBuilder};

use crate::core::corpus::CorpusPool;
use crate::error::ScanError;
use std::path::Path;

/// Result of building a corpus
#[derive(Debug, Default)]
pub struct BuildResult {
    /// Images with a usable capture time
    pub pool: CorpusPool,
    /// Problems with folders or directory entries (non-fatal)
    pub errors: Vec<ScanError>,
    /// Image files left out because no capture time could be read
    pub skipped: usize,
}

impl BuildResult {
    /// Roots that were skipped because they do not exist
    pub fn missing_roots(&self) -> impl Iterator<Item = &Path> {
        self.errors.iter().filter_map(|e| match e {
            ScanError::DirectoryNotFound { path } => Some(path.as_path()),
            _ => None,
        })
    }
}
