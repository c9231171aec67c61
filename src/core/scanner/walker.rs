//! Directory walking implementation using walkdir.

use super::filter::{is_hidden, ImageFilter};
use super::BuildResult;
use crate::core::corpus::ImageRecord;
use crate::core::metadata::read_capture_time;
use crate::error::ScanError;
use crate::events::{null_sender, Event, EventSender, ScanEvent, ScanProgress};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Configuration for the corpus builder
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to include hidden files and directories
    pub include_hidden: bool,
    /// Maximum directory depth (None = unlimited)
    pub max_depth: Option<usize>,
    /// Custom extensions to include (None = png, jpg, jpeg)
    pub extensions: Option<Vec<String>>,
    /// Files visited per root between progress events (0 = never)
    pub progress_interval: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            include_hidden: true,
            max_depth: None,
            extensions: None,
            progress_interval: 500,
        }
    }
}

/// Walks photo folders and collects images with a capture time
pub struct CorpusBuilder {
    config: BuildConfig,
    filter: ImageFilter,
}

impl CorpusBuilder {
    /// Create a new builder with the given configuration
    pub fn new(config: BuildConfig) -> Self {
        let mut filter = ImageFilter::new().with_hidden(config.include_hidden);

        if let Some(ref extensions) = config.extensions {
            filter = filter.with_extensions(extensions.clone());
        }

        Self { config, filter }
    }

    /// Build a corpus from every root, skipping roots that do not exist
    pub fn build(&self, roots: &[PathBuf]) -> BuildResult {
        self.build_with_events(roots, &null_sender())
    }

    /// Build with progress reporting via events
    pub fn build_with_events(&self, roots: &[PathBuf], events: &EventSender) -> BuildResult {
        events.send(Event::Scan(ScanEvent::Started {
            roots: roots.to_vec(),
        }));

        let mut result = BuildResult::default();

        for root in roots {
            if !root.is_dir() {
                warn!(root = %root.display(), "photo folder not found, skipping");
                events.send(Event::Scan(ScanEvent::RootMissing { root: root.clone() }));
                result
                    .errors
                    .push(ScanError::DirectoryNotFound { path: root.clone() });
                continue;
            }

            self.build_root(root, events, &mut result);
        }

        info!(
            images = result.pool.len(),
            skipped = result.skipped,
            "corpus built"
        );

        events.send(Event::Scan(ScanEvent::Completed {
            total_images: result.pool.len(),
            skipped_images: result.skipped,
        }));

        result
    }

    /// Walk a single existing root
    fn build_root(&self, root: &Path, events: &EventSender, result: &mut BuildResult) {
        let mut files_scanned = 0;
        let mut images_found = 0;

        let mut walker = WalkDir::new(root).follow_links(self.config.follow_symlinks);

        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        let include_hidden = self.filter.includes_hidden();
        let entries = walker
            .into_iter()
            .filter_entry(|entry| include_hidden || entry.depth() == 0 || !is_hidden_entry(entry));

        for entry_result in entries {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    let error = walk_error(path.clone(), e);
                    events.send(Event::Scan(ScanEvent::Error {
                        path,
                        message: error.to_string(),
                    }));
                    result.errors.push(error);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            files_scanned += 1;
            let interval = self.config.progress_interval;
            if interval > 0 && files_scanned % interval == 0 {
                events.send(Event::Scan(ScanEvent::Progress(ScanProgress {
                    root: root.to_path_buf(),
                    files_scanned,
                    images_found,
                })));
            }

            if !self.filter.should_include(entry.path()) {
                continue;
            }

            match read_capture_time(entry.path()) {
                Ok(captured_at) => {
                    result.pool.push(ImageRecord::new(entry.into_path(), captured_at));
                    images_found += 1;
                }
                Err(e) => {
                    debug!(error = %e, "leaving image out of the corpus");
                    result.skipped += 1;
                }
            }
        }
    }
}

impl Default for CorpusBuilder {
    fn default() -> Self {
        Self::new(BuildConfig::default())
    }
}

fn is_hidden_entry(entry: &DirEntry) -> bool {
    is_hidden(entry.path())
}

fn walk_error(path: PathBuf, e: walkdir::Error) -> ScanError {
    if e.io_error().map(|io| io.kind()) == Some(std::io::ErrorKind::PermissionDenied) {
        ScanError::PermissionDenied { path }
    } else {
        ScanError::ReadDirectory {
            path,
            source: e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::fixtures::{jpeg_with_exif, png_with_exif, write_file};
    use crate::events::EventChannel;
    use tempfile::TempDir;

    fn dated(dir: &TempDir, name: &str, at: &str) -> PathBuf {
        write_file(dir, name, &jpeg_with_exif(Some(at), None))
    }

    #[test]
    fn build_empty_directory_returns_empty_pool() {
        let temp_dir = TempDir::new().unwrap();
        let result = CorpusBuilder::default().build(&[temp_dir.path().to_path_buf()]);

        assert!(result.pool.is_empty());
        assert!(result.errors.is_empty());
        assert_eq!(result.skipped, 0);
    }

    #[test]
    fn build_collects_dated_photo() {
        let temp_dir = TempDir::new().unwrap();
        dated(&temp_dir, "photo.jpg", "2018:08:08 08:08:08");

        let result = CorpusBuilder::default().build(&[temp_dir.path().to_path_buf()]);

        assert_eq!(result.pool.len(), 1);
        let record = &result.pool.records()[0];
        assert!(record.path().ends_with("photo.jpg"));
        assert_eq!(record.captured_at().to_string(), "2018:08:08 08:08:08");
    }

    #[test]
    fn build_skips_images_without_capture_time() {
        let temp_dir = TempDir::new().unwrap();
        dated(&temp_dir, "good.jpg", "2018:08:08 08:08:08");
        write_file(&temp_dir, "no_dates.jpg", &jpeg_with_exif(None, None));
        write_file(&temp_dir, "corrupt.png", b"not a png");

        let result = CorpusBuilder::default().build(&[temp_dir.path().to_path_buf()]);

        assert_eq!(result.pool.len(), 1);
        assert_eq!(result.skipped, 2);
        assert!(result
            .pool
            .iter()
            .all(|r| r.path().ends_with("good.jpg")));
    }

    #[test]
    fn build_admits_png_with_exif() {
        let temp_dir = TempDir::new().unwrap();
        write_file(
            &temp_dir,
            "scans/SCAN.PNG",
            &png_with_exif(None, Some("1998:05:17 14:00:00")),
        );

        let result = CorpusBuilder::default().build(&[temp_dir.path().to_path_buf()]);

        assert_eq!(result.pool.len(), 1);
        assert_eq!(result.skipped, 0);
        let record = &result.pool.records()[0];
        assert!(record.path().ends_with("SCAN.PNG"));
        assert_eq!(record.captured_at().to_string(), "1998:05:17 14:00:00");
    }

    #[test]
    fn build_ignores_non_image_files() {
        let temp_dir = TempDir::new().unwrap();
        dated(&temp_dir, "photo.JPG", "2018:08:08 08:08:08");
        write_file(&temp_dir, "notes.txt", b"2018:08:08 08:08:08");
        // Same bytes, wrong extension
        write_file(&temp_dir, "photo.heic", &jpeg_with_exif(Some("2018:08:08 08:08:08"), None));

        let result = CorpusBuilder::default().build(&[temp_dir.path().to_path_buf()]);

        assert_eq!(result.pool.len(), 1);
        assert_eq!(result.skipped, 0);
    }

    #[test]
    fn build_traverses_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        dated(&temp_dir, "root.jpg", "2001:01:01 00:00:00");
        dated(&temp_dir, "2002/summer/beach.jpeg", "2002:07:01 00:00:00");

        let result = CorpusBuilder::default().build(&[temp_dir.path().to_path_buf()]);

        assert_eq!(result.pool.len(), 2);
    }

    #[test]
    fn build_can_skip_hidden_entries() {
        let temp_dir = TempDir::new().unwrap();
        dated(&temp_dir, "visible.jpg", "2001:01:01 00:00:00");
        dated(&temp_dir, ".hidden.jpg", "2001:01:01 00:00:00");
        dated(&temp_dir, ".thumbnails/thumb.jpg", "2001:01:01 00:00:00");

        let all = CorpusBuilder::default().build(&[temp_dir.path().to_path_buf()]);
        assert_eq!(all.pool.len(), 3);

        let config = BuildConfig {
            include_hidden: false,
            ..Default::default()
        };
        let visible = CorpusBuilder::new(config).build(&[temp_dir.path().to_path_buf()]);
        assert_eq!(visible.pool.len(), 1);
    }

    #[test]
    fn missing_root_is_skipped_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        dated(&temp_dir, "photo.jpg", "2001:01:01 00:00:00");
        let missing = PathBuf::from("/nonexistent/path/12345");

        let result = CorpusBuilder::default().build(&[missing.clone(), temp_dir.path().to_path_buf()]);

        assert_eq!(result.pool.len(), 1);
        assert_eq!(result.missing_roots().collect::<Vec<_>>(), vec![missing.as_path()]);
    }

    #[test]
    fn progress_is_reported_per_root() {
        let temp_dir = TempDir::new().unwrap();
        for i in 0..5 {
            write_file(&temp_dir, &format!("file{}.txt", i), b"x");
        }

        let config = BuildConfig {
            progress_interval: 2,
            ..Default::default()
        };
        let (sender, receiver) = EventChannel::new();
        CorpusBuilder::new(config).build_with_events(&[temp_dir.path().to_path_buf()], &sender);
        drop(sender);

        let progress: Vec<usize> = receiver
            .iter()
            .filter_map(|event| match event {
                Event::Scan(ScanEvent::Progress(p)) => Some(p.files_scanned),
                _ => None,
            })
            .collect();
        assert_eq!(progress, vec![2, 4]);
    }

    #[test]
    fn missing_root_emits_event() {
        let (sender, receiver) = EventChannel::new();
        CorpusBuilder::default().build_with_events(&[PathBuf::from("/nonexistent/xyz")], &sender);
        drop(sender);

        let events: Vec<Event> = receiver.iter().collect();
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::Scan(ScanEvent::RootMissing { .. }))));
        assert!(matches!(
            events.last(),
            Some(Event::Scan(ScanEvent::Completed { total_images: 0, .. }))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn walk_errors_name_the_offending_path() {
        let temp_dir = TempDir::new().unwrap();
        dated(&temp_dir, "album/photo.jpg", "2001:01:01 00:00:00");
        std::os::unix::fs::symlink(temp_dir.path(), temp_dir.path().join("album/loop")).unwrap();

        let config = BuildConfig {
            follow_symlinks: true,
            ..Default::default()
        };
        let (sender, receiver) = EventChannel::new();
        let result =
            CorpusBuilder::new(config).build_with_events(&[temp_dir.path().to_path_buf()], &sender);
        drop(sender);

        let error_paths: Vec<PathBuf> = receiver
            .iter()
            .filter_map(|event| match event {
                Event::Scan(ScanEvent::Error { path, .. }) => Some(path),
                _ => None,
            })
            .collect();
        assert!(!error_paths.is_empty());
        assert!(error_paths
            .iter()
            .all(|path| !path.as_os_str().is_empty() && path.starts_with(temp_dir.path())));
        assert_eq!(result.errors.len(), error_paths.len());
        assert_eq!(result.pool.len(), 1);
    }

    #[test]
    fn file_given_as_root_is_treated_as_missing() {
        let temp_dir = TempDir::new().unwrap();
        let file = dated(&temp_dir, "photo.jpg", "2001:01:01 00:00:00");

        let result = CorpusBuilder::default().build(&[file]);

        assert!(result.pool.is_empty());
        assert_eq!(result.missing_roots().count(), 1);
    }
}
