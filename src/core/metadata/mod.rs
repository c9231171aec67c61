//! # Metadata Module
//!
//! Reads the capture time embedded in a photo's EXIF block.
//!
//! ## Tags
//! - `DateTimeOriginal` - when the shutter fired (preferred)
//! - `DateTime` - last modification time, used when the original is absent
//!   or malformed
//!
//! ## Supported Formats
//! kamadak-exif finds EXIF in JPEG, PNG (`eXIf` chunk), TIFF, HEIF and WebP
//! containers. Anything it cannot read is reported as an error so the
//! caller can leave the file out of the corpus.

#[cfg(test)]
pub(crate) mod fixtures;

use crate::core::timestamp::Timestamp;
use crate::error::{DateFormatError, MetadataError};
use exif::{Exif, In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Tags consulted for the capture time, most trusted first
const CAPTURE_TAGS: [Tag; 2] = [Tag::DateTimeOriginal, Tag::DateTime];

/// Extract the capture time of a photo file
pub fn read_capture_time(path: &Path) -> Result<Timestamp, MetadataError> {
    let file = File::open(path).map_err(|source| MetadataError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut bufreader = BufReader::new(file);
    let exif = Reader::new()
        .read_from_container(&mut bufreader)
        .map_err(|e| MetadataError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    capture_time_from(&exif, path)
}

fn capture_time_from(exif: &Exif, path: &Path) -> Result<Timestamp, MetadataError> {
    let mut rejected: Option<DateFormatError> = None;

    for tag in CAPTURE_TAGS {
        let Some(raw) = exif
            .get_field(tag, In::PRIMARY)
            .and_then(|field| get_string_value(&field.value))
        else {
            continue;
        };

        match Timestamp::parse(&raw) {
            Ok(timestamp) => return Ok(timestamp),
            Err(e) => {
                rejected.get_or_insert(e);
            }
        }
    }

    match rejected {
        Some(source) => Err(MetadataError::InvalidTimestamp {
            path: path.to_path_buf(),
            source,
        }),
        None => Err(MetadataError::MissingTimestamp {
            path: path.to_path_buf(),
        }),
    }
}

/// Helper to extract string from EXIF ASCII value
fn get_string_value(value: &Value) -> Option<String> {
    if let Value::Ascii(ref vec) = value {
        if let Some(bytes) = vec.first() {
            if let Ok(s) = std::str::from_utf8(bytes) {
                let trimmed = s.trim_end_matches('\0').trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::fixtures::{jpeg_with_exif, plain_png, png_with_exif, write_file};
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn prefers_original_capture_time() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            &temp_dir,
            "both.jpg",
            &jpeg_with_exif(Some("2019:07:04 18:30:00"), Some("2023:01:01 00:00:00")),
        );

        let ts = read_capture_time(&path).unwrap();
        assert_eq!(ts.to_string(), "2019:07:04 18:30:00");
    }

    #[test]
    fn reads_png_exif_chunk() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            &temp_dir,
            "scan.png",
            &png_with_exif(Some("2011:11:11 11:11:11"), None),
        );

        let ts = read_capture_time(&path).unwrap();
        assert_eq!(ts.to_string(), "2011:11:11 11:11:11");
    }

    #[test]
    fn png_without_exif_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "plain.png", &plain_png());

        let err = read_capture_time(&path).unwrap_err();
        assert!(matches!(err, MetadataError::Unreadable { .. }));
    }

    #[test]
    fn falls_back_to_modification_time() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            &temp_dir,
            "edited.jpg",
            &jpeg_with_exif(None, Some("2023:01:01 10:00:00")),
        );

        let ts = read_capture_time(&path).unwrap();
        assert_eq!(ts.to_string(), "2023:01:01 10:00:00");
    }

    #[test]
    fn malformed_original_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            &temp_dir,
            "odd.jpg",
            &jpeg_with_exif(Some("    :  :     :  :  "), Some("2010:05:05 05:05:05")),
        );

        let ts = read_capture_time(&path).unwrap();
        assert_eq!(ts.to_string(), "2010:05:05 05:05:05");
    }

    #[test]
    fn malformed_only_value_is_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            &temp_dir,
            "bad.jpg",
            &jpeg_with_exif(Some("2010-05-05 05:05:05"), None),
        );

        let err = read_capture_time(&path).unwrap_err();
        assert!(matches!(err, MetadataError::InvalidTimestamp { .. }));
    }

    #[test]
    fn exif_without_dates_is_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "plain.jpg", &jpeg_with_exif(None, None));

        let err = read_capture_time(&path).unwrap_err();
        assert!(matches!(err, MetadataError::MissingTimestamp { .. }));
    }

    #[test]
    fn corrupt_file_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "corrupt.jpg", b"this is not a valid image file");

        let err = read_capture_time(&path).unwrap_err();
        assert!(matches!(err, MetadataError::Unreadable { .. }));
    }

    #[test]
    fn nonexistent_file_fails_to_open() {
        let err = read_capture_time(Path::new("/nonexistent/file.jpg")).unwrap_err();
        assert!(matches!(err, MetadataError::Open { .. }));
    }

    #[test]
    fn string_value_trims_padding() {
        let value = Value::Ascii(vec![b"2001:01:01 01:01:01\0 ".to_vec()]);
        assert_eq!(
            get_string_value(&value),
            Some("2001:01:01 01:01:01".to_string())
        );
        assert_eq!(get_string_value(&Value::Ascii(vec![b"\0".to_vec()])), None);
        assert_eq!(get_string_value(&Value::Short(vec![1])), None);
    }
}
