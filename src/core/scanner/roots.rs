//! Reading the list of photo folders.

use crate::error::ScanError;
use std::path::{Path, PathBuf};

/// Read a folder list file: one directory per line.
///
/// Lines are trimmed; blank lines and `#` comments are ignored. Folders are
/// not checked here, the builder warns about missing ones.
pub fn read_root_list(file: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let contents = std::fs::read_to_string(file).map_err(|source| ScanError::RootList {
        path: file.to_path_buf(),
        source,
    })?;
    Ok(parse_root_list(&contents))
}

pub fn parse_root_list(contents: &str) -> Vec<PathBuf> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_one_folder_per_line() {
        let roots = parse_root_list("/photos/2019\n  relative/dir  \r\n\n# old drive\n/mnt/b\n");
        assert_eq!(
            roots,
            vec![
                PathBuf::from("/photos/2019"),
                PathBuf::from("relative/dir"),
                PathBuf::from("/mnt/b"),
            ]
        );
    }

    #[test]
    fn reads_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let list = temp_dir.path().join("folders.txt");
        std::fs::write(&list, "/a\n/b\n").unwrap();

        let roots = read_root_list(&list).unwrap();
        assert_eq!(roots.len(), 2);
    }

    #[test]
    fn missing_list_file_is_an_error() {
        let err = read_root_list(Path::new("/nonexistent/folders.txt")).unwrap_err();
        assert!(matches!(err, ScanError::RootList { .. }));
        assert!(err.to_string().contains("folders.txt"));
    }
}
