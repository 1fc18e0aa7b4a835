//! Filesystem operations
//!
//! Handles file and directory operations.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Write content to a file, creating parent directories first
///
/// The file handle is dropped, and therefore closed, on every return path.
pub fn write_file(path: &Path, content: &str) -> Result<(), FilesystemError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    let write_error = |e: std::io::Error| FilesystemError::WriteFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    };
    let mut writer = BufWriter::new(File::create(path).map_err(write_error)?);
    writer.write_all(content.as_bytes()).map_err(write_error)?;
    writer.flush().map_err(write_error)
}

/// Make a path absolute against the current directory without touching the
/// filesystem
pub fn absolute_path(path: &Path) -> Result<PathBuf, FilesystemError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|e| FilesystemError::ResolvePath {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
}

/// Canonical form of a path, used as a stable cache key
///
/// Symlinks and relative segments are resolved when the path exists. A path
/// that cannot be resolved falls back to its absolute form, so a missing
/// directory still yields a usable key. Windows verbatim prefixes are removed,
/// so tool arguments and `PATH` entries hold plain drive or UNC paths.
pub fn canonicalize(path: &Path) -> PathBuf {
    match std::fs::canonicalize(path) {
        Ok(canonical) => strip_verbatim_prefix(canonical),
        Err(e) => {
            tracing::debug!("Could not canonicalize {}: {}", path.display(), e);
            absolute_path(path).unwrap_or_else(|_| path.to_path_buf())
        }
    }
}

/// Drop a `\\?\` verbatim prefix from a Windows path
///
/// `\\?\C:\dir` becomes `C:\dir` and `\\?\UNC\server\share` becomes
/// `\\server\share`. Other paths, including verbatim device paths, are
/// returned unchanged.
pub fn strip_verbatim_prefix(path: PathBuf) -> PathBuf {
    let Some(text) = path.to_str() else {
        return path;
    };
    if let Some(rest) = text.strip_prefix(r"\\?\UNC\") {
        return PathBuf::from(format!(r"\\{rest}"));
    }
    match text.strip_prefix(r"\\?\") {
        Some(rest) if has_drive_letter(rest) => PathBuf::from(rest),
        _ => path,
    }
}

fn has_drive_letter(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a/b/c.txt");
        write_file(&file, "hello\n").unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "hello\n");
    }

    #[test]
    fn test_write_file_into_missing_parent_fails_when_parent_is_a_file() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let result = write_file(&blocker.join("args.txt"), "x");
        assert!(matches!(result, Err(FilesystemError::CreateDir { .. })));
    }

    #[test]
    fn test_canonicalize_resolves_relative_segments() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("a/b")).unwrap();
        let canonical = canonicalize(&temp.path().join("a/b/.."));
        assert_eq!(
            canonical,
            strip_verbatim_prefix(std::fs::canonicalize(temp.path().join("a")).unwrap())
        );
    }

    #[test]
    fn test_canonicalize_missing_path_is_absolute() {
        let canonical = canonicalize(Path::new("does-not-exist/anywhere"));
        assert!(canonical.is_absolute());
    }

    #[test]
    fn test_strip_verbatim_disk_prefix() {
        assert_eq!(
            strip_verbatim_prefix(PathBuf::from(r"\\?\C:\IAR\EW")),
            PathBuf::from(r"C:\IAR\EW")
        );
    }

    #[test]
    fn test_strip_verbatim_unc_prefix() {
        assert_eq!(
            strip_verbatim_prefix(PathBuf::from(r"\\?\UNC\build\tools\IAR")),
            PathBuf::from(r"\\build\tools\IAR")
        );
    }

    #[test]
    fn test_strip_verbatim_leaves_other_paths() {
        for path in [r"C:\IAR\EW", r"\\server\share", r"\\?\Volume{1234}\x", "/opt/iar"] {
            assert_eq!(strip_verbatim_prefix(PathBuf::from(path)), PathBuf::from(path));
        }
    }

    #[cfg(windows)]
    #[test]
    fn test_canonicalize_has_no_verbatim_prefix() {
        let temp = TempDir::new().unwrap();
        let canonical = canonicalize(temp.path());
        assert!(!canonical.display().to_string().starts_with(r"\\?\"));
        assert!(canonical.is_absolute());
    }
}
