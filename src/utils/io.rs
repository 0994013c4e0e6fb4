//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Expand a leading `~` in a user-supplied path.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

/// Read file contents with standardized error handling.
///
/// Wraps `fs::read_to_string` with consistent `Error::internal_io` formatting.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Create `path` and any missing parents.
pub fn ensure_dir(path: &Path, operation: &str) -> Result<()> {
    fs::create_dir_all(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Copy `from` to `to` atomically (copy to a sibling .tmp, then rename).
///
/// Readers of `to` never observe a partially copied file. Returns the number
/// of bytes copied.
pub fn copy_file_atomic(from: &Path, to: &Path, operation: &str) -> Result<u64> {
    let parent = to.parent().ok_or_else(|| {
        Error::internal_io(
            format!("Invalid path: {}", to.display()),
            Some(operation.to_string()),
        )
    })?;

    let filename = to.file_name().ok_or_else(|| {
        Error::internal_io(
            format!("Invalid path: {}", to.display()),
            Some(operation.to_string()),
        )
    })?;

    let tmp_path = parent.join(format!("{}.tmp", filename.to_string_lossy()));

    let bytes = fs::copy(from, &tmp_path).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("{} (copy temp)", operation)))
    })?;

    if let Err(e) = fs::rename(&tmp_path, to) {
        let _ = fs::remove_file(&tmp_path);
        return Err(Error::internal_io(
            e.to_string(),
            Some(format!("{} (rename)", operation)),
        ));
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn read_file_succeeds_for_existing_file() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "test content").unwrap();

        let content = read_file(temp.path(), "test read").unwrap();
        assert!(content.contains("test content"));
    }

    #[test]
    fn read_file_returns_error_for_missing_file() {
        let result = read_file(Path::new("/nonexistent/path.txt"), "test read");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
        assert_eq!(err.details["context"], "test read");
    }

    #[test]
    fn copy_file_atomic_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("source.bin");
        fs::write(&source, b"payload").unwrap();
        let target = dir.path().join("nested").join("copy.bin");
        ensure_dir(target.parent().unwrap(), "test mkdir").unwrap();

        let bytes = copy_file_atomic(&source, &target, "test copy").unwrap();

        assert_eq!(bytes, 7);
        assert_eq!(fs::read(&target).unwrap(), b"payload");
        assert!(!dir.path().join("nested").join("copy.bin.tmp").exists());
    }

    #[test]
    fn copy_file_atomic_reports_missing_source() {
        let dir = tempdir().unwrap();
        let err = copy_file_atomic(
            &dir.path().join("absent"),
            &dir.path().join("copy"),
            "test copy",
        )
        .unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }

    #[test]
    fn expand_path_leaves_plain_paths_alone() {
        assert_eq!(expand_path("relative/file"), PathBuf::from("relative/file"));
        assert_eq!(expand_path("/abs/file"), PathBuf::from("/abs/file"));
    }
}
