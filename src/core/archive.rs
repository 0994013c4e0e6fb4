//! Content-addressed file archiving.
//!
//! Files are copied to `dest/<shard>/.../<sha256><ext>`, where the shard
//! directories come from chunking the leading digest characters. Identical
//! content always lands on the same path, so re-running is a no-op.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::chunk::chunk_string;
use crate::error::{Error, Result};
use crate::extensions::ExtensionList;
use crate::hasher::hash_file;
use crate::io::{copy_file_atomic, ensure_dir};

const SHA256_HEX_LEN: usize = 64;

#[derive(Debug, Clone)]
pub struct ArchiveRequest {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub extensions: ExtensionList,
    pub chunk_size: usize,
    pub prefix_len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveOutcome {
    Planned,
    Archived,
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArchiveItem {
    pub source: String,
    pub target: String,
    pub digest: String,
    pub bytes: u64,
    pub outcome: ArchiveOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArchivePlan {
    pub source: String,
    pub dest: String,
    pub items: Vec<ArchiveItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArchiveSummary {
    pub source: String,
    pub dest: String,
    pub dry_run: bool,
    pub items: Vec<ArchiveItem>,
    pub archived: usize,
    pub skipped: usize,
    pub planned: usize,
}

/// Target path for content with `digest` under `dest`.
pub fn shard_path(
    dest: &Path,
    digest: &str,
    extension: &str,
    chunk_size: usize,
    prefix_len: usize,
) -> Result<PathBuf> {
    validate_layout(chunk_size, prefix_len)?;

    let prefix = digest.get(..prefix_len).ok_or_else(|| {
        Error::validation_invalid_argument(
            "digest",
            format!("Digest is shorter than the {}-character prefix", prefix_len),
            Some(digest.to_string()),
        )
    })?;

    let mut path = dest.to_path_buf();
    for segment in chunk_string(prefix, chunk_size)? {
        path.push(segment);
    }
    path.push(format!("{}{}", digest, extension.to_lowercase()));
    Ok(path)
}

/// Check the shard layout before any file is read.
fn validate_layout(chunk_size: usize, prefix_len: usize) -> Result<()> {
    if prefix_len == 0 || prefix_len > SHA256_HEX_LEN {
        return Err(Error::validation_invalid_argument(
            "prefix_len",
            format!("Prefix length must be between 1 and {}", SHA256_HEX_LEN),
            Some(prefix_len.to_string()),
        ));
    }
    chunk_string(&"0".repeat(prefix_len), chunk_size).map(|_| ())
}

/// Hash every matching file directly inside `request.source` and work out
/// where it belongs. Nothing is written.
pub fn plan_archive(request: &ArchiveRequest) -> Result<ArchivePlan> {
    validate_layout(request.chunk_size, request.prefix_len)?;

    let source_display = request.source.display().to_string();
    let entries = fs::read_dir(&request.source).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("read dir {}", source_display)))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("read dir {}", source_display)))
        })?;
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if is_file && request.extensions.matches(&entry.path()) {
            files.push(entry.path());
        }
    }
    files.sort();

    let mut items = Vec::with_capacity(files.len());
    for file in files {
        let Some(extension) = request.extensions.matching(&file) else {
            continue;
        };
        let digest = hash_file(&file)?;
        let target = shard_path(
            &request.dest,
            &digest.digest,
            extension,
            request.chunk_size,
            request.prefix_len,
        )?;

        let outcome = if target.exists() {
            ArchiveOutcome::Skipped
        } else {
            ArchiveOutcome::Planned
        };

        items.push(ArchiveItem {
            source: digest.path,
            target: target.display().to_string(),
            digest: digest.digest,
            bytes: digest.bytes,
            outcome,
        });
    }

    Ok(ArchivePlan {
        source: source_display,
        dest: request.dest.display().to_string(),
        items,
    })
}

/// Copy every planned item into place. With `dry_run`, report the plan only.
pub fn execute_archive(plan: ArchivePlan, dry_run: bool) -> Result<ArchiveSummary> {
    let mut items = plan.items;

    if !dry_run {
        for item in items
            .iter_mut()
            .filter(|item| item.outcome == ArchiveOutcome::Planned)
        {
            let target = PathBuf::from(&item.target);
            if let Some(parent) = target.parent() {
                ensure_dir(parent, "create archive directory")?;
            }
            copy_file_atomic(Path::new(&item.source), &target, "archive file")?;
            log_status!("archive", "{} -> {}", item.source, item.target);
            item.outcome = ArchiveOutcome::Archived;
        }
    }

    let count = |outcome: ArchiveOutcome| items.iter().filter(|i| i.outcome == outcome).count();
    let archived = count(ArchiveOutcome::Archived);
    let skipped = count(ArchiveOutcome::Skipped);
    let planned = count(ArchiveOutcome::Planned);

    Ok(ArchiveSummary {
        source: plan.source,
        dest: plan.dest,
        dry_run,
        items,
        archived,
        skipped,
        planned,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::hash_bytes;
    use tempfile::tempdir;

    fn request(source: &Path, dest: &Path, extensions: &str) -> ArchiveRequest {
        ArchiveRequest {
            source: source.to_path_buf(),
            dest: dest.to_path_buf(),
            extensions: extensions.parse().unwrap(),
            chunk_size: 4,
            prefix_len: 8,
        }
    }

    #[test]
    fn shard_path_uses_digest_chunks() {
        let digest = hash_bytes(b"abc");
        let path = shard_path(Path::new("/store"), &digest, ".JPG", 4, 8).unwrap();
        assert_eq!(
            path,
            PathBuf::from(format!("/store/ba78/16bf/{}.jpg", digest))
        );
    }

    #[test]
    fn single_chunk_prefix_is_flat() {
        let digest = hash_bytes(b"abc");
        let path = shard_path(Path::new("/store"), &digest, ".txt", 4, 4).unwrap();
        assert_eq!(path, PathBuf::from(format!("/store/{}.txt", digest)));
    }

    #[test]
    fn uneven_layout_is_rejected_up_front() {
        let dir = tempdir().unwrap();
        let mut req = request(dir.path(), dir.path(), "txt");
        req.prefix_len = 6;

        let err = plan_archive(&req).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.length_mismatch");

        req.prefix_len = 65;
        let err = plan_archive(&req).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn archives_matching_files_and_skips_repeats() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();
        fs::write(source.path().join("a.jpg"), b"first").unwrap();
        fs::write(source.path().join("b.PNG"), b"second").unwrap();
        fs::write(source.path().join("notes.txt"), b"ignored").unwrap();
        fs::create_dir(source.path().join("sub.jpg")).unwrap();

        let req = request(source.path(), dest.path(), "jpg,png");
        let summary = execute_archive(plan_archive(&req).unwrap(), false).unwrap();

        assert_eq!(summary.archived, 2);
        assert_eq!(summary.items.len(), 2);
        assert!(summary.items[0].source.ends_with("a.jpg"));
        for item in &summary.items {
            assert!(Path::new(&item.target).exists());
        }
        assert!(summary.items[1].target.ends_with(".png"));

        let again = execute_archive(plan_archive(&req).unwrap(), false).unwrap();
        assert_eq!(again.archived, 0);
        assert_eq!(again.skipped, 2);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();
        fs::write(source.path().join("a.jpg"), b"first").unwrap();

        let req = request(source.path(), &dest.path().join("store"), "jpg");
        let summary = execute_archive(plan_archive(&req).unwrap(), true).unwrap();

        assert!(summary.dry_run);
        assert_eq!(summary.planned, 1);
        assert!(!dest.path().join("store").exists());
    }

    #[test]
    fn missing_source_is_io_error() {
        let dir = tempdir().unwrap();
        let req = request(&dir.path().join("absent"), dir.path(), "jpg");
        let err = plan_archive(&req).unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }
}
