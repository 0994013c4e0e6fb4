//! Give extension-less text files an extension derived from their content.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::mime_sniff::MimeDetector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FixAction {
    Skipped,
    Renamed,
}

#[derive(Debug, Clone, Serialize)]
pub struct FixReport {
    pub path: String,
    pub action: FixAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_path: Option<String>,
}

/// True when the final path component contains a dot anywhere.
pub fn has_extension(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().contains('.'))
        .unwrap_or(false)
}

/// Append `.<subtype>` to `path` when its detected type is `text/*`.
///
/// Files that already carry an extension are skipped untouched. A non-text
/// type fails with `file.unsupported_type`, an occupied target with
/// `file.already_exists`; neither touches the filesystem.
pub fn fix_extension(path: &Path, detector: &dyn MimeDetector) -> Result<FixReport> {
    let display = path.display().to_string();

    if has_extension(path) {
        log_status!("add-extension", "skipping {}", display);
        return Ok(FixReport {
            path: display,
            action: FixAction::Skipped,
            mime_type: None,
            new_path: None,
        });
    }

    let detected = detector.detect(path)?;
    let subtype = text_subtype(&detected)
        .ok_or_else(|| Error::file_unsupported_type(&display, &detected))?;

    let new_path = with_appended_extension(path, &subtype);
    let new_display = new_path.display().to_string();
    if fs::symlink_metadata(&new_path).is_ok() {
        return Err(Error::file_already_exists(display, new_display));
    }

    fs::rename(path, &new_path).map_err(|e| {
        Error::internal_io(
            e.to_string(),
            Some(format!("rename {} -> {}", display, new_display)),
        )
    })?;

    log_status!("add-extension", "{} -> {}", display, new_display);

    Ok(FixReport {
        path: display,
        action: FixAction::Renamed,
        mime_type: Some(detected),
        new_path: Some(new_display),
    })
}

/// Subtype of a `text/*` content type, `None` for anything else.
fn text_subtype(content_type: &str) -> Option<String> {
    let parsed: mime::Mime = content_type.trim().parse().ok()?;
    if parsed.type_() != mime::TEXT {
        return None;
    }
    let subtype = match parsed.suffix() {
        Some(suffix) => format!("{}+{}", parsed.subtype(), suffix),
        None => parsed.subtype().to_string(),
    };
    Some(subtype)
}

fn with_appended_extension(path: &Path, extension: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(".");
    raw.push(extension);
    PathBuf::from(raw)
}
