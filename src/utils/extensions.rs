//! Comma-separated file extension lists.
//!
//! Accepts `jpg`, `.jpg` or `jpg,png,.gif` and normalizes every entry to a
//! leading-dot form.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// Parse a user-supplied extension token into dot-prefixed extensions.
pub fn parse_extensions(token: &str) -> Result<Vec<String>> {
    if !token.contains(',') {
        let trimmed = token.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::validation_invalid_argument(
                "extensions",
                format!("'{}' is not a usable file extension", trimmed),
                Some(token.to_string()),
            ));
        }
        return Ok(vec![normalize_piece(trimmed, token)?]);
    }

    token
        .split(',')
        .map(|piece| normalize_piece(piece.trim(), token))
        .collect()
}

fn normalize_piece(piece: &str, token: &str) -> Result<String> {
    let name = piece.strip_prefix('.').unwrap_or(piece);
    if name.is_empty() {
        return Err(Error::validation_invalid_argument(
            "extensions",
            "Extension list contains an empty entry",
            Some(token.to_string()),
        ));
    }
    Ok(format!(".{}", name))
}

/// Parsed extension list, usable directly as a clap argument type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtensionList(Vec<String>);

impl ExtensionList {
    /// Returns the matching extension (as listed) for `path`, if any.
    ///
    /// Matching is a case-insensitive suffix check on the file name, so `.tar.gz`
    /// entries work as expected.
    pub fn matching(&self, path: &Path) -> Option<&str> {
        let name = path.file_name()?.to_string_lossy().to_lowercase();
        self.0
            .iter()
            .find(|ext| name.len() > ext.len() && name.ends_with(&ext.to_lowercase()))
            .map(String::as_str)
    }

    pub fn matches(&self, path: &Path) -> bool {
        self.matching(path).is_some()
    }
}

impl FromStr for ExtensionList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_extensions(s).map(ExtensionList)
    }
}

impl fmt::Display for ExtensionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_table() {
        let cases: &[(&str, &[&str])] = &[
            ("j", &[".j"]),
            ("p,g", &[".p", ".g"]),
            ("a,b,c", &[".a", ".b", ".c"]),
            (".jpg", &[".jpg"]),
        ];

        for (token, expected) in cases {
            assert_eq!(parse_extensions(token).unwrap(), *expected, "token {}", token);
        }
    }

    #[test]
    fn bare_numeral_is_rejected() {
        let err = parse_extensions("1").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
        assert_eq!(err.details["field"], "extensions");
    }

    #[test]
    fn numerals_inside_a_list_are_kept() {
        assert_eq!(parse_extensions("1,2").unwrap(), vec![".1", ".2"]);
        assert_eq!(parse_extensions("mp3,7z").unwrap(), vec![".mp3", ".7z"]);
    }

    #[test]
    fn mixed_prefixes_and_whitespace() {
        assert_eq!(
            parse_extensions(".tar.gz, zip").unwrap(),
            vec![".tar.gz", ".zip"]
        );
    }

    #[test]
    fn empty_entries_are_rejected() {
        assert!(parse_extensions("").is_err());
        assert!(parse_extensions(".").is_err());
        assert!(parse_extensions("a,,b").is_err());
        assert!(parse_extensions("a,").is_err());
    }

    #[test]
    fn from_str_feeds_matching() {
        let list: ExtensionList = "JPG,.tar.gz".parse().unwrap();
        assert_eq!(list.to_string(), ".JPG,.tar.gz");
        assert_eq!(list.matching(Path::new("/x/photo.jpg")), Some(".JPG"));
        assert!(list.matches(Path::new("backup.TAR.GZ")));
        assert!(!list.matches(Path::new("notes.txt")));
        assert!(!list.matches(Path::new(".jpg")));
    }
}
