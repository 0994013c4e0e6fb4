//! Content-based MIME type detection.
//!
//! Looks only at the leading bytes of a file, never at its name.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::defaults;
use crate::error::{Error, Result};

/// Best-guess content type for a file on disk, as a `type/subtype` string.
pub trait MimeDetector {
    fn detect(&self, path: &Path) -> Result<String>;
}

const MAGIC: &[(&[u8], &str)] = &[
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (b"\xff\xd8\xff", "image/jpeg"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"%PDF-", "application/pdf"),
    (b"PK\x03\x04", "application/zip"),
    (b"PK\x05\x06", "application/zip"),
    (b"\x1f\x8b", "application/gzip"),
    (b"BZh", "application/x-bzip2"),
    (b"\xfd7zXZ\x00", "application/x-xz"),
    (b"7z\xbc\xaf\x27\x1c", "application/x-7z-compressed"),
    (b"\x7fELF", "application/x-executable"),
    (b"\x00asm", "application/wasm"),
];

static SHEBANG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#!\s*(?:\S*/)?(?:env\s+(?:-\S+\s+)*)?(?:\S*/)?([A-Za-z]+)")
        .expect("shebang pattern is valid")
});

static HTML: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:<!doctype\s+html|<html[\s>])").expect("html pattern is valid")
});

/// Sniffs the first few kilobytes of a file.
#[derive(Debug, Clone)]
pub struct ContentSniffer {
    limit: usize,
}

impl Default for ContentSniffer {
    fn default() -> Self {
        Self {
            limit: defaults::Defaults::default().sniff.limit,
        }
    }
}

impl ContentSniffer {
    pub fn with_limit(limit: usize) -> Self {
        Self { limit: limit.max(1) }
    }

    pub fn sniff_bytes(&self, bytes: &[u8]) -> &'static str {
        let bytes = &bytes[..bytes.len().min(self.limit)];

        if bytes.is_empty() {
            return "inode/x-empty";
        }

        if let Some((_, mime)) = MAGIC.iter().find(|(magic, _)| bytes.starts_with(magic)) {
            return *mime;
        }

        let Some(text) = decode_text(bytes) else {
            return "application/octet-stream";
        };

        if let Some(caps) = SHEBANG.captures(text) {
            if let Some(mime) = interpreter_mime(&caps[1]) {
                return mime;
            }
        }

        let head = text.trim_start();
        if head.starts_with("<?xml") {
            return "text/xml";
        }
        if HTML.is_match(text) {
            return "text/html";
        }
        if (head.starts_with('{') || head.starts_with('['))
            && serde_json::from_str::<serde_json::Value>(text).is_ok()
        {
            return "application/json";
        }

        "text/plain"
    }
}

impl MimeDetector for ContentSniffer {
    fn detect(&self, path: &Path) -> Result<String> {
        let file = File::open(path).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("open {}", path.display())))
        })?;

        let mut buf = Vec::with_capacity(self.limit);
        file.take(self.limit as u64)
            .read_to_end(&mut buf)
            .map_err(|e| {
                Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
            })?;

        Ok(self.sniff_bytes(&buf).to_string())
    }
}

/// UTF-8 text without NUL bytes. A multi-byte sequence cut off by the read
/// limit does not disqualify the buffer.
fn decode_text(bytes: &[u8]) -> Option<&str> {
    if bytes.contains(&0) {
        return None;
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => Some(text),
        Err(e) if e.error_len().is_none() => std::str::from_utf8(&bytes[..e.valid_up_to()]).ok(),
        Err(_) => None,
    }
}

fn interpreter_mime(interpreter: &str) -> Option<&'static str> {
    let mime = match interpreter {
        "sh" | "bash" | "zsh" | "dash" | "ksh" => "text/x-shellscript",
        "perl" => "text/x-perl",
        "ruby" => "text/x-ruby",
        "node" => "application/javascript",
        name if name.starts_with("python") => "text/x-script.python",
        _ => return None,
    };
    Some(mime)
}
