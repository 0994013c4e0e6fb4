use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

pub const ALGORITHM: &str = "sha256";

#[derive(Debug, Clone, Serialize)]
pub struct FileDigest {
    pub path: String,
    pub algorithm: &'static str,
    pub digest: String,
    pub bytes: u64,
}

/// Stream a file through SHA-256 and return its lowercase hex digest.
pub fn hash_file(path: &Path) -> Result<FileDigest> {
    let display = path.display().to_string();
    let file = File::open(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("open {}", display))))?;

    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    let mut bytes = 0u64;

    loop {
        let read = reader
            .read(&mut buf)
            .map_err(|e| Error::internal_io(e.to_string(), Some(format!("read {}", display))))?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
        bytes += read as u64;
    }

    Ok(FileDigest {
        path: display,
        algorithm: ALGORITHM,
        digest: format!("{:x}", hasher.finalize()),
        bytes,
    })
}

pub fn hash_bytes(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}
