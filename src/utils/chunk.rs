//! Fixed-size string chunking.

use crate::error::{Error, Result};

/// Split `input` into consecutive chunks of exactly `size` characters.
///
/// The input length must be an exact multiple of `size`; anything else is a
/// `validation.length_mismatch` error and no chunks are produced. An input that
/// is exactly one chunk long has nothing to split and yields an empty list.
pub fn chunk_string(input: &str, size: usize) -> Result<Vec<String>> {
    if size == 0 {
        return Err(Error::validation_invalid_argument(
            "chunk_size",
            "Chunk size must be greater than zero",
            Some(size.to_string()),
        ));
    }

    let chars: Vec<char> = input.chars().collect();
    if chars.len() % size != 0 {
        return Err(Error::length_mismatch(chars.len(), size));
    }

    if chars.len() == size {
        return Ok(Vec::new());
    }

    Ok(chars
        .chunks(size)
        .map(|chunk| chunk.iter().collect())
        .collect())
}
