//! File reading
//!
//! Provides:
//! - A cheap text sniff over the first kilobyte
//! - Full reads with a fixed decoding policy, returning per-file errors

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::core::config::Decoding;
use crate::core::error::ReadError;

/// Bytes inspected by `looks_like_text`
pub const SNIFF_LEN: usize = 1024;

/// Prefix of the inline placeholder written in place of unreadable content
pub const READ_ERROR_MARKER: &str = "[ERROR READING FILE]";

/// Check whether the first kilobyte of a file decodes as UTF-8
///
/// A multi-byte sequence cut off by the sniff window is not a decode error,
/// but one cut off by the end of the file is.
pub fn looks_like_text(path: &Path) -> io::Result<bool> {
    let file = fs::File::open(path)?;
    // One byte past the window tells a cut window apart from end of file
    let mut buffer = Vec::with_capacity(SNIFF_LEN + 1);
    file.take(SNIFF_LEN as u64 + 1).read_to_end(&mut buffer)?;

    let truncated = buffer.len() > SNIFF_LEN;
    buffer.truncate(SNIFF_LEN);
    Ok(is_utf8_prefix(&buffer, truncated))
}

fn is_utf8_prefix(bytes: &[u8], truncated: bool) -> bool {
    match std::str::from_utf8(bytes) {
        Ok(_) => true,
        // error_len() is None only for an incomplete sequence at the very end
        Err(e) => truncated && e.error_len().is_none(),
    }
}

/// Read a whole file as text
pub fn read_content(path: &Path, decoding: Decoding) -> Result<String, ReadError> {
    let bytes = fs::read(path)?;
    decode(bytes, decoding)
}

fn decode(bytes: Vec<u8>, decoding: Decoding) -> Result<String, ReadError> {
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => match decoding {
            Decoding::Lossy => Ok(String::from_utf8_lossy(e.as_bytes()).into_owned()),
            Decoding::Strict => Err(ReadError::InvalidUtf8 {
                valid_up_to: e.utf8_error().valid_up_to(),
            }),
        },
    }
}

/// Inline text substituted for the content of a file that could not be read
pub fn error_placeholder(err: &ReadError) -> String {
    format!("{}: {}", READ_ERROR_MARKER, err)
}
