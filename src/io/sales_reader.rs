//! Raw sales file reader
//!
//! Loads the pipe-delimited sales log into raw transaction lines. The first
//! line is a header and is discarded; blank lines are dropped and the rest
//! are trimmed.
//!
//! The file is decoded with the first encoding in [`SUPPORTED_ENCODINGS`] that
//! accepts its bytes. Latin-1 maps every byte to a character, so it always
//! succeeds and closes the list.
//!
//! # Error Handling
//!
//! A missing or unreadable file is not fatal: the reader logs the problem and
//! returns no lines, which the rest of the pipeline treats as an empty data
//! set.

use std::fs;
use std::path::Path;
use tracing::{debug, error, warn};

/// Character encodings tried in order when decoding the sales file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Latin1,
}

/// Encodings attempted by [`read_sales_data`], in order
pub const SUPPORTED_ENCODINGS: [Encoding; 2] = [Encoding::Utf8, Encoding::Latin1];

impl Encoding {
    /// Decode `bytes`, or `None` if they are not valid in this encoding
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Encoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_string),
            Encoding::Latin1 => Some(bytes.iter().copied().map(char::from).collect()),
        }
    }
}

/// Read raw transaction lines from the sales file at `path`
///
/// Returns an empty vector when the file is absent, unreadable or cannot be
/// decoded.
pub fn read_sales_data(path: &Path) -> Vec<String> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to read sales file '{}': {}", path.display(), e);
            return Vec::new();
        }
    };

    for encoding in SUPPORTED_ENCODINGS {
        match encoding.decode(&bytes) {
            Some(content) => {
                debug!("Decoded '{}' as {:?}", path.display(), encoding);
                return raw_lines(&content);
            }
            None => warn!("'{}' is not valid {:?}, trying next encoding", path.display(), encoding),
        }
    }

    error!("Unable to decode '{}' with any supported encoding", path.display());
    Vec::new()
}

/// Split decoded file content into trimmed, non-blank lines after the header
pub fn raw_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
