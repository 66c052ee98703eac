//! Data model for one aggregation run

use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::core::error::ReadError;
use crate::core::file_reader::error_placeholder;

/// A file that passed every inclusion filter but has not been read yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Path on disk
    pub path: PathBuf,
    /// Path relative to root, using '/' as separator
    pub relative: String,
}

/// One included file and its content, consumed once by the writer
#[derive(Debug)]
pub struct FileRecord {
    /// Path as printed in the banner
    pub display: String,
    pub content: Result<String, ReadError>,
}

impl FileRecord {
    pub fn new(display: impl Into<String>, content: Result<String, ReadError>) -> Self {
        Self {
            display: display.into(),
            content,
        }
    }

    /// Content as written to the dump (the placeholder for failed reads)
    pub fn body(&self) -> Cow<'_, str> {
        match &self.content {
            Ok(text) => Cow::Borrowed(text),
            Err(e) => Cow::Owned(error_placeholder(e)),
        }
    }

    #[allow(dead_code)]
    pub fn is_error(&self) -> bool {
        self.content.is_err()
    }
}

/// Why a file under root was not emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Extension,
    Excluded,
    TooLarge,
    NotText,
    OutputFile,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Extension => "extension",
            SkipReason::Excluded => "excluded",
            SkipReason::TooLarge => "too_large",
            SkipReason::NotText => "not_text",
            SkipReason::OutputFile => "output_file",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a run, reported once the output file is complete
#[derive(Debug, Clone, Default, Serialize)]
pub struct DumpSummary {
    pub root: String,
    pub output: String,
    /// File blocks written
    pub files: usize,
    /// Blocks whose content is a read-error placeholder
    pub read_errors: usize,
    /// Bytes of file content written (placeholders excluded)
    pub content_bytes: u64,
    /// Size of the output file
    pub output_bytes: u64,
    /// xxh3 of the output file, hex encoded
    pub digest: String,
    pub skipped: BTreeMap<SkipReason, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_model: Option<String>,
}

impl DumpSummary {
    pub fn record_skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_insert(0) += 1;
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }
}
