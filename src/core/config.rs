//! Run configuration
//!
//! Everything the aggregator needs is carried in `DumpConfig`; nothing is read
//! from process-wide state during a run.

use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::core::exclude::ExclusionSet;
use crate::core::tokenizer::TokenModel;

/// Default output file name
pub const DEFAULT_OUTPUT: &str = "dump.txt";

/// How file paths are printed in banners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    #[default]
    Relative,
    Absolute,
}

/// Emission order of file blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmitOrder {
    /// Lexicographic by relative path
    #[default]
    Path,
    /// Depth-first walk order, names sorted within each directory
    Walk,
}

impl std::str::FromStr for EmitOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "path" | "sorted" => Ok(EmitOrder::Path),
            "walk" | "traversal" => Ok(EmitOrder::Walk),
            _ => Err(format!("Unknown order: {}", s)),
        }
    }
}

/// Banner layout of the output document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerStyle {
    /// One header banner per file
    #[default]
    Plain,
    /// Document header plus an END OF FILE footer per file
    Framed,
}

impl std::str::FromStr for BannerStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" => Ok(BannerStyle::Plain),
            "framed" => Ok(BannerStyle::Framed),
            _ => Err(format!("Unknown style: {}", s)),
        }
    }
}

/// Decoding policy for file contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Decoding {
    /// Replace invalid sequences with U+FFFD
    #[default]
    Lossy,
    /// Treat invalid UTF-8 as a read error
    Strict,
}

impl std::str::FromStr for Decoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lossy" | "replace" => Ok(Decoding::Lossy),
            "strict" => Ok(Decoding::Strict),
            _ => Err(format!("Unknown decoding: {}", s)),
        }
    }
}

/// Configuration for one aggregation run
#[derive(Debug, Clone)]
pub struct DumpConfig {
    pub root: PathBuf,
    pub output: PathBuf,
    pub exclusions: ExclusionSet,
    /// Extensions including the leading dot; `None` allows everything
    pub extensions: Option<BTreeSet<String>>,
    /// Directory levels below root whose files are still emitted
    pub max_depth: Option<usize>,
    /// Skip files larger than this many bytes
    pub max_file_size: Option<u64>,
    /// Skip files whose first kilobyte is not valid UTF-8
    pub text_only: bool,
    pub decoding: Decoding,
    pub order: EmitOrder,
    pub style: BannerStyle,
    pub path_style: PathStyle,
    /// Also honor .gitignore/.ignore files
    pub respect_ignore_files: bool,
    pub token_model: Option<TokenModel>,
}

impl DumpConfig {
    pub fn new(root: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: output.into(),
            exclusions: ExclusionSet::with_defaults(),
            extensions: None,
            max_depth: None,
            max_file_size: None,
            text_only: false,
            decoding: Decoding::default(),
            order: EmitOrder::default(),
            style: BannerStyle::default(),
            path_style: PathStyle::default(),
            respect_ignore_files: false,
            token_model: None,
        }
    }

    /// Set the extension allow-list; entries may be given with or without the dot
    pub fn with_extensions<S: AsRef<str>>(mut self, exts: impl IntoIterator<Item = S>) -> Self {
        let set: BTreeSet<String> = exts
            .into_iter()
            .filter_map(|e| normalize_extension(e.as_ref()))
            .collect();
        self.extensions = if set.is_empty() { None } else { Some(set) };
        self
    }

    /// Check a file name against the extension allow-list
    pub fn extension_allowed(&self, name: &str) -> bool {
        let Some(allowed) = &self.extensions else {
            return true;
        };
        match file_extension(name) {
            Some(ext) => allowed.contains(ext),
            None => false,
        }
    }
}

fn normalize_extension(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "." {
        return None;
    }
    if raw.starts_with('.') {
        Some(raw.to_string())
    } else {
        Some(format!(".{}", raw))
    }
}

/// Extension of a file name including the dot; a leading dot alone does not count
fn file_extension(name: &str) -> Option<&str> {
    let idx = name.rfind('.')?;
    if name[..idx].trim_start_matches('.').is_empty() {
        return None;
    }
    Some(&name[idx..])
}
