//! Directory walking backend
//!
//! Depth-first walk over root using the ignore crate. Excluded directories are
//! pruned before they are entered; files go through the inclusion filters.

use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::config::{DumpConfig, EmitOrder};
use crate::core::file_reader::looks_like_text;
use crate::core::model::{Candidate, DumpSummary, SkipReason};
use crate::core::paths::make_relative;

/// Walk `root` and return the files to emit, in emission order
///
/// `root` must already be canonical so that relative paths strip cleanly.
/// `output` is the resolved output path; it is never a candidate.
pub fn collect_candidates(
    config: &DumpConfig,
    root: &Path,
    output: &Path,
    summary: &mut DumpSummary,
) -> Vec<Candidate> {
    let respect = config.respect_ignore_files;

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(false)
        .ignore(respect)
        .git_ignore(respect)
        .git_global(respect)
        .git_exclude(respect)
        .parents(respect)
        .require_git(false)
        .sort_by_file_name(|a, b| a.cmp(b));

    // Files directly in root are depth 1 for the walker
    if let Some(depth) = config.max_depth {
        builder.max_depth(Some(depth.saturating_add(1)));
    }

    debug!(
        root = %root.display(),
        patterns = config.exclusions.len(),
        "walking"
    );

    let exclusions = config.exclusions.clone();
    let prune_root = root.to_path_buf();
    builder.filter_entry(move |entry| {
        if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_dir()) {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        let relative = make_relative(entry.path(), &prune_root).unwrap_or_default();
        if exclusions.is_excluded(&name, &relative) {
            debug!(path = %relative, "pruned excluded directory");
            return false;
        }
        true
    });

    let mut candidates = Vec::new();

    for result in builder.build() {
        let entry = match result {
            Ok(e) => e,
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        if entry.depth() == 0 {
            continue;
        }

        let path = entry.path();
        let is_file = match entry.file_type() {
            Some(ft) if ft.is_file() => true,
            Some(ft) if ft.is_symlink() => path.is_file(),
            _ => false,
        };
        if !is_file {
            continue;
        }

        let relative = match make_relative(path, root) {
            Some(r) => r,
            None => continue,
        };
        let name = entry.file_name().to_string_lossy();

        if let Some(reason) = check_file(config, path, &name, &relative, output) {
            debug!(path = %relative, reason = %reason, "skipped file");
            summary.record_skip(reason);
            continue;
        }

        candidates.push(Candidate {
            path: path.to_path_buf(),
            relative,
        });
    }

    if config.order == EmitOrder::Path {
        candidates.sort_by(|a, b| a.relative.cmp(&b.relative));
    }

    candidates
}

/// Apply the file inclusion filters; `None` means the file is emitted
///
/// I/O failures while sniffing do not skip the file: the full read records them.
fn check_file(
    config: &DumpConfig,
    path: &Path,
    name: &str,
    relative: &str,
    output: &Path,
) -> Option<SkipReason> {
    if path == output {
        return Some(SkipReason::OutputFile);
    }

    if !config.extension_allowed(name) {
        return Some(SkipReason::Extension);
    }

    if config.exclusions.is_excluded(name, relative) {
        return Some(SkipReason::Excluded);
    }

    if let Some(limit) = config.max_file_size {
        if let Ok(meta) = fs::metadata(path) {
            if meta.len() > limit {
                return Some(SkipReason::TooLarge);
            }
        }
    }

    if config.text_only {
        if let Ok(false) = looks_like_text(path) {
            return Some(SkipReason::NotText);
        }
    }

    None
}

/// Resolve the root to a canonical directory path
pub fn resolve_root(root: &Path) -> std::io::Result<PathBuf> {
    let canonical = root.canonicalize()?;
    let meta = fs::metadata(&canonical)?;
    if !meta.is_dir() {
        return Err(std::io::Error::other("not a directory"));
    }
    // A directory we cannot list is as good as missing
    fs::read_dir(&canonical)?;
    Ok(canonical)
}
