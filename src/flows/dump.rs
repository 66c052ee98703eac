//! Dump flow - Aggregate every included file under root into one text file
//!
//! A single linear pass: resolve root, collect candidates, then read, render
//! and write one file at a time. Per-file read failures become inline
//! placeholders; only an invalid root or an unwritable output aborts the run.

use colored::Colorize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::{debug, warn};

use crate::backends::walk::{collect_candidates, resolve_root};
use crate::core::config::{BannerStyle, DumpConfig};
use crate::core::error::DumpError;
use crate::core::file_reader::read_content;
use crate::core::model::{Candidate, DumpSummary, FileRecord};
use crate::core::paths::{absolutize, display_path, normalize_path};
use crate::core::render::{render_header, render_record, DigestWriter};
use crate::core::tokenizer::TokenCounter;

/// Run the aggregator and return the summary of what was written
pub fn run_dump(config: &DumpConfig) -> Result<DumpSummary, DumpError> {
    let root = resolve_root(&config.root)
        .map_err(|e| DumpError::invalid_root(&config.root, e.to_string()))?;
    let output = absolutize(&config.output);

    let mut summary = DumpSummary {
        root: normalize_path(&root),
        output: normalize_path(&output),
        token_model: config.token_model.map(|m| m.name().to_string()),
        ..Default::default()
    };

    let candidates = collect_candidates(config, &root, &output, &mut summary);
    debug!(count = candidates.len(), "collected files");

    let file = File::create(&output).map_err(|e| DumpError::output(&output, e))?;
    let mut writer = DigestWriter::new(BufWriter::new(file));

    let root_display = summary.root.clone();
    write_dump(config, &root_display, &candidates, &mut writer, &mut summary)
        .map_err(|e| DumpError::output(&output, e))?;
    writer.flush().map_err(|e| DumpError::output(&output, e))?;

    summary.output_bytes = writer.bytes_written();
    summary.digest = writer.digest();

    Ok(summary)
}

/// Render every candidate into `writer`, updating the summary as records are consumed
pub fn write_dump<W: Write>(
    config: &DumpConfig,
    root_display: &str,
    candidates: &[Candidate],
    writer: &mut W,
    summary: &mut DumpSummary,
) -> io::Result<()> {
    let mut counter = config.token_model.map(TokenCounter::new);

    if config.style == BannerStyle::Framed {
        let header = render_header(root_display, candidates.len());
        if let Some(counter) = counter.as_mut() {
            counter.add_block(&header);
        }
        writer.write_all(header.as_bytes())?;
    }

    for candidate in candidates {
        let content = read_content(&candidate.path, config.decoding);
        if let Err(e) = &content {
            warn!(path = %candidate.relative, error = %e, "could not read file");
        }

        let record = FileRecord::new(
            display_path(&candidate.path, &candidate.relative, config.path_style),
            content,
        );

        summary.files += 1;
        match &record.content {
            Ok(text) => summary.content_bytes += text.len() as u64,
            Err(_) => summary.read_errors += 1,
        }

        let block = render_record(&record, config.style);
        if let Some(counter) = counter.as_mut() {
            counter.add_block(&block);
        }
        writer.write_all(block.as_bytes())?;
    }

    summary.tokens = counter.map(|c| c.total());

    Ok(())
}

/// Print the end-of-run summary to stdout
pub fn print_summary(summary: &DumpSummary, json: bool) {
    if json {
        match serde_json::to_string(summary) {
            Ok(line) => println!("{}", line),
            Err(e) => warn!(error = %e, "could not serialize summary"),
        }
        return;
    }

    println!(
        "{} Wrote {} files to {} ({})",
        "✔".green(),
        summary.files.to_string().bold(),
        summary.output,
        format_size(summary.output_bytes)
    );
    println!("   Root: {}", summary.root);

    if !summary.skipped.is_empty() {
        let detail = summary
            .skipped
            .iter()
            .map(|(reason, n)| format!("{}: {}", reason, n))
            .collect::<Vec<_>>()
            .join(", ");
        println!("   Skipped: {} ({})", summary.total_skipped(), detail);
    }

    if summary.read_errors > 0 {
        println!(
            "   {} {} files could not be read",
            "⚠".yellow(),
            summary.read_errors
        );
    }

    if let (Some(tokens), Some(model)) = (summary.tokens, &summary.token_model) {
        println!("   Tokens: {} (model: {})", tokens, model);
    }

    println!("   Digest: {}", summary.digest.dimmed());
}

/// Human-readable byte size
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
