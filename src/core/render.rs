//! Renderer module
//!
//! Writes the banner-delimited dump document.

use std::fmt::Write as _;
use std::io::{self, Write};
use xxhash_rust::xxh3::Xxh3;

use crate::core::config::BannerStyle;
use crate::core::model::FileRecord;

/// Width of the separator lines
pub const SEPARATOR_WIDTH: usize = 80;

/// The separator line, without newline
pub fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}

/// Document header, written only in the framed style
pub fn render_header(root: &str, total_files: usize) -> String {
    format!(
        "# Directory Structure Export\n# Root: {}\n# Total files: {}\n{}\n\n",
        root,
        total_files,
        separator()
    )
}

/// One file block
pub fn render_record(record: &FileRecord, style: BannerStyle) -> String {
    let sep = separator();
    let body = record.body();
    let banners = if style == BannerStyle::Framed { 2 } else { 1 };
    let mut out = String::with_capacity(
        body.len() + 2 + banners * (2 * SEPARATOR_WIDTH + record.display.len() + 20),
    );

    let _ = write!(out, "{sep}\nFILE: {}\n{sep}\n\n", record.display);
    out.push_str(&body);
    out.push_str("\n\n");

    if style == BannerStyle::Framed {
        let _ = write!(out, "{sep}\nEND OF FILE: {}\n{sep}\n\n", record.display);
    }

    out
}

/// Writer that hashes and counts everything passing through it
pub struct DigestWriter<W: Write> {
    inner: W,
    hasher: Xxh3,
    written: u64,
}

impl<W: Write> DigestWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            hasher: Xxh3::new(),
            written: 0,
        }
    }

    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Hex-encoded xxh3 of the bytes written so far
    pub fn digest(&self) -> String {
        format!("{:016x}", self.hasher.digest())
    }

    #[allow(dead_code)]
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for DigestWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
