//! ctxdump - Concatenate a directory tree into a single text file for LLM context
//!
//! ctxdump provides:
//! - Depth-first directory walking with name, suffix and path exclusions
//! - Extension allow-lists, size ceilings and text sniffing
//! - Fault-tolerant reads (per-file errors are written inline)
//! - Deterministic, banner-delimited output

use anyhow::Result;
use clap::Parser;

mod backends;
mod cli;
mod core;
mod flows;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
