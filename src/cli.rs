//! CLI module - Command-line interface definition and handler

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::core::config::{
    BannerStyle, Decoding, DumpConfig, EmitOrder, PathStyle, DEFAULT_OUTPUT,
};
use crate::core::exclude::ExclusionSet;
use crate::core::logging;
use crate::core::tokenizer::TokenModel;
use crate::flows::dump::{print_summary, run_dump};

/// ctxdump - concatenate a directory's text files into one LLM-ready dump.
#[derive(Parser, Debug)]
#[command(name = "ctxdump")]
#[command(
    author,
    version,
    about,
    long_about = r#"ctxdump walks ROOT depth-first, skips excluded directories and files, and
writes every remaining file into a single text document, each framed by a banner:

================================================================================
FILE: src/main.rs
================================================================================

<file content>

The output file is rewritten on every run. Runs over an unchanged tree produce
byte-identical output.

Examples:
    ctxdump
    ctxdump src -o context.txt --ext rs,toml
    ctxdump . --exclude target,'*.lock' --max-depth 3
    ctxdump . --text-only --max-size 1048576 --style framed
"#
)]
pub struct Cli {
    /// Directory to scan.
    #[arg(
        value_name = "ROOT",
        default_value = ".",
        env = "CTXDUMP_ROOT",
        long_help = "Directory to scan (defaults to the current directory).\n\n\
Paths in the dump are relative to this directory unless --absolute-paths is set."
    )]
    pub root: PathBuf,

    /// Output file (overwritten on every run).
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = DEFAULT_OUTPUT,
        env = "CTXDUMP_OUTPUT",
        long_help = "Output file. It is truncated and rewritten on every run.\n\n\
If it lies under ROOT it is never included in the dump itself."
    )]
    pub output: PathBuf,

    /// Extra exclusion patterns (comma-separated, repeatable).
    #[arg(
        short,
        long,
        value_name = "PATTERNS",
        value_delimiter = ',',
        env = "CTXDUMP_EXCLUDE",
        long_help = "Additional exclusion patterns, added to the built-in list.\n\n\
Pattern forms:\n\
- name: exact file or directory name (node_modules)\n\
- *.ext: name suffix (*.lock, *.min.js)\n\
- a/b: path relative to ROOT (src/generated)\n\n\
Excluded directories are never entered."
    )]
    pub exclude: Vec<String>,

    /// Do not apply the built-in exclusion list.
    #[arg(
        long,
        long_help = "Drop the built-in exclusion list (.git, node_modules, __pycache__, dist,\n\
build, *.pyc, images, ...). Only --exclude patterns remain."
    )]
    pub no_default_excludes: bool,

    /// Only include these extensions (comma-separated).
    #[arg(
        long,
        value_name = "EXTS",
        value_delimiter = ',',
        env = "CTXDUMP_EXT",
        long_help = "Only include files with one of these extensions, with or without the dot.\n\n\
Example: --ext py,ts,.rs\n\n\
If omitted, every extension is allowed."
    )]
    pub ext: Vec<String>,

    /// Maximum directory depth below ROOT.
    #[arg(
        long,
        value_name = "N",
        env = "CTXDUMP_MAX_DEPTH",
        long_help = "Maximum directory depth below ROOT whose files are included.\n\n\
0 includes only files directly in ROOT. If omitted, all depths are walked."
    )]
    pub max_depth: Option<usize>,

    /// Skip files larger than this many bytes.
    #[arg(long, value_name = "BYTES", env = "CTXDUMP_MAX_SIZE")]
    pub max_size: Option<u64>,

    /// Skip files whose first kilobyte is not valid UTF-8.
    #[arg(
        long,
        long_help = "Sniff the first kilobyte of each file and skip it when it does not decode\n\
as UTF-8. Useful for keeping binaries out of the dump."
    )]
    pub text_only: bool,

    /// Decoding policy for file contents (lossy/strict).
    #[arg(
        long,
        default_value = "lossy",
        value_parser = ["lossy", "strict"],
        value_name = "MODE",
        long_help = "How invalid UTF-8 in file contents is handled.\n\n\
- lossy (default): invalid sequences become U+FFFD\n\
- strict: the file's content is replaced by an [ERROR READING FILE] placeholder"
    )]
    pub decoding: String,

    /// Emission order (path/walk).
    #[arg(
        long,
        default_value = "path",
        value_parser = ["path", "walk"],
        value_name = "ORDER",
        long_help = "Order of file blocks in the dump.\n\n\
- path (default): lexicographic by relative path\n\
- walk: depth-first traversal order, names sorted within each directory"
    )]
    pub order: String,

    /// Banner style (plain/framed).
    #[arg(
        long,
        default_value = "plain",
        value_parser = ["plain", "framed"],
        value_name = "STYLE",
        long_help = "Layout of the dump.\n\n\
- plain (default): one FILE banner per file\n\
- framed: a document header plus an END OF FILE banner after each file"
    )]
    pub style: String,

    /// Print absolute paths in banners.
    #[arg(long)]
    pub absolute_paths: bool,

    /// Also honor .gitignore and .ignore files.
    #[arg(long)]
    pub gitignore: bool,

    /// Estimate the dump's token count with this model.
    #[arg(
        long,
        value_enum,
        value_name = "MODEL",
        env = "CTXDUMP_TOKEN_MODEL",
        long_help = "Estimate the number of tokens in the written dump.\n\n\
- cl100k: cl100k_base encoding (aliases: cl100k_base, gpt-4)\n\
- o200k: o200k_base encoding (aliases: o200k_base, gpt-4o)\n\
- heuristic: word-length estimate, no encoding tables (alias: fast)"
    )]
    pub token_model: Option<TokenModel>,

    /// Print the summary as a single JSON object.
    #[arg(long)]
    pub json: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Quiet mode (no summary, errors only).
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (log every skipped file).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the run configuration from parsed arguments
    pub fn to_config(&self) -> Result<DumpConfig> {
        let mut config = DumpConfig::new(&self.root, &self.output).with_extensions(&self.ext);

        let mut exclusions = if self.no_default_excludes {
            ExclusionSet::new()
        } else {
            ExclusionSet::with_defaults()
        };
        exclusions.extend(self.exclude.iter().map(String::as_str));
        config.exclusions = exclusions;

        config.max_depth = self.max_depth;
        config.max_file_size = self.max_size;
        config.text_only = self.text_only;
        config.decoding = self.decoding.parse::<Decoding>().map_err(anyhow::Error::msg)?;
        config.order = self.order.parse::<EmitOrder>().map_err(anyhow::Error::msg)?;
        config.style = self.style.parse::<BannerStyle>().map_err(anyhow::Error::msg)?;
        config.path_style = if self.absolute_paths {
            PathStyle::Absolute
        } else {
            PathStyle::Relative
        };
        config.respect_ignore_files = self.gitignore;
        config.token_model = self.token_model;

        Ok(config)
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }
    logging::init(cli.quiet, cli.verbose, !cli.no_color);

    let config = cli.to_config()?;
    tracing::debug!(?config, "resolved configuration");

    let summary = run_dump(&config).context("dump failed")?;

    if cli.json || !cli.quiet {
        print_summary(&summary, cli.json);
    }

    Ok(())
}
