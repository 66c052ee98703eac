//! Token estimate for the written dump
//!
//! The dump is counted one rendered block at a time while it is written, so
//! the document is never held in memory as a whole.

use clap::ValueEnum;
use once_cell::sync::OnceCell;
use std::fmt::Display;
use tiktoken_rs::CoreBPE;
use tracing::warn;

/// Encoding used for the estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TokenModel {
    /// cl100k_base (GPT-4; close enough for Claude)
    #[default]
    #[value(name = "cl100k", alias = "cl100k_base", alias = "gpt-4")]
    Cl100k,
    /// o200k_base (GPT-4o)
    #[value(name = "o200k", alias = "o200k_base", alias = "gpt-4o")]
    O200k,
    /// Word-length estimate without encoding tables
    #[value(name = "heuristic", alias = "fast")]
    Heuristic,
}

impl TokenModel {
    /// Canonical name, as reported in the summary
    pub fn name(&self) -> &'static str {
        match self {
            TokenModel::Cl100k => "cl100k",
            TokenModel::O200k => "o200k",
            TokenModel::Heuristic => "heuristic",
        }
    }

    fn encoder(&self) -> Option<&'static CoreBPE> {
        static CL100K: OnceCell<Option<CoreBPE>> = OnceCell::new();
        static O200K: OnceCell<Option<CoreBPE>> = OnceCell::new();

        match self {
            TokenModel::Cl100k => CL100K
                .get_or_init(|| loaded(*self, tiktoken_rs::cl100k_base()))
                .as_ref(),
            TokenModel::O200k => O200K
                .get_or_init(|| loaded(*self, tiktoken_rs::o200k_base()))
                .as_ref(),
            TokenModel::Heuristic => None,
        }
    }
}

fn loaded<E: Display>(model: TokenModel, result: Result<CoreBPE, E>) -> Option<CoreBPE> {
    result
        .map_err(|e| warn!(model = model.name(), error = %e, "encoding unavailable, estimating"))
        .ok()
}

/// Running token total over the blocks of one dump
pub struct TokenCounter {
    encoder: Option<&'static CoreBPE>,
    total: usize,
}

impl TokenCounter {
    /// Falls back to the word-length estimate if the model's encoding fails to load
    pub fn new(model: TokenModel) -> Self {
        Self {
            encoder: model.encoder(),
            total: 0,
        }
    }

    pub fn add_block(&mut self, block: &str) {
        self.total += match self.encoder {
            // Dumped files may contain "<|endoftext|>" and friends; count them as text
            Some(bpe) => bpe.encode_ordinary(block).len(),
            None => estimate_block(block),
        };
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

/// One token per four ASCII bytes of a word, one per non-ASCII char
fn estimate_block(block: &str) -> usize {
    block
        .split_whitespace()
        .map(|word| {
            let ascii = word.bytes().filter(u8::is_ascii).count();
            let wide = word.chars().filter(|c| !c.is_ascii()).count();
            ascii.div_ceil(4) + wide
        })
        .sum()
}
