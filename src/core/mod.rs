//! Core module - Configuration, data model and the pieces the aggregator is built from
//!
//! This module provides:
//! - Run configuration (DumpConfig) and exclusion patterns
//! - Error types for fatal and per-file failures
//! - File reading with text sniffing and decoding policies
//! - Banner rendering and output hashing
//! - Path display utilities
//! - Token estimation and logging setup

pub mod config;
pub mod error;
pub mod exclude;
pub mod file_reader;
pub mod logging;
pub mod model;
pub mod paths;
pub mod render;
pub mod tokenizer;
