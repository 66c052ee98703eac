//! Flows module - End-to-end operations
//!
//! Provides:
//! - dump: Aggregate the files under a root into a single text document

pub mod dump;
