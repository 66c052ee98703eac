//! Backends module - Filesystem traversal
//!
//! Provides:
//! - walk: Depth-first directory walk with pruning and file filters

pub mod walk;
