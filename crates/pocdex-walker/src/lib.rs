//! Pocdex Walker - the filesystem side of indexing
//!
//! This crate handles:
//! - Checking the root before anything is written
//! - Walking the root (plain, gitignore-aware, or from a fixed list)
//! - Building the index and saving it
//!
//! Everything runs on the calling thread. Each call builds a fresh index,
//! so it is safe to call repeatedly from one process.

mod indexer;
mod walk;

pub use indexer::{
    build_index, index_directory, run, validate_root, walker_for, IndexOptions, IndexResult,
    RunSummary,
};
pub use walk::{DirWalker, FsWalker, IgnoreWalker, MemoryWalker};
