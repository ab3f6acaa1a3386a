//! Directory walking.
//!
//! Traversal sits behind [`DirWalker`] so the indexer can run against
//! real disk, a gitignore-aware walk, or a fixed in-memory list.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Something that can list the files under a root.
pub trait DirWalker {
    /// Yields the root-relative path of every file under `root`.
    ///
    /// Directories are never yielded. Entries that can't be read are
    /// skipped.
    fn walk<'a>(&'a self, root: &'a Path) -> Box<dyn Iterator<Item = PathBuf> + 'a>;
}

fn relative_to(root: &Path, path: &Path) -> Option<PathBuf> {
    path.strip_prefix(root).ok().map(Path::to_path_buf)
}

/// Plain recursive walk of the filesystem, no depth limit.
#[derive(Debug, Clone, Default)]
pub struct FsWalker {
    /// Descend into symlinked directories.
    pub follow_symlinks: bool,

    /// Visit entries in file-name order instead of filesystem order.
    pub sort: bool,
}

impl DirWalker for FsWalker {
    fn walk<'a>(&'a self, root: &'a Path) -> Box<dyn Iterator<Item = PathBuf> + 'a> {
        let mut walker = WalkDir::new(root).follow_links(self.follow_symlinks);
        if self.sort {
            walker = walker.sort_by_file_name();
        }

        let files = walker
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            // Follows links, so a symlinked directory counts as a directory
            .filter(|entry| !entry.path().is_dir())
            .filter_map(move |entry| relative_to(root, entry.path()));

        Box::new(files)
    }
}

/// Walk that skips hidden entries (such as `.git/`) and honors
/// `.gitignore` files below the root.
#[derive(Debug, Clone, Default)]
pub struct IgnoreWalker {
    pub follow_symlinks: bool,
    pub sort: bool,
}

impl DirWalker for IgnoreWalker {
    fn walk<'a>(&'a self, root: &'a Path) -> Box<dyn Iterator<Item = PathBuf> + 'a> {
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .require_git(false)
            .parents(false)
            .follow_links(self.follow_symlinks);
        if self.sort {
            builder.sort_by_file_name(|a, b| a.cmp(b));
        }

        let files = builder
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| !entry.path().is_dir())
            .filter_map(move |entry| relative_to(root, entry.path()));

        Box::new(files)
    }
}

/// A fixed list of relative paths, yielded in order. The root is ignored.
#[derive(Debug, Clone, Default)]
pub struct MemoryWalker {
    files: Vec<PathBuf>,
}

impl MemoryWalker {
    pub fn new<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

impl DirWalker for MemoryWalker {
    fn walk<'a>(&'a self, _root: &'a Path) -> Box<dyn Iterator<Item = PathBuf> + 'a> {
        Box::new(self.files.iter().cloned())
    }
}
