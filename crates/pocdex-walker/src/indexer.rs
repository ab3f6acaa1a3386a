//! Directory indexing.
//!
//! Walks the root, keeps the files whose names pass the filter, and maps
//! each identifier to the URL of its file.

use crate::walk::{DirWalker, FsWalker, IgnoreWalker};
use pocdex_core::{
    entry_url, FilenameFilter, IndexConfig, IndexError, PocIndex, Result, DEFAULT_BASE_URL,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info};

/// Result of indexing a directory.
#[derive(Debug)]
pub struct IndexResult {
    /// The built index.
    pub index: PocIndex,

    /// Number of files the walker yielded.
    pub files_seen: usize,

    /// Number of files that passed the filter.
    pub files_matched: usize,

    /// Matches whose identifier was already in the index.
    pub collisions: usize,

    /// Time taken in milliseconds.
    pub duration_ms: u64,
}

impl IndexResult {
    /// Number of distinct identifiers. Lower than `files_matched` when
    /// identifiers collided.
    pub fn distinct(&self) -> usize {
        self.index.len()
    }
}

/// Options for building an index.
#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Prefix for every entry's URL.
    pub base_url: String,

    /// Which files are indexed, and under what identifier.
    pub filter: FilenameFilter,

    /// Sort keys before returning the index.
    pub sort_output: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            filter: FilenameFilter::default(),
            sort_output: false,
        }
    }
}

impl From<&IndexConfig> for IndexOptions {
    fn from(config: &IndexConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            filter: config.filter(),
            sort_output: config.sort,
        }
    }
}

/// Checks that `root` exists and is a directory.
pub fn validate_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(IndexError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(IndexError::RootNotADirectory(root.to_path_buf()));
    }
    Ok(())
}

/// Builds an index from whatever `walker` yields under `root`.
///
/// Doesn't check `root` itself; see [`index_directory`].
pub fn build_index(root: &Path, walker: &dyn DirWalker, options: &IndexOptions) -> IndexResult {
    let start = Instant::now();
    let mut index = PocIndex::new();
    let mut files_seen = 0;
    let mut files_matched = 0;
    let mut collisions = 0;

    for rel in walker.walk(root) {
        files_seen += 1;

        let id = match options.filter.identifier_for_path(&rel) {
            Some(id) => id,
            None => continue,
        };
        files_matched += 1;

        let url = entry_url(&options.base_url, &rel);
        if let Some(previous) = index.insert(id.as_str(), url) {
            debug!("{} seen again, replacing {}", id, previous);
            collisions += 1;
        }
    }

    if options.sort_output {
        index = index.sorted();
    }

    IndexResult {
        index,
        files_seen,
        files_matched,
        collisions,
        duration_ms: start.elapsed().as_millis() as u64,
    }
}

/// Validates `root` and indexes it.
///
/// # Example
///
/// ```no_run
/// use pocdex_walker::{index_directory, FsWalker, IndexOptions};
/// use std::path::Path;
///
/// let result = index_directory(
///     Path::new("PoC-in-GitHub"),
///     &FsWalker::default(),
///     &IndexOptions::default(),
/// )
/// .unwrap();
/// println!("{} files, {} identifiers", result.files_matched, result.distinct());
/// ```
pub fn index_directory(
    root: &Path,
    walker: &dyn DirWalker,
    options: &IndexOptions,
) -> Result<IndexResult> {
    validate_root(root)?;
    Ok(build_index(root, walker, options))
}

/// Picks the walker a config asks for.
pub fn walker_for(config: &IndexConfig) -> Box<dyn DirWalker> {
    if config.respect_ignore {
        Box::new(IgnoreWalker {
            follow_symlinks: config.follow_symlinks,
            sort: config.sort,
        })
    } else {
        Box::new(FsWalker {
            follow_symlinks: config.follow_symlinks,
            sort: config.sort,
        })
    }
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub files_matched: usize,
    pub distinct: usize,
    pub output: PathBuf,
    pub duration_ms: u64,
}

/// Runs a complete indexing pass: validate, walk, save.
///
/// The output file is only opened after the root check passes.
pub fn run(config: &IndexConfig) -> Result<RunSummary> {
    info!("Starting index generation for {}", config.root.display());

    if let Err(e) = validate_root(&config.root) {
        error!("{}", e);
        return Err(e);
    }

    let walker = walker_for(config);
    let result = build_index(&config.root, walker.as_ref(), &IndexOptions::from(config));

    info!("Finished traversing {} matching files", result.files_matched);
    info!(
        "Index created. Total unique identifiers: {}",
        result.distinct()
    );

    result.index.save(&config.output)?;
    info!("Index saved to {}", config.output.display());

    Ok(RunSummary {
        files_matched: result.files_matched,
        distinct: result.distinct(),
        output: config.output.clone(),
        duration_ms: result.duration_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walk::MemoryWalker;
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "[]").unwrap();
    }

    fn options(base_url: &str) -> IndexOptions {
        IndexOptions {
            base_url: base_url.to_string(),
            ..IndexOptions::default()
        }
    }

    #[test]
    fn test_index_empty_directory() {
        let dir = tempdir().unwrap();
        let result =
            index_directory(dir.path(), &FsWalker::default(), &IndexOptions::default()).unwrap();
        assert_eq!(result.files_matched, 0);
        assert!(result.index.is_empty());
    }

    #[test]
    fn test_two_year_example() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "2024/CVE-2024-00001.json");
        touch(dir.path(), "2023/CVE-2023-99999.json");

        let result = index_directory(
            dir.path(),
            &FsWalker::default(),
            &options("https://example.test/base"),
        )
        .unwrap();

        assert_eq!(result.files_matched, 2);
        assert_eq!(result.distinct(), 2);
        assert_eq!(
            result.index.get("CVE-2024-00001"),
            Some("https://example.test/base/2024/CVE-2024-00001.json")
        );
        assert_eq!(
            result.index.get("CVE-2023-99999"),
            Some("https://example.test/base/2023/CVE-2023-99999.json")
        );
    }

    #[test]
    fn test_partial_matches_are_excluded_at_any_depth() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "README.json");
        touch(dir.path(), "2024/CVE-2024-00002.txt");
        touch(dir.path(), "a/b/c/d/e/README.json");
        touch(dir.path(), "a/b/c/d/e/CVE-2024-7.json");

        let result =
            index_directory(dir.path(), &FsWalker::default(), &options("http://h")).unwrap();

        assert_eq!(result.files_seen, 4);
        assert_eq!(result.files_matched, 1);
        let keys: Vec<_> = result.index.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["CVE-2024-7"]);
        assert_eq!(
            result.index.get("CVE-2024-7"),
            Some("http://h/a/b/c/d/e/CVE-2024-7.json")
        );
    }

    #[test]
    fn test_collision_last_visited_wins() {
        let walker = MemoryWalker::new([
            PathBuf::from("2023").join("CVE-2023-1.json"),
            PathBuf::from("misc").join("CVE-2023-1.json"),
            PathBuf::from("2023").join("CVE-2023-2.json"),
        ]);

        let result = build_index(Path::new("root"), &walker, &options("http://h"));

        assert_eq!(result.files_matched, 3);
        assert_eq!(result.distinct(), 2);
        assert_eq!(result.collisions, 1);
        assert_eq!(
            result.index.get("CVE-2023-1"),
            Some("http://h/misc/CVE-2023-1.json")
        );
    }

    #[test]
    fn test_every_url_reconstructs_from_relative_path() {
        let rels = ["2024/CVE-2024-1.json", "x/y/CVE-9.json", "CVE-0.json"];
        let walker = MemoryWalker::new(rels);
        let result = build_index(Path::new("root"), &walker, &options("https://b/p"));

        assert_eq!(result.files_matched, rels.len());
        for rel in rels {
            let name = Path::new(rel).file_name().unwrap().to_str().unwrap();
            let id = name.strip_suffix(".json").unwrap();
            assert_eq!(result.index.get(id), Some(format!("https://b/p/{}", rel).as_str()));
        }
    }

    #[test]
    fn test_sort_output() {
        let walker = MemoryWalker::new(["CVE-2024-1.json", "CVE-2023-1.json"]);
        let opts = IndexOptions {
            sort_output: true,
            ..options("http://h")
        };
        let result = build_index(Path::new("root"), &walker, &opts);
        let keys: Vec<_> = result.index.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["CVE-2023-1", "CVE-2024-1"]);
    }

    #[test]
    fn test_missing_root() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("PoC-in-GitHub");
        let err = index_directory(&missing, &FsWalker::default(), &IndexOptions::default())
            .unwrap_err();
        assert!(matches!(err, IndexError::RootNotFound(_)));
    }

    #[test]
    fn test_root_that_is_a_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.json");
        fs::write(&file, "{}").unwrap();
        assert!(matches!(
            validate_root(&file),
            Err(IndexError::RootNotADirectory(_))
        ));
    }

    #[test]
    fn test_run_writes_output() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("repo");
        touch(&root, "2024/CVE-2024-00001.json");
        touch(&root, "2024/notes.md");

        let config = IndexConfig {
            root: root.clone(),
            output: dir.path().join("poc_index.json"),
            base_url: "https://example.test/base".to_string(),
            ..IndexConfig::default()
        };
        let summary = run(&config).unwrap();

        assert_eq!(summary.files_matched, 1);
        assert_eq!(summary.distinct, 1);
        let saved = PocIndex::load(&config.output).unwrap();
        assert_eq!(
            saved.get("CVE-2024-00001"),
            Some("https://example.test/base/2024/CVE-2024-00001.json")
        );
    }

    #[test]
    fn test_run_with_missing_root_leaves_output_untouched() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("poc_index.json");
        fs::write(&output, "previous contents").unwrap();

        let config = IndexConfig {
            root: dir.path().join("missing"),
            output: output.clone(),
            ..IndexConfig::default()
        };
        let err = run(&config).unwrap_err();

        assert!(err.is_precondition());
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous contents");
    }

    #[test]
    fn test_run_twice_is_byte_identical() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("repo");
        for rel in [
            "2021/CVE-2021-3.json",
            "2024/CVE-2024-1.json",
            "2022/CVE-2022-2.json",
            "2022/CVE-2021-3.json",
        ] {
            touch(&root, rel);
        }

        let config = IndexConfig {
            root,
            output: dir.path().join("out.json"),
            sort: true,
            ..IndexConfig::default()
        };
        run(&config).unwrap();
        let first = fs::read(&config.output).unwrap();
        run(&config).unwrap();
        let second = fs::read(&config.output).unwrap();

        assert_eq!(first, second);
    }
}
