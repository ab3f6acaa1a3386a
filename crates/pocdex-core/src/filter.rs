//! Filename filter.
//!
//! Decides from the base name alone whether a file is indexed, and what
//! identifier it is indexed under. File contents are never inspected.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default identifier prefix.
pub const DEFAULT_PREFIX: &str = "CVE-";

/// Default file suffix.
pub const DEFAULT_SUFFIX: &str = ".json";

/// A prefix/suffix pair a base filename must satisfy to be indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilenameFilter {
    pub prefix: String,
    pub suffix: String,
}

impl Default for FilenameFilter {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX, DEFAULT_SUFFIX)
    }
}

impl FilenameFilter {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Returns the identifier for `file_name`, or `None` if it isn't a match.
    ///
    /// The identifier is the name with the suffix trimmed once from the end.
    /// Prefix and suffix must not overlap, so `abc` is not a match for
    /// prefix `ab` and suffix `bc`.
    ///
    /// ```
    /// use pocdex_core::FilenameFilter;
    ///
    /// let filter = FilenameFilter::default();
    /// assert_eq!(filter.identifier("CVE-2024-1234.json"), Some("CVE-2024-1234"));
    /// assert_eq!(filter.identifier("README.json"), None);
    /// ```
    pub fn identifier<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        if file_name.len() < self.prefix.len() + self.suffix.len() {
            return None;
        }
        if !file_name.starts_with(&self.prefix) {
            return None;
        }
        file_name.strip_suffix(self.suffix.as_str())
    }

    /// Applies [`identifier`](Self::identifier) to the base name of `path`.
    /// Names that aren't valid UTF-8 never match.
    pub fn identifier_for_path(&self, path: &Path) -> Option<String> {
        let name = path.file_name()?.to_str()?;
        self.identifier(name).map(str::to_owned)
    }

    pub fn matches(&self, path: &Path) -> bool {
        self.identifier_for_path(path).is_some()
    }
}
