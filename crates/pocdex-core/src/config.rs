//! Run configuration.
//!
//! Built-in defaults are overridden by a JSON config file, which in turn
//! is overridden by command-line flags.

use crate::error::{IndexError, Result};
use crate::filter::{FilenameFilter, DEFAULT_PREFIX, DEFAULT_SUFFIX};
use crate::index::DEFAULT_OUTPUT;
use crate::url::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default directory to traverse.
pub const DEFAULT_ROOT: &str = "PoC-in-GitHub";

/// Default config file name written by `pocdex init`.
pub const CONFIG_FILE_NAME: &str = "pocdex.json";

/// Everything one indexing run needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IndexConfig {
    /// Directory to traverse.
    pub root: PathBuf,

    /// Destination of the saved document.
    pub output: PathBuf,

    /// Prefix for every entry's URL.
    pub base_url: String,

    /// Required start of an indexed file name.
    pub prefix: String,

    /// Required end of an indexed file name; trimmed to form the identifier.
    pub suffix: String,

    /// Follow symbolic links when walking.
    pub follow_symlinks: bool,

    /// Skip hidden entries and honor `.gitignore` files.
    pub respect_ignore: bool,

    /// Walk in file-name order and write keys sorted.
    pub sort: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            base_url: DEFAULT_BASE_URL.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            follow_symlinks: false,
            respect_ignore: false,
            sort: false,
        }
    }
}

impl IndexConfig {
    /// Loads a config file. Fields it leaves out keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| IndexError::read(path, e))?;
        let config: IndexConfig =
            serde_json::from_str(&text).map_err(|e| IndexError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(IndexError::Config {
                path: path.to_path_buf(),
                message: "baseUrl must not be empty".to_string(),
            });
        }
        if self.suffix.is_empty() {
            return Err(IndexError::Config {
                path: path.to_path_buf(),
                message: "suffix must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn filter(&self) -> FilenameFilter {
        FilenameFilter::new(self.prefix.clone(), self.suffix.clone())
    }

    /// Serializes the config the way `load` expects it.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
