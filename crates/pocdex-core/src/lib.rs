//! Pocdex Core - the pure side of indexing
//!
//! This crate knows how to decide whether a file name is indexed, what
//! identifier and URL it gets, and how the resulting document is stored.
//! It never walks a directory; see `pocdex-walker` for that.
//!
//! # Example
//!
//! ```
//! use pocdex_core::{entry_url, FilenameFilter, PocIndex};
//! use std::path::Path;
//!
//! let filter = FilenameFilter::default();
//! let rel = Path::new("2024/CVE-2024-00001.json");
//!
//! let mut index = PocIndex::new();
//! if let Some(id) = filter.identifier_for_path(rel) {
//!     index.insert(id, entry_url("https://example.test/base", rel));
//! }
//! assert_eq!(index.len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod index;
pub mod url;

pub use config::{IndexConfig, CONFIG_FILE_NAME, DEFAULT_ROOT};
pub use error::{IndexError, Result};
pub use filter::{FilenameFilter, DEFAULT_PREFIX, DEFAULT_SUFFIX};
pub use index::{PocIndex, DEFAULT_OUTPUT};
pub use url::{entry_url, relative_url_path, DEFAULT_BASE_URL};
