//! URL construction for index entries.
//!
//! URLs are a straight concatenation of the base address and the
//! root-relative path. Nothing is percent-encoded.

use std::path::{Component, Path};

/// Default base address for raw file access.
pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/nomi-sec/PoC-in-GitHub/master";

/// Renders a relative path with `/` separators on every platform.
pub fn relative_url_path(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Builds the URL for a file at `rel` under the indexed root.
///
/// ```
/// use pocdex_core::entry_url;
/// use std::path::Path;
///
/// let url = entry_url("https://example.test/base", Path::new("2024/CVE-2024-00001.json"));
/// assert_eq!(url, "https://example.test/base/2024/CVE-2024-00001.json");
/// ```
pub fn entry_url(base_url: &str, rel: &Path) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    format!("{}/{}", base, relative_url_path(rel))
}
