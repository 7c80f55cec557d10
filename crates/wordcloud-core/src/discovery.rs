//! Language folder discovery.
//!
//! A data root holds one subdirectory per language, named with a single
//! capitalized word (`Spanish`, `English`). Everything else in the root is
//! ignored.

use std::sync::LazyLock;

use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;

/// One uppercase ASCII letter followed by one or more lowercase ASCII letters.
static LANGUAGE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Z][a-z]+$").expect("valid regex"));

/// A discovered language directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Folder {
    /// Directory basename, which doubles as the language name.
    pub name: String,
    /// Absolute path to the directory.
    pub path: Utf8PathBuf,
}

/// Returns `true` if `name` is a valid language folder name.
pub fn is_language_name(name: &str) -> bool {
    LANGUAGE_NAME.is_match(name)
}

/// Find the language folders directly under `root`.
///
/// Only immediate subdirectories are considered; there is no recursion.
/// Symlinks are not followed. An unreadable root yields an empty list so
/// that startup degrades to "no languages available" instead of failing.
///
/// The result is sorted by name.
#[tracing::instrument(skip_all, fields(root = %root.as_ref()))]
pub fn discover_languages<P: AsRef<Utf8Path>>(root: P) -> Vec<Folder> {
    let root = absolute(root.as_ref());

    let entries = match root.read_dir_utf8() {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(root = %root, error = %e, "cannot read language data directory");
            return Vec::new();
        }
    };

    let mut folders: Vec<Folder> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(root = %root, error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_ok_and(|ft| ft.is_dir()))
        .filter(|entry| is_language_name(entry.file_name()))
        .map(|entry| Folder {
            name: entry.file_name().to_string(),
            path: root.join(entry.file_name()),
        })
        .collect();

    folders.sort();
    tracing::debug!(count = folders.len(), "discovered language folders");
    folders
}

/// Make `path` absolute against the current directory, without touching the
/// filesystem. Falls back to the path as given when that is not possible.
fn absolute(path: &Utf8Path) -> Utf8PathBuf {
    std::path::absolute(path)
        .ok()
        .and_then(|abs| Utf8PathBuf::from_path_buf(abs).ok())
        .unwrap_or_else(|| path.to_path_buf())
}
