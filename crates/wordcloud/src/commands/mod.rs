//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;
use indicatif::{ProgressBar, ProgressStyle};
use serde::de::DeserializeOwned;
use wordcloud_core::{LanguageCatalog, TermScore, Wordcloud, discover_languages};

pub mod bulk;
pub mod info;
pub mod languages;
pub mod score;
#[cfg(feature = "mcp")]
pub mod serve;
#[cfg(feature = "http")]
pub mod serve_http;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Read a JSON input file into `T`.
pub fn read_json_file<T: DeserializeOwned>(
    path: &Utf8Path,
    max_bytes: Option<usize>,
) -> anyhow::Result<T> {
    let content = read_input_file(path, max_bytes)?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse JSON in {path}"))
}

/// Discover and load every language under `data_dir`.
///
/// Shows a progress bar on stderr while loading when `show_progress` is set
/// and stderr is a terminal.
pub fn load_catalog(
    data_dir: &Utf8Path,
    stopword_limit: usize,
    show_progress: bool,
) -> LanguageCatalog {
    let folders = discover_languages(data_dir);

    let progress = if show_progress {
        ProgressBar::new(folders.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::with_template("{spinner} loading {msg} [{pos}/{len}]") {
        progress.set_style(style);
    }

    let catalog = LanguageCatalog::from_folders(
        folders.into_iter().inspect(|folder| {
            progress.set_message(folder.name.clone());
            progress.inc(1);
        }),
        stopword_limit,
    );
    progress.finish_and_clear();

    tracing::info!(data_dir = %data_dir, languages = catalog.len(), "language catalog loaded");
    catalog
}

/// Terms of a wordcloud ordered by descending tf-idf, ties broken by term.
pub fn ranked(cloud: &Wordcloud) -> Vec<(&str, &TermScore)> {
    let mut terms: Vec<(&str, &TermScore)> =
        cloud.iter().map(|(term, s)| (term.as_str(), s)).collect();
    terms.sort_by(|a, b| b.1.tfidf.total_cmp(&a.1.tfidf).then_with(|| a.0.cmp(b.0)));
    terms
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn read_input_file_rejects_oversized_files() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("tfs.json")).unwrap();
        fs::write(&path, r#"{"casa": 1}"#).unwrap();

        assert!(read_input_file(&path, Some(4)).is_err());
        assert!(read_input_file(&path, Some(1024)).is_ok());
        assert!(read_input_file(&path, None).is_ok());
    }

    #[test]
    fn read_json_file_reports_parse_errors() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("tfs.json")).unwrap();
        fs::write(&path, "not json").unwrap();

        let err = read_json_file::<wordcloud_core::RawTermFrequencies>(&path, None).unwrap_err();
        assert!(err.to_string().contains("failed to parse JSON"));
    }

    #[test]
    fn load_catalog_without_progress() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("Spanish")).unwrap();
        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();

        let catalog = load_catalog(&root, 300, false);
        assert_eq!(catalog.languages().collect::<Vec<_>>(), vec!["Spanish"]);
    }

    #[test]
    fn ranked_orders_by_tfidf_then_term() {
        let mut cloud = Wordcloud::new();
        for (term, tfidf) in [("b", 1.0), ("a", 1.0), ("c", 3.0), ("d", -1.0)] {
            cloud.insert(
                term.to_string(),
                TermScore {
                    tf: 1.0,
                    df: 0.0,
                    tfidf,
                },
            );
        }

        let order: Vec<&str> = ranked(&cloud).into_iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec!["c", "a", "b", "d"]);
    }
}
