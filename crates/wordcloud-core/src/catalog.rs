//! The language catalog: every loaded language, by name.
//!
//! Built once at startup and never mutated afterwards. Share it between
//! request handlers as `Arc<LanguageCatalog>`; reads need no locking.

use std::collections::BTreeMap;

use camino::Utf8Path;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::discovery::{Folder, discover_languages};
use crate::error::{ScoreError, ScoreResult};
use crate::score::{self, RawTermFrequencies, Wordcloud, WordcloudBatch};
use crate::stats::{LanguageStats, load_language_stats};

/// Read-only mapping from language name to its statistics.
#[derive(Debug, Clone, Default)]
pub struct LanguageCatalog {
    languages: BTreeMap<String, LanguageStats>,
}

/// Size summary of one loaded language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LanguageSummary {
    /// Language name (the folder name).
    pub name: String,
    /// Number of distinct terms with a document frequency.
    pub terms: usize,
    /// Number of stopwords in effect.
    pub stopwords: usize,
    /// Corpus document count.
    pub num_docs: u64,
}

impl LanguageCatalog {
    /// Discover every language folder under `root` and load each one.
    ///
    /// An unreadable root gives an empty catalog.
    #[tracing::instrument(skip_all, fields(root = %root.as_ref(), stopword_limit = stopword_limit))]
    pub fn load<P: AsRef<Utf8Path>>(root: P, stopword_limit: usize) -> Self {
        let catalog = Self::from_folders(discover_languages(root), stopword_limit);
        tracing::info!(languages = catalog.len(), "language catalog loaded");
        catalog
    }

    /// Load the given folders. Later folders with a duplicate name win.
    pub fn from_folders<I: IntoIterator<Item = Folder>>(folders: I, stopword_limit: usize) -> Self {
        folders
            .into_iter()
            .map(|folder| {
                tracing::info!(language = %folder.name, directory = %folder.path, "loading language");
                let stats = load_language_stats(&folder.path, stopword_limit);
                (folder.name, stats)
            })
            .collect()
    }

    /// Statistics for `language`, if loaded. Names are case-sensitive.
    pub fn get(&self, language: &str) -> Option<&LanguageStats> {
        self.languages.get(language)
    }

    /// Statistics for `language`, or [`ScoreError::UnknownLanguage`].
    pub fn require(&self, language: &str) -> ScoreResult<&LanguageStats> {
        self.get(language).ok_or_else(|| ScoreError::UnknownLanguage {
            name: language.to_string(),
        })
    }

    /// Names of all loaded languages, sorted.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Per-language size summaries, sorted by name.
    pub fn summaries(&self) -> Vec<LanguageSummary> {
        self.languages
            .iter()
            .map(|(name, stats)| LanguageSummary {
                name: name.clone(),
                terms: stats.doc_frequencies().len(),
                stopwords: stats.stopwords().len(),
                num_docs: stats.num_docs(),
            })
            .collect()
    }

    /// Number of loaded languages.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Whether no language is loaded.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Score one document in `language`.
    pub fn score(&self, language: &str, raw: &RawTermFrequencies) -> ScoreResult<Wordcloud> {
        let stats = self.require(language)?;
        Ok(score::score(raw, stats))
    }

    /// Score a batch of documents in `language`, preserving order.
    pub fn score_batch(
        &self,
        language: &str,
        documents: &[RawTermFrequencies],
    ) -> ScoreResult<WordcloudBatch> {
        let stats = self.require(language)?;
        Ok(score::score_batch(documents, stats))
    }
}

impl FromIterator<(String, LanguageStats)> for LanguageCatalog {
    fn from_iter<T: IntoIterator<Item = (String, LanguageStats)>>(iter: T) -> Self {
        Self {
            languages: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn data_root() -> TempDir {
        let tmp = TempDir::new().unwrap();

        let spanish = tmp.path().join("Spanish");
        fs::create_dir(&spanish).unwrap();
        fs::write(spanish.join("docfreqs.txt"), "biblioteca 5\ncasa 2\n").unwrap();
        fs::write(spanish.join("stopwords.txt"), "de\nla\nque\n").unwrap();
        fs::write(spanish.join("numdocs.txt"), "100\n").unwrap();

        fs::create_dir(tmp.path().join("English")).unwrap();
        fs::create_dir(tmp.path().join("english")).unwrap();
        fs::create_dir(tmp.path().join("FR2")).unwrap();
        tmp
    }

    fn load(tmp: &TempDir, limit: usize) -> LanguageCatalog {
        let root = camino::Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        LanguageCatalog::load(&root, limit)
    }

    #[test]
    fn loads_each_discovered_language() {
        let tmp = data_root();
        let catalog = load(&tmp, 300);

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.languages().collect::<Vec<_>>(),
            vec!["English", "Spanish"]
        );
        assert_eq!(catalog.get("Spanish").unwrap().num_docs(), 100);
        assert_eq!(catalog.get("English").unwrap(), &LanguageStats::default());
    }

    #[test]
    fn language_lookup_is_case_sensitive() {
        let tmp = data_root();
        let catalog = load(&tmp, 300);

        assert!(catalog.get("spanish").is_none());
        assert!(matches!(
            catalog.require("spanish"),
            Err(ScoreError::UnknownLanguage { ref name }) if name == "spanish"
        ));
    }

    #[test]
    fn stopword_limit_applies_to_every_language() {
        let tmp = data_root();
        let catalog = load(&tmp, 2);

        let spanish = catalog.get("Spanish").unwrap();
        assert_eq!(spanish.stopwords().len(), 2);
        assert!(!spanish.is_stopword("que"));
    }

    #[test]
    fn missing_root_gives_empty_catalog() {
        let tmp = TempDir::new().unwrap();
        let root = camino::Utf8PathBuf::try_from(tmp.path().join("missing")).unwrap();

        let catalog = LanguageCatalog::load(&root, 300);
        assert!(catalog.is_empty());
        assert!(catalog.summaries().is_empty());
    }

    #[test]
    fn summaries_report_sizes() {
        let tmp = data_root();
        let summaries = load(&tmp, 300).summaries();

        assert_eq!(
            summaries[1],
            LanguageSummary {
                name: "Spanish".to_string(),
                terms: 2,
                stopwords: 3,
                num_docs: 100,
            }
        );
    }

    #[test]
    fn scores_through_the_catalog() {
        let tmp = data_root();
        let catalog = load(&tmp, 300);
        let tfs = HashMap::from([("Biblioteca".to_string(), 1), ("de".to_string(), 3)]);

        let cloud = catalog.score("Spanish", &tfs).unwrap();

        assert_eq!(cloud.len(), 1);
        assert!((cloud["biblioteca"].tfidf - (100.0f64 / 6.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn unknown_language_is_reported_for_single_and_batch() {
        let catalog = LanguageCatalog::default();
        let tfs = HashMap::from([("casa".to_string(), 1)]);

        assert!(catalog.score("Spanish", &tfs).is_err());
        assert!(catalog.score_batch("Spanish", &[tfs]).is_err());
    }

    #[test]
    fn batch_through_the_catalog_preserves_order() {
        let tmp = data_root();
        let catalog = load(&tmp, 300);
        let docs = vec![
            HashMap::from([("casa".to_string(), 1)]),
            HashMap::from([("biblioteca".to_string(), 2)]),
        ];

        let batch = catalog.score_batch("Spanish", &docs).unwrap();

        assert_eq!(batch.len(), 2);
        assert!(batch[0].contains_key("casa"));
        assert!(batch[1].contains_key("biblioteca"));
    }

    #[test]
    fn built_from_pairs() {
        let catalog: LanguageCatalog = [("Latin".to_string(), LanguageStats::default())]
            .into_iter()
            .collect();
        assert_eq!(catalog.languages().collect::<Vec<_>>(), vec!["Latin"]);
    }
}
