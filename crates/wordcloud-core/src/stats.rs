//! Per-language corpus statistics and their loader.
//!
//! Each language directory may contain three plain-text convention files:
//!
//! | File            | Line format        | Meaning                              |
//! |-----------------|--------------------|--------------------------------------|
//! | `docfreqs.txt`  | `<term> <float>`   | document frequency, summed per term  |
//! | `stopwords.txt` | `<term>`           | excluded term, first N lines only    |
//! | `numdocs.txt`   | `<int>`            | corpus size, first valid line only   |
//!
//! Every file is optional. A missing, unreadable, or malformed file weakens
//! the statistics instead of failing the load.

use std::collections::{HashMap, HashSet};
use std::io;

use camino::Utf8Path;

/// File holding `<term> <float>` document frequency lines.
pub const DOCFREQS_FILE: &str = "docfreqs.txt";

/// File holding one stopword per line.
pub const STOPWORDS_FILE: &str = "stopwords.txt";

/// File whose first line holds the corpus document count.
pub const NUMDOCS_FILE: &str = "numdocs.txt";

/// Corpus statistics for one language.
///
/// Immutable once built: every term is lowercased, the stopword set is
/// already capped, and `num_docs` is at least 1.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageStats {
    doc_frequencies: HashMap<String, f64>,
    stopwords: HashSet<String>,
    num_docs: u64,
}

impl Default for LanguageStats {
    fn default() -> Self {
        Self {
            doc_frequencies: HashMap::new(),
            stopwords: HashSet::new(),
            num_docs: 1,
        }
    }
}

impl LanguageStats {
    /// Build statistics from already-parsed parts.
    ///
    /// Terms are lowercased (colliding document frequencies are summed) and
    /// a `num_docs` of zero is raised to 1.
    pub fn new<D, S>(doc_frequencies: D, stopwords: S, num_docs: u64) -> Self
    where
        D: IntoIterator<Item = (String, f64)>,
        S: IntoIterator<Item = String>,
    {
        let mut freqs: HashMap<String, f64> = HashMap::new();
        for (term, df) in doc_frequencies {
            *freqs.entry(term.to_lowercase()).or_insert(0.0) += df;
        }
        Self {
            doc_frequencies: freqs,
            stopwords: stopwords.into_iter().map(|w| w.to_lowercase()).collect(),
            num_docs: num_docs.max(1),
        }
    }

    /// Accumulated document frequency of `term`, or `0.0` if the corpus
    /// never saw it. `term` must already be lowercase.
    pub fn doc_frequency(&self, term: &str) -> f64 {
        self.doc_frequencies.get(term).copied().unwrap_or(0.0)
    }

    /// Whether `term` (already lowercase) is a stopword.
    pub fn is_stopword(&self, term: &str) -> bool {
        self.stopwords.contains(term)
    }

    /// Number of documents in the reference corpus. Never less than 1.
    pub const fn num_docs(&self) -> u64 {
        self.num_docs
    }

    /// All document frequencies, keyed by lowercase term.
    pub const fn doc_frequencies(&self) -> &HashMap<String, f64> {
        &self.doc_frequencies
    }

    /// The stopword set.
    pub const fn stopwords(&self) -> &HashSet<String> {
        &self.stopwords
    }
}

/// Load a language's statistics from its directory.
///
/// Reads [`DOCFREQS_FILE`], [`STOPWORDS_FILE`], and [`NUMDOCS_FILE`]. At most
/// `stopword_limit` stopwords are kept, taken in file order. This function
/// never fails: each file that cannot be read falls back to an empty table,
/// an empty set, or a corpus size of 1.
#[tracing::instrument(skip_all, fields(dir = %dir.as_ref(), stopword_limit = stopword_limit))]
pub fn load_language_stats<P: AsRef<Utf8Path>>(dir: P, stopword_limit: usize) -> LanguageStats {
    let dir = dir.as_ref();

    let doc_frequencies = read_convention_file(dir, DOCFREQS_FILE)
        .map(|content| parse_doc_frequencies(&content))
        .unwrap_or_default();

    let stopwords = read_convention_file(dir, STOPWORDS_FILE)
        .map(|content| parse_stopwords(&content, stopword_limit))
        .unwrap_or_default();

    let num_docs = read_convention_file(dir, NUMDOCS_FILE)
        .map_or(1, |content| parse_num_docs(&content));

    tracing::debug!(
        terms = doc_frequencies.len(),
        stopwords = stopwords.len(),
        num_docs,
        "loaded language statistics"
    );

    LanguageStats {
        doc_frequencies,
        stopwords,
        num_docs,
    }
}

/// Read one convention file, logging and swallowing any failure.
///
/// Bytes that are not UTF-8 are replaced rather than rejected, so one badly
/// encoded line costs only that line.
fn read_convention_file(dir: &Utf8Path, name: &str) -> Option<String> {
    let path = dir.join(name);
    match std::fs::read(path.as_std_path()) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path, "convention file not present");
            None
        }
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "cannot read convention file, using defaults");
            None
        }
    }
}

/// Parse `<term> <float>` lines into a lowercase term table.
///
/// Lines that do not split into exactly two fields are ignored. A second
/// field that is not a number counts as `0.0`. Repeated terms are summed.
pub fn parse_doc_frequencies(content: &str) -> HashMap<String, f64> {
    let mut freqs: HashMap<String, f64> = HashMap::new();
    for line in content.lines() {
        let mut fields = line.split_whitespace();
        let (Some(term), Some(value), None) = (fields.next(), fields.next(), fields.next()) else {
            continue;
        };
        let df = value.parse::<f64>().unwrap_or(0.0);
        *freqs.entry(term.to_lowercase()).or_insert(0.0) += df;
    }
    freqs
}

/// Parse one-term-per-line stopwords, keeping the first `limit` entries.
///
/// Lines holding anything other than a single token are skipped and do not
/// count toward the limit.
pub fn parse_stopwords(content: &str, limit: usize) -> HashSet<String> {
    content
        .lines()
        .filter_map(single_token)
        .take(limit)
        .map(str::to_lowercase)
        .collect()
}

/// Parse the corpus size from the first single-token line.
///
/// Only that line is consulted. Anything that is not a positive integer
/// gives 1.
pub fn parse_num_docs(content: &str) -> u64 {
    content
        .lines()
        .find_map(single_token)
        .and_then(|token| token.parse::<u64>().ok())
        .filter(|&n| n >= 1)
        .unwrap_or(1)
}

fn single_token(line: &str) -> Option<&str> {
    let mut fields = line.split_whitespace();
    match (fields.next(), fields.next()) {
        (Some(token), None) => Some(token),
        _ => None,
    }
}
