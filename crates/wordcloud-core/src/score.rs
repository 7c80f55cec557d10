//! TF-IDF scoring.
//!
//! For every term that survives stopword removal with a count of at least 1:
//!
//! ```text
//! tf    = 1 + ln(count)
//! df    = document frequency from the corpus (0.0 when unseen)
//! idf   = ln(num_docs / (1 + df))
//! tfidf = tf * idf
//! ```
//!
//! `idf` goes negative when `df + 1` exceeds `num_docs`. That is left as is.

use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::stats::LanguageStats;

/// One document's term counts, as supplied by a caller. Keys may be in any case.
pub type RawTermFrequencies = HashMap<String, i64>;

/// Scores for each surviving term of one document, keyed by lowercase term.
pub type Wordcloud = BTreeMap<String, TermScore>;

/// One wordcloud per input document, in input order.
pub type WordcloudBatch = Vec<Wordcloud>;

/// Scores for a single term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TermScore {
    /// Log-dampened term frequency, `1 + ln(count)`.
    pub tf: f64,
    /// Document frequency of the term in the reference corpus.
    pub df: f64,
    /// `tf * ln(num_docs / (1 + df))`.
    pub tfidf: f64,
}

/// Score one document against a language's statistics.
///
/// Keys are lowercased first; keys that collide after lowercasing have their
/// counts summed. Stopwords are dropped, as is every term whose count is
/// below 1 (zero and negative counts never reach the logarithm).
pub fn score(raw: &RawTermFrequencies, stats: &LanguageStats) -> Wordcloud {
    let mut counts: HashMap<String, i64> = HashMap::with_capacity(raw.len());
    for (term, &count) in raw {
        let slot = counts.entry(term.to_lowercase()).or_insert(0);
        *slot = slot.saturating_add(count);
    }

    let num_docs = stats.num_docs() as f64;
    counts
        .into_iter()
        .filter(|(term, count)| *count >= 1 && !stats.is_stopword(term))
        .map(|(term, count)| {
            let tf = 1.0 + (count as f64).ln();
            let df = stats.doc_frequency(&term);
            let idf = (num_docs / (1.0 + df)).ln();
            (
                term,
                TermScore {
                    tf,
                    df,
                    tfidf: tf * idf,
                },
            )
        })
        .collect()
}

/// Score each document independently, preserving order.
///
/// Documents are scored in parallel; element `i` of the result is exactly
/// `score(&documents[i], stats)`.
#[tracing::instrument(skip_all, fields(documents = documents.len()))]
pub fn score_batch(documents: &[RawTermFrequencies], stats: &LanguageStats) -> WordcloudBatch {
    documents.par_iter().map(|doc| score(doc, stats)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(freqs: &[(&str, f64)], stopwords: &[&str], num_docs: u64) -> LanguageStats {
        LanguageStats::new(
            freqs.iter().map(|(t, df)| ((*t).to_string(), *df)),
            stopwords.iter().map(|w| (*w).to_string()),
            num_docs,
        )
    }

    fn doc(entries: &[(&str, i64)]) -> RawTermFrequencies {
        entries
            .iter()
            .map(|(t, c)| ((*t).to_string(), *c))
            .collect()
    }

    #[test]
    fn scores_a_single_known_term() {
        let stats = stats(&[("biblioteca", 5.0)], &[], 100);
        let cloud = score(&doc(&[("Biblioteca", 1)]), &stats);

        assert_eq!(cloud.len(), 1);
        let s = cloud["biblioteca"];
        assert_eq!(s.tf, 1.0);
        assert_eq!(s.df, 5.0);
        assert!((s.tfidf - (100.0f64 / 6.0).ln()).abs() < 1e-12);
        assert!((s.tfidf - 2.813).abs() < 1e-3);
    }

    #[test]
    fn count_of_one_gives_tf_of_exactly_one() {
        let cloud = score(&doc(&[("uno", 1), ("dos", 1)]), &LanguageStats::default());
        assert!(cloud.values().all(|s| s.tf == 1.0));
    }

    #[test]
    fn tf_is_log_dampened() {
        let cloud = score(&doc(&[("casa", 10)]), &LanguageStats::default());
        assert!((cloud["casa"].tf - (1.0 + 10f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn unknown_term_has_zero_df_and_still_scores() {
        let stats = stats(&[], &[], 50);
        let cloud = score(&doc(&[("nuevo", 2)]), &stats);

        let s = cloud["nuevo"];
        assert_eq!(s.df, 0.0);
        assert!((s.tfidf - (1.0 + 2f64.ln()) * 50f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn stopwords_are_removed_case_insensitively() {
        let stats = stats(&[], &["de", "la"], 10);
        let cloud = score(&doc(&[("De", 4), ("LA", 2), ("casa", 1)]), &stats);

        assert_eq!(cloud.keys().collect::<Vec<_>>(), vec!["casa"]);
    }

    #[test]
    fn keys_colliding_after_lowercasing_are_summed() {
        let cloud = score(
            &doc(&[("Casa", 2), ("CASA", 3), ("casa", 5)]),
            &LanguageStats::default(),
        );

        assert_eq!(cloud.len(), 1);
        assert!((cloud["casa"].tf - (1.0 + 10f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn zero_and_negative_counts_are_excluded() {
        let cloud = score(
            &doc(&[("cero", 0), ("menos", -3), ("uno", 1)]),
            &LanguageStats::default(),
        );

        assert_eq!(cloud.keys().collect::<Vec<_>>(), vec!["uno"]);
        assert!(cloud.values().all(|s| s.tf.is_finite()));
    }

    #[test]
    fn negative_count_can_cancel_a_colliding_positive_one() {
        let cloud = score(&doc(&[("Casa", 2), ("casa", -2)]), &LanguageStats::default());
        assert!(cloud.is_empty());
    }

    #[test]
    fn common_terms_get_negative_idf() {
        let stats = stats(&[("el", 200.0)], &[], 100);
        let cloud = score(&doc(&[("el", 3)]), &stats);

        assert!(cloud["el"].tfidf < 0.0);
    }

    #[test]
    fn output_keys_are_lowercase_and_not_stopwords() {
        let stats = stats(&[("río", 2.0)], &["y", "el"], 30);
        let cloud = score(
            &doc(&[("Río", 2), ("Y", 1), ("ÁRBOL", 3), ("El", 9), ("Sol", 1)]),
            &stats,
        );

        for key in cloud.keys() {
            assert_eq!(key, &key.to_lowercase());
            assert!(!stats.is_stopword(key));
        }
        assert_eq!(cloud.len(), 3);
        assert_eq!(cloud["río"].df, 2.0);
    }

    #[test]
    fn empty_document_gives_empty_wordcloud() {
        assert!(score(&RawTermFrequencies::new(), &LanguageStats::default()).is_empty());
    }

    #[test]
    fn batch_matches_individual_scores_in_order() {
        let stats = stats(&[("casa", 3.0), ("perro", 1.0)], &["de"], 20);
        let docs = vec![
            doc(&[("casa", 2)]),
            doc(&[]),
            doc(&[("Perro", 1), ("de", 5)]),
            doc(&[("gato", 7), ("casa", 1)]),
        ];

        let batch = score_batch(&docs, &stats);

        assert_eq!(batch.len(), docs.len());
        for (i, cloud) in batch.iter().enumerate() {
            assert_eq!(cloud, &score(&docs[i], &stats), "document {i}");
        }
        assert!(batch[1].is_empty());
    }

    #[test]
    fn empty_batch_gives_empty_output() {
        assert!(score_batch(&[], &LanguageStats::default()).is_empty());
    }

    #[test]
    fn term_score_serializes_with_short_field_names() {
        let s = TermScore {
            tf: 1.0,
            df: 5.0,
            tfidf: 2.5,
        };
        let json = serde_json::to_value(s).unwrap();
        assert_eq!(json, serde_json::json!({"tf": 1.0, "df": 5.0, "tfidf": 2.5}));
    }
}
