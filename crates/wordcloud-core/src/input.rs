//! Decoding caller-supplied term counts.
//!
//! Callers send term frequencies as JSON objects of term -> count. Entries
//! are kept one at a time: a value that is not an integer drops that term
//! only, never the whole document.

use serde_json::Value;

use crate::score::RawTermFrequencies;

/// Keep the entries whose value is an integer that fits in an `i64`.
///
/// Negative counts are kept here; scoring drops them.
pub fn retain_counts<I>(entries: I) -> RawTermFrequencies
where
    I: IntoIterator<Item = (String, Value)>,
{
    let mut dropped = 0usize;
    let counts: RawTermFrequencies = entries
        .into_iter()
        .filter_map(|(term, value)| match value.as_i64() {
            Some(count) => Some((term, count)),
            None => {
                dropped += 1;
                None
            }
        })
        .collect();
    if dropped > 0 {
        tracing::debug!(dropped, kept = counts.len(), "ignored non-integer term counts");
    }
    counts
}

/// Term counts from one JSON value. Anything but an object is an empty
/// document.
pub fn term_frequencies_from_value(value: Value) -> RawTermFrequencies {
    match value {
        Value::Object(map) => retain_counts(map),
        _ => RawTermFrequencies::new(),
    }
}

/// One document per array element, in order. Anything but an array is an
/// empty batch; elements that are not objects become empty documents.
pub fn batch_from_value(value: Value) -> Vec<RawTermFrequencies> {
    match value {
        Value::Array(items) => items.into_iter().map(term_frequencies_from_value).collect(),
        _ => Vec::new(),
    }
}

/// Decode JSON text as one document, scoring undecodable text as empty.
pub fn parse_term_frequencies(text: &str) -> RawTermFrequencies {
    serde_json::from_str(text).map_or_else(
        |e| {
            tracing::debug!(error = %e, "undecodable term counts, using an empty document");
            RawTermFrequencies::new()
        },
        term_frequencies_from_value,
    )
}

/// Decode JSON text as a batch, treating undecodable text as an empty batch.
pub fn parse_batch(text: &str) -> Vec<RawTermFrequencies> {
    serde_json::from_str(text).map_or_else(
        |e| {
            tracing::debug!(error = %e, "undecodable batch, using an empty list");
            Vec::new()
        },
        batch_from_value,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrongly_typed_entry_drops_only_that_term() {
        let tfs = parse_term_frequencies(r#"{"casa": 2, "perro": "x", "gato": 1.5, "sol": null}"#);

        assert_eq!(tfs.len(), 1);
        assert_eq!(tfs["casa"], 2);
    }

    #[test]
    fn negative_counts_survive_decoding() {
        let tfs = term_frequencies_from_value(json!({"menos": -3, "uno": 1}));
        assert_eq!(tfs["menos"], -3);
        assert_eq!(tfs["uno"], 1);
    }

    #[test]
    fn non_object_is_an_empty_document() {
        assert!(term_frequencies_from_value(json!([1, 2])).is_empty());
        assert!(parse_term_frequencies("not json").is_empty());
    }

    #[test]
    fn batch_keeps_positions_of_bad_elements() {
        let batch = parse_batch(r#"[{"casa": 2}, "oops", {"sol": "x", "luna": 4}]"#);

        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0]["casa"], 2);
        assert!(batch[1].is_empty());
        assert_eq!(batch[2].len(), 1);
        assert_eq!(batch[2]["luna"], 4);
    }

    #[test]
    fn non_array_batch_is_empty() {
        assert!(parse_batch(r#"{"casa": 2}"#).is_empty());
        assert!(parse_batch("").is_empty());
    }
}
