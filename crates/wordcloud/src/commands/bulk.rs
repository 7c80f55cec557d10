//! Bulk command: wordclouds for a list of documents.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use wordcloud_core::LanguageCatalog;
use wordcloud_core::input::batch_from_value;

use super::{ranked, read_json_file};

/// Number of terms shown per document in text output.
const PREVIEW_TERMS: usize = 5;

/// Arguments for the `bulk` subcommand.
#[derive(Args, Debug)]
pub struct BulkArgs {
    /// JSON file holding an array of term -> count objects.
    pub file: Utf8PathBuf,

    /// Language to score against (a folder name such as "Spanish").
    #[arg(short, long)]
    pub language: String,
}

/// Score every document in the file, in order.
#[instrument(name = "cmd_bulk", skip_all, fields(file = %args.file, language = %args.language))]
pub fn cmd_bulk(
    args: BulkArgs,
    global_json: bool,
    catalog: &LanguageCatalog,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, language = %args.language, "executing bulk command");

    let value: serde_json::Value = read_json_file(&args.file, max_input_bytes)?;
    anyhow::ensure!(
        value.is_array(),
        "expected a JSON array of term count objects in {}",
        args.file
    );
    let documents = batch_from_value(value);
    let batch = catalog.score_batch(&args.language, &documents)?;

    debug!(documents = batch.len(), "batch scored");

    if global_json {
        println!("{}", serde_json::to_string_pretty(&batch)?);
        return Ok(());
    }

    for (i, cloud) in batch.iter().enumerate() {
        let preview: Vec<String> = ranked(cloud)
            .into_iter()
            .take(PREVIEW_TERMS)
            .map(|(term, s)| format!("{term} ({:.3})", s.tfidf))
            .collect();
        println!(
            "{} {} {}  {}",
            format!("#{i}").bold(),
            cloud.len(),
            "terms".dimmed(),
            preview.join(", "),
        );
    }

    Ok(())
}
