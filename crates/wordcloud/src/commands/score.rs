//! Score command: wordcloud for a single document.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use wordcloud_core::LanguageCatalog;
use wordcloud_core::input::term_frequencies_from_value;

use super::{ranked, read_json_file};

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// JSON file holding an object of term -> count.
    pub file: Utf8PathBuf,

    /// Language to score against (a folder name such as "Spanish").
    #[arg(short, long)]
    pub language: String,

    /// Show only the N highest-scoring terms (text output only).
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

/// Score one document's term frequencies against a language.
#[instrument(name = "cmd_score", skip_all, fields(file = %args.file, language = %args.language))]
pub fn cmd_score(
    args: ScoreArgs,
    global_json: bool,
    catalog: &LanguageCatalog,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, language = %args.language, "executing score command");

    let value: serde_json::Value = read_json_file(&args.file, max_input_bytes)?;
    anyhow::ensure!(
        value.is_object(),
        "expected a JSON object of term counts in {}",
        args.file
    );
    let tfs = term_frequencies_from_value(value);
    let cloud = catalog.score(&args.language, &tfs)?;

    debug!(input_terms = tfs.len(), scored_terms = cloud.len(), "document scored");

    if global_json {
        println!("{}", serde_json::to_string_pretty(&cloud)?);
        return Ok(());
    }

    let limit = args.top.unwrap_or(usize::MAX);
    let rows = ranked(&cloud);
    let width = rows.iter().take(limit).map(|(t, _)| t.chars().count()).max().unwrap_or(4);

    println!(
        "{:<width$}  {:>8}  {:>10}  {:>9}",
        "term".bold(),
        "tf".bold(),
        "df".bold(),
        "tfidf".bold(),
    );
    for (term, s) in rows.into_iter().take(limit) {
        println!(
            "{term:<width$}  {:>8.3}  {:>10.3}  {:>9}",
            s.tf,
            s.df,
            format!("{:.3}", s.tfidf).green(),
        );
    }

    Ok(())
}
