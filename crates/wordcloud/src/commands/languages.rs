//! Languages command: list what the data directory provides.

use camino::Utf8Path;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use wordcloud_core::LanguageCatalog;

/// Arguments for the `languages` subcommand.
#[derive(Args, Debug, Default)]
pub struct LanguagesArgs {
    /// Print only the language names, one per line
    #[arg(long)]
    pub names_only: bool,
}

/// List loaded languages with their statistics sizes.
#[instrument(name = "cmd_languages", skip_all, fields(data_dir = %data_dir))]
pub fn cmd_languages(
    args: LanguagesArgs,
    global_json: bool,
    catalog: &LanguageCatalog,
    data_dir: &Utf8Path,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing languages command");

    if global_json {
        if args.names_only {
            let names: Vec<&str> = catalog.languages().collect();
            println!("{}", serde_json::to_string_pretty(&names)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&catalog.summaries())?);
        }
        return Ok(());
    }

    if catalog.is_empty() {
        eprintln!(
            "{} no language folders found in {}",
            "warning:".yellow(),
            data_dir
        );
        return Ok(());
    }

    if args.names_only {
        for name in catalog.languages() {
            println!("{name}");
        }
        return Ok(());
    }

    for summary in catalog.summaries() {
        println!(
            "{}  {} {}  {} {}  {} {}",
            summary.name.bold(),
            "terms".dimmed(),
            summary.terms,
            "stopwords".dimmed(),
            summary.stopwords,
            "docs".dimmed(),
            summary.num_docs,
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_catalog_is_not_an_error() {
        let catalog = LanguageCatalog::default();
        let dir = Utf8Path::new("/nonexistent");
        assert!(cmd_languages(LanguagesArgs::default(), false, &catalog, dir).is_ok());
        assert!(cmd_languages(LanguagesArgs::default(), true, &catalog, dir).is_ok());
    }
}
