//! Library interface for the `wordcloud` CLI.
//!
//! This crate exposes the CLI's argument parser and command structure as a library,
//! primarily for documentation generation and testing. The actual entry point is
//! in `main.rs`.
//!
//! # Structure
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`Commands`] - Available subcommands
//! - [`commands`] - Command implementations
//! - `server` - MCP server over stdio (feature `mcp`)
//! - `http` - HTTP wordcloud service (feature `http`)

pub mod commands;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "mcp")]
pub mod server;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Configure global color output based on this choice.
    ///
    /// Call this once at startup to set the color mode.
    pub fn apply(self) {
        match self {
            Self::Auto => {} // owo-colors auto-detects by default
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                    Log filter (e.g., debug, wordcloud=trace)
    WORDCLOUD_LOG_PATH          Explicit log file path
    WORDCLOUD_LOG_DIR           Log directory
    WORDCLOUD_DATA_DIR          Language data directory
    WORDCLOUD_NUM_STOPWORDS     Stopwords read per language
";
/// Command-line interface definition for wordcloud.
#[derive(Parser)]
#[command(name = "wordcloud")]
#[command(about = "TF-IDF wordclouds scored against per-language corpus statistics", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Directory of language data (one capitalized folder per language)
    #[arg(long, global = true, value_name = "DIR")]
    pub datadir: Option<PathBuf>,

    /// Number of stopwords to read per language
    #[arg(long, global = true, value_name = "N")]
    pub numstopwords: Option<usize>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// List the languages found in the data directory
    Languages(commands::languages::LanguagesArgs),

    /// Score one document's term frequencies
    Score(commands::score::ScoreArgs),

    /// Score a list of documents' term frequencies
    Bulk(commands::bulk::BulkArgs),

    /// Show package information
    Info(commands::info::InfoArgs),

    /// Start MCP (Model Context Protocol) server on stdio
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),

    /// Start the HTTP wordcloud service
    #[cfg(feature = "http")]
    ServeHttp(commands::serve_http::ServeHttpArgs),
}

impl Commands {
    /// Whether this command needs the language catalog loaded.
    pub const fn needs_catalog(&self) -> bool {
        !matches!(self, Self::Info(_))
    }
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}
