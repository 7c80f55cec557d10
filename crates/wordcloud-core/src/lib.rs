//! Core library for wordcloud.
//!
//! This crate loads per-language corpus statistics from flat convention files
//! and scores documents against them with TF-IDF. The `wordcloud` CLI and its
//! servers are thin layers over what lives here.
//!
//! # Modules
//!
//! - [`discovery`] - Finding language folders under a data root
//! - [`stats`] - Loading stopwords, document frequencies, and corpus size
//! - [`catalog`] - The immutable language name to statistics lookup
//! - [`score`] - TF-IDF scoring for single documents and batches
//! - [`input`] - Lenient decoding of caller-supplied term counts
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use std::collections::HashMap;
//! use wordcloud_core::LanguageCatalog;
//!
//! let catalog = LanguageCatalog::load("data", 300);
//! let tfs = HashMap::from([("Biblioteca".to_string(), 1)]);
//! let cloud = catalog.score("Spanish", &tfs).expect("Spanish is loaded");
//!
//! println!("{:?}", cloud.get("biblioteca"));
//! ```
#![deny(unsafe_code)]

pub mod catalog;

pub mod config;

pub mod discovery;

pub mod error;

pub mod input;

pub mod score;

pub mod stats;

pub use catalog::{LanguageCatalog, LanguageSummary};

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};

pub use discovery::{Folder, discover_languages};

pub use error::{ConfigError, ConfigResult, ScoreError, ScoreResult};

pub use score::{RawTermFrequencies, TermScore, Wordcloud, WordcloudBatch, score, score_batch};

pub use stats::{LanguageStats, load_language_stats};

/// Default number of stopwords read from each language's `stopwords.txt`.
pub const DEFAULT_NUM_STOPWORDS: usize = 300;

/// Default maximum request size in bytes (75 MB) accepted by the servers and
/// by the file-based scoring commands.
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 75_000_000;

/// Default port for the HTTP server.
pub const DEFAULT_HTTP_PORT: u16 = 8080;
