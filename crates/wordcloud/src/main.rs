//! wordcloud CLI
#![deny(unsafe_code)]

use std::sync::Arc;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use tracing::debug;
use wordcloud::{Cli, Commands, commands};
use wordcloud_core::LanguageCatalog;
use wordcloud_core::config::ConfigLoader;

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // arg_required_else_help ensures we have --version-only or a subcommand
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let cwd = utf8(cwd, "current directory")?;
    let mut loader = ConfigLoader::new().with_project_search(&cwd);
    if let Some(ref config_path) = cli.config {
        loader = loader.with_file(utf8(config_path.clone(), "config path")?);
    }
    let (mut config, config_sources) = loader.load().context("failed to load configuration")?;

    let obs_config = observability::ObservabilityConfig::from_env_with_overrides(
        config
            .log_dir
            .as_ref()
            .map(|dir| dir.as_std_path().to_path_buf()),
    );
    let env_filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _guard = observability::init_observability(&obs_config, env_filter)
        .context("failed to initialize logging/tracing")?;

    // Command-line flags beat every config source.
    if let Some(dir) = cli.datadir {
        config.data_dir = Some(utf8(dir, "data directory")?);
    }
    if let Some(n) = cli.numstopwords {
        config.num_stopwords = n;
    }

    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        chdir = ?cli.chdir,
        data_dir = ?config.data_dir,
        num_stopwords = config.num_stopwords,
        "CLI initialized"
    );

    let data_dir = config.data_dir.clone().unwrap_or_else(|| cwd.clone());
    let catalog = if command.needs_catalog() {
        let show_progress = !cli.quiet && !cli.json;
        commands::load_catalog(&data_dir, config.num_stopwords, show_progress)
    } else {
        LanguageCatalog::default()
    };
    let catalog = Arc::new(catalog);
    let max_input = Some(config.max_request_bytes);

    let result = match command {
        Commands::Languages(args) => {
            commands::languages::cmd_languages(args, cli.json, &catalog, &data_dir)
        }
        Commands::Score(args) => commands::score::cmd_score(args, cli.json, &catalog, max_input),
        Commands::Bulk(args) => commands::bulk::cmd_bulk(args, cli.json, &catalog, max_input),
        Commands::Info(args) => commands::info::cmd_info(args, cli.json, &config, &config_sources),
        #[cfg(feature = "mcp")]
        Commands::Serve(args) => {
            let rt = tokio::runtime::Runtime::new()
                .context("failed to create async runtime for MCP server")?;
            rt.block_on(commands::serve::cmd_serve(args, catalog))
        }
        #[cfg(feature = "http")]
        Commands::ServeHttp(args) => {
            let rt = tokio::runtime::Runtime::new()
                .context("failed to create async runtime for HTTP server")?;
            rt.block_on(commands::serve_http::cmd_serve_http(args, catalog, &config))
        }
    };
    if let Err(ref err) = result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}

fn utf8(path: std::path::PathBuf, what: &str) -> anyhow::Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(path).map_err(|e| {
        anyhow::anyhow!(
            "{what} is not valid UTF-8: {}",
            e.into_path_buf().display()
        )
    })
}
