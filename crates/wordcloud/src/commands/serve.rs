//! Serve command: MCP server on stdio.

use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use wordcloud_core::LanguageCatalog;

use crate::server::WordcloudServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Run the MCP server until the client disconnects.
#[instrument(name = "cmd_serve", skip_all, fields(languages = catalog.len()))]
pub async fn cmd_serve(_args: ServeArgs, catalog: Arc<LanguageCatalog>) -> anyhow::Result<()> {
    info!("starting MCP server on stdio");

    let service = WordcloudServer::new(catalog)
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;

    let reason = service
        .waiting()
        .await
        .context("MCP server task failed")?;

    info!(?reason, "MCP server stopped");
    Ok(())
}
