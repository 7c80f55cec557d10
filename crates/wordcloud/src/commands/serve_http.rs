//! Serve-http command: the HTTP wordcloud service.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use tracing::{info, instrument, warn};

use wordcloud_core::{Config, LanguageCatalog};

use crate::http;

/// Arguments for the `serve-http` subcommand.
#[derive(Args, Debug)]
pub struct ServeHttpArgs {
    /// Port to listen on (overrides `http_port` from config).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address to bind.
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,
}

/// Serve HTTP until interrupted.
#[instrument(name = "cmd_serve_http", skip_all, fields(languages = catalog.len()))]
pub async fn cmd_serve_http(
    args: ServeHttpArgs,
    catalog: Arc<LanguageCatalog>,
    config: &Config,
) -> anyhow::Result<()> {
    let addr = SocketAddr::new(args.bind, args.port.unwrap_or(config.http_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, max_request_bytes = config.max_request_bytes, "starting HTTP server");

    axum::serve(listener, http::router(catalog, config.max_request_bytes))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
