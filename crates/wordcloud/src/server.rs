//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes wordcloud scoring over the MCP protocol on stdio, for AI
//! assistants and other MCP clients.
//!
//! # Architecture
//!
//! The MCP server is a presentation layer over the same [`LanguageCatalog`]
//! the CLI commands use. The catalog is loaded once before the server starts
//! and handed in; tools only read it.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use serde_json::Value;
use wordcloud_core::input::retain_counts;
use wordcloud_core::{LanguageCatalog, ScoreError};

/// Parameters for the `list_languages` tool.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct ListLanguagesParams {
    /// Include term, stopword, and document counts for each language.
    #[serde(default)]
    pub details: bool,
}

/// Parameters for the `score_wordcloud` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ScoreWordcloudParams {
    /// Language to score against, e.g. "Spanish".
    pub language: String,
    /// Raw term counts for one document. Keys may be in any case; entries
    /// whose count is not an integer are ignored.
    pub tfs: HashMap<String, Value>,
}

/// Parameters for the `score_wordcloud_bulk` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ScoreWordcloudBulkParams {
    /// Language to score against, e.g. "Spanish".
    pub language: String,
    /// Raw term counts, one object per document.
    pub documents: Vec<HashMap<String, Value>>,
}

/// MCP server exposing wordcloud scoring.
#[derive(Clone)]
pub struct WordcloudServer {
    catalog: Arc<LanguageCatalog>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

#[tool_router]
impl WordcloudServer {
    /// Create a server over an already loaded catalog.
    pub fn new(catalog: Arc<LanguageCatalog>) -> Self {
        Self {
            catalog,
            tool_router: Self::tool_router(),
        }
    }

    /// List the languages available for scoring.
    #[tool(description = "List the languages available for wordcloud scoring.")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn list_languages(
        &self,
        Parameters(params): Parameters<ListLanguagesParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "list_languages", details = params.details, "executing MCP tool");

        let json = if params.details {
            serde_json::to_string_pretty(&self.catalog.summaries())
        } else {
            serde_json::to_string_pretty(&self.catalog.languages().collect::<Vec<_>>())
        }
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(tool = "list_languages", languages = self.catalog.len(), "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Score one document.
    #[tool(
        description = "Compute a TF-IDF wordcloud for one document. Takes a language and an object of term -> count; returns term -> {tf, df, tfidf} with stopwords removed."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", language = %params.language))]
    fn score_wordcloud(
        &self,
        Parameters(params): Parameters<ScoreWordcloudParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "score_wordcloud", terms = params.tfs.len(), "executing MCP tool");

        let tfs = retain_counts(params.tfs);
        let cloud = self
            .catalog
            .score(&params.language, &tfs)
            .map_err(invalid_language)?;

        let json = serde_json::to_string_pretty(&cloud)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(tool = "score_wordcloud", terms = cloud.len(), "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Score many documents.
    #[tool(
        description = "Compute TF-IDF wordclouds for a list of documents in one language. Output order matches input order."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", language = %params.language))]
    fn score_wordcloud_bulk(
        &self,
        Parameters(params): Parameters<ScoreWordcloudBulkParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "score_wordcloud_bulk",
            documents = params.documents.len(),
            "executing MCP tool"
        );

        let documents: Vec<_> = params.documents.into_iter().map(retain_counts).collect();
        let batch = self
            .catalog
            .score_batch(&params.language, &documents)
            .map_err(invalid_language)?;

        let json = serde_json::to_string_pretty(&batch)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(
            tool = "score_wordcloud_bulk",
            documents = batch.len(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

fn invalid_language(err: ScoreError) -> McpError {
    McpError::invalid_params(err.to_string(), None)
}

#[tool_handler]
impl ServerHandler for WordcloudServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Call list_languages first, then score_wordcloud or score_wordcloud_bulk with one of those languages.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
