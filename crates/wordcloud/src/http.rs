//! HTTP wordcloud service.
//!
//! Routes:
//!
//! | Method | Path              | Form fields        | Response                          |
//! |--------|-------------------|--------------------|-----------------------------------|
//! | GET    | `/`               |                    | JSON array of language names      |
//! | POST   | `/wordcloud`      | `language`, `tfs`  | JSON wordcloud                    |
//! | POST   | `/wordcloud/bulk` | `language`, `tfs`  | JSON array of wordclouds          |
//!
//! `tfs` is JSON text: an object of term -> count, or for the bulk route an
//! array of such objects. Fields may come from the query string or the form
//! body; the body wins. Text that does not decode is scored as an empty
//! document (or an empty list), and entries whose count is not an integer
//! are ignored. An unknown language is a 400; a body over the configured
//! limit is a 413.

use std::sync::Arc;

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{DefaultBodyLimit, Form, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use wordcloud_core::input::{parse_batch, parse_term_frequencies};
use wordcloud_core::{LanguageCatalog, ScoreError};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<LanguageCatalog>,
    max_request_bytes: usize,
}

/// Fields of both scoring routes, from the query string or the form body.
#[derive(Debug, Default, Deserialize)]
pub struct WordcloudForm {
    /// Language name, e.g. "Spanish".
    pub language: Option<String>,
    /// Term frequencies as JSON text.
    pub tfs: Option<String>,
}

impl WordcloudForm {
    /// Fill fields missing here from `fallback`.
    fn or(self, fallback: Self) -> Self {
        Self {
            language: self.language.or(fallback.language),
            tfs: self.tfs.or(fallback.tfs),
        }
    }
}

/// Build the router over a loaded catalog.
pub fn router(catalog: Arc<LanguageCatalog>, max_request_bytes: usize) -> Router {
    let state = AppState {
        catalog,
        max_request_bytes,
    };
    Router::new()
        .route("/", get(list_languages))
        .route("/wordcloud", post(wordcloud))
        .route("/wordcloud/bulk", post(wordcloud_bulk))
        .layer(DefaultBodyLimit::max(max_request_bytes))
        .with_state(state)
}

async fn list_languages(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.languages().map(str::to_string).collect())
}

#[tracing::instrument(skip_all)]
async fn wordcloud(
    State(state): State<AppState>,
    query: Result<Query<WordcloudForm>, QueryRejection>,
    body: Result<Form<WordcloudForm>, FormRejection>,
) -> Response {
    let form = match merge_fields(&state, query, body) {
        Ok(form) => form,
        Err(response) => return response,
    };
    let language = form.language.unwrap_or_default();
    let tfs = parse_term_frequencies(form.tfs.as_deref().unwrap_or_default());
    tracing::debug!(language = %language, terms = tfs.len(), "wordcloud request");

    match state.catalog.score(&language, &tfs) {
        Ok(cloud) => Json(cloud).into_response(),
        Err(err) => bad_language(&err),
    }
}

#[tracing::instrument(skip_all)]
async fn wordcloud_bulk(
    State(state): State<AppState>,
    query: Result<Query<WordcloudForm>, QueryRejection>,
    body: Result<Form<WordcloudForm>, FormRejection>,
) -> Response {
    let form = match merge_fields(&state, query, body) {
        Ok(form) => form,
        Err(response) => return response,
    };
    let language = form.language.unwrap_or_default();
    let documents = parse_batch(form.tfs.as_deref().unwrap_or_default());
    tracing::debug!(language = %language, documents = documents.len(), "bulk request");

    match state.catalog.score_batch(&language, &documents) {
        Ok(batch) => Json(batch).into_response(),
        Err(err) => bad_language(&err),
    }
}

/// Body fields win over query-string fields. A body that is too large is
/// rejected; any other unusable query string or body counts as empty.
fn merge_fields(
    state: &AppState,
    query: Result<Query<WordcloudForm>, QueryRejection>,
    body: Result<Form<WordcloudForm>, FormRejection>,
) -> Result<WordcloudForm, Response> {
    let body = match body {
        Ok(Form(body)) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            tracing::info!(limit = state.max_request_bytes, "request body too large");
            return Err(too_large(state.max_request_bytes));
        }
        Err(rejection) => {
            tracing::debug!(error = %rejection, "no usable form body");
            WordcloudForm::default()
        }
    };
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "no usable query string");
            WordcloudForm::default()
        }
    };
    Ok(body.or(query))
}

fn bad_language(err: &ScoreError) -> Response {
    tracing::info!(error = %err, "rejecting request");
    (StatusCode::BAD_REQUEST, format!("{err}\n")).into_response()
}

fn too_large(limit: usize) -> Response {
    (
        StatusCode::PAYLOAD_TOO_LARGE,
        format!("Request entity too large: max accepted bytes is set to {limit}.\n"),
    )
        .into_response()
}
