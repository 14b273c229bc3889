//! HTTP transport for the run trigger and knowledge search
//!
//! The run trigger opens a server-sent-event stream carrying the wire
//! protocol of [`crate::events::StreamEvent`], one JSON event per message.
//! A client disconnect drops the receiver; pending sends then fail silently
//! and the run finishes on its own.

use crate::error::UiforgeError;
use crate::job::ComponentLibrary;
use crate::knowledge::{KnowledgeScope, KnowledgeStore, SearchResult};
use crate::runner::JobRunner;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Json, Router,
};
use futures::stream::Stream;
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Shared server state
#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<JobRunner>,
    pub knowledge: Arc<KnowledgeStore>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/jobs/:id/start", get(start_run).post(start_run))
        .route("/knowledge/search", get(search_knowledge))
        .route("/health", get(|| async { "OK" }))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until the process exits
pub async fn serve(addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "server listening");
    axum::serve(listener, router(state)).await
}

fn error_status(error: &UiforgeError) -> StatusCode {
    match error {
        UiforgeError::JobNotFound(_) => StatusCode::NOT_FOUND,
        UiforgeError::RunConflict(_) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn start_run(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, (StatusCode, String)> {
    let rx = state
        .runner
        .start(id)
        .await
        .map_err(|error| (error_status(&error), error.to_string()))?;

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        let event = rx.recv().await?;
        let sse = Event::default()
            .json_data(&event)
            .unwrap_or_else(|_| Event::default().data("serialization error"));
        Some((Ok::<_, Infallible>(sse), rx))
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: String,
    library: Option<ComponentLibrary>,
    limit: Option<usize>,
}

async fn search_knowledge(
    Query(params): Query<SearchParams>,
    State(state): State<AppState>,
) -> Json<Vec<SearchResult>> {
    let scope = match params.library {
        Some(library) => KnowledgeScope::Library(library),
        None => KnowledgeScope::All,
    };
    Json(state.knowledge.search(
        &params.q,
        scope,
        params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let id = Uuid::new_v4();
        assert_eq!(
            error_status(&UiforgeError::JobNotFound(id)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&UiforgeError::RunConflict(id)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_status(&UiforgeError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_search_params_parse() {
        let params: SearchParams =
            serde_urlencoded::from_str("q=button&library=antd&limit=2").unwrap();
        assert_eq!(params.q, "button");
        assert_eq!(params.library, Some(ComponentLibrary::Antd));
        assert_eq!(params.limit, Some(2));

        let params: SearchParams = serde_urlencoded::from_str("q=button").unwrap();
        assert!(params.library.is_none());
    }
}
