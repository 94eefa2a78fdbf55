use crate::error::{AppError, Result};
use crate::model::{CreateSnippetRequest, CreateSnippetResponse, SnippetResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use snippetbox_core::SnippetId;
use tracing::info;

/// Lists the most recent live snippets.
pub async fn home_handler(State(state): State<AppState>) -> Result<Json<Vec<SnippetResponse>>> {
    let snippets = state.store().latest().await?;

    Ok(Json(snippets.into_iter().map(SnippetResponse::from).collect()))
}

pub async fn show_snippet_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<SnippetResponse>> {
    let id: SnippetId = id.parse()?;

    match state.store().get(id).await? {
        Some(snippet) => Ok(Json(snippet.into())),
        None => Err(AppError::NotFound(id)),
    }
}

pub async fn create_snippet_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateSnippetRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload?;
    let snippet = request.into_new_snippet()?;
    let id = state.store().create(snippet).await?;
    let location = format!("/snippets/{id}");

    info!(id = %id, "snippet created");

    Ok((
        StatusCode::CREATED,
        [(LOCATION, location.clone())],
        Json(CreateSnippetResponse { id, location }),
    )
        .into_response())
}
