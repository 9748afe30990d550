//! Route handlers. Each one is a single pass through to the store.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;
use chrono::Local;
use serde_json::json;
use tracing::debug;

use super::body::ContactBody;
use super::error::ApiError;
use super::AppState;
use crate::contact::Contact;

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}

/// `GET /version`
pub async fn version() -> &'static str {
    "1"
}

/// `GET /api/info` - contact count and the server's current time.
pub async fn info(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let count = state.store.count().await?;
    let now = Local::now().format("%a %b %d %Y %H:%M:%S GMT%z");
    Ok(Html(format!(
        "<p>Phonebook has info for {count} people.</p><p>{now}</p>"
    )))
}

/// `GET /api/persons`
pub async fn list_persons(State(state): State<AppState>) -> Result<Json<Vec<Contact>>, ApiError> {
    Ok(Json(state.store.list_all().await?))
}

/// `GET /api/persons/:id`
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError> {
    state
        .store
        .find_by_id(&id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// `DELETE /api/persons/:id`
pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError> {
    let deleted = state.store.delete_by_id(&id).await?;
    if deleted.is_some() {
        debug!(%id, "Contact deleted");
    }
    deleted.map(Json).ok_or(ApiError::NotFound)
}

/// `POST /api/persons`
pub async fn create_person(
    State(state): State<AppState>,
    ContactBody(input): ContactBody,
) -> Result<Json<Contact>, ApiError> {
    debug!(?input, "Create contact");

    let contact = input.require()?;
    Ok(Json(state.store.create(contact).await?))
}

/// `PUT /api/persons/:id`
///
/// Replaces both fields; one absent from the body is stored as `null`.
/// An id with no contact answers 200 with a `null` body, unlike GET and DELETE.
pub async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ContactBody(input): ContactBody,
) -> Result<Json<Option<Contact>>, ApiError> {
    debug!(%id, ?input, "Update contact");

    Ok(Json(state.store.update_by_id(&id, input).await?))
}

/// Fallback for routes nothing else matched.
pub async fn unknown_endpoint() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "unknown endpoint" })),
    )
}
