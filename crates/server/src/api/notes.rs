// Notes HTTP routes
// Decision: Every handler requires AuthUser; the extractor runs before the
//           path and body so unauthenticated calls never reach the service
// Decision: PUT is a full replacement of title and content

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use notekeep_core::error::TITLE_REQUIRED;
use notekeep_core::{Error, Note, Result};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::common::{ApiError, ErrorResponse, MessageResponse};
use super::validation::{check_size, present, MAX_NOTE_CONTENT_BYTES, MAX_NOTE_TITLE_BYTES};
use crate::auth::{AuthState, AuthUser};
use crate::services::{NoteInput, NoteService};

pub const NOTE_DELETED_MESSAGE: &str = "Note deleted.";

/// Request to create or replace a note
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct NoteRequest {
    /// Note title. Required, must not be blank.
    #[schema(example = "Groceries")]
    pub title: Option<String>,
    /// Note body. Defaults to empty.
    #[schema(example = "Milk, eggs, bread")]
    pub content: Option<String>,
}

impl NoteRequest {
    pub fn validate(self) -> Result<NoteInput> {
        let title = present(self.title).ok_or(Error::Validation(TITLE_REQUIRED))?;
        let content = self.content.unwrap_or_default();

        check_size("title", &title, MAX_NOTE_TITLE_BYTES)?;
        check_size("content", &content, MAX_NOTE_CONTENT_BYTES)?;

        Ok(NoteInput { title, content })
    }
}

/// App state for note routes
#[derive(Clone)]
pub struct NotesState {
    pub service: Arc<NoteService>,
    pub auth: AuthState,
}

impl FromRef<NotesState> for AuthState {
    fn from_ref(state: &NotesState) -> Self {
        state.auth.clone()
    }
}

/// Create note routes
pub fn routes(state: NotesState) -> Router {
    Router::new()
        .route("/notes/", get(list_notes).post(create_note))
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/:note_id/",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route(
            "/notes/:note_id",
            get(get_note).put(update_note).delete(delete_note),
        )
        .with_state(state)
}

/// GET /notes/ - List the caller's notes, most recently updated first
#[utoipa::path(
    get,
    path = "/api/notes/",
    responses(
        (status = 200, description = "Caller's notes", body = Vec<Note>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "notes"
)]
pub async fn list_notes(
    State(state): State<NotesState>,
    user: AuthUser,
) -> std::result::Result<Json<Vec<Note>>, ApiError> {
    let notes = state.service.list(&user.identity).await?;
    Ok(Json(notes))
}

/// POST /notes/ - Create a note
#[utoipa::path(
    post,
    path = "/api/notes/",
    request_body = NoteRequest,
    responses(
        (status = 201, description = "Note created", body = Note),
        (status = 400, description = "Title missing", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "notes"
)]
pub async fn create_note(
    State(state): State<NotesState>,
    user: AuthUser,
    body: Option<Json<NoteRequest>>,
) -> std::result::Result<(StatusCode, Json<Note>), ApiError> {
    let input = body.map(|Json(req)| req).unwrap_or_default().validate()?;
    let note = state.service.create(&user.identity, input).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /notes/{note_id}/ - Fetch one of the caller's notes
#[utoipa::path(
    get,
    path = "/api/notes/{note_id}/",
    params(
        ("note_id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = Note),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "notes"
)]
pub async fn get_note(
    State(state): State<NotesState>,
    user: AuthUser,
    Path(note_id): Path<i64>,
) -> std::result::Result<Json<Note>, ApiError> {
    let note = state.service.get(&user.identity, note_id).await?;
    Ok(Json(note))
}

/// PUT /notes/{note_id}/ - Replace a note's title and content
#[utoipa::path(
    put,
    path = "/api/notes/{note_id}/",
    params(
        ("note_id" = i64, Path, description = "Note ID")
    ),
    request_body = NoteRequest,
    responses(
        (status = 200, description = "Note updated", body = Note),
        (status = 400, description = "Title missing", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "notes"
)]
pub async fn update_note(
    State(state): State<NotesState>,
    user: AuthUser,
    Path(note_id): Path<i64>,
    body: Option<Json<NoteRequest>>,
) -> std::result::Result<Json<Note>, ApiError> {
    let input = body.map(|Json(req)| req).unwrap_or_default().validate()?;
    let note = state.service.update(&user.identity, note_id, input).await?;
    Ok(Json(note))
}

/// DELETE /notes/{note_id}/ - Delete a note
#[utoipa::path(
    delete,
    path = "/api/notes/{note_id}/",
    params(
        ("note_id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "notes"
)]
pub async fn delete_note(
    State(state): State<NotesState>,
    user: AuthUser,
    Path(note_id): Path<i64>,
) -> std::result::Result<Json<MessageResponse>, ApiError> {
    state.service.delete(&user.identity, note_id).await?;
    Ok(Json(MessageResponse::new(NOTE_DELETED_MESSAGE)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_is_required() {
        let err = NoteRequest::default().validate().unwrap_err();
        assert_eq!(err.public_message(), "Title is required.");

        let err = NoteRequest {
            title: Some("   ".to_string()),
            content: Some("body".to_string()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.public_message(), "Title is required.");
    }

    #[test]
    fn test_content_defaults_to_empty() {
        let input = NoteRequest {
            title: Some("Groceries".to_string()),
            content: None,
        }
        .validate()
        .unwrap();
        assert_eq!(input.title, "Groceries");
        assert_eq!(input.content, "");
    }
}
