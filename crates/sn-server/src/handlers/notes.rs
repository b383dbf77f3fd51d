//! Owner-filtered note handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sn_model::{note, Note};
use sn_storage::{AccountProvider, NoteProvider};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::extract::AuthUser;
use crate::state::AppState;

/// Note create/update request body.
#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    /// Note title, at most 100 characters and non-blank.
    pub title: String,
    /// Note body, at most 500 characters and non-blank.
    pub content: String,
}

/// Note representation returned to its owner.
#[derive(Debug, Serialize, Deserialize)]
pub struct NoteResponse {
    /// Note identifier.
    pub id: Uuid,
    /// Note title.
    pub title: String,
    /// Note body.
    pub content: String,
    /// When the note was created.
    pub created_at: DateTime<Utc>,
    /// When the note was last updated.
    pub updated_at: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

fn validate_note(req: &NoteRequest) -> ApiResult<()> {
    if req.title.trim().is_empty() {
        return Err(ApiError::Validation("title must not be blank".to_string()));
    }
    if req.title.chars().count() > note::MAX_TITLE_LEN {
        return Err(ApiError::Validation(format!(
            "title must be at most {} characters",
            note::MAX_TITLE_LEN
        )));
    }
    if req.content.trim().is_empty() {
        return Err(ApiError::Validation(
            "content must not be blank".to_string(),
        ));
    }
    if req.content.chars().count() > note::MAX_CONTENT_LEN {
        return Err(ApiError::Validation(format!(
            "content must be at most {} characters",
            note::MAX_CONTENT_LEN
        )));
    }
    Ok(())
}

/// Fetches a note, distinguishing a missing note (404) from a note the
/// caller does not own (403).
async fn fetch_owned<N: NoteProvider>(notes: &N, id: Uuid, owner: &str) -> ApiResult<Note> {
    let note = notes
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("note"))?;

    if !note.is_owned_by(owner) {
        return Err(ApiError::Forbidden);
    }

    Ok(note)
}

/// `POST /notes`
pub async fn create_note<A: AccountProvider, N: NoteProvider>(
    State(state): State<AppState<A, N>>,
    AuthUser(account): AuthUser,
    Json(req): Json<NoteRequest>,
) -> ApiResult<(StatusCode, Json<NoteResponse>)> {
    validate_note(&req)?;

    let note = Note::new(req.title, req.content, account.email);
    state.notes.create(&note).await?;

    Ok((StatusCode::CREATED, Json(note.into())))
}

/// `GET /notes`
pub async fn list_notes<A: AccountProvider, N: NoteProvider>(
    State(state): State<AppState<A, N>>,
    AuthUser(account): AuthUser,
) -> ApiResult<Json<Vec<NoteResponse>>> {
    let notes = state.notes.list_by_owner(&account.email).await?;

    Ok(Json(notes.into_iter().map(NoteResponse::from).collect()))
}

/// `GET /notes/{id}`
pub async fn get_note<A: AccountProvider, N: NoteProvider>(
    State(state): State<AppState<A, N>>,
    AuthUser(account): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<NoteResponse>> {
    let note = fetch_owned(state.notes.as_ref(), id, &account.email).await?;

    Ok(Json(note.into()))
}

/// `PUT /notes/{id}`
pub async fn update_note<A: AccountProvider, N: NoteProvider>(
    State(state): State<AppState<A, N>>,
    AuthUser(account): AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<NoteRequest>,
) -> ApiResult<Json<NoteResponse>> {
    validate_note(&req)?;

    let mut note = fetch_owned(state.notes.as_ref(), id, &account.email).await?;
    note.title = req.title;
    note.content = req.content;
    note.updated_at = Utc::now();

    state.notes.update(&note).await?;

    Ok(Json(note.into()))
}

/// `DELETE /notes/{id}`
pub async fn delete_note<A: AccountProvider, N: NoteProvider>(
    State(state): State<AppState<A, N>>,
    AuthUser(account): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    fetch_owned(state.notes.as_ref(), id, &account.email).await?;
    state.notes.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(title: &str, content: &str) -> NoteRequest {
        NoteRequest {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert!(validate_note(&req("  ", "content")).is_err());
        assert!(validate_note(&req("title", "")).is_err());
        assert!(validate_note(&req("title", "content")).is_ok());
    }

    #[test]
    fn length_limits_are_enforced() {
        assert!(validate_note(&req(&"t".repeat(100), "content")).is_ok());
        assert!(validate_note(&req(&"t".repeat(101), "content")).is_err());
        assert!(validate_note(&req("title", &"c".repeat(500))).is_ok());
        assert!(validate_note(&req("title", &"c".repeat(501))).is_err());
    }
}
