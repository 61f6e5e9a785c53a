//! Handlers for the five book operations.
//!
//! Each handler is one linear validate-then-commit sequence. Validation
//! always completes before the first write, in a fixed order: title, author,
//! category reference, then (for update) existence.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use biblioteca_catalog::Book;

use crate::AppState;
use crate::error::ApiError;
use crate::types::{BookPayload, BookResponse};

/// Minimum length of title and author, counted in characters rather than
/// bytes so multibyte text is not under-measured.
const MIN_TEXT_LEN: usize = 3;

fn validate_payload(payload: &BookPayload) -> Result<(), ApiError> {
    if payload.title.chars().count() < MIN_TEXT_LEN {
        return Err(ApiError::TitleTooShort);
    }
    if payload.author.chars().count() < MIN_TEXT_LEN {
        return Err(ApiError::AuthorTooShort);
    }
    Ok(())
}

/// POST /books
pub(crate) async fn create_book(
    State(state): State<AppState>,
    Json(payload): Json<BookPayload>,
) -> Result<impl IntoResponse, ApiError> {
    validate_payload(&payload)?;
    let category = state
        .repo
        .find_category(payload.category_id)
        .await
        .map_err(ApiError::from_catalog)?
        .ok_or(ApiError::UnknownCategory)?;
    let draft = payload.draft();
    let id = state.repo.insert_book(&draft).await.map_err(ApiError::from_catalog)?;
    tracing::info!(id, title = %draft.title, "book created");
    let book = Book { id, title: draft.title, author: draft.author, category };
    let location = [(header::LOCATION, format!("/api/books/{id}"))];
    Ok((StatusCode::CREATED, location, Json(BookResponse::from(book))))
}

/// GET /books
pub(crate) async fn list_books(
    State(state): State<AppState>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let books = state.repo.list_books().await.map_err(ApiError::from_catalog)?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// GET /books/{id}
pub(crate) async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = state
        .repo
        .find_book(id)
        .await
        .map_err(ApiError::from_catalog)?
        .ok_or(ApiError::BookNotFound(id))?;
    Ok(Json(BookResponse::from(book)))
}

/// PUT /books/{id}
pub(crate) async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<BookPayload>,
) -> Result<Json<BookResponse>, ApiError> {
    // The id is immutable; a body that disagrees with the path is rejected
    // before looking at anything else.
    if payload.id != Some(id) {
        return Err(ApiError::IdMismatch);
    }
    validate_payload(&payload)?;
    let category = state
        .repo
        .find_category(payload.category_id)
        .await
        .map_err(ApiError::from_catalog)?
        .ok_or(ApiError::UnknownCategory)?;
    if !state.repo.book_exists(id).await.map_err(ApiError::from_catalog)? {
        return Err(ApiError::BookNotFoundForUpdate(id));
    }
    let draft = payload.draft();
    let updated = state.repo.update_book(id, &draft).await.map_err(ApiError::from_catalog)?;
    if !updated {
        // The record passed the existence check but the write hit nothing:
        // it changed underneath us. A single re-check decides how to report
        // it. Explicitly not a retry.
        let vanished = !state.repo.book_exists(id).await.map_err(ApiError::from_catalog)?;
        return Err(if vanished {
            ApiError::BookNotFoundForUpdate(id)
        } else {
            tracing::warn!(id, "update conflicted with a concurrent write");
            ApiError::UpdateConflict(id)
        });
    }
    tracing::info!(id, "book updated");
    // The response is assembled from the validated payload and the category
    // resolved above; no re-read, so a concurrent later write may already be
    // ahead of what the client sees.
    let book = Book { id, title: draft.title, author: draft.author, category };
    Ok(Json(BookResponse::from(book)))
}

/// DELETE /books/{id}
pub(crate) async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.repo.delete_book(id).await.map_err(ApiError::from_catalog)? {
        return Err(ApiError::BookNotFoundForDelete(id));
    }
    tracing::info!(id, "book deleted");
    Ok(StatusCode::NO_CONTENT)
}
