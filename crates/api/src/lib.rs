//! HTTP surface for the book catalog.
//!
//! Five operations over the book resource, mounted under `/api`:
//!
//! | Method | Path          | Success        | Failure                |
//! |--------|---------------|----------------|------------------------|
//! | POST   | `/books`      | 201 + Location | 400                    |
//! | GET    | `/books`      | 200            | -                      |
//! | GET    | `/books/{id}` | 200            | 404                    |
//! | PUT    | `/books/{id}` | 200            | 400 / 404 / 500        |
//! | DELETE | `/books/{id}` | 204            | 404                    |
//!
//! Handlers are stateless; the only thing shared between requests is the
//! repository's connection pool. Error responses all carry the same
//! `{"message": "…"}` body shape.

mod error;
mod handlers;
mod types;

pub use crate::error::ApiError;
pub use crate::types::{BookPayload, BookResponse, CategoryResponse};

use axum::Router;
use axum::routing::{get, post};
use biblioteca_catalog::Repository;

/// State handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub(crate) repo: Repository,
}

impl AppState {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }
}

/// Build the service router with all book routes mounted under `/api`.
pub fn router(state: AppState) -> Router {
    Router::new().nest("/api", book_routes()).with_state(state)
}

fn book_routes() -> Router<AppState> {
    Router::new()
        .route("/books", post(handlers::create_book).get(handlers::list_books))
        .route(
            "/books/{id}",
            get(handlers::get_book).put(handlers::update_book).delete(handlers::delete_book),
        )
}
