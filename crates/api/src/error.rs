//! API error taxonomy and its HTTP mapping.
//!
//! Unlike the library crates this is a plain error enum, not an `exn` tree:
//! every variant IS the client-facing outcome, so there is no internal
//! context to track. The display string of a variant is the exact `message`
//! the client receives; [`ApiError::status`] picks the status code.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_more::{Display, Error};
use serde::Serialize;

/// Everything a book operation can reject or fail with.
///
/// Validation variants are raised before any write reaches the catalog, so a
/// 4xx response guarantees nothing was persisted.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Title shorter than three characters.
    #[display("Título deve ter no mínimo 3 caracteres.")]
    TitleTooShort,
    /// Author shorter than three characters.
    #[display("Autor deve ter no mínimo 3 caracteres.")]
    AuthorTooShort,
    /// The referenced category does not exist.
    #[display("Categoria inválida. O ID da categoria fornecido não existe.")]
    UnknownCategory,
    /// Update payload carries a different id than the path (or none at all).
    #[display("O ID do livro não corresponde ao ID da URL.")]
    IdMismatch,
    #[display("Livro com ID {_0} não encontrado.")]
    BookNotFound(#[error(not(source))] i64),
    #[display("Livro com ID {_0} não encontrado para atualização.")]
    BookNotFoundForUpdate(#[error(not(source))] i64),
    #[display("Livro com ID {_0} não encontrado para remoção.")]
    BookNotFoundForDelete(#[error(not(source))] i64),
    /// The update wrote zero rows although the record still exists: it was
    /// concurrently modified under us. Surfaced fatally, never retried.
    #[display("Conflito de concorrência ao atualizar o livro com ID {_0}.")]
    UpdateConflict(#[error(not(source))] i64),
    /// Catalog failure the client can do nothing about. Details go to the
    /// log, never into the response body.
    #[display("Erro interno no servidor.")]
    Internal,
}

impl ApiError {
    /// Status code of the response this error turns into.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::TitleTooShort | Self::AuthorTooShort | Self::UnknownCategory | Self::IdMismatch => {
                StatusCode::BAD_REQUEST
            },
            Self::BookNotFound(_) | Self::BookNotFoundForUpdate(_) | Self::BookNotFoundForDelete(_) => {
                StatusCode::NOT_FOUND
            },
            Self::UpdateConflict(_) | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Mask a catalog error as [`ApiError::Internal`], logging what the
    /// response body will not say.
    pub(crate) fn from_catalog(err: biblioteca_catalog::error::Error) -> Self {
        tracing::error!(error = ?err, "catalog operation failed");
        Self::Internal
    }
}

/// Body shape of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { message: self.to_string() };
        (self.status(), Json(body)).into_response()
    }
}
