//! Request and response shapes for the book resource.
//!
//! Wire casing is camelCase (`categoryId`); the domain types in the catalog
//! crate stay snake_case and never touch serde.

use biblioteca_catalog::{Book, BookDraft, Category};
use serde::{Deserialize, Serialize};

/// Incoming book payload, shared by create and update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    /// Ignored on create (the store assigns one); must match the path id on
    /// update.
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    pub author: String,
    pub category_id: i64,
}

impl BookPayload {
    /// The writable fields, detached from the optional id.
    pub(crate) fn draft(&self) -> BookDraft {
        BookDraft {
            title: self.title.clone(),
            author: self.author.clone(),
            category_id: self.category_id,
        }
    }
}

/// A book as serialized in responses, with its category attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub category_id: i64,
    pub category: CategoryResponse,
}

/// The category attached to a [`BookResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            category_id: book.category_id(),
            title: book.title,
            author: book.author,
            category: CategoryResponse::from(book.category),
        }
    }
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self { id: category.id, name: category.name }
    }
}
