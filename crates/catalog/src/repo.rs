//! Repository for book records and the categories they reference.
//!
//! Books and categories are deliberately served by one repository: a book is
//! never read without its category joined in, and the only category operation
//! this service performs is the reference lookup that guards book writes.

use crate::Database;
use crate::error::{ErrorKind, Result};
use crate::models::{Book, BookDraft, BookRow, Category, CategoryRow};
use exn::ResultExt;
use sqlx::SqlitePool;

/// Repository for managing book records in the catalog database.
///
/// The `category_id` foreign key is the source of truth; the [`Category`]
/// attached to returned [`Book`]s is resolved by join on every read. Writes
/// never touch the categories table.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}
impl From<&Database> for Repository {
    fn from(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }
}
impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// Look up a category by id.
    ///
    /// This is the referential check that guards every book write: a `None`
    /// here means the foreign key would not resolve.
    pub async fn find_category(&self, id: i64) -> Result<Option<Category>> {
        let row: Option<CategoryRow> = sqlx::query_as(include_str!("../queries/find_category.sql"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(row.map(Category::from))
    }

    // =========================================================================
    // Insert
    // =========================================================================

    /// Insert a new book and return the id the database assigned to it.
    ///
    /// The caller is expected to have resolved `draft.category_id` first;
    /// foreign key enforcement turns an unresolved one into
    /// [`ErrorKind::Database`] rather than a silent orphan.
    pub async fn insert_book(&self, draft: &BookDraft) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(include_str!("../queries/insert_book.sql"))
            .bind(&draft.title)
            .bind(&draft.author)
            .bind(draft.category_id)
            .fetch_one(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(id)
    }

    // =========================================================================
    // Get/Fetch
    // =========================================================================

    /// Get a book with its category by id.
    pub async fn find_book(&self, id: i64) -> Result<Option<Book>> {
        let row: Option<BookRow> = sqlx::query_as(include_str!("../queries/find_book.sql"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(row.map(Book::from))
    }

    /// List every book with its category attached, ordered by id.
    pub async fn list_books(&self) -> Result<Vec<Book>> {
        let rows: Vec<BookRow> = sqlx::query_as(include_str!("../queries/list_books.sql"))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Overwrite a book's title, author, and category in place.
    ///
    /// Returns `true` if a record was updated, `false` if no book with `id`
    /// exists. A `false` after a successful existence check means the record
    /// vanished in between; the caller decides how to surface that.
    pub async fn update_book(&self, id: i64, draft: &BookDraft) -> Result<bool> {
        let result = sqlx::query(include_str!("../queries/update_book.sql"))
            .bind(&draft.title)
            .bind(&draft.author)
            .bind(draft.category_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Delete a book by id.
    ///
    /// Returns `true` if a record was deleted, `false` if `id` was not found.
    pub async fn delete_book(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(include_str!("../queries/delete_book.sql"))
            .bind(id)
            .execute(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Existence
    // =========================================================================

    /// Check whether a book record with the given id exists.
    ///
    /// Cheaper than [`find_book`](Self::find_book) when the caller only needs
    /// to distinguish "gone" from "still there" after a write reported no
    /// affected rows.
    pub async fn book_exists(&self, id: i64) -> Result<bool> {
        let exists: i64 = sqlx::query_scalar(include_str!("../queries/book_exists.sql"))
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(exists > 0)
    }
}
