use crate::models::Category;

/// A book in the catalog, with its category resolved.
///
/// The `category_id` column is the source of truth in storage; the attached
/// [`Category`] here is the joined view of it. The two cannot drift because
/// every read resolves the category from the foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub category: Category,
}

impl Book {
    /// The foreign key this book's category was resolved from.
    pub fn category_id(&self) -> i64 {
        self.category.id
    }
}

/// The writable fields of a book, before or without an id.
///
/// Used for both inserts (the database assigns the id) and updates (the id
/// arrives separately and is immutable).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub category_id: i64,
}

/// Row shape of the books-to-categories join used by every read query.
#[derive(sqlx::FromRow)]
pub(crate) struct BookRow {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) category_id: i64,
    pub(crate) category_name: String,
}
impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            author: row.author,
            category: Category { id: row.category_id, name: row.category_name },
        }
    }
}
