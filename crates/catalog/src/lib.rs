//! SQLite catalog database for books and their categories.
//!
//! This crate owns the persistent state of the service: a `books` table and
//! the `categories` table it references. The database file IS the source of
//! truth; there is no upstream to rebuild it from.
//!
//! # Architecture
//! Two entity types with a one-to-many relationship:
//! - **Categories**: reference data that classifies books. Their lifecycle is
//!   managed outside this service (seeded by migration, edited directly in
//!   the database); the repository only ever reads them.
//! - **Books**: the managed records. Each book stores a `category_id` foreign
//!   key as the source of truth and resolves the full [`Category`] by join on
//!   every read.

mod db;
pub mod error;
mod models;
mod repo;

pub use crate::db::Database;
pub use crate::models::{Book, BookDraft, Category};
pub use crate::repo::Repository;
