/// A classification that books belong to.
///
/// Read-only from this crate's perspective: categories are seeded by
/// migration and otherwise managed directly in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(sqlx::FromRow)]
pub(crate) struct CategoryRow {
    pub(crate) id: i64,
    pub(crate) name: String,
}
impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self { id: row.id, name: row.name }
    }
}
