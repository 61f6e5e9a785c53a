mod book;
mod category;

pub use self::book::{Book, BookDraft};
pub use self::category::Category;
pub(crate) use self::book::BookRow;
pub(crate) use self::category::CategoryRow;
