//! Persistence module split across logical submodules.

mod books;
mod connection;

pub use books::{create_book, delete_book, fetch_books, search_books, CatalogError};
pub use connection::{apply_schema, ensure_schema, sqlite_version};
