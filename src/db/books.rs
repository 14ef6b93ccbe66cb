use anyhow::{Context, Result};
use rusqlite::{params, Connection, Error as SqlError, ErrorCode};
use thiserror::Error;

use crate::models::Book;

/// Store failures the shell needs to tell apart from generic breakage. Right
/// now that is only the duplicate title; everything else travels through the
/// anyhow chain untyped.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("A book titled '{0}' already exists.")]
    DuplicateTitle(String),
}

/// Insert a new book row with all seven fields. The title is the primary key,
/// so inserting an existing title fails with [`CatalogError::DuplicateTitle`].
pub fn create_book(conn: &Connection, book: &Book) -> Result<()> {
    conn.execute(
        "INSERT INTO books (title, author, year, genre, read_status, rating, summary)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            book.title,
            book.author,
            book.year,
            book.genre,
            book.read_status,
            book.rating,
            book.summary
        ],
    )
    .map_err(|err| map_duplicate_title(err, &book.title))
    .context("failed to insert book")?;

    Ok(())
}

/// Delete the row matching the title exactly. Returns whether a row was
/// removed; a missing title is a no-op, not an error.
pub fn delete_book(conn: &Connection, title: &str) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM books WHERE title = ?1", params![title])
        .context("failed to delete book")?;

    Ok(deleted > 0)
}

/// Retrieve every book in insertion (rowid) order.
pub fn fetch_books(conn: &Connection) -> Result<Vec<Book>> {
    let mut stmt = conn
        .prepare(
            "SELECT title, author, year, genre, read_status, rating, summary
             FROM books",
        )
        .context("failed to prepare book query")?;

    let books = stmt
        .query_map([], |row| {
            Ok(Book {
                title: row.get(0)?,
                author: row.get(1)?,
                year: row.get(2)?,
                genre: row.get(3)?,
                read_status: row.get(4)?,
                rating: row.get(5)?,
                summary: row.get(6)?,
            })
        })
        .context("failed to iterate books")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect books")?;

    Ok(books)
}

/// Substring search across title and author with a single OR-combined LIKE
/// query. Matching is case-insensitive for ASCII, which is SQLite's LIKE
/// behavior. Callers treat an empty term as "no search performed" and must not
/// call this with one; passing it anyway would match every row.
pub fn search_books(conn: &Connection, term: &str) -> Result<Vec<Book>> {
    let pattern = format!("%{term}%");

    let mut stmt = conn
        .prepare(
            "SELECT title, author, year, genre, read_status, rating, summary
             FROM books
             WHERE title LIKE ?1 OR author LIKE ?1",
        )
        .context("failed to prepare search query")?;

    let books = stmt
        .query_map([pattern], |row| {
            Ok(Book {
                title: row.get(0)?,
                author: row.get(1)?,
                year: row.get(2)?,
                genre: row.get(3)?,
                read_status: row.get(4)?,
                rating: row.get(5)?,
                summary: row.get(6)?,
            })
        })
        .context("failed to iterate search results")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect search results")?;

    Ok(books)
}

/// Coerce SQLite constraint errors into the typed duplicate-title error. The
/// only constraint on the table is the title primary key, so a constraint
/// violation on insert can mean nothing else.
fn map_duplicate_title(err: SqlError, title: &str) -> anyhow::Error {
    if matches!(err.sqlite_error_code(), Some(ErrorCode::ConstraintViolation)) {
        CatalogError::DuplicateTitle(title.to_string()).into()
    } else {
        err.into()
    }
}
