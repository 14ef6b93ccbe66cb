//! CSV export of the catalog. The whole feature is one serialization pass over
//! `fetch_books`, so it lives in a single module next to the store.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use csv::Writer;
use directories::BaseDirs;
use rusqlite::Connection;

use crate::db::fetch_books;
use crate::models::Book;

/// Fixed header row of the exported file. Kept as a constant because the
/// export tests and the writer must agree on the exact column set.
pub const CSV_HEADER: [&str; 7] = [
    "Title", "Author", "Year", "Genre", "Read", "Rating", "Summary",
];

/// File name of the export dropped into the user's home directory.
const EXPORT_FILE_NAME: &str = "library.csv";

/// Serialize the entire catalog as UTF-8 CSV bytes, header row included.
pub fn export_csv(conn: &Connection) -> Result<Vec<u8>> {
    let books = fetch_books(conn)?;
    books_to_csv(&books)
}

/// Serialize a slice of books. Split out so tests can exercise the encoding
/// without a database.
pub fn books_to_csv(books: &[Book]) -> Result<Vec<u8>> {
    let mut wtr = Writer::from_writer(Vec::new());

    wtr.write_record(CSV_HEADER)
        .context("failed to write CSV header")?;

    for book in books {
        wtr.write_record([
            book.title.clone(),
            book.author.clone(),
            book.year.to_string(),
            book.genre.clone(),
            book.read_status.to_string(),
            book.rating.to_string(),
            book.summary.clone(),
        ])
        .context("failed to write CSV row")?;
    }

    wtr.into_inner()
        .map_err(|err| anyhow!("failed to finish CSV export: {err}"))
}

/// Write the exported catalog to the given path.
pub fn write_csv(path: &Path, conn: &Connection) -> Result<()> {
    let bytes = export_csv(conn)?;
    fs::write(path, bytes)
        .with_context(|| format!("failed to write export file {}", path.display()))
}

/// Default location for the export: `library.csv` in the user's home.
pub fn default_export_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(EXPORT_FILE_NAME))
}
