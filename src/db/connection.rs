use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::Connection;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".book-catalog-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "library.db";

/// Ensure the database file exists, create the table lazily, and return a live
/// connection. The caller keeps the connection for the whole session; it is
/// released when the process exits.
pub fn ensure_schema() -> Result<Connection> {
    let db_path = db_path()?;

    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(&db_path).context("failed to open SQLite database")?;
    apply_schema(&conn)?;

    Ok(conn)
}

/// Create the `books` table if it is missing. Split out from [`ensure_schema`]
/// so tests can run the exact same DDL against an in-memory connection.
pub fn apply_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS books (
            title TEXT PRIMARY KEY,
            author TEXT,
            year INTEGER,
            genre TEXT,
            read_status BOOLEAN NOT NULL DEFAULT 0,
            rating INTEGER,
            summary TEXT
        )",
        [],
    )
    .context("failed to create books table")?;

    Ok(())
}

/// Version string of the linked SQLite library, shown in the sidebar.
pub fn sqlite_version() -> &'static str {
    rusqlite::version()
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
