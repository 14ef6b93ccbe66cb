#![allow(dead_code)]
use book_catalog_manager::db::apply_schema;
use book_catalog_manager::Book;
use rusqlite::Connection;

/// Open an in-memory catalog with the production schema applied.
pub fn open_test_catalog() -> Connection {
    let conn = Connection::open_in_memory().expect("open in-memory database");
    apply_schema(&conn).expect("apply schema");
    conn
}

/// Build a book with the given title and author and unremarkable defaults.
pub fn book(title: &str, author: &str) -> Book {
    Book {
        title: title.to_string(),
        author: author.to_string(),
        year: 2000,
        genre: "Fiction".to_string(),
        read_status: false,
        rating: 3,
        summary: String::new(),
    }
}

/// The fixture record used throughout the test suite.
pub fn dune() -> Book {
    Book {
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        year: 1965,
        genre: "SciFi".to_string(),
        read_status: true,
        rating: 5,
        summary: "A desert planet, a spice, a prophecy.".to_string(),
    }
}
