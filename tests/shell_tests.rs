//! Drives the interaction shell through its public key-event API against a
//! file-backed database, then verifies the catalog through a second
//! connection. No terminal is involved; `handle_key` is pure state handling.

mod common;

use std::env;
use std::fs;
use std::path::PathBuf;

use book_catalog_manager::db::{apply_schema, create_book, fetch_books};
use book_catalog_manager::{App, Book};
use crossterm::event::KeyCode;
use rusqlite::Connection;

/// Create a unique test DB path inside the system temp dir and remove any
/// existing file.
fn setup_test_db(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{name}_book_catalog.sqlite"));
    fs::remove_file(&path).ok();
    path
}

fn open_app(path: &PathBuf) -> App {
    let conn = Connection::open(path).expect("open database");
    apply_schema(&conn).expect("apply schema");
    App::new(conn)
}

fn press(app: &mut App, code: KeyCode) {
    let exit = app.handle_key(code).expect("handle key");
    assert!(!exit, "unexpected exit");
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch));
    }
}

#[test]
fn add_book_through_the_form_persists_every_field() {
    let path = setup_test_db("shell_add");
    let mut app = open_app(&path);

    // The sidebar starts on Add Book; Enter moves focus into the form.
    press(&mut app, KeyCode::Enter);

    type_text(&mut app, "Dune");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "Frank Herbert");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "1965");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "SciFi");
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Char(' ')); // toggle read
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Right); // rating 3 -> 4
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "A desert planet.");
    press(&mut app, KeyCode::Enter);

    let verify = Connection::open(&path).expect("reopen database");
    let books = fetch_books(&verify).expect("list books");
    assert_eq!(
        books,
        vec![Book {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            year: 1965,
            genre: "SciFi".to_string(),
            read_status: true,
            rating: 4,
            summary: "A desert planet.".to_string(),
        }]
    );

    fs::remove_file(&path).ok();
}

#[test]
fn duplicate_add_through_the_form_leaves_one_row() {
    let path = setup_test_db("shell_duplicate");
    let mut app = open_app(&path);

    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "Dune");
    press(&mut app, KeyCode::Enter);

    // The form reset after the first save; submit the same title again.
    type_text(&mut app, "Dune");
    press(&mut app, KeyCode::Enter);

    let verify = Connection::open(&path).expect("reopen database");
    let books = fetch_books(&verify).expect("list books");
    assert_eq!(books.len(), 1);

    fs::remove_file(&path).ok();
}

#[test]
fn remove_flow_deletes_the_selected_title() {
    let path = setup_test_db("shell_remove");
    {
        let conn = Connection::open(&path).expect("open database");
        apply_schema(&conn).expect("apply schema");
        create_book(&conn, &common::dune()).expect("insert book");
        create_book(&conn, &common::book("Hyperion", "Dan Simmons")).expect("insert book");
    }
    let mut app = open_app(&path);

    // Move the sidebar to Remove Book and enter the selector.
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);

    // Confirm removal of the first title.
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('y'));

    let verify = Connection::open(&path).expect("reopen database");
    let titles: Vec<String> = fetch_books(&verify)
        .expect("list books")
        .into_iter()
        .map(|b| b.title)
        .collect();
    assert_eq!(titles, ["Hyperion"]);

    fs::remove_file(&path).ok();
}

#[test]
fn cancelled_removal_keeps_the_catalog_intact() {
    let path = setup_test_db("shell_remove_cancel");
    {
        let conn = Connection::open(&path).expect("open database");
        apply_schema(&conn).expect("apply schema");
        create_book(&conn, &common::dune()).expect("insert book");
    }
    let mut app = open_app(&path);

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('n'));

    let verify = Connection::open(&path).expect("reopen database");
    assert_eq!(fetch_books(&verify).expect("list books").len(), 1);

    fs::remove_file(&path).ok();
}

#[test]
fn empty_search_term_performs_no_query_and_keeps_the_shell_usable() {
    let path = setup_test_db("shell_empty_search");
    let mut app = open_app(&path);

    // Sidebar: Add Book -> Remove Book -> Search Book.
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);

    // Enter with an empty term is treated as "no search performed".
    press(&mut app, KeyCode::Enter);

    // The shell stays usable: go back to the menu and add a book.
    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "Solaris");
    press(&mut app, KeyCode::Enter);

    let verify = Connection::open(&path).expect("reopen database");
    let books = fetch_books(&verify).expect("list books");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Solaris");

    fs::remove_file(&path).ok();
}

#[test]
fn quitting_from_the_sidebar_sets_the_exit_flag() {
    let path = setup_test_db("shell_quit");
    let mut app = open_app(&path);

    let exit = app.handle_key(KeyCode::Char('q')).expect("handle key");
    assert!(exit);

    fs::remove_file(&path).ok();
}
