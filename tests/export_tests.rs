mod common;

use std::env;
use std::fs;
use std::path::PathBuf;

use book_catalog_manager::db::create_book;
use book_catalog_manager::export::{export_csv, write_csv, CSV_HEADER};
use book_catalog_manager::Book;
use common::{book, dune, open_test_catalog};

/// Decode exported bytes back into records so round-trip tests can compare
/// against what was inserted.
fn parse_export(bytes: &[u8]) -> Vec<Book> {
    let mut rdr = csv::Reader::from_reader(bytes);
    assert_eq!(
        rdr.headers().expect("read header").iter().collect::<Vec<_>>(),
        CSV_HEADER
    );

    rdr.records()
        .map(|record| {
            let record = record.expect("read record");
            Book {
                title: record[0].to_string(),
                author: record[1].to_string(),
                year: record[2].parse().expect("parse year"),
                genre: record[3].to_string(),
                read_status: record[4].parse().expect("parse read flag"),
                rating: record[5].parse().expect("parse rating"),
                summary: record[6].to_string(),
            }
        })
        .collect()
}

#[test]
fn empty_catalog_exports_header_only() {
    let conn = open_test_catalog();

    let bytes = export_csv(&conn).expect("export");
    let text = String::from_utf8(bytes).expect("utf-8 output");
    assert_eq!(text.trim_end(), "Title,Author,Year,Genre,Read,Rating,Summary");
}

#[test]
fn export_round_trips_every_field() {
    let conn = open_test_catalog();
    create_book(&conn, &dune()).expect("insert book");
    create_book(&conn, &book("Hyperion", "Dan Simmons")).expect("insert book");

    let bytes = export_csv(&conn).expect("export");
    let parsed = parse_export(&bytes);

    assert_eq!(parsed, vec![dune(), book("Hyperion", "Dan Simmons")]);
}

#[test]
fn export_quotes_awkward_field_content() {
    let conn = open_test_catalog();
    let tricky = Book {
        title: "Me, Myself \"and\" I".to_string(),
        author: "A, B".to_string(),
        year: 2001,
        genre: String::new(),
        read_status: false,
        rating: 2,
        summary: "line one\nline two, with a comma".to_string(),
    };
    create_book(&conn, &tricky).expect("insert book");

    let bytes = export_csv(&conn).expect("export");
    let parsed = parse_export(&bytes);

    assert_eq!(parsed, vec![tricky]);
}

#[test]
fn write_csv_creates_the_export_file() {
    let conn = open_test_catalog();
    create_book(&conn, &dune()).expect("insert book");

    let mut path: PathBuf = env::temp_dir();
    path.push("book_catalog_manager_export_test.csv");
    fs::remove_file(&path).ok();

    write_csv(&path, &conn).expect("write export file");

    let content = fs::read_to_string(&path).expect("read exported csv");
    assert!(content.starts_with("Title,Author,Year,Genre,Read,Rating,Summary"));
    assert!(content.contains("Dune"));
    assert!(content.contains("Frank Herbert"));

    fs::remove_file(&path).ok();
}
