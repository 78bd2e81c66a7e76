//! Conversion between [`Book`]/[`NewBook`] values and `books` rows.
//!
//! The select list depends on whether the table has an `added_date`
//! column; [`select_columns`] builds it and [`book_from_row`] reads it back
//! by position.
//!
//! `year` is read leniently: rows written by older tools may hold the year
//! as text, which is parsed when possible and treated as missing otherwise.

use chrono::Local;
use library_catalog_core::{ADDED_DATE_FORMAT, Book, NewBook};
use rusqlite::types::Value;
use rusqlite::{Connection, Row, params};

use crate::error::Result;
use crate::schema::{ADDED_DATE_COLUMN, BOOKS_TABLE};

/// Returns the column list for a `SELECT` over `books`.
pub(crate) fn select_columns(with_added_date: bool) -> String {
    if with_added_date {
        format!("id, title, author, year, genre, {ADDED_DATE_COLUMN}")
    } else {
        "id, title, author, year, genre".to_string()
    }
}

/// Builds a [`Book`] from a row produced by [`select_columns`].
pub(crate) fn book_from_row(row: &Row<'_>, with_added_date: bool) -> rusqlite::Result<Book> {
    let added_date = if with_added_date {
        row.get::<_, Option<String>>(5)?
    } else {
        None
    };
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        year: year_from_value(row.get(3)?),
        genre: row.get(4)?,
        added_date,
    })
}

/// Interprets a stored `year` cell.
pub(crate) fn year_from_value(value: Value) -> Option<i64> {
    match value {
        Value::Integer(year) => Some(year),
        Value::Real(year) if year.fract() == 0.0 => Some(year as i64),
        Value::Text(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Current local time in [`ADDED_DATE_FORMAT`].
pub(crate) fn added_date_now() -> String {
    Local::now().format(ADDED_DATE_FORMAT).to_string()
}

/// Inserts one book and returns its new id.
///
/// When `with_added_date` is set the row is stamped with the current local
/// time; otherwise the column is left out entirely, since the table does not
/// have it.
pub(crate) fn insert_book(conn: &Connection, book: &NewBook, with_added_date: bool) -> Result<i64> {
    if with_added_date {
        conn.execute(
            &format!(
                "INSERT INTO {BOOKS_TABLE} (title, author, year, genre, {ADDED_DATE_COLUMN}) \
                 VALUES (?1, ?2, ?3, ?4, ?5)"
            ),
            params![book.title, book.author, book.year, book.genre, added_date_now()],
        )?;
    } else {
        conn.execute(
            &format!("INSERT INTO {BOOKS_TABLE} (title, author, year, genre) VALUES (?1, ?2, ?3, ?4)"),
            params![book.title, book.author, book.year, book.genre],
        )?;
    }
    Ok(conn.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_columns() {
        assert_eq!(select_columns(false), "id, title, author, year, genre");
        assert_eq!(
            select_columns(true),
            "id, title, author, year, genre, added_date"
        );
    }

    #[test]
    fn test_year_from_value() {
        assert_eq!(year_from_value(Value::Integer(1965)), Some(1965));
        assert_eq!(year_from_value(Value::Real(1965.0)), Some(1965));
        assert_eq!(year_from_value(Value::Real(1965.5)), None);
        assert_eq!(year_from_value(Value::Text(" 1984 ".into())), Some(1984));
        assert_eq!(year_from_value(Value::Text("unknown".into())), None);
        assert_eq!(year_from_value(Value::Null), None);
        assert_eq!(year_from_value(Value::Blob(vec![1, 2])), None);
    }

    #[test]
    fn test_added_date_now_format() {
        let stamp = added_date_now();
        assert!(chrono::NaiveDateTime::parse_from_str(&stamp, ADDED_DATE_FORMAT).is_ok());
        assert_eq!(stamp.len(), "YYYY-MM-DD HH:MM:SS".len());
    }

    #[test]
    fn test_insert_and_read_back_without_added_date() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE books (id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT NOT NULL, \
             author TEXT NOT NULL, year INTEGER, genre TEXT)",
        )
        .unwrap();

        let id = insert_book(&conn, &NewBook::new("Emma", "Jane Austen", 1815), false).unwrap();
        let book = conn
            .query_row(
                &format!("SELECT {} FROM books WHERE id = ?1", select_columns(false)),
                [id],
                |row| book_from_row(row, false),
            )
            .unwrap();
        assert_eq!(book.title, "Emma");
        assert_eq!(book.year, Some(1815));
        assert_eq!(book.genre, None);
        assert_eq!(book.added_date, None);
    }
}
