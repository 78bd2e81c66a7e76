//! The book record store.
//!
//! [`BookStore`] is the explicit handle every operation goes through. It is
//! opened once, creates the table if needed, and caches whether the table
//! has the `added_date` column so that reads and inserts never have to ask
//! again. Each mutation runs in its own transaction and is committed before
//! the call returns.
//!
//! # Example
//!
//! ```
//! use library_catalog_core::NewBook;
//! use library_catalog_sqlite::{BookStore, DeleteOutcome};
//!
//! let mut store = BookStore::open_in_memory().unwrap();
//! let id = store
//!     .insert(&NewBook::new("Dune", "Frank Herbert", 1965).with_genre("Sci-Fi"))
//!     .unwrap();
//!
//! let found = store.select_matching("Dune").unwrap();
//! assert_eq!(found.len(), 1);
//!
//! assert_eq!(store.delete(id).unwrap(), DeleteOutcome::Deleted);
//! assert_eq!(store.delete(id).unwrap(), DeleteOutcome::NotFound);
//! ```

use std::path::Path;

use library_catalog_core::{Book, NewBook, recommend};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::convert::{book_from_row, insert_book, select_columns};
use crate::error::Result;
use crate::migration::{self, ColumnOutcome, MigrationStatus};
use crate::schema::{ADDED_DATE_COLUMN, BOOKS_TABLE, like_pattern};

/// Outcome of [`BookStore::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The row existed and was removed.
    Deleted,
    /// No row had that id.
    NotFound,
}

/// Outcome of [`BookStore::recommend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendations {
    /// The catalog holds no books at all.
    EmptyCatalog,
    /// Books whose title or genre contains the query. May be empty.
    Matches(Vec<Book>),
}

/// Handle over the `books` table.
pub struct BookStore {
    conn: Connection,
    has_added_date: bool,
}

impl BookStore {
    /// Opens (creating if necessary) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening book store");
        Self::from_connection(Connection::open(path)?)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Wraps an existing connection, ensuring the table exists and detecting
    /// its shape.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        migration::ensure_schema(&conn)?;
        let has_added_date = migration::has_column(&conn, ADDED_DATE_COLUMN)?;
        debug!(has_added_date, "book store ready");
        Ok(Self {
            conn,
            has_added_date,
        })
    }

    /// Whether the table has the `added_date` column, as detected at open
    /// time or after the last migration.
    pub fn has_added_date(&self) -> bool {
        self.has_added_date
    }

    /// Creates the table if absent. Called by every constructor; exposed
    /// for callers that want to re-run it.
    pub fn ensure_schema(&self) -> Result<()> {
        migration::ensure_schema(&self.conn)
    }

    /// Appends a book and returns its id. Identical books are stored as
    /// separate rows.
    pub fn insert(&mut self, book: &NewBook) -> Result<i64> {
        let tx = self.conn.transaction()?;
        let id = insert_book(&tx, book, self.has_added_date)?;
        tx.commit()?;
        debug!(id, title = %book.title, "book inserted");
        Ok(id)
    }

    /// Returns every book, most recently inserted first.
    pub fn select_all(&self) -> Result<Vec<Book>> {
        let with_added = self.has_added_date;
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM {BOOKS_TABLE} ORDER BY id DESC",
            select_columns(with_added)
        ))?;
        let books = stmt
            .query_map([], |row| book_from_row(row, with_added))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(books)
    }

    /// Returns books whose title, author or genre contains `keyword`.
    ///
    /// Matching uses SQLite `LIKE`, so it ignores ASCII case. Wildcard
    /// characters in `keyword` match themselves. An empty keyword matches
    /// every book; a NULL genre never matches.
    pub fn select_matching(&self, keyword: &str) -> Result<Vec<Book>> {
        let with_added = self.has_added_date;
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM {BOOKS_TABLE} \
             WHERE title LIKE ?1 ESCAPE '\\' OR author LIKE ?1 ESCAPE '\\' OR genre LIKE ?1 ESCAPE '\\' \
             ORDER BY id DESC",
            select_columns(with_added)
        ))?;
        let books = stmt
            .query_map(params![like_pattern(keyword)], |row| book_from_row(row, with_added))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!(keyword, matches = books.len(), "search finished");
        Ok(books)
    }

    /// Looks up a single book.
    pub fn get(&self, id: i64) -> Result<Option<Book>> {
        let with_added = self.has_added_date;
        let book = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM {BOOKS_TABLE} WHERE id = ?1",
                    select_columns(with_added)
                ),
                params![id],
                |row| book_from_row(row, with_added),
            )
            .optional()?;
        Ok(book)
    }

    /// Deletes the book with `id`.
    ///
    /// Existence is checked before deleting, inside the same transaction, so
    /// [`DeleteOutcome::NotFound`] is reported without touching the table.
    pub fn delete(&mut self, id: i64) -> Result<DeleteOutcome> {
        let tx = self.conn.transaction()?;
        let exists: bool = tx.query_row(
            &format!("SELECT EXISTS(SELECT 1 FROM {BOOKS_TABLE} WHERE id = ?1)"),
            params![id],
            |row| row.get(0),
        )?;

        if !exists {
            debug!(id, "delete: no such book");
            return Ok(DeleteOutcome::NotFound);
        }

        tx.execute(
            &format!("DELETE FROM {BOOKS_TABLE} WHERE id = ?1"),
            params![id],
        )?;
        tx.commit()?;
        debug!(id, "book deleted");
        Ok(DeleteOutcome::Deleted)
    }

    /// Loads every book once and keeps those whose title or genre contains
    /// `query`, ignoring case.
    pub fn recommend(&self, query: &str) -> Result<Recommendations> {
        let books = self.select_all()?;
        if books.is_empty() {
            return Ok(Recommendations::EmptyCatalog);
        }
        Ok(Recommendations::Matches(recommend(books, query)))
    }

    /// Best-effort `ALTER TABLE books ADD COLUMN`. Engine refusals come back
    /// as [`ColumnOutcome::Skipped`]. The cached `added_date` capability is
    /// refreshed afterwards.
    pub fn add_column_if_absent(&mut self, name: &str, sql_type: &str) -> Result<ColumnOutcome> {
        let outcome = migration::add_column_if_absent(&self.conn, name, sql_type)?;
        self.has_added_date = migration::has_column(&self.conn, ADDED_DATE_COLUMN)?;
        Ok(outcome)
    }

    /// Adds the `added_date` column to a table that predates it.
    pub fn add_added_date_column(&mut self) -> Result<ColumnOutcome> {
        self.add_column_if_absent(ADDED_DATE_COLUMN, "TEXT")
    }

    /// Number of stored books.
    pub fn count(&self) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row(&format!("SELECT COUNT(*) FROM {BOOKS_TABLE}"), [], |row| {
                    row.get(0)
                })?;
        Ok(count as usize)
    }

    /// Table status: existence, row count and `added_date` presence.
    pub fn status(&self) -> Result<MigrationStatus> {
        migration::status(&self.conn)
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
