//! Schema lifecycle for the `books` table.
//!
//! Two operations exist: [`ensure_schema`] creates the table on first use,
//! and [`add_column_if_absent`] performs a best-effort additive change on a
//! table created by an older version. Neither ever drops or renames
//! anything.
//!
//! # Example
//!
//! ```
//! use library_catalog_sqlite::{ColumnOutcome, add_column_if_absent, ensure_schema, has_column};
//! use rusqlite::Connection;
//!
//! let conn = Connection::open_in_memory().unwrap();
//! conn.execute_batch(
//!     "CREATE TABLE books (id INTEGER PRIMARY KEY AUTOINCREMENT, \
//!      title TEXT NOT NULL, author TEXT NOT NULL, year INTEGER, genre TEXT)",
//! ).unwrap();
//!
//! ensure_schema(&conn).unwrap(); // existing table is left as is
//! assert!(!has_column(&conn, "added_date").unwrap());
//!
//! let outcome = add_column_if_absent(&conn, "added_date", "TEXT").unwrap();
//! assert_eq!(outcome, ColumnOutcome::Added);
//!
//! let again = add_column_if_absent(&conn, "added_date", "TEXT").unwrap();
//! assert!(matches!(again, ColumnOutcome::Skipped(_)));
//! ```

use rusqlite::Connection;
use tracing::{info, warn};

use crate::error::{Result, StoreError};
use crate::schema::{
    ADDED_DATE_COLUMN, BOOKS_TABLE, add_column_sql, generate_schema_sql, validate_identifier,
};

/// Result of an additive column change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnOutcome {
    /// The column was created.
    Added,
    /// The engine refused the change (typically because the column already
    /// exists). Carries the engine's message.
    Skipped(String),
}

/// Snapshot of the table, as reported by [`status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Whether the `books` table exists.
    pub table_exists: bool,
    /// Number of rows in `books`.
    pub book_count: usize,
    /// Whether the table has the `added_date` column.
    pub has_added_date: bool,
}

/// Creates the `books` table if it does not exist.
///
/// Uses `CREATE TABLE IF NOT EXISTS` so it is safe to call on every start.
/// A pre-existing table keeps its shape, even if it lacks `added_date`.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(&generate_schema_sql())
        .map_err(|e| StoreError::MigrationError(format!("failed to create table: {e}")))?;
    tx.commit()?;
    info!(table = BOOKS_TABLE, "schema ensured");
    Ok(())
}

/// Returns `true` if `books` has a column called `column`.
pub fn has_column(conn: &Connection, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({BOOKS_TABLE})"))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(names.iter().any(|name| name == column))
}

/// Attempts `ALTER TABLE books ADD COLUMN {name} {sql_type}`.
///
/// Engine failures are not errors here: they are logged and returned as
/// [`ColumnOutcome::Skipped`], leaving the table untouched.
///
/// # Errors
///
/// Returns [`StoreError::InvalidIdentifier`] if `name` or `sql_type` is not
/// a plain identifier. Nothing is sent to the engine in that case.
pub fn add_column_if_absent(conn: &Connection, name: &str, sql_type: &str) -> Result<ColumnOutcome> {
    let sql = add_column_sql(name, sql_type)?;
    match conn.execute_batch(&sql) {
        Ok(()) => {
            info!(column = name, column_type = sql_type, "column added");
            Ok(ColumnOutcome::Added)
        }
        Err(err) => {
            warn!(column = name, error = %err, "column not added");
            Ok(ColumnOutcome::Skipped(err.to_string()))
        }
    }
}

/// Reports whether the table exists, how many rows it holds and whether it
/// has the `added_date` column.
pub fn status(conn: &Connection) -> Result<MigrationStatus> {
    if !table_exists(conn, BOOKS_TABLE)? {
        return Ok(MigrationStatus {
            table_exists: false,
            book_count: 0,
            has_added_date: false,
        });
    }

    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {BOOKS_TABLE}"), [], |row| {
        row.get(0)
    })?;

    Ok(MigrationStatus {
        table_exists: true,
        book_count: count as usize,
        has_added_date: has_column(conn, ADDED_DATE_COLUMN)?,
    })
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    validate_identifier(table)?;
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
