//! SQL text for the `books` table.
//!
//! The table shape is fixed:
//!
//! ```sql
//! books(id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT NOT NULL,
//!       author TEXT NOT NULL, year INTEGER, genre TEXT, added_date TEXT)
//! ```
//!
//! Older databases may lack `added_date`; [`add_column_sql`] produces the
//! additive `ALTER TABLE` that brings them up to date.

use crate::error::{Result, StoreError};

/// Name of the single table.
pub const BOOKS_TABLE: &str = "books";

/// Column stamped with the insert timestamp.
pub const ADDED_DATE_COLUMN: &str = "added_date";

/// Validates that a name contains only alphanumeric characters and underscores.
///
/// Anything spliced into DDL goes through here first, since identifiers
/// cannot be bound as parameters.
pub(crate) fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(StoreError::InvalidIdentifier(name.to_string()));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(StoreError::InvalidIdentifier(name.to_string()));
    }
    Ok(())
}

/// Generates the idempotent `CREATE TABLE` statement.
pub fn generate_schema_sql() -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {BOOKS_TABLE} (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    year INTEGER,
    genre TEXT,
    {ADDED_DATE_COLUMN} TEXT
);
"#
    )
}

/// Generates `ALTER TABLE books ADD COLUMN {name} {sql_type}`.
///
/// # Errors
///
/// Returns [`StoreError::InvalidIdentifier`] if either the column name or
/// the type name is not a plain identifier.
pub fn add_column_sql(name: &str, sql_type: &str) -> Result<String> {
    validate_identifier(name)?;
    validate_identifier(sql_type)?;
    Ok(format!("ALTER TABLE {BOOKS_TABLE} ADD COLUMN {name} {sql_type}"))
}

/// Escapes `%`, `_` and `\` so `keyword` matches literally inside a
/// `LIKE … ESCAPE '\'` pattern, and wraps it in `%` wildcards.
pub(crate) fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifier() {
        assert!(validate_identifier("added_date").is_ok());
        assert!(validate_identifier("TEXT").is_ok());
        assert!(validate_identifier("col2").is_ok());
    }

    #[test]
    fn test_invalid_identifier() {
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("drop;--").is_err());
        assert!(validate_identifier("two words").is_err());
        assert!(validate_identifier("café").is_err());
    }

    #[test]
    fn test_generate_schema_sql_has_all_columns() {
        let sql = generate_schema_sql();
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS books"));
        assert!(sql.contains("id INTEGER PRIMARY KEY AUTOINCREMENT"));
        assert!(sql.contains("title TEXT NOT NULL"));
        assert!(sql.contains("author TEXT NOT NULL"));
        assert!(sql.contains("year INTEGER"));
        assert!(sql.contains("genre TEXT"));
        assert!(sql.contains("added_date TEXT"));
    }

    #[test]
    fn test_add_column_sql() {
        assert_eq!(
            add_column_sql("added_date", "TEXT").unwrap(),
            "ALTER TABLE books ADD COLUMN added_date TEXT"
        );
        assert!(add_column_sql("x; DROP TABLE books", "TEXT").is_err());
        assert!(add_column_sql("x", "TEXT DEFAULT 1").is_err());
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Dune"), "%Dune%");
        assert_eq!(like_pattern(""), "%%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b\\c"), "%a\\_b\\\\c%");
    }

    #[test]
    fn test_schema_sql_executes() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch(&generate_schema_sql()).unwrap();
        conn.execute_batch(&generate_schema_sql()).unwrap();

        // title and author are NOT NULL
        assert!(conn
            .execute("INSERT INTO books (title, author) VALUES (NULL, 'a')", [])
            .is_err());
        assert!(conn
            .execute("INSERT INTO books (title, author) VALUES ('t', 'a')", [])
            .is_ok());
    }
}
