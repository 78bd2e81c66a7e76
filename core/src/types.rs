//! Book record types.
//!
//! [`Book`] is a row as read back from the store; [`NewBook`] is the payload
//! handed to the store for insertion. The store owns `id` and `added_date`,
//! so neither appears on [`NewBook`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Format of the `added_date` column (`YYYY-MM-DD HH:MM:SS`, local time).
pub const ADDED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A book as stored in the catalog.
///
/// `added_date` is `None` for rows inserted before the column existed, and
/// for every row when the table has not been migrated yet.
///
/// # Examples
///
/// ```
/// use library_catalog_core::Book;
///
/// let book = Book {
///     id: 3,
///     title: "Dune".into(),
///     author: "Frank Herbert".into(),
///     year: Some(1965),
///     genre: Some("Sci-Fi".into()),
///     added_date: None,
/// };
/// assert_eq!(
///     book.to_string(),
///     "[3] Dune by Frank Herbert (1965) - Genre: Sci-Fi"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Store-assigned identifier, never reused.
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: Option<i64>,
    pub genre: Option<String>,
    /// Insert timestamp in [`ADDED_DATE_FORMAT`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_date: Option<String>,
}

/// Renders the single-line listing form:
/// `[id] title by author (year) - Genre: genre, Added: added_date`.
///
/// Missing year or genre print as `None`; a missing added date drops the
/// whole `, Added: …` segment.
impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} by {} (", self.id, self.title, self.author)?;
        match self.year {
            Some(year) => write!(f, "{year}")?,
            None => f.write_str("None")?,
        }
        f.write_str(") - Genre: ")?;
        f.write_str(self.genre.as_deref().unwrap_or("None"))?;
        if let Some(added) = &self.added_date {
            write!(f, ", Added: {added}")?;
        }
        Ok(())
    }
}

/// Fields supplied by the user when adding a book.
///
/// # Examples
///
/// ```
/// use library_catalog_core::NewBook;
///
/// let book = NewBook::new("Atlas", "Someone", 2001).with_genre("Fiction");
/// assert_eq!(book.genre.as_deref(), Some("Fiction"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i64,
    pub genre: Option<String>,
}

impl NewBook {
    /// Creates a book with no genre.
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i64) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            genre: None,
        }
    }

    /// Sets the genre.
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> Book {
        Book {
            id: 1,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            year: Some(1965),
            genre: Some("Sci-Fi".to_string()),
            added_date: Some("2024-05-01 10:20:30".to_string()),
        }
    }

    #[test]
    fn test_display_with_added_date() {
        assert_eq!(
            dune().to_string(),
            "[1] Dune by Frank Herbert (1965) - Genre: Sci-Fi, Added: 2024-05-01 10:20:30"
        );
    }

    #[test]
    fn test_display_without_added_date() {
        let mut book = dune();
        book.added_date = None;
        assert_eq!(
            book.to_string(),
            "[1] Dune by Frank Herbert (1965) - Genre: Sci-Fi"
        );
    }

    #[test]
    fn test_display_missing_year_and_genre() {
        let mut book = dune();
        book.year = None;
        book.genre = None;
        book.added_date = None;
        assert_eq!(book.to_string(), "[1] Dune by Frank Herbert (None) - Genre: None");
    }

    #[test]
    fn test_json_omits_absent_added_date() {
        let mut book = dune();
        book.added_date = None;
        let json = serde_json::to_value(&book).unwrap();
        assert!(json.get("added_date").is_none());
        assert_eq!(json["title"], "Dune");

        let back: Book = serde_json::from_value(json).unwrap();
        assert_eq!(back, book);
    }

    #[test]
    fn test_new_book_builder() {
        let book = NewBook::new("Atlas", "A. Writer", 2001);
        assert_eq!(book.genre, None);
        assert_eq!(book.with_genre("Fiction").genre.as_deref(), Some("Fiction"));
    }
}
