//! Content-based recommendation by substring containment.
//!
//! A book is "similar" to a query when the query, compared
//! case-insensitively, occurs anywhere in its title or genre. There is no
//! ranking: matches keep the order of the input.

use crate::Book;

/// Returns `true` if `query` occurs in the book's title or genre, ignoring
/// case. A book without a genre can still match on its title.
///
/// # Examples
///
/// ```
/// use library_catalog_core::{Book, matches_query};
///
/// let book = Book {
///     id: 1,
///     title: "Dune Messiah".into(),
///     author: "Frank Herbert".into(),
///     year: Some(1969),
///     genre: None,
///     added_date: None,
/// };
/// assert!(matches_query(&book, "dune"));
/// assert!(!matches_query(&book, "sci-fi"));
/// ```
pub fn matches_query(book: &Book, query: &str) -> bool {
    let needle = query.to_lowercase();
    book.title.to_lowercase().contains(&needle)
        || book
            .genre
            .as_deref()
            .is_some_and(|genre| genre.to_lowercase().contains(&needle))
}

/// Filters `books` down to those matching `query`, preserving order.
pub fn recommend<I>(books: I, query: &str) -> Vec<Book>
where
    I: IntoIterator<Item = Book>,
{
    books
        .into_iter()
        .filter(|book| matches_query(book, query))
        .collect()
}
