//! Core types and rules for the personal library catalog.
//!
//! This crate has no I/O. It defines:
//!
//! - [`Book`] — a stored row, with its one-line listing form via `Display`.
//! - [`NewBook`] — the insert payload.
//! - [`parse_year`] / [`parse_book_id`] — validation of user-typed fields,
//!   failing with [`ValidationError`].
//! - [`recommend`] / [`matches_query`] — case-insensitive substring matching
//!   over title and genre.
//!
//! # Example
//!
//! ```
//! use library_catalog_core::*;
//!
//! let year = parse_year("1965").unwrap();
//! let new_book = NewBook::new("Dune", "Frank Herbert", year).with_genre("Sci-Fi");
//! assert_eq!(new_book.year, 1965);
//!
//! let stored = Book {
//!     id: 1,
//!     title: new_book.title,
//!     author: new_book.author,
//!     year: Some(new_book.year),
//!     genre: new_book.genre,
//!     added_date: Some("2024-01-01 09:00:00".into()),
//! };
//! assert_eq!(recommend(vec![stored], "sci").len(), 1);
//! ```

mod recommend;
mod types;
mod validate;

pub use recommend::{matches_query, recommend};
pub use types::*;
pub use validate::{ValidationError, parse_book_id, parse_year};
