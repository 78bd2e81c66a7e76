//! SQLite record store for the personal library catalog.
//!
//! This crate owns the `books` table and every statement run against it.
//! It is organized into four modules:
//!
//! - **`schema`** — SQL text for the table and for additive column changes
//! - **`migration`** — table creation, column detection and best-effort
//!   `ALTER TABLE … ADD COLUMN`
//! - **`convert`** — `Book` ↔ row conversion, tolerant of both table shapes
//! - **`store`** — [`BookStore`], the handle the application passes around
//!
//! # Quick start
//!
//! ```no_run
//! use library_catalog_core::NewBook;
//! use library_catalog_sqlite::BookStore;
//!
//! let mut store = BookStore::open("library.db").unwrap();
//! store.insert(&NewBook::new("Dune", "Frank Herbert", 1965)).unwrap();
//!
//! for book in store.select_all().unwrap() {
//!     println!("{book}");
//! }
//! ```
//!
//! # Table shapes
//!
//! Databases created by older versions may lack the `added_date` column.
//! [`BookStore`] detects this when it is opened; such rows read back with
//! `added_date: None` and inserts simply leave the column out until
//! [`BookStore::add_added_date_column`] has been run.

mod convert;
mod error;
mod migration;
mod schema;
mod store;

pub use error::{Result, StoreError};
pub use migration::{ColumnOutcome, MigrationStatus, add_column_if_absent, ensure_schema, has_column};
pub use schema::{ADDED_DATE_COLUMN, BOOKS_TABLE};
pub use store::{BookStore, DeleteOutcome, Recommendations};
