//! The interactive numbered menu.
//!
//! [`Shell`] reads choices and field values line by line from any
//! [`BufRead`] and writes prompts and results to any [`Write`], so it can be
//! driven by a terminal or by a test with byte buffers. It is the only place
//! that turns store outcomes into text.
//!
//! End of input is treated like choosing Exit: whatever operation was in
//! progress is abandoned (a bulk add still saves the books it fully
//! collected) and [`Shell::run`] returns.

use std::io::{self, BufRead, Write};

use library_catalog_core::{NewBook, parse_book_id, parse_year};
use library_catalog_sqlite::{BookStore, ColumnOutcome, DeleteOutcome, Recommendations, StoreError};
use tracing::{debug, error};

use crate::output::{RULE_WIDTH, write_listing};

const MENU: &str = "\
Library Menu:
1. Add Book
2. Interactive Bulk Add Books
3. View All Books
4. Search Books
5. Delete a Book
6. AI Book Recommendations
7. Update Database Schema (Add Columns)
8. Exit";

/// One entry of the menu, parsed from the user's choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddBook,
    BulkAdd,
    ViewAll,
    Search,
    Delete,
    Recommend,
    UpdateSchema,
    Exit,
}

impl MenuChoice {
    /// Parses a menu number (surrounding whitespace ignored).
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::AddBook),
            "2" => Some(Self::BulkAdd),
            "3" => Some(Self::ViewAll),
            "4" => Some(Self::Search),
            "5" => Some(Self::Delete),
            "6" => Some(Self::Recommend),
            "7" => Some(Self::UpdateSchema),
            "8" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Whether the menu loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive menu over a [`BookStore`].
pub struct Shell<'a, R, W> {
    store: &'a mut BookStore,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(store: &'a mut BookStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Runs the menu until Exit is chosen or input ends.
    ///
    /// Store failures inside an action are reported and the loop continues;
    /// only I/O errors on the shell's own streams are returned.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Database ready.")?;
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "{MENU}")?;
            let Some(line) = self.prompt("Enter your choice (1-8): ")? else {
                debug!("input closed at menu");
                break;
            };

            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(self.output, "Invalid choice. Please try again.")?;
                continue;
            };

            if self.dispatch(choice)? == Flow::Exit {
                break;
            }
        }
        self.output.flush()
    }

    fn dispatch(&mut self, choice: MenuChoice) -> io::Result<Flow> {
        debug!(?choice, "menu choice");
        match choice {
            MenuChoice::AddBook => self.add_book(),
            MenuChoice::BulkAdd => self.bulk_add(),
            MenuChoice::ViewAll => self.view_all(),
            MenuChoice::Search => self.search(),
            MenuChoice::Delete => self.delete(),
            MenuChoice::Recommend => self.recommend(),
            MenuChoice::UpdateSchema => self.update_schema(),
            MenuChoice::Exit => {
                writeln!(self.output, "Exiting Library Management. Goodbye!")?;
                Ok(Flow::Exit)
            }
        }
    }

    fn add_book(&mut self) -> io::Result<Flow> {
        let Some(title) = self.prompt("Enter book title: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(author) = self.prompt("Enter author: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(year) = self.prompt("Enter publication year: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(genre) = self.prompt("Enter genre: ")? else {
            return Ok(Flow::Exit);
        };

        let year = match parse_year(&year) {
            Ok(year) => year,
            Err(err) => {
                writeln!(self.output, "{err}")?;
                return Ok(Flow::Continue);
            }
        };

        self.insert(&NewBook::new(title, author, year).with_genre(genre))?;
        Ok(Flow::Continue)
    }

    fn bulk_add(&mut self) -> io::Result<Flow> {
        let (pending, flow) = self.collect_books()?;

        let mut added = 0usize;
        for book in &pending {
            if !self.insert(book)? {
                break;
            }
            added += 1;
        }

        writeln!(self.output)?;
        if added == pending.len() {
            writeln!(self.output, "Added {added} books successfully!")?;
        } else {
            writeln!(
                self.output,
                "Added {added} of {} books; the rest were not saved.",
                pending.len()
            )?;
        }
        Ok(flow)
    }

    /// Collects books until the user declines to continue. The year prompt
    /// alone repeats until it parses.
    fn collect_books(&mut self) -> io::Result<(Vec<NewBook>, Flow)> {
        let mut pending = Vec::new();
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "Enter details for a new book:")?;
            let Some(title) = self.prompt("Title: ")? else {
                return Ok((pending, Flow::Exit));
            };
            let Some(author) = self.prompt("Author: ")? else {
                return Ok((pending, Flow::Exit));
            };
            let year = loop {
                let Some(raw) = self.prompt("Year: ")? else {
                    return Ok((pending, Flow::Exit));
                };
                match parse_year(&raw) {
                    Ok(year) => break year,
                    Err(err) => writeln!(self.output, "{err}")?,
                }
            };
            let Some(genre) = self.prompt("Genre: ")? else {
                return Ok((pending, Flow::Exit));
            };
            pending.push(NewBook::new(title, author, year).with_genre(genre));

            let Some(answer) = self.prompt("Add another book? (y/n): ")? else {
                return Ok((pending, Flow::Exit));
            };
            if !answer.trim().eq_ignore_ascii_case("y") {
                return Ok((pending, Flow::Continue));
            }
        }
    }

    fn view_all(&mut self) -> io::Result<Flow> {
        match self.store.select_all() {
            Ok(books) if books.is_empty() => writeln!(self.output, "No books in the library.")?,
            Ok(books) => write_listing(&mut self.output, "Library Collection:", &books)?,
            Err(err) => self.report_store_error(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> io::Result<Flow> {
        let Some(keyword) = self.prompt("Enter search keyword: ")? else {
            return Ok(Flow::Exit);
        };
        match self.store.select_matching(&keyword) {
            Ok(books) if books.is_empty() => writeln!(self.output, "No matching books found.")?,
            Ok(books) => write_listing(
                &mut self.output,
                &format!("Search Results for '{keyword}':"),
                &books,
            )?,
            Err(err) => self.report_store_error(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> io::Result<Flow> {
        let Some(raw) = self.prompt("Enter the ID of the book to delete: ")? else {
            return Ok(Flow::Exit);
        };
        let id = match parse_book_id(&raw) {
            Ok(id) => id,
            Err(err) => {
                writeln!(self.output, "{err}")?;
                return Ok(Flow::Continue);
            }
        };
        match self.store.delete(id) {
            Ok(DeleteOutcome::Deleted) => {
                writeln!(self.output, "Book with ID {id} deleted successfully.")?
            }
            Ok(DeleteOutcome::NotFound) => writeln!(self.output, "No book found with ID {id}.")?,
            Err(err) => self.report_store_error(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn recommend(&mut self) -> io::Result<Flow> {
        let Some(query) = self.prompt("Enter book title for recommendations: ")? else {
            return Ok(Flow::Exit);
        };
        match self.store.recommend(&query) {
            Ok(Recommendations::EmptyCatalog) => {
                writeln!(self.output, "No books available for recommendation.")?
            }
            Ok(Recommendations::Matches(books)) if books.is_empty() => {
                let rule = "-".repeat(RULE_WIDTH);
                writeln!(self.output)?;
                writeln!(self.output, "Recommendations:")?;
                writeln!(self.output, "{rule}")?;
                writeln!(self.output, "No similar books found.")?;
                writeln!(self.output, "{rule}")?;
            }
            Ok(Recommendations::Matches(books)) => {
                write_listing(&mut self.output, "Recommendations:", &books)?
            }
            Err(err) => self.report_store_error(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn update_schema(&mut self) -> io::Result<Flow> {
        match self.store.add_added_date_column() {
            Ok(ColumnOutcome::Added) => writeln!(
                self.output,
                "Database schema updated: 'added_date' column added."
            )?,
            Ok(ColumnOutcome::Skipped(_)) => writeln!(
                self.output,
                "Warning: 'added_date' column already exists or cannot be added."
            )?,
            Err(err) => self.report_store_error(&err)?,
        }
        Ok(Flow::Continue)
    }

    /// Inserts one book and reports the result. Returns `false` if the
    /// store refused it.
    fn insert(&mut self, book: &NewBook) -> io::Result<bool> {
        match self.store.insert(book) {
            Ok(_) => {
                writeln!(self.output, "Book '{}' added.", book.title)?;
                Ok(true)
            }
            Err(err) => {
                self.report_store_error(&err)?;
                Ok(false)
            }
        }
    }

    fn report_store_error(&mut self, err: &StoreError) -> io::Result<()> {
        error!(error = %err, "store operation failed");
        writeln!(self.output, "error: {err}")
    }

    /// Writes `label`, then reads one line without its line terminator.
    /// Returns `None` at end of input.
    ///
    /// Bytes that are not UTF-8 are replaced with U+FFFD rather than
    /// failing the session.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let mut line = String::from_utf8_lossy(&buf).into_owned();
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}
