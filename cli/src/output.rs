//! Text rendering of listings and one-shot output formats.

use std::io::{self, Write};

use library_catalog_core::Book;

/// Width of the rule printed above and below a listing.
pub const RULE_WIDTH: usize = 60;

/// Supported output formats for one-shot commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Writes a blank line, `heading`, a rule, one line per book and a closing
/// rule.
pub fn write_listing<W: Write>(out: &mut W, heading: &str, books: &[Book]) -> io::Result<()> {
    let rule = "-".repeat(RULE_WIDTH);
    writeln!(out)?;
    writeln!(out, "{heading}")?;
    writeln!(out, "{rule}")?;
    for book in books {
        writeln!(out, "{book}")?;
    }
    writeln!(out, "{rule}")
}

/// Formats books for one-shot commands.
///
/// `Text` is one listing line per book with no framing, so it pipes cleanly.
pub fn format_books(books: &[Book], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(books)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(books).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Text => Ok(books.iter().map(|book| format!("{book}\n")).collect()),
    }
}
