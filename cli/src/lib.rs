//! Front end for the personal library catalog.
//!
//! - **`shell`** — the interactive numbered menu ([`Shell`])
//! - **`output`** — listing layout and one-shot output formats
//! - **`config`** — optional YAML configuration ([`CatalogConfig`])

pub mod config;
pub mod output;
pub mod shell;

pub use config::{CatalogConfig, ConfigError};
pub use output::OutputFormat;
pub use shell::{MenuChoice, Shell};
