use std::io;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use library_catalog_cli::output::format_books;
use library_catalog_cli::{CatalogConfig, OutputFormat, Shell};
use library_catalog_core::parse_book_id;
use library_catalog_sqlite::{BookStore, ColumnOutcome, DeleteOutcome, Recommendations};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "library")]
#[command(about = "Personal library catalog backed by SQLite")]
#[command(version)]
struct Cli {
    /// Database file path (default: library.db, or `database` from --config).
    #[arg(long, env = "LIBRARY_DB", global = true)]
    db: Option<PathBuf>,
    /// YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log filter directive (overrides RUST_LOG and the config file).
    #[arg(long, global = true)]
    log: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive menu (the default).
    Shell,
    /// List every book, newest first.
    List(ListArgs),
    /// List books whose title, author or genre contains a keyword.
    Search(SearchArgs),
    /// Recommend books whose title or genre contains a query.
    Recommend(RecommendArgs),
    /// Delete a book by ID.
    Delete(DeleteArgs),
    /// Add the `added_date` column to a database created without it.
    Migrate,
    /// Show table status.
    Status,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Output format.
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Substring to look for.
    keyword: String,
    /// Output format.
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct RecommendArgs {
    /// Title or genre fragment.
    query: String,
    /// Output format.
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// ID of the book to delete.
    id: String,
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = CatalogConfig::load_or_default(cli.config.as_deref())
        .map_err(|e| format!("Failed to load config: {e}"))?;
    init_logging(cli.log.as_deref(), &config.log_filter);

    let db = cli.db.unwrap_or(config.database);
    let mut store = BookStore::open(&db)
        .map_err(|e| format!("Failed to open database '{}': {e}", db.display()))?;

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => run_shell(&mut store),
        Command::List(args) => run_list(&store, args),
        Command::Search(args) => run_search(&store, args),
        Command::Recommend(args) => run_recommend(&store, args),
        Command::Delete(args) => run_delete(&mut store, args),
        Command::Migrate => run_migrate(&mut store),
        Command::Status => run_status(&store, &db),
    }
}

/// Installs the stderr subscriber. Precedence: `--log`, `RUST_LOG`, config.
fn init_logging(flag: Option<&str>, configured: &str) {
    let filter = match flag {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_shell(store: &mut BookStore) -> Result<(), String> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(store, stdin.lock(), stdout.lock())
        .run()
        .map_err(|e| format!("Terminal I/O failed: {e}"))
}

fn run_list(store: &BookStore, args: ListArgs) -> Result<(), String> {
    let books = store
        .select_all()
        .map_err(|e| format!("Failed to list books: {e}"))?;
    print!("{}", format_books(&books, args.format)?);
    Ok(())
}

fn run_search(store: &BookStore, args: SearchArgs) -> Result<(), String> {
    let books = store
        .select_matching(&args.keyword)
        .map_err(|e| format!("Search failed: {e}"))?;
    print!("{}", format_books(&books, args.format)?);
    Ok(())
}

fn run_recommend(store: &BookStore, args: RecommendArgs) -> Result<(), String> {
    let books = match store
        .recommend(&args.query)
        .map_err(|e| format!("Recommendation failed: {e}"))?
    {
        Recommendations::EmptyCatalog => Vec::new(),
        Recommendations::Matches(books) => books,
    };
    print!("{}", format_books(&books, args.format)?);
    Ok(())
}

fn run_delete(store: &mut BookStore, args: DeleteArgs) -> Result<(), String> {
    let id = parse_book_id(&args.id).map_err(|e| e.to_string())?;
    match store
        .delete(id)
        .map_err(|e| format!("Delete failed: {e}"))?
    {
        DeleteOutcome::Deleted => {
            println!("Book with ID {id} deleted successfully.");
            Ok(())
        }
        DeleteOutcome::NotFound => {
            println!("No book found with ID {id}.");
            Ok(())
        }
    }
}

fn run_migrate(store: &mut BookStore) -> Result<(), String> {
    match store
        .add_added_date_column()
        .map_err(|e| format!("Migration failed: {e}"))?
    {
        ColumnOutcome::Added => println!("Database schema updated: 'added_date' column added."),
        ColumnOutcome::Skipped(reason) => {
            println!("Warning: 'added_date' column already exists or cannot be added ({reason}).")
        }
    }
    Ok(())
}

fn run_status(store: &BookStore, db: &std::path::Path) -> Result<(), String> {
    let status = store
        .status()
        .map_err(|e| format!("Failed to get status: {e}"))?;
    println!("Library Status ({}):", db.display());
    println!(
        "  Table exists: {}",
        if status.table_exists { "yes" } else { "no" }
    );
    println!("  Book count: {}", status.book_count);
    println!(
        "  Has added_date: {}",
        if status.has_added_date { "yes" } else { "no" }
    );
    Ok(())
}
