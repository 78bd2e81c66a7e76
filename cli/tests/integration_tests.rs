use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

const BIN: &str = env!("CARGO_BIN_EXE_library");

/// Runs `library --db <db> <args>` with `stdin` piped in.
fn run(db: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(BIN)
        .arg("--db")
        .arg(db)
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("LIBRARY_DB")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run library");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// Interactive shell
// ---------------------------------------------------------------------------

#[test]
fn shell_add_view_and_exit() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("library.db");

    let output = run(&db, &[], "1\nDune\nFrank Herbert\n1965\nSci-Fi\n3\n8\n");
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("Database ready."));
    assert!(out.contains("Book 'Dune' added."));
    assert!(out.contains("[1] Dune by Frank Herbert (1965) - Genre: Sci-Fi, Added: "));
    assert!(out.contains("Goodbye!"));
    assert!(db.exists());
}

#[test]
fn shell_state_persists_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("library.db");

    run(&db, &["shell"], "1\nAtlas\nA. Writer\n2001\nFiction\n8\n");
    let output = run(&db, &["shell"], "4\natlas\n8\n");
    let out = stdout(&output);
    assert!(out.contains("Search Results for 'atlas':"));
    assert!(out.contains("[1] Atlas by A. Writer (2001) - Genre: Fiction"));
}

#[test]
fn shell_exits_cleanly_on_end_of_input() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&dir.path().join("library.db"), &[], "3\n");
    assert!(output.status.success());
    assert!(stdout(&output).contains("No books in the library."));
}

// ---------------------------------------------------------------------------
// One-shot commands
// ---------------------------------------------------------------------------

#[test]
fn list_json_after_bulk_add() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("library.db");
    run(
        &db,
        &[],
        "2\nB1\nA\n2001\nG\ny\nB2\nA\n2002\nG\nn\n8\n",
    );

    let output = run(&db, &["list", "--format", "json"], "");
    assert!(output.status.success());
    let books: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let titles: Vec<_> = books
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["B2", "B1"]);
}

#[test]
fn recommend_text_output() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("library.db");
    run(
        &db,
        &[],
        "1\nDune Messiah\nFrank Herbert\n1969\nSci-Fi\n1\nAtlas\nA. Writer\n2001\nFiction\n8\n",
    );

    let out = stdout(&run(&db, &["recommend", "Dune"], ""));
    assert!(out.contains("Dune Messiah"));
    assert!(!out.contains("Atlas"));

    let out = stdout(&run(&db, &["recommend", "xyz"], ""));
    assert!(out.is_empty());
}

#[test]
fn delete_reports_missing_book() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("library.db");

    let output = run(&db, &["delete", "7"], "");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No book found with ID 7."));

    let output = run(&db, &["delete", "seven"], "");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid ID 'seven'"));
}

#[test]
fn migrate_legacy_database() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("legacy.db");
    {
        let conn = rusqlite::Connection::open(&db).unwrap();
        conn.execute_batch(
            "CREATE TABLE books (id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT NOT NULL, \
             author TEXT NOT NULL, year INTEGER, genre TEXT); \
             INSERT INTO books (title, author, year, genre) VALUES ('Emma', 'Jane Austen', 1815, 'Novel');",
        )
        .unwrap();
    }

    let out = stdout(&run(&db, &["list"], ""));
    assert_eq!(out, "[1] Emma by Jane Austen (1815) - Genre: Novel\n");

    let out = stdout(&run(&db, &["migrate"], ""));
    assert!(out.contains("'added_date' column added."));

    let out = stdout(&run(&db, &["migrate"], ""));
    assert!(out.contains("already exists or cannot be added"));

    let out = stdout(&run(&db, &["status"], ""));
    assert!(out.contains("Book count: 1"));
    assert!(out.contains("Has added_date: yes"));
}

#[test]
fn config_file_selects_database() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("from-config.db");
    let config = dir.path().join("library.yml");
    std::fs::write(&config, format!("database: {}\n", db.display())).unwrap();

    let output = Command::new(BIN)
        .arg("--config")
        .arg(&config)
        .arg("list")
        .env_remove("LIBRARY_DB")
        .output()
        .expect("failed to run library");
    assert!(output.status.success());
    assert!(db.exists());
}
