// Database layer — SQLite storage for comments and their moderation verdicts.
//
// We use rusqlite with the "bundled" feature so there's no system SQLite
// dependency. The database file lives wherever QUILL_DB_PATH points
// (defaults to ./quill.db).

pub mod models;
pub mod queries;
pub mod schema;

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;
use tracing::info;

/// Open (or create) the database and run migrations.
///
/// This is the main entry point — called by `quill init` and by any
/// command that writes comments.
pub fn initialize(db_path: &str) -> Result<Connection> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for database: {}", db_path))?;
        }
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path))?;

    // WAL lets the blog keep reading comments while a review or rescore writes
    conn.pragma_update(None, "journal_mode", "WAL")?;

    schema::create_tables(&conn)?;
    info!(path = db_path, "Database ready");

    Ok(conn)
}

/// Open an existing database (fails if it doesn't exist yet).
pub fn open(db_path: &str) -> Result<Connection> {
    if !Path::new(db_path).exists() {
        anyhow::bail!(
            "Database not found at {}. Run `quill init` first.",
            db_path
        );
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path))?;

    conn.pragma_update(None, "journal_mode", "WAL")?;

    // Pick up migrations added since the file was created
    schema::create_tables(&conn)?;

    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_db_path(name: &str) -> String {
        let dir = std::env::temp_dir().join(format!("quill-test-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir.join("nested").join("quill.db").to_string_lossy().into_owned()
    }

    #[test]
    fn test_initialize_creates_parent_dirs() {
        let path = temp_db_path("init");
        let conn = initialize(&path).unwrap();
        assert_eq!(schema::table_count(&conn).unwrap(), 2);
        assert!(Path::new(&path).exists());
    }

    #[test]
    fn test_open_missing_database_fails() {
        let path = temp_db_path("missing");
        let err = open(&path).unwrap_err();
        assert!(err.to_string().contains("quill init"));
    }

    #[test]
    fn test_open_after_initialize() {
        let path = temp_db_path("reopen");
        drop(initialize(&path).unwrap());
        let conn = open(&path).unwrap();
        assert_eq!(schema::table_count(&conn).unwrap(), 2);
    }
}
