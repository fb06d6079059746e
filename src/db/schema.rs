// Database schema — table creation and migrations.
//
// A `schema_version` table tracks which migrations have run, and each
// migration is a function that executes SQL statements.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
///
/// This is idempotent — safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Tracks schema version for future migrations
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Blog comments with the moderation verdict they were stored with
        CREATE TABLE IF NOT EXISTS comments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            post_id INTEGER NOT NULL,
            username TEXT,                     -- logged-in user, if any
            author_name TEXT NOT NULL DEFAULT '',
            text TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            toxicity REAL NOT NULL DEFAULT 0,  -- 0.0 to 1.0
            sentiment REAL NOT NULL DEFAULT 0, -- -1.0 to 1.0
            is_spam INTEGER NOT NULL DEFAULT 0,
            decision TEXT NOT NULL,            -- APPROVED / PENDING / REJECTED
            reason TEXT NOT NULL DEFAULT ''
        );

        -- Visible comments for a post, oldest first
        CREATE INDEX IF NOT EXISTS idx_comments_post
            ON comments(post_id, decision);

        -- Review queue lookups
        CREATE INDEX IF NOT EXISTS idx_comments_decision
            ON comments(decision);
        ",
    )
    .context("Failed to create database tables")?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    // Migration v2: record who moderated a comment when it wasn't the
    // automatic scorer (superuser bypass or staff review), and when.
    run_migration(conn, 2, |c| {
        c.execute_batch(
            "ALTER TABLE comments ADD COLUMN moderated_by TEXT;
             ALTER TABLE comments ADD COLUMN moderated_at TEXT;",
        )
    })?;

    // Migration v3: replies. A reply points at a comment on the same post.
    run_migration(conn, 3, |c| {
        c.execute_batch(
            "ALTER TABLE comments ADD COLUMN parent_id INTEGER REFERENCES comments(id);
             CREATE INDEX IF NOT EXISTS idx_comments_parent ON comments(parent_id);",
        )
    })?;

    Ok(())
}

/// Run a migration if it hasn't been applied yet.
fn run_migration<F>(conn: &Connection, version: i64, migrate: F) -> Result<()>
where
    F: FnOnce(&Connection) -> rusqlite::Result<()>,
{
    let already_applied: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM schema_version WHERE version = ?1",
        [version],
        |row| row.get(0),
    )?;

    if !already_applied {
        migrate(conn).with_context(|| format!("Migration v{version} failed"))?;
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [version],
        )?;
    }

    Ok(())
}

/// Count the number of tables in the database (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}
