//! SQLite-backed cache database implementation.
//!
//! Handles connection, migrations, clip rows, and the preference table.

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Row, Sqlite};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use super::types::{CacheEntry, CacheStats, SourceStats};

/// Percent-encode a path for use in a sqlite:// URI so spaces and special chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}", out)
}

/// Handle to the SQLite-backed clip cache database.
///
/// The database file is stored under the XDG state directory:
/// `~/.local/state/vox/cache.db`.
#[derive(Clone)]
pub struct CacheDb {
    pool: Pool<Sqlite>,
}

const PREF_CDN_KEY: &str = "preferred_cdn";

impl CacheDb {
    /// Open (or create) the default cache database and run migrations.
    pub async fn open_default() -> Result<Self> {
        // get_state_home() already carries the "vox" prefix.
        let xdg_dirs = xdg::BaseDirectories::with_prefix("vox")?;
        let state_dir = xdg_dirs.get_state_home();
        let db_path = state_dir.join("cache.db");

        tokio::fs::create_dir_all(&state_dir).await?;

        let uri = path_to_sqlite_uri(&db_path) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect(&uri)
            .await?;

        let db = CacheDb { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Open (or create) the database at a specific path. Creates parent dirs if needed.
    /// Intended for tests so the DB can be placed in a temp directory.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let uri = path_to_sqlite_uri(path) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect(&uri)
            .await?;
        let db = CacheDb { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<()> {
        // Two tables: clip rows (bodies live on disk, see `store`) and a
        // small key/value table for the persisted CDN preference.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS clips (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                cdn_id TEXT NOT NULL,
                rel_path TEXT NOT NULL,
                stored_path TEXT NOT NULL,
                size INTEGER NOT NULL,
                fetched_at INTEGER NOT NULL,
                UNIQUE(cdn_id, rel_path)
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS prefs (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert or replace the row for `(cdn_id, rel_path)`.
    pub async fn record_clip(
        &self,
        cdn_id: &str,
        rel_path: &str,
        stored_path: &str,
        size: i64,
    ) -> Result<()> {
        let now = unix_timestamp();
        sqlx::query(
            r#"
            INSERT INTO clips (cdn_id, rel_path, stored_path, size, fetched_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(cdn_id, rel_path) DO UPDATE SET
                stored_path = excluded.stored_path,
                size = excluded.size,
                fetched_at = excluded.fetched_at
            "#,
        )
        .bind(cdn_id)
        .bind(rel_path)
        .bind(stored_path)
        .bind(size)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Look up a fresh entry: present and strictly younger than `ttl_secs`.
    /// Expired rows are left in place for `purge_expired` to collect.
    pub async fn lookup(
        &self,
        cdn_id: &str,
        rel_path: &str,
        ttl_secs: i64,
    ) -> Result<Option<CacheEntry>> {
        let cutoff = unix_timestamp() - ttl_secs;
        let row = sqlx::query(
            r#"
            SELECT cdn_id, rel_path, stored_path, size, fetched_at
            FROM clips
            WHERE cdn_id = ?1 AND rel_path = ?2 AND fetched_at > ?3
            "#,
        )
        .bind(cdn_id)
        .bind(rel_path)
        .bind(cutoff)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| entry_from_row(&row)))
    }

    /// Delete rows older than `ttl_secs`, returning them so the caller can
    /// remove the body files.
    pub async fn purge_expired(&self, ttl_secs: i64) -> Result<Vec<CacheEntry>> {
        let cutoff = unix_timestamp() - ttl_secs;
        self.take_where("fetched_at <= ?1", cutoff.to_string())
            .await
    }

    /// Delete rows whose `cdn_id` differs from the active source,
    /// returning them so the caller can remove the body files.
    pub async fn purge_stale(&self, active_cdn_id: &str) -> Result<Vec<CacheEntry>> {
        self.take_where("cdn_id != ?1", active_cdn_id.to_string())
            .await
    }

    /// Delete every row, returning them so the caller can remove the body files.
    pub async fn purge_all(&self) -> Result<Vec<CacheEntry>> {
        let mut tx = self.pool.begin().await?;
        let rows =
            sqlx::query("SELECT cdn_id, rel_path, stored_path, size, fetched_at FROM clips")
                .fetch_all(&mut *tx)
                .await?;
        sqlx::query("DELETE FROM clips").execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(rows.iter().map(entry_from_row).collect())
    }

    async fn take_where(&self, predicate: &str, bind: String) -> Result<Vec<CacheEntry>> {
        let mut tx = self.pool.begin().await?;
        let select = format!(
            "SELECT cdn_id, rel_path, stored_path, size, fetched_at FROM clips WHERE {predicate}"
        );
        let rows = sqlx::query(&select).bind(&bind).fetch_all(&mut *tx).await?;
        let delete = format!("DELETE FROM clips WHERE {predicate}");
        sqlx::query(&delete).bind(&bind).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(rows.iter().map(entry_from_row).collect())
    }

    /// Cache statistics for `vox status`.
    pub async fn stats(&self, ttl_secs: i64) -> Result<CacheStats> {
        let cutoff = unix_timestamp() - ttl_secs;
        let totals = sqlx::query(
            r#"
            SELECT COUNT(*) AS entries,
                   COALESCE(SUM(size), 0) AS total_bytes,
                   COALESCE(SUM(fetched_at <= ?1), 0) AS expired
            FROM clips
            "#,
        )
        .bind(cutoff)
        .fetch_one(&self.pool)
        .await?;

        let per_source_rows = sqlx::query(
            r#"
            SELECT cdn_id, COUNT(*) AS entries, COALESCE(SUM(size), 0) AS total_bytes
            FROM clips
            GROUP BY cdn_id
            ORDER BY cdn_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let per_source = per_source_rows
            .into_iter()
            .map(|row| SourceStats {
                cdn_id: row.get("cdn_id"),
                entries: row.get("entries"),
                total_bytes: row.get("total_bytes"),
            })
            .collect();

        Ok(CacheStats {
            entries: totals.get("entries"),
            total_bytes: totals.get("total_bytes"),
            expired: totals.get("expired"),
            per_source,
        })
    }

    /// Persisted CDN preference, if any.
    pub async fn preference(&self) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM prefs WHERE key = ?1")
            .bind(PREF_CDN_KEY)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get("value")))
    }

    /// Persist the chosen CDN id.
    pub async fn set_preference(&self, cdn_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO prefs (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(PREF_CDN_KEY)
        .bind(cdn_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Forget the persisted CDN preference.
    pub async fn clear_preference(&self) -> Result<()> {
        sqlx::query("DELETE FROM prefs WHERE key = ?1")
            .bind(PREF_CDN_KEY)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn entry_from_row(row: &sqlx::sqlite::SqliteRow) -> CacheEntry {
    CacheEntry {
        cdn_id: row.get("cdn_id"),
        rel_path: row.get("rel_path"),
        stored_path: row.get("stored_path"),
        size: row.get("size"),
        fetched_at: row.get("fetched_at"),
    }
}

/// Current time as Unix seconds (for row timestamps).
pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
/// Open an in-memory database for tests (no disk I/O).
pub(crate) async fn open_memory() -> Result<CacheDb> {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let db = CacheDb { pool };
    db.migrate().await?;
    Ok(db)
}
