//! Cache store: DB rows plus the body files on disk.
//!
//! Bodies live under `<cache dir>/clips/<cdn_id>/<sha256(rel_path)>.<ext>`
//! so arbitrary manifest paths never escape the cache directory and path
//! collisions across characters are impossible.

use anyhow::Result;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use super::db::CacheDb;
use super::types::{CacheEntry, CacheStats};

/// Seconds in a day, for TTL conversion.
const DAY_SECS: i64 = 86_400;

/// Stored filename for a clip: hex SHA-256 of the relative path, keeping
/// the original extension so file type stays recognizable.
pub fn stored_filename(rel_path: &str) -> String {
    let digest = Sha256::digest(rel_path.as_bytes());
    let hash = hex::encode(&digest[..16]);
    match Path::new(rel_path).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{hash}.{ext}"),
        None => hash,
    }
}

/// Default body directory: `~/.cache/vox/clips`.
pub fn default_clip_dir() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vox")?;
    Ok(xdg_dirs.get_cache_home().join("clips"))
}

/// Clip cache: row store plus body files, with one TTL.
#[derive(Clone)]
pub struct CacheStore {
    db: CacheDb,
    dir: PathBuf,
    ttl_secs: i64,
}

impl CacheStore {
    pub fn new(db: CacheDb, dir: PathBuf, ttl_days: u32) -> Self {
        Self {
            db,
            dir,
            ttl_secs: i64::from(ttl_days) * DAY_SECS,
        }
    }

    pub fn db(&self) -> &CacheDb {
        &self.db
    }

    /// Where the body for `(cdn_id, rel_path)` is stored.
    pub fn body_path(&self, cdn_id: &str, rel_path: &str) -> PathBuf {
        self.dir.join(cdn_id).join(stored_filename(rel_path))
    }

    /// Fresh cached body path, or None on miss/expiry/missing file.
    pub async fn get_fresh(&self, cdn_id: &str, rel_path: &str) -> Result<Option<PathBuf>> {
        let Some(entry) = self.db.lookup(cdn_id, rel_path, self.ttl_secs).await? else {
            return Ok(None);
        };
        let path = PathBuf::from(&entry.stored_path);
        // The row can outlive the file (manual cleanup); treat that as a miss.
        if !path.exists() {
            tracing::debug!("cache row without body file: {}", entry.stored_path);
            return Ok(None);
        }
        Ok(Some(path))
    }

    /// Record a freshly fetched body already written to `body_path`.
    pub async fn record(&self, cdn_id: &str, rel_path: &str, size: i64) -> Result<PathBuf> {
        let path = self.body_path(cdn_id, rel_path);
        self.db
            .record_clip(cdn_id, rel_path, &path.to_string_lossy(), size)
            .await?;
        Ok(path)
    }

    /// Remove expired rows and their body files. Returns how many were removed.
    pub async fn purge_expired(&self) -> Result<usize> {
        let removed = self.db.purge_expired(self.ttl_secs).await?;
        remove_bodies(&removed).await;
        Ok(removed.len())
    }

    /// Remove rows (and bodies) fetched from any CDN other than `active_cdn_id`.
    pub async fn purge_stale(&self, active_cdn_id: &str) -> Result<usize> {
        let removed = self.db.purge_stale(active_cdn_id).await?;
        if !removed.is_empty() {
            tracing::info!(
                "invalidated {} cached clip(s) from other sources",
                removed.len()
            );
        }
        remove_bodies(&removed).await;
        Ok(removed.len())
    }

    /// Remove every row and body.
    pub async fn purge_all(&self) -> Result<usize> {
        let removed = self.db.purge_all().await?;
        remove_bodies(&removed).await;
        Ok(removed.len())
    }

    pub async fn stats(&self) -> Result<CacheStats> {
        self.db.stats(self.ttl_secs).await
    }
}

async fn remove_bodies(entries: &[CacheEntry]) {
    for entry in entries {
        if let Err(e) = tokio::fs::remove_file(&entry.stored_path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("failed to remove {}: {}", entry.stored_path, e);
            }
        }
    }
}
