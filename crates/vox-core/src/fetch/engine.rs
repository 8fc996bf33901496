//! Fallback engine: walk the candidate plan until one source yields the clip.
//!
//! Order per candidate: cache first (unless refreshing), then network with
//! retry. A success from a remote source records the body and invalidates
//! cached clips from other sources; a local-file candidate is a plain
//! existence check. When every candidate fails the error names each
//! attempt, as that is what the user has to debug.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::cache::CacheStore;
use crate::registry::CdnRegistry;
use crate::resolver::{self, Candidate};
use crate::retry::{run_with_retry, RetryPolicy};

use super::download::download_to_file;

/// Where the returned clip file came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Fresh cache hit for this CDN.
    Cached { cdn_id: String },
    /// Downloaded from this CDN just now.
    Fetched { cdn_id: String, bytes: u64 },
    /// Served from the local voices directory.
    Local,
}

/// Result of a successful fetch.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// Path to the playable file (cache body or local file).
    pub path: PathBuf,
    pub origin: Origin,
}

/// Resolve and fetch one clip.
///
/// `preferred` is the active CDN choice (persisted preference or a
/// per-invocation override); `refresh` bypasses the cache lookup but still
/// records the new body.
pub async fn fetch_clip(
    registry: &CdnRegistry,
    store: &CacheStore,
    voices_dir: &Path,
    policy: &RetryPolicy,
    preferred: Option<&str>,
    rel_path: &str,
    refresh: bool,
) -> Result<FetchOutcome> {
    let plan = resolver::plan(registry, preferred, voices_dir, rel_path)?;
    let mut failures: Vec<String> = Vec::new();

    for candidate in plan {
        match candidate {
            Candidate::Remote { cdn_id, url } => {
                if !refresh {
                    if let Some(path) = store.get_fresh(&cdn_id, rel_path).await? {
                        tracing::debug!("cache hit for {} via {}", rel_path, cdn_id);
                        return Ok(FetchOutcome {
                            path,
                            origin: Origin::Cached { cdn_id },
                        });
                    }
                }

                let dest = store.body_path(&cdn_id, rel_path);
                match download_with_retry(&url, &dest, *policy).await {
                    Ok(bytes) => {
                        let path = store.record(&cdn_id, rel_path, bytes as i64).await?;
                        // The clip now comes from this source; drop cached
                        // bodies tagged with any other one.
                        store.purge_stale(&cdn_id).await?;
                        tracing::info!("fetched {} ({} bytes) from {}", rel_path, bytes, cdn_id);
                        return Ok(FetchOutcome {
                            path,
                            origin: Origin::Fetched { cdn_id, bytes },
                        });
                    }
                    Err(e) => {
                        tracing::warn!("cdn {} failed for {}: {:#}", cdn_id, rel_path, e);
                        failures.push(format!("cdn '{}' ({}): {:#}", cdn_id, url, e));
                    }
                }
            }
            Candidate::Local { path } => {
                if path.is_file() {
                    tracing::debug!("serving {} from local voices dir", rel_path);
                    return Ok(FetchOutcome {
                        path,
                        origin: Origin::Local,
                    });
                }
                failures.push(format!("local file missing: {}", path.display()));
            }
        }
    }

    let mut msg = format!("all sources failed for clip '{rel_path}':");
    for failure in &failures {
        let _ = write!(msg, "\n  - {failure}");
    }
    anyhow::bail!(msg)
}

async fn download_with_retry(url: &str, dest: &Path, policy: RetryPolicy) -> Result<u64> {
    let url = url.to_string();
    let dest = dest.to_path_buf();
    let outcome = tokio::task::spawn_blocking(move || {
        run_with_retry(&policy, || download_to_file(&url, &dest))
    })
    .await
    .context("download task join")?;
    Ok(outcome?)
}
