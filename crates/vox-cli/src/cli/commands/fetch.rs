//! `vox fetch <path>` – resolve, download with fallback, and cache a clip.

use anyhow::{Context, Result};
use std::path::PathBuf;
use vox_core::cache::CacheStore;
use vox_core::config::VoxConfig;
use vox_core::fetch::{fetch_clip, Origin};
use vox_core::registry::CdnRegistry;
use vox_core::retry::RetryPolicy;

pub async fn run_fetch(
    cfg: &VoxConfig,
    registry: &CdnRegistry,
    cache: &CacheStore,
    path: &str,
    cdn_override: Option<&str>,
    output: Option<PathBuf>,
    refresh: bool,
) -> Result<()> {
    let preferred = match cdn_override {
        Some(id) => Some(id.to_string()),
        None => cache.db().preference().await?,
    };
    let voices_dir = cfg.voices_dir()?;
    let policy = RetryPolicy::from_config(cfg.retry.as_ref());

    let outcome = fetch_clip(
        registry,
        cache,
        &voices_dir,
        &policy,
        preferred.as_deref(),
        path,
        refresh,
    )
    .await?;

    match &outcome.origin {
        Origin::Cached { cdn_id } => println!("cache hit ({cdn_id}): {}", outcome.path.display()),
        Origin::Fetched { cdn_id, bytes } => {
            println!("fetched from {cdn_id} ({bytes} bytes): {}", outcome.path.display())
        }
        Origin::Local => println!("local file: {}", outcome.path.display()),
    }

    if let Some(out) = output {
        tokio::fs::copy(&outcome.path, &out)
            .await
            .with_context(|| format!("copying clip to {}", out.display()))?;
        println!("copied to {}", out.display());
    }
    Ok(())
}
