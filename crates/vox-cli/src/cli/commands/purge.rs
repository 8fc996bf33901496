//! `vox purge` – remove expired, stale, or all cached clips.

use anyhow::Result;
use vox_core::cache::CacheStore;

pub async fn run_purge(cache: &CacheStore, all: bool, stale: bool) -> Result<()> {
    let removed = if all {
        cache.purge_all().await?
    } else if stale {
        let Some(active) = cache.db().preference().await? else {
            anyhow::bail!("no active CDN choice; `--stale` needs one (run `vox use <id>`)");
        };
        cache.purge_stale(&active).await?
    } else {
        cache.purge_expired().await?
    };
    println!("Removed {removed} cached clip(s).");
    Ok(())
}
