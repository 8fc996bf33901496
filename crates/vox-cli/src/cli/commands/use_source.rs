//! `vox use <id>` – persist the CDN choice and invalidate other sources.

use anyhow::Result;
use vox_core::cache::CacheStore;
use vox_core::registry::CdnRegistry;

pub async fn run_use(registry: &CdnRegistry, cache: &CacheStore, id: &str) -> Result<()> {
    let Some(desc) = registry.get(id) else {
        anyhow::bail!("cdn '{id}' is not in the registry (see `vox sources`)");
    };
    cache.db().set_preference(id).await?;
    let invalidated = cache.purge_stale(id).await?;
    println!("Now using '{}' ({})", desc.id, desc.name);
    if invalidated > 0 {
        println!("Invalidated {invalidated} cached clip(s) from other sources.");
    }
    Ok(())
}
