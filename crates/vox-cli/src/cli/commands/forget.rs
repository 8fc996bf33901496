//! `vox forget` – clear the persisted CDN choice.

use anyhow::Result;
use vox_core::cache::CacheStore;

pub async fn run_forget(cache: &CacheStore) -> Result<()> {
    cache.db().clear_preference().await?;
    println!("CDN choice cleared.");
    Ok(())
}
