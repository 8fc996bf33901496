//! `vox status` – show cache statistics.

use anyhow::Result;
use vox_core::cache::CacheStore;

pub async fn run_status(cache: &CacheStore) -> Result<()> {
    let stats = cache.stats().await?;
    if stats.entries == 0 {
        println!("Cache is empty.");
        return Ok(());
    }
    println!(
        "{} cached clip(s), {} bytes total, {} expired",
        stats.entries, stats.total_bytes, stats.expired
    );
    println!("{:<12} {:<10} {}", "SOURCE", "CLIPS", "BYTES");
    for source in &stats.per_source {
        println!(
            "{:<12} {:<10} {}",
            source.cdn_id, source.entries, source.total_bytes
        );
    }
    Ok(())
}
