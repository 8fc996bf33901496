//! `vox sources` – list configured CDNs and the selection mode.

use anyhow::Result;
use vox_core::cache::CacheStore;
use vox_core::registry::{CdnRegistry, CdnSource, SelectionMode};

pub async fn run_sources(registry: &CdnRegistry, cache: &CacheStore) -> Result<()> {
    let mode = match registry.mode() {
        SelectionMode::LocalOnly => "local-only",
        SelectionMode::Single => "single",
        SelectionMode::Multi => "multi",
    };
    let preference = cache.db().preference().await?;
    println!("Selection mode: {mode}");
    match &preference {
        Some(id) => println!("Active choice: {id}"),
        None => println!("Active choice: (none)"),
    }

    if registry.is_empty() {
        println!("No CDNs configured; clips come from the local voices directory.");
        return Ok(());
    }

    println!("{:<12} {:<10} {:<24} {}", "ID", "PRIORITY", "NAME", "SOURCE");
    for desc in registry.enumerate() {
        let source = match &desc.source {
            CdnSource::Remote { base_url } => base_url.as_str(),
            CdnSource::Local => "(local voices dir)",
        };
        let marker = if preference.as_deref() == Some(desc.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            "{marker}{:<11} {:<10} {:<24} {}",
            desc.id, desc.priority, desc.name, source
        );
        if let Some(text) = &desc.description {
            println!("             {text}");
        }
    }
    Ok(())
}
