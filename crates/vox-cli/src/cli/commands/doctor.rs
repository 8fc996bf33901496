//! `vox doctor` – probe remote CDNs for reachability, CORS, and Range support.
//!
//! Probes the first manifest clip when a manifest is available, otherwise
//! the base URL itself. Exits non-zero if any probed CDN fails.

use anyhow::{Context, Result};
use vox_core::config::VoxConfig;
use vox_core::manifest::VoiceManifest;
use vox_core::probe::probe;
use vox_core::registry::{CdnDescriptor, CdnRegistry, CdnSource};

pub async fn run_doctor(cfg: &VoxConfig, registry: &CdnRegistry, id: Option<&str>) -> Result<()> {
    let targets: Vec<&CdnDescriptor> = match id {
        Some(id) => {
            let Some(desc) = registry.get(id) else {
                anyhow::bail!("cdn '{id}' is not in the registry (see `vox sources`)");
            };
            vec![desc]
        }
        None => registry.enumerate().iter().collect(),
    };

    let sample_path = sample_clip_path(cfg);
    let mut failed: Vec<String> = Vec::new();

    for desc in targets {
        let base_url = match &desc.source {
            CdnSource::Remote { base_url } => base_url.clone(),
            CdnSource::Local => {
                println!("{}: local source, nothing to probe", desc.id);
                continue;
            }
        };
        let url = match &sample_path {
            Some(rel) => format!("{base_url}{rel}"),
            None => base_url,
        };

        println!("probing {} -> {}", desc.id, url);
        let result = tokio::task::spawn_blocking(move || probe(&url))
            .await
            .context("probe task join")?;
        match result {
            Ok(r) => {
                let size = r
                    .content_length
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "?".to_string());
                println!("  reachable, {} bytes", size);
                println!(
                    "  range support: {}",
                    if r.accept_ranges { "yes" } else { "NO" }
                );
                println!("  cors: {}", if r.cors_ok() { "ok" } else { "INCOMPLETE" });
                if !r.cors_ok() {
                    println!(
                        "    (need Access-Control-Allow-Origin and Expose-Headers with Content-Length, Content-Range)"
                    );
                    failed.push(desc.id.clone());
                }
            }
            Err(e) => {
                println!("  FAILED: {e:#}");
                failed.push(desc.id.clone());
            }
        }
    }

    if !failed.is_empty() {
        anyhow::bail!("probe failed for: {}", failed.join(", "));
    }
    Ok(())
}

fn sample_clip_path(cfg: &VoxConfig) -> Option<String> {
    let path = cfg.manifest_file().ok()?;
    let manifest = VoiceManifest::load(&path).ok()?;
    manifest.clips.first().map(|c| c.path.clone())
}
