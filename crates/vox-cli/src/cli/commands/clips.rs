//! `vox clips` – list manifest entries.

use anyhow::{Context, Result};
use vox_core::config::VoxConfig;
use vox_core::manifest::VoiceManifest;

pub fn run_clips(cfg: &VoxConfig, character: Option<&str>) -> Result<()> {
    let path = cfg.manifest_file()?;
    let manifest = VoiceManifest::load(&path)
        .with_context(|| format!("loading manifest from {}", path.display()))?;

    let clips: Vec<_> = match character {
        Some(name) => manifest.clips_for_character(name),
        None => manifest.clips.iter().collect(),
    };
    if clips.is_empty() {
        println!("No clips found.");
        return Ok(());
    }

    println!("{:<16} {:<24} {}", "CHARACTER", "TITLE", "PATH");
    for clip in clips {
        println!(
            "{:<16} {:<24} {}",
            clip.character,
            clip.title.as_deref().unwrap_or("-"),
            clip.path
        );
    }
    Ok(())
}
