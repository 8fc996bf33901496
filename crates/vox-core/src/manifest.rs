//! Voice manifest: the list of clips and their CDN-relative paths.
//!
//! The manifest is a JSON file shared with whatever populated the CDNs, so
//! every path here must match the layout on each remote source byte for
//! byte. Paths are relative (e.g. `haruka/01.mp3`) and are concatenated
//! onto a remote base URL or joined under the local voices directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// One audio clip in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceClip {
    /// Character the clip belongs to (also its top-level directory).
    pub character: String,
    /// Optional display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Path relative to a CDN base URL, e.g. `haruka/01.mp3`.
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceManifest {
    pub clips: Vec<VoiceClip>,
}

/// Why a clip path was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManifestError {
    #[error("clip path is empty")]
    EmptyPath,
    #[error("clip path '{0}' must be relative (no leading '/')")]
    AbsolutePath(String),
    #[error("clip path '{0}' contains '..' traversal")]
    Traversal(String),
    #[error("clip path '{0}' contains a backslash")]
    Backslash(String),
}

/// Validate a relative clip path before it is joined onto a base URL or
/// local directory. Rejects empty, absolute, traversing, and backslashed
/// paths; everything else is the CDN's business.
pub fn validate_clip_path(path: &str) -> Result<(), ManifestError> {
    if path.is_empty() {
        return Err(ManifestError::EmptyPath);
    }
    if path.starts_with('/') {
        return Err(ManifestError::AbsolutePath(path.to_string()));
    }
    if path.contains('\\') {
        return Err(ManifestError::Backslash(path.to_string()));
    }
    if path.split('/').any(|seg| seg == "..") {
        return Err(ManifestError::Traversal(path.to_string()));
    }
    Ok(())
}

impl VoiceManifest {
    /// Load and validate a manifest from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading manifest {}", path.display()))?;
        let manifest: VoiceManifest =
            serde_json::from_str(&data).context("manifest is not valid JSON")?;
        for clip in &manifest.clips {
            validate_clip_path(&clip.path)
                .with_context(|| format!("clip for character '{}'", clip.character))?;
        }
        Ok(manifest)
    }

    /// Find a clip by its relative path.
    pub fn find(&self, rel_path: &str) -> Option<&VoiceClip> {
        self.clips.iter().find(|c| c.path == rel_path)
    }

    /// Clips belonging to one character, in manifest order.
    pub fn clips_for_character(&self, character: &str) -> Vec<&VoiceClip> {
        self.clips
            .iter()
            .filter(|c| c.character == character)
            .collect()
    }

    /// Distinct character names, in first-appearance order.
    pub fn characters(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for clip in &self.clips {
            if !out.contains(&clip.character.as_str()) {
                out.push(&clip.character);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_normal_paths() {
        assert!(validate_clip_path("haruka/01.mp3").is_ok());
        assert!(validate_clip_path("nene/greetings/02.mp3").is_ok());
        assert!(validate_clip_path("single.mp3").is_ok());
    }

    #[test]
    fn validate_rejects_bad_paths() {
        assert_eq!(validate_clip_path(""), Err(ManifestError::EmptyPath));
        assert!(matches!(
            validate_clip_path("/haruka/01.mp3"),
            Err(ManifestError::AbsolutePath(_))
        ));
        assert!(matches!(
            validate_clip_path("../secrets.mp3"),
            Err(ManifestError::Traversal(_))
        ));
        assert!(matches!(
            validate_clip_path("haruka/../../x.mp3"),
            Err(ManifestError::Traversal(_))
        ));
        assert!(matches!(
            validate_clip_path("haruka\\01.mp3"),
            Err(ManifestError::Backslash(_))
        ));
    }

    #[test]
    fn manifest_json_parses_and_indexes() {
        let json = r#"{
            "clips": [
                { "character": "haruka", "title": "hello", "path": "haruka/01.mp3" },
                { "character": "haruka", "path": "haruka/02.mp3" },
                { "character": "nene", "path": "nene/01.mp3" }
            ]
        }"#;
        let manifest: VoiceManifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.clips.len(), 3);
        assert!(manifest.find("haruka/02.mp3").is_some());
        assert!(manifest.find("missing.mp3").is_none());
        assert_eq!(manifest.clips_for_character("haruka").len(), 2);
        assert_eq!(manifest.characters(), ["haruka", "nene"]);
    }

    #[test]
    fn load_rejects_manifest_with_traversal_path() {
        let dir = std::env::temp_dir().join(format!("vox-manifest-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        fs::write(
            &path,
            r#"{ "clips": [ { "character": "x", "path": "../evil.mp3" } ] }"#,
        )
        .unwrap();
        assert!(VoiceManifest::load(&path).is_err());
        let _ = fs::remove_dir_all(&dir);
    }
}
