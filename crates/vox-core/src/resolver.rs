//! Turns a registry plus a clip path into an ordered fallback plan.
//!
//! The plan is: preferred CDN first (persisted choice or explicit
//! override), then the remaining CDNs in ascending priority, then the
//! local voices directory as the final fallback. The fetch engine walks
//! the plan in order and stops at the first success.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::manifest::{validate_clip_path, ManifestError};
use crate::registry::{CdnRegistry, CdnSource, SelectionMode};

/// One place a clip may be fetched from, in fallback order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// Remote CDN; `url` is the base URL with the clip path appended.
    Remote { cdn_id: String, url: String },
    /// File under the local voices directory.
    Local { path: PathBuf },
}

impl Candidate {
    /// Cache-namespace id for this candidate (None for plain local files,
    /// which are never cached).
    pub fn cdn_id(&self) -> Option<&str> {
        match self {
            Candidate::Remote { cdn_id, .. } => Some(cdn_id),
            Candidate::Local { .. } => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    BadClipPath(#[from] ManifestError),

    #[error("cdn '{0}' is not in the registry")]
    UnknownCdn(String),

    #[error("multiple CDNs are configured and none is selected; run `vox use <id>` first")]
    ChoiceRequired,
}

/// Build the ordered candidate plan for one clip.
///
/// `preferred` is the persisted or per-invocation CDN choice. In `Multi`
/// mode a choice is mandatory; in `Single` mode the lone CDN is selected
/// automatically. A preferred local-source entry puts the local candidate
/// first; unpreferred local-source entries collapse into the final local
/// candidate.
pub fn plan(
    registry: &CdnRegistry,
    preferred: Option<&str>,
    voices_dir: &Path,
    rel_path: &str,
) -> Result<Vec<Candidate>, ResolveError> {
    validate_clip_path(rel_path)?;

    if let Some(id) = preferred {
        if registry.get(id).is_none() {
            return Err(ResolveError::UnknownCdn(id.to_string()));
        }
    }
    if registry.mode() == SelectionMode::Multi && preferred.is_none() {
        return Err(ResolveError::ChoiceRequired);
    }

    let local = Candidate::Local {
        path: voices_dir.join(rel_path),
    };
    let mut out = Vec::with_capacity(registry.len() + 1);
    let push_remote = |out: &mut Vec<Candidate>, id: &str| {
        if let Some(desc) = registry.get(id) {
            if let CdnSource::Remote { .. } = desc.source {
                let url = desc.clip_url(rel_path).expect("remote source has a url");
                let candidate = Candidate::Remote {
                    cdn_id: desc.id.clone(),
                    url,
                };
                if !out.contains(&candidate) {
                    out.push(candidate);
                }
            }
        }
    };

    if let Some(id) = preferred {
        // Picking a local-source entry means "play from disk": the local
        // candidate leads and the remotes become the fallback.
        match registry.get(id).map(|d| &d.source) {
            Some(CdnSource::Local) => out.push(local.clone()),
            _ => push_remote(&mut out, id),
        }
    }
    for desc in registry.enumerate() {
        push_remote(&mut out, &desc.id);
    }
    if !out.contains(&local) {
        out.push(local);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CdnEntry;

    fn registry(entries: &[(&str, &str, i32)]) -> CdnRegistry {
        let entries = entries
            .iter()
            .map(|(id, url, priority)| CdnEntry {
                id: id.to_string(),
                name: id.to_string(),
                url: url.to_string(),
                description: None,
                priority: *priority,
            })
            .collect();
        CdnRegistry::from_entries(entries).unwrap()
    }

    fn ids(plan: &[Candidate]) -> Vec<Option<&str>> {
        plan.iter().map(|c| c.cdn_id()).collect()
    }

    #[test]
    fn empty_registry_plans_local_only() {
        let reg = registry(&[]);
        let plan = plan(&reg, None, Path::new("/voices"), "haruka/01.mp3").unwrap();
        assert_eq!(
            plan,
            [Candidate::Local {
                path: PathBuf::from("/voices/haruka/01.mp3")
            }]
        );
    }

    #[test]
    fn single_cdn_auto_selected_with_local_fallback() {
        let reg = registry(&[("main", "https://cdn.example.com/", 1)]);
        let plan = plan(&reg, None, Path::new("/voices"), "nene/02.mp3").unwrap();
        assert_eq!(ids(&plan), [Some("main"), None]);
        assert_eq!(
            plan[0],
            Candidate::Remote {
                cdn_id: "main".to_string(),
                url: "https://cdn.example.com/nene/02.mp3".to_string(),
            }
        );
    }

    #[test]
    fn multi_without_choice_is_an_error() {
        let reg = registry(&[
            ("a", "https://a.example.com/", 1),
            ("b", "https://b.example.com/", 2),
        ]);
        let err = plan(&reg, None, Path::new("/voices"), "x.mp3").unwrap_err();
        assert!(matches!(err, ResolveError::ChoiceRequired));
    }

    #[test]
    fn preference_goes_first_then_priority_then_local() {
        let reg = registry(&[
            ("a", "https://a.example.com/", 1),
            ("b", "https://b.example.com/", 2),
            ("c", "https://c.example.com/", 3),
        ]);
        let plan = plan(&reg, Some("b"), Path::new("/voices"), "x.mp3").unwrap();
        assert_eq!(ids(&plan), [Some("b"), Some("a"), Some("c"), None]);
    }

    #[test]
    fn unknown_preference_rejected() {
        let reg = registry(&[("a", "https://a.example.com/", 1)]);
        let err = plan(&reg, Some("nope"), Path::new("/voices"), "x.mp3").unwrap_err();
        assert!(matches!(err, ResolveError::UnknownCdn(id) if id == "nope"));
    }

    #[test]
    fn preferred_local_source_entry_goes_first() {
        let reg = registry(&[
            ("main", "https://cdn.example.com/", 1),
            ("local", "", 999),
        ]);
        let plan = plan(&reg, Some("local"), Path::new("/voices"), "x.mp3").unwrap();
        assert_eq!(ids(&plan), [None, Some("main")]);
        assert_eq!(
            plan[0],
            Candidate::Local {
                path: PathBuf::from("/voices/x.mp3")
            }
        );
    }

    #[test]
    fn local_registry_entry_collapses_into_final_fallback() {
        // A registry row with the empty-url sentinel adds no extra candidate.
        let reg = registry(&[
            ("main", "https://cdn.example.com/", 1),
            ("local", "", 999),
        ]);
        let plan = plan(&reg, Some("main"), Path::new("/voices"), "x.mp3").unwrap();
        assert_eq!(ids(&plan), [Some("main"), None]);
    }

    #[test]
    fn bad_clip_path_rejected() {
        let reg = registry(&[]);
        assert!(plan(&reg, None, Path::new("/voices"), "../x.mp3").is_err());
        assert!(plan(&reg, None, Path::new("/voices"), "/abs.mp3").is_err());
    }
}
