//! Raw config entry and validated descriptor types.

use serde::{Deserialize, Serialize};

use super::RegistryError;

/// Where a CDN's clips come from.
///
/// Older configs encoded local mode as `url = ""`; validation maps that
/// sentinel here so no other code has to special-case empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CdnSource {
    /// Remote HTTP(S) base URL, guaranteed to end with `/`.
    Remote { base_url: String },
    /// Clips live in the local voices directory.
    Local,
}

/// One `[[cdn]]` table in config.toml, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdnEntry {
    /// Unique identifier; also the cache-namespace key for this source.
    pub id: String,
    /// Human-readable label for listings.
    pub name: String,
    /// Base URL. Must end with `/`; empty means local mode.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Lower values are tried first.
    pub priority: i32,
}

/// Validated registry entry.
#[derive(Debug, Clone)]
pub struct CdnDescriptor {
    pub id: String,
    pub name: String,
    pub source: CdnSource,
    pub description: Option<String>,
    pub priority: i32,
}

impl CdnDescriptor {
    /// Full URL for a relative clip path, or None for a local source.
    ///
    /// Plain concatenation; the trailing-slash invariant on `base_url` makes
    /// the join correct without inserting a separator.
    pub fn clip_url(&self, rel_path: &str) -> Option<String> {
        match &self.source {
            CdnSource::Remote { base_url } => Some(format!("{base_url}{rel_path}")),
            CdnSource::Local => None,
        }
    }
}

impl TryFrom<CdnEntry> for CdnDescriptor {
    type Error = RegistryError;

    fn try_from(entry: CdnEntry) -> Result<Self, RegistryError> {
        if entry.id.trim().is_empty() {
            return Err(RegistryError::EmptyId);
        }
        let source = parse_source(&entry.id, &entry.url)?;
        Ok(CdnDescriptor {
            id: entry.id,
            name: entry.name,
            source,
            description: entry.description,
            priority: entry.priority,
        })
    }
}

fn parse_source(id: &str, url: &str) -> Result<CdnSource, RegistryError> {
    if url.is_empty() {
        return Ok(CdnSource::Local);
    }
    let parsed = url::Url::parse(url).map_err(|e| RegistryError::InvalidUrl {
        id: id.to_string(),
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(RegistryError::InvalidUrl {
                id: id.to_string(),
                url: url.to_string(),
                reason: format!("unsupported scheme '{other}'"),
            })
        }
    }
    if !url.ends_with('/') {
        return Err(RegistryError::MissingTrailingSlash {
            id: id.to_string(),
            url: url.to_string(),
        });
    }
    Ok(CdnSource::Remote {
        base_url: url.to_string(),
    })
}
