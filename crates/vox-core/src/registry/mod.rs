//! CDN registry: validated, priority-ordered list of audio sources.
//!
//! The registry is built once from config entries and is immutable for the
//! rest of the session. Its cardinality decides the selection mode:
//! empty = local-only, one entry = auto-selected, two or more = the caller
//! has to choose (`vox use <id>` persists that choice).

mod descriptor;
mod error;

pub use descriptor::{CdnDescriptor, CdnEntry, CdnSource};
pub use error::RegistryError;

/// Derived from registry cardinality, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// No CDNs configured: clips come from the local voices directory.
    LocalOnly,
    /// Exactly one CDN: used without prompting.
    Single,
    /// Two or more CDNs: an explicit choice (persisted preference) is required.
    Multi,
}

/// Immutable, validated CDN registry.
#[derive(Debug, Clone)]
pub struct CdnRegistry {
    /// Descriptors sorted by ascending priority; declaration order breaks ties.
    descriptors: Vec<CdnDescriptor>,
}

impl CdnRegistry {
    /// Validate raw config entries and build the registry.
    ///
    /// Rejects duplicate or empty ids and remote base URLs that do not parse
    /// as http/https or do not end with `/`. An empty `url` is the local-mode
    /// sentinel from older configs and becomes [`CdnSource::Local`].
    pub fn from_entries(entries: Vec<CdnEntry>) -> Result<Self, RegistryError> {
        let mut descriptors = Vec::with_capacity(entries.len());
        for entry in entries {
            let desc = CdnDescriptor::try_from(entry)?;
            if descriptors.iter().any(|d: &CdnDescriptor| d.id == desc.id) {
                return Err(RegistryError::DuplicateId(desc.id));
            }
            descriptors.push(desc);
        }
        // Stable sort: same-priority entries keep declaration order.
        descriptors.sort_by_key(|d| d.priority);
        Ok(Self { descriptors })
    }

    /// All descriptors in ascending priority order.
    pub fn enumerate(&self) -> &[CdnDescriptor] {
        &self.descriptors
    }

    /// Selection mode as a pure function of registry length.
    pub fn mode(&self) -> SelectionMode {
        match self.descriptors.len() {
            0 => SelectionMode::LocalOnly,
            1 => SelectionMode::Single,
            _ => SelectionMode::Multi,
        }
    }

    /// Look up a descriptor by id.
    pub fn get(&self, id: &str) -> Option<&CdnDescriptor> {
        self.descriptors.iter().find(|d| d.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, url: &str, priority: i32) -> CdnEntry {
        CdnEntry {
            id: id.to_string(),
            name: format!("{id} name"),
            url: url.to_string(),
            description: None,
            priority,
        }
    }

    #[test]
    fn empty_registry_is_local_only() {
        let reg = CdnRegistry::from_entries(Vec::new()).unwrap();
        assert_eq!(reg.mode(), SelectionMode::LocalOnly);
        assert!(reg.enumerate().is_empty());
    }

    #[test]
    fn singleton_registry_is_single_mode() {
        let reg =
            CdnRegistry::from_entries(vec![entry("a", "https://x.example.com/", 1)]).unwrap();
        assert_eq!(reg.mode(), SelectionMode::Single);
        assert_eq!(reg.enumerate()[0].id, "a");
    }

    #[test]
    fn two_entries_are_multi_mode() {
        let reg = CdnRegistry::from_entries(vec![
            entry("a", "https://x.example.com/", 1),
            entry("b", "https://y.example.com/", 2),
        ])
        .unwrap();
        assert_eq!(reg.mode(), SelectionMode::Multi);
    }

    #[test]
    fn enumeration_sorted_by_priority_not_declaration() {
        let reg = CdnRegistry::from_entries(vec![
            entry("slow", "https://slow.example.com/", 3),
            entry("fast", "https://fast.example.com/", 1),
        ])
        .unwrap();
        let ids: Vec<&str> = reg.enumerate().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["fast", "slow"]);
    }

    #[test]
    fn priority_ties_keep_declaration_order() {
        let reg = CdnRegistry::from_entries(vec![
            entry("first", "https://a.example.com/", 5),
            entry("second", "https://b.example.com/", 5),
            entry("third", "https://c.example.com/", 1),
        ])
        .unwrap();
        let ids: Vec<&str> = reg.enumerate().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["third", "first", "second"]);
    }

    #[test]
    fn duplicate_id_rejected() {
        let err = CdnRegistry::from_entries(vec![
            entry("a", "https://x.example.com/", 1),
            entry("a", "https://y.example.com/", 2),
        ])
        .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn missing_trailing_slash_rejected() {
        let err =
            CdnRegistry::from_entries(vec![entry("a", "https://x.example.com/voices", 1)])
                .unwrap_err();
        assert!(matches!(err, RegistryError::MissingTrailingSlash { .. }));
    }

    #[test]
    fn empty_url_sentinel_becomes_local_source() {
        let reg = CdnRegistry::from_entries(vec![entry("local", "", 999)]).unwrap();
        assert_eq!(reg.get("local").unwrap().source, CdnSource::Local);
    }

    #[test]
    fn get_by_id() {
        let reg = CdnRegistry::from_entries(vec![
            entry("a", "https://x.example.com/", 1),
            entry("b", "https://y.example.com/", 2),
        ])
        .unwrap();
        assert!(reg.get("b").is_some());
        assert!(reg.get("missing").is_none());
    }
}
