//! Types used by the clip cache.

/// One cached clip row.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// CDN the clip was fetched from (cache namespace).
    pub cdn_id: String,
    /// Manifest-relative clip path.
    pub rel_path: String,
    /// Absolute path of the body file on disk.
    pub stored_path: String,
    /// Body size in bytes.
    pub size: i64,
    /// Unix seconds when the clip was fetched.
    pub fetched_at: i64,
}

/// Per-source rollup for `vox status`.
#[derive(Debug, Clone)]
pub struct SourceStats {
    pub cdn_id: String,
    pub entries: i64,
    pub total_bytes: i64,
}

/// Cache statistics for `vox status`.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub entries: i64,
    pub total_bytes: i64,
    /// Entries older than the TTL (still on disk until purged).
    pub expired: i64,
    pub per_source: Vec<SourceStats>,
}
