//! Persistent clip cache (SQLite via sqlx, bodies on disk).
//!
//! Rows are keyed by `(cdn_id, rel_path)` so a clip fetched from one CDN
//! never masks the same path on another. Entries expire after the
//! configured TTL (30 days by default), and switching the active CDN
//! invalidates entries tagged with a different source id. The persisted
//! CDN preference lives here too.

pub mod db;
pub mod store;
pub mod types;

pub use db::CacheDb;
pub use store::CacheStore;
pub use types::*;
