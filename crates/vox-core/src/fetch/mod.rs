//! Clip fetching: the curl GET path and the fallback engine on top of it.

mod download;
mod engine;

pub use download::download_to_file;
pub use engine::{fetch_clip, FetchOutcome, Origin};
