//! CLI command handlers. Each command is in its own file for clarity.

mod clips;
mod doctor;
mod fetch;
mod forget;
mod purge;
mod sources;
mod status;
mod use_source;

pub use clips::run_clips;
pub use doctor::run_doctor;
pub use fetch::run_fetch;
pub use forget::run_forget;
pub use purge::run_purge;
pub use sources::run_sources;
pub use status::run_status;
pub use use_source::run_use;
