pub mod config;
pub mod logging;

pub mod cache;
pub mod fetch;
pub mod manifest;
pub mod probe;
pub mod registry;
pub mod resolver;
pub mod retry;
