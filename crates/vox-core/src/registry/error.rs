//! Registry validation errors.

use thiserror::Error;

/// Why a set of config entries failed to validate into a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("cdn entry has an empty id")]
    EmptyId,

    #[error("duplicate cdn id '{0}'")]
    DuplicateId(String),

    #[error("cdn '{id}': base URL '{url}' must end with '/' so clip paths concatenate correctly")]
    MissingTrailingSlash { id: String, url: String },

    #[error("cdn '{id}': invalid base URL '{url}': {reason}")]
    InvalidUrl {
        id: String,
        url: String,
        reason: String,
    },
}
