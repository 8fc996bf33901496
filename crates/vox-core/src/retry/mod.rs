//! Retry and backoff policy for clip fetches.
//!
//! Error classification (timeouts, throttling, connection failures) and
//! exponential backoff decisions live here so the probe and fetch paths
//! share one policy. Retries are per candidate; when a candidate's
//! attempts are exhausted the fetch engine moves to the next one.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::FetchError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
