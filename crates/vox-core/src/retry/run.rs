//! Retry loop: run a closure until success or policy says stop.

use super::classify;
use super::error::FetchError;
use super::policy::{RetryDecision, RetryPolicy};

/// Runs a closure until it succeeds or the retry policy says to stop.
/// On retryable failure, sleeps for the backoff duration then tries again.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, mut f: F) -> Result<T, FetchError>
where
    F: FnMut() -> Result<T, FetchError>,
{
    let mut attempt = 1u32;
    loop {
        match f() {
            Ok(v) => return Ok(v),
            Err(e) => {
                let kind = classify::classify(&e);
                match policy.decide(attempt, kind) {
                    RetryDecision::NoRetry => return Err(e),
                    RetryDecision::RetryAfter(d) => {
                        tracing::debug!("retrying after {:?}: {}", d, e);
                        std::thread::sleep(d);
                        attempt += 1;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        }
    }

    #[test]
    fn returns_value_on_first_success() {
        let out = run_with_retry(&fast_policy(), || Ok::<_, FetchError>(7u32)).unwrap();
        assert_eq!(out, 7);
    }

    #[test]
    fn retries_retryable_then_succeeds() {
        let mut calls = 0;
        let out = run_with_retry(&fast_policy(), || {
            calls += 1;
            if calls < 3 {
                Err(FetchError::Http(503))
            } else {
                Ok(calls)
            }
        })
        .unwrap();
        assert_eq!(out, 3);
    }

    #[test]
    fn gives_up_on_non_retryable() {
        let mut calls = 0;
        let err = run_with_retry(&fast_policy(), || -> Result<(), _> {
            calls += 1;
            Err(FetchError::Http(404))
        })
        .unwrap_err();
        assert_eq!(calls, 1);
        assert!(matches!(err, FetchError::Http(404)));
    }

    #[test]
    fn stops_after_max_attempts() {
        let mut calls = 0;
        let err = run_with_retry(&fast_policy(), || -> Result<(), _> {
            calls += 1;
            Err(FetchError::Http(503))
        })
        .unwrap_err();
        assert_eq!(calls, 3);
        assert!(matches!(err, FetchError::Http(503)));
    }
}
