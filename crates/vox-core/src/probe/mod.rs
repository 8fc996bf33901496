//! HTTP HEAD probing of CDN endpoints.
//!
//! Uses the curl crate (libcurl) to fetch response headers and check what
//! `vox doctor` cares about: reachability, `Content-Length`,
//! `Accept-Ranges: bytes` for partial-content streaming, and the CORS
//! response headers browser clients need from every CDN
//! (`Access-Control-Allow-Origin` and an `Access-Control-Expose-Headers`
//! that covers `Content-Length` and `Content-Range`).

mod parse;

use anyhow::{Context, Result};
use std::str;
use std::time::Duration;

/// Result of a HEAD request against a clip URL.
#[derive(Debug, Clone, Default)]
pub struct ProbeResult {
    /// Clip size in bytes, if `Content-Length` is present.
    pub content_length: Option<u64>,
    /// True if the server sent `Accept-Ranges: bytes`.
    pub accept_ranges: bool,
    /// `Access-Control-Allow-Origin` value if present.
    pub allow_origin: Option<String>,
    /// `Access-Control-Allow-Methods` value if present.
    pub allow_methods: Option<String>,
    /// `Access-Control-Expose-Headers` value if present.
    pub expose_headers: Option<String>,
}

impl ProbeResult {
    /// Whether the CORS headers satisfy the contract CDN servers must
    /// honor: an allow-origin plus exposed `Content-Length` and
    /// `Content-Range` so clients can stream partial content.
    pub fn cors_ok(&self) -> bool {
        if self.allow_origin.is_none() {
            return false;
        }
        match &self.expose_headers {
            None => false,
            Some(exposed) => {
                let lower = exposed.to_ascii_lowercase();
                lower.contains("content-length") && lower.contains("content-range")
            }
        }
    }
}

/// Performs a HEAD request and returns parsed metadata.
///
/// Follows redirects. Fails on non-2xx. Runs in the current thread; call
/// from `spawn_blocking` when used from async code.
pub fn probe(url: &str) -> Result<ProbeResult> {
    let mut headers: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.nobody(true)?; // HEAD request
    easy.follow_location(true)?;
    easy.connect_timeout(Duration::from_secs(15))?;
    easy.timeout(Duration::from_secs(30))?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                headers.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.perform().context("HEAD request failed")?;
    }

    let code = easy.response_code().context("no response code")?;
    if code < 200 || code >= 300 {
        anyhow::bail!("HEAD {} returned HTTP {}", url, code);
    }

    Ok(parse::parse_headers(&headers))
}
