//! Parse HTTP response header lines into ProbeResult.

use super::ProbeResult;

/// Parse collected header lines into ProbeResult.
pub(crate) fn parse_headers(lines: &[String]) -> ProbeResult {
    let mut result = ProbeResult::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                if let Ok(n) = value.parse::<u64>() {
                    result.content_length = Some(n);
                }
            }
            if name.eq_ignore_ascii_case("accept-ranges") {
                result.accept_ranges = value.eq_ignore_ascii_case("bytes");
            }
            if name.eq_ignore_ascii_case("access-control-allow-origin") {
                result.allow_origin = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("access-control-allow-methods") {
                result.allow_methods = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("access-control-expose-headers") {
                result.expose_headers = Some(value.to_string());
            }
        }
    }

    result
}
