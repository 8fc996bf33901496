//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a set of clip paths with configurable CORS headers, Range
//! advertisement, and forced failure status, so fallback and doctor
//! behavior can be exercised without a real CDN.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Copy)]
pub struct ClipServerOptions {
    /// If set, every request gets this status and an empty body.
    pub fail_status: Option<u16>,
    /// Emit the CORS header set CDN servers are expected to send.
    pub send_cors: bool,
    /// Emit `Accept-Ranges: bytes`.
    pub advertise_ranges: bool,
}

impl Default for ClipServerOptions {
    fn default() -> Self {
        Self {
            fail_status: None,
            send_cors: true,
            advertise_ranges: true,
        }
    }
}

/// Starts a server in a background thread serving `clips` (path -> body).
/// Returns the base URL with a trailing slash. Runs until the process exits.
pub fn start(clips: HashMap<String, Vec<u8>>) -> String {
    start_with_options(clips, ClipServerOptions::default())
}

pub fn start_with_options(clips: HashMap<String, Vec<u8>>, opts: ClipServerOptions) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let clips = Arc::new(clips);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let clips = Arc::clone(&clips);
            thread::spawn(move || handle(stream, &clips, opts));
        }
    });
    format!("http://127.0.0.1:{}/", port)
}

/// Binds and immediately drops a listener, yielding a base URL nothing
/// listens on (connection refused).
pub fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

fn handle(
    mut stream: std::net::TcpStream,
    clips: &HashMap<String, Vec<u8>>,
    opts: ClipServerOptions,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (method, path) = parse_request(request);

    if let Some(status) = opts.fail_status {
        let response = format!("HTTP/1.1 {} Error\r\nContent-Length: 0\r\n\r\n", status);
        let _ = stream.write_all(response.as_bytes());
        return;
    }

    let extra = extra_headers(opts);
    let Some(body) = clips.get(path.trim_start_matches('/')) else {
        let _ = stream.write_all(
            format!("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n{extra}\r\n").as_bytes(),
        );
        return;
    };

    if method.eq_ignore_ascii_case("HEAD") {
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n{extra}\r\n",
            body.len()
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }
    if method.eq_ignore_ascii_case("GET") {
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n{extra}\r\n",
            body.len()
        );
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.write_all(body);
        return;
    }
    let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
}

fn extra_headers(opts: ClipServerOptions) -> String {
    let mut out = String::new();
    if opts.advertise_ranges {
        out.push_str("Accept-Ranges: bytes\r\n");
    }
    if opts.send_cors {
        out.push_str("Access-Control-Allow-Origin: *\r\n");
        out.push_str("Access-Control-Allow-Methods: GET, OPTIONS\r\n");
        out.push_str("Access-Control-Allow-Headers: Range, Accept-Encoding, Origin\r\n");
        out.push_str("Access-Control-Expose-Headers: Content-Length, Content-Range\r\n");
    }
    out
}

fn parse_request(request: &str) -> (&str, &str) {
    let first_line = request.lines().next().unwrap_or("");
    let mut parts = first_line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("/");
    (method, path)
}
