//! Single GET download of one clip to a file.
//!
//! Writes to `<dest>.part` and renames into place on success, so a
//! half-written body never looks like a cached clip.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::str;
use std::time::Duration;

use crate::retry::FetchError;

/// Downloads `url` into `dest`. Returns the number of bytes written.
///
/// Non-2xx statuses, short bodies (Content-Length larger than what
/// arrived), and disk failures are all reported as [`FetchError`] so the
/// retry layer can classify them. Runs in the current thread; call from
/// `spawn_blocking` when used from async code.
pub fn download_to_file(url: &str, dest: &Path) -> Result<u64, FetchError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(FetchError::Storage)?;
    }
    let part_path = dest.with_extension("part");
    let mut file = fs::File::create(&part_path).map_err(FetchError::Storage)?;

    let mut written: u64 = 0;
    let mut content_length: Option<u64> = None;
    let mut write_error: Option<std::io::Error> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(FetchError::Curl)?;
    easy.follow_location(true).map_err(FetchError::Curl)?;
    easy.max_redirections(10).map_err(FetchError::Curl)?;
    easy.connect_timeout(Duration::from_secs(15))
        .map_err(FetchError::Curl)?;
    easy.low_speed_limit(1024).map_err(FetchError::Curl)?;
    easy.low_speed_time(Duration::from_secs(30))
        .map_err(FetchError::Curl)?;
    easy.timeout(Duration::from_secs(600))
        .map_err(FetchError::Curl)?;

    let perform_result = {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                if let Ok(line) = str::from_utf8(data) {
                    if let Some((name, value)) = line.split_once(':') {
                        if name.trim().eq_ignore_ascii_case("content-length") {
                            content_length = value.trim().parse::<u64>().ok();
                        }
                    }
                    // A redirect starts a fresh header block; earlier
                    // Content-Length values no longer apply.
                    if line.starts_with("HTTP/") {
                        content_length = None;
                    }
                }
                true
            })
            .map_err(FetchError::Curl)?;
        transfer
            .write_function(|data| match file.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_error = Some(e);
                    Ok(0) // abort transfer
                }
            })
            .map_err(FetchError::Curl)?;
        transfer.perform()
    };

    if let Some(e) = write_error {
        let _ = fs::remove_file(&part_path);
        return Err(FetchError::Storage(e));
    }
    if let Err(e) = perform_result {
        let _ = fs::remove_file(&part_path);
        return Err(FetchError::Curl(e));
    }

    let code = easy.response_code().map_err(FetchError::Curl)?;
    if !(200..300).contains(&code) {
        let _ = fs::remove_file(&part_path);
        return Err(FetchError::Http(code));
    }

    if let Some(expected) = content_length {
        if written < expected {
            let _ = fs::remove_file(&part_path);
            return Err(FetchError::PartialTransfer {
                expected,
                received: written,
            });
        }
    }

    file.flush().map_err(FetchError::Storage)?;
    drop(file);
    fs::rename(&part_path, dest).map_err(FetchError::Storage)?;
    Ok(written)
}
