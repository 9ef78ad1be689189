//! Resource fetching with a local byte cache and bounded retries.
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use tempfile::NamedTempFile;

use crate::error::{IrisError, Result};

/// How remote resources are fetched and cached.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Directory holding previously downloaded files.
    pub cache_dir: PathBuf,
    /// Total HTTP attempts before giving up.
    pub max_attempts: u32,
    /// Wait before retry `n` is `n * retry_delay`.
    pub retry_delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            max_attempts: 3,
            retry_delay: Duration::from_millis(500),
        }
    }
}

/// `$XDG_CACHE_HOME/iris`, falling back to `$HOME/.cache/iris` and then
/// `./.iris_cache`.
pub fn default_cache_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CACHE_HOME") {
        PathBuf::from(xdg).join("iris")
    } else if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".cache/iris")
    } else {
        PathBuf::from("./.iris_cache")
    }
}

/// Return the bytes behind `location`.
///
/// `http://` and `https://` locations are served from the cache when a copy
/// exists, otherwise downloaded and written to the cache. Anything else
/// (including `file://` URIs) is read straight from disk.
pub fn fetch_resource(location: &str, config: &FetchConfig) -> Result<Vec<u8>> {
    if !is_remote(location) {
        let path = location.strip_prefix("file://").unwrap_or(location);
        return fs::read(path).map_err(|e| IrisError::Io(format!("Failed to read {}: {}", path, e)));
    }

    let cached = cache_path(location, &config.cache_dir)?;
    if cached.exists() {
        log::debug!("Cache hit for {}: {}", location, cached.display());
        return fs::read(&cached)
            .map_err(|e| IrisError::Io(format!("Failed to read {}: {}", cached.display(), e)));
    }

    let bytes = download_with_retry(location, config)?;

    fs::create_dir_all(&config.cache_dir).map_err(|e| {
        IrisError::Io(format!(
            "Failed to create cache directory {}: {}",
            config.cache_dir.display(),
            e
        ))
    })?;
    write_cache_file(&cached, &bytes, &config.cache_dir)?;
    log::debug!("Cached {} bytes at {}", bytes.len(), cached.display());

    Ok(bytes)
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Cache file for a URL: scheme-less host, path and query flattened into one
/// file name under `cache_dir`, so it still ends with the URL's base name.
///
/// `/` becomes `+`; ASCII alphanumerics, `.`, `-` and `_` are kept; every
/// other byte is written as `%XX`. Distinct URLs never share a cache file.
fn cache_path(url: &str, cache_dir: &Path) -> Result<PathBuf> {
    let without_fragment = url.split('#').next().unwrap_or(url);
    let rest = without_fragment
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(without_fragment);
    let path = rest.split('?').next().unwrap_or(rest);
    if path.ends_with('/') || !path.contains('/') {
        return Err(IrisError::Io(format!("Cannot derive a file name from {}", url)));
    }

    let mut name = String::with_capacity(rest.len());
    for b in rest.bytes() {
        match b {
            b'/' => name.push('+'),
            b'.' | b'-' | b'_' => name.push(b as char),
            _ if b.is_ascii_alphanumeric() => name.push(b as char),
            _ => name.push_str(&format!("%{:02X}", b)),
        }
    }
    Ok(cache_dir.join(name))
}

/// Write `bytes` to a temporary file in `cache_dir` and move it onto `target`,
/// so `target` only ever holds a complete download.
fn write_cache_file(target: &Path, bytes: &[u8], cache_dir: &Path) -> Result<()> {
    let mut tmp = NamedTempFile::new_in(cache_dir).map_err(|e| {
        IrisError::Io(format!(
            "Failed to create temporary file in {}: {}",
            cache_dir.display(),
            e
        ))
    })?;
    tmp.write_all(bytes)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| IrisError::Io(format!("Failed to write {}: {}", tmp.path().display(), e)))?;
    tmp.persist(target)
        .map_err(|e| IrisError::Io(format!("Failed to write {}: {}", target.display(), e.error)))?;
    Ok(())
}

fn download_with_retry(url: &str, config: &FetchConfig) -> Result<Vec<u8>> {
    let attempts = config.max_attempts.max(1);
    let mut last_err = String::new();

    for attempt in 1..=attempts {
        match download(url) {
            Ok(bytes) => return Ok(bytes),
            Err(e) => {
                log::warn!("Fetch {} failed (attempt {}/{}): {}", url, attempt, attempts, e);
                last_err = e.to_string();
                if attempt < attempts {
                    std::thread::sleep(config.retry_delay * attempt);
                }
            }
        }
    }

    Err(IrisError::Io(format!(
        "Failed to fetch {} after {} attempts: {}",
        url, attempts, last_err
    )))
}

fn download(url: &str) -> std::result::Result<Vec<u8>, reqwest::Error> {
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    Ok(response.bytes()?.to_vec())
}
