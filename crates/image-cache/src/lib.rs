//! Fetch-once image asset cache.
//!
//! The daemon refers to images by relative identifiers such as
//! `/images/tray/tray.png`. The cache fetches `base_url + identifier` the
//! first time an identifier is seen, stores the bytes in a stable
//! directory it owns, and serves the stored path on every later lookup.
//! There is no eviction; entries live as long as the process.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::debug;

/// Errors from resolving an asset.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("asset fetch failed with status {status}: {url}")]
    Status { url: String, status: u16 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Maps relative asset identifiers to local file paths, fetching each
/// asset at most once.
pub struct ImageCache {
    http: reqwest::Client,
    base_url: String,
    dir: PathBuf,
    entries: Mutex<HashMap<String, PathBuf>>,
}

impl ImageCache {
    /// Creates the cache, owning `dir` as its storage directory.
    pub fn new(base_url: impl Into<String>, dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            dir,
            entries: Mutex::new(HashMap::new()),
        })
    }

    /// Returns the cache's storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolves an identifier to a local file path.
    ///
    /// The entry lock is held across the fetch, so concurrent calls for
    /// the same identifier perform exactly one fetch. A failed fetch is
    /// not recorded; the next call for that identifier retries.
    pub async fn resolve(&self, identifier: &str) -> Result<PathBuf, CacheError> {
        let mut entries = self.entries.lock().await;
        if let Some(path) = entries.get(identifier) {
            return Ok(path.clone());
        }

        let url = format!("{}{}", self.base_url, identifier);
        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CacheError::Status {
                url,
                status: status.as_u16(),
            });
        }
        let bytes = resp.bytes().await?;

        let path = self.dir.join(file_name_for(identifier, entries.len()));
        tokio::fs::write(&path, &bytes).await?;
        debug!(identifier, path = %path.display(), "cached image");

        entries.insert(identifier.to_string(), path.clone());
        Ok(path)
    }
}

/// Builds a unique, filesystem-safe file name for an identifier.
///
/// The sequence number guarantees uniqueness even if two identifiers
/// sanitize to the same stem.
fn file_name_for(identifier: &str, seq: usize) -> String {
    let stem: String = identifier
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    format!("{seq:04}-{}", stem.trim_matches('-'))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    use super::*;

    /// Minimal one-request-per-connection HTTP server. Responds with the
    /// scripted status codes in order, then 200 forever; counts requests.
    async fn spawn_asset_server(statuses: Vec<u16>) -> (String, Arc<AtomicUsize>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));

        let server_hits = Arc::clone(&hits);
        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let n = server_hits.fetch_add(1, Ordering::SeqCst);
                let status = statuses.get(n).copied().unwrap_or(200);
                tokio::spawn(async move {
                    // Drain the request head.
                    let mut buf = [0u8; 1024];
                    let mut head = Vec::new();
                    loop {
                        let Ok(read) = stream.read(&mut buf).await else {
                            return;
                        };
                        if read == 0 {
                            return;
                        }
                        head.extend_from_slice(&buf[..read]);
                        if head.windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }
                    let body = b"imagedata";
                    let reason = if status == 200 { "OK" } else { "Error" };
                    let resp = format!(
                        "HTTP/1.1 {status} {reason}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        body.len()
                    );
                    let _ = stream.write_all(resp.as_bytes()).await;
                    let _ = stream.write_all(body).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        (format!("http://{addr}"), hits)
    }

    #[tokio::test]
    async fn resolve_fetches_once_per_identifier() {
        let (base_url, hits) = spawn_asset_server(vec![]).await;
        let dir = tempfile::tempdir().unwrap();
        let cache = ImageCache::new(base_url, dir.path().join("cache")).unwrap();

        let first = cache.resolve("/logo48.png").await.unwrap();
        let second = cache.resolve("/logo48.png").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(std::fs::read(&first).unwrap(), b"imagedata");
    }

    #[tokio::test]
    async fn distinct_identifiers_get_distinct_paths() {
        let (base_url, hits) = spawn_asset_server(vec![]).await;
        let dir = tempfile::tempdir().unwrap();
        let cache = ImageCache::new(base_url, dir.path().join("cache")).unwrap();

        let a = cache.resolve("/images/tray/tray.png").await.unwrap();
        let b = cache.resolve("/images/tray/tray-syncing.png").await.unwrap();

        assert_ne!(a, b);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_fetch_is_not_cached() {
        let (base_url, hits) = spawn_asset_server(vec![404]).await;
        let dir = tempfile::tempdir().unwrap();
        let cache = ImageCache::new(base_url, dir.path().join("cache")).unwrap();

        let err = cache.resolve("/missing.png").await.unwrap_err();
        match err {
            CacheError::Status { status, .. } => assert_eq!(status, 404),
            other => panic!("unexpected error: {other:?}"),
        }

        // The retry fetches again and succeeds this time.
        let path = cache.resolve("/missing.png").await.unwrap();
        assert!(path.exists());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn concurrent_resolution_performs_one_fetch() {
        let (base_url, hits) = spawn_asset_server(vec![]).await;
        let dir = tempfile::tempdir().unwrap();
        let cache =
            Arc::new(ImageCache::new(base_url, dir.path().join("cache")).unwrap());

        let a = Arc::clone(&cache);
        let b = Arc::clone(&cache);
        let (ra, rb) = tokio::join!(
            tokio::spawn(async move { a.resolve("/logo48.png").await }),
            tokio::spawn(async move { b.resolve("/logo48.png").await }),
        );

        let pa = ra.unwrap().unwrap();
        let pb = rb.unwrap().unwrap();
        assert_eq!(pa, pb);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn file_names_are_sanitized_and_unique() {
        let a = file_name_for("/images/tray/tray.png", 0);
        let b = file_name_for("/images/tray/tray.png", 1);
        assert_ne!(a, b);
        assert!(!a.contains('/'));
        assert!(a.ends_with("images-tray-tray.png"));
    }

    #[test]
    fn new_creates_cache_directory() {
        let dir = tempfile::tempdir().unwrap();
        let cache_dir = dir.path().join("nested").join("cache");
        let cache = ImageCache::new("http://127.0.0.1:1", &cache_dir).unwrap();
        assert!(cache.dir().is_dir());
    }
}
