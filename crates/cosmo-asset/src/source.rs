// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Byte sources for asset URLs.

use std::future::Future;
use std::io;
use std::path::Path;

use cosmo_scene_port::LoadError;

/// Fetches the raw bytes behind an asset URL.
pub trait AssetSource: Send + Sync + 'static {
    /// Fetch `url`. Missing assets map to [`LoadError::NotFound`].
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, LoadError>> + Send;
}

/// Reads assets from the local filesystem. Accepts plain paths and `file://` URLs.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSource;

impl AssetSource for FileSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let path = Path::new(url.strip_prefix("file://").unwrap_or(url));
        tokio::fs::read(path).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound(url.to_owned()),
            _ => LoadError::Network(format!("{}: {e}", path.display())),
        })
    }
}

/// Fetches assets over HTTP(S).
#[derive(Debug, Default, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    /// Use an existing client (shared connection pool, custom timeouts).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl AssetSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LoadError::NotFound(url.to_owned()));
        }
        let resp = resp
            .error_for_status()
            .map_err(|e| LoadError::Network(e.to_string()))?;
        let body = resp
            .bytes()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;
        Ok(body.to_vec())
    }
}

/// Dispatches `http://` and `https://` URLs to [`HttpSource`], everything else to [`FileSource`].
#[derive(Debug, Default, Clone)]
pub struct DefaultSource {
    http: HttpSource,
    file: FileSource,
}

impl DefaultSource {
    /// File access plus the given HTTP source.
    pub fn with_http(http: HttpSource) -> Self {
        Self {
            http,
            file: FileSource,
        }
    }
}

fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

impl AssetSource for DefaultSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        if is_remote(url) {
            self.http.fetch(url).await
        } else {
            self.file.fetch(url).await
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn scheme_dispatch() {
        assert!(is_remote("https://example.org/a.glb"));
        assert!(is_remote("http://localhost/a.glb"));
        assert!(!is_remote("/models/a.glb"));
        assert!(!is_remote("file:///models/a.glb"));
    }

    #[tokio::test]
    async fn file_source_reads_and_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("box.gltf");
        std::fs::write(&path, b"{}").unwrap();
        let url = format!("file://{}", path.display());
        assert_eq!(FileSource.fetch(&url).await.unwrap(), b"{}");

        let missing = dir.path().join("nope.glb");
        let err = FileSource
            .fetch(missing.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }
}
