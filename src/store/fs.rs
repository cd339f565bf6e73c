//! Filesystem blob store.
//!
//! Blobs land under a root directory keyed by the storage key; the server
//! exposes the same directory at a public base URL, so `public_url` is a
//! plain join. Content type is recorded by the key's file extension only.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::error::{HotDogError, Result};
use crate::store::BlobStore;

pub struct FsBlobStore {
    root: PathBuf,
    base_url: String,
}

impl FsBlobStore {
    pub fn new(root: PathBuf, base_url: impl Into<String>) -> Self {
        Self {
            root,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, key: &str, bytes: &[u8], _content_type: &str) -> Result<()> {
        // Keys are derived from client-supplied session ids; refuse anything
        // that would resolve outside the blob root.
        let relative = Path::new(key);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(HotDogError::Upload(format!(
                "storage key '{}' escapes the blob root",
                key
            )));
        }

        let path = self.root.join(key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| HotDogError::Upload(format!("creating {}: {}", parent.display(), e)))?;
        }

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| HotDogError::Upload(format!("writing {}: {}", path.display(), e)))?;

        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_put_writes_under_session_dir() {
        let dir = tempdir().unwrap();
        let store = FsBlobStore::new(dir.path().to_path_buf(), "http://localhost:3000/images");

        store
            .put("s1/1700000000000.png", b"payload", "image/png")
            .await
            .unwrap();

        let written = std::fs::read(dir.path().join("s1/1700000000000.png")).unwrap();
        assert_eq!(written, b"payload");
        assert_eq!(
            store.public_url("s1/1700000000000.png"),
            "http://localhost:3000/images/s1/1700000000000.png"
        );
    }

    #[tokio::test]
    async fn test_put_refuses_keys_that_escape_the_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("blobs");
        std::fs::create_dir_all(&root).unwrap();
        let store = FsBlobStore::new(root, "http://localhost:3000/images");

        for key in [
            "../escaped/1700000000000.png",
            "a/../../escaped.png",
            "/etc/escaped.png",
        ] {
            let err = store.put(key, b"payload", "image/png").await.unwrap_err();
            assert!(matches!(err, HotDogError::Upload(_)), "{}", key);
        }

        assert!(!dir.path().join("escaped/1700000000000.png").exists());
        assert!(!dir.path().join("escaped.png").exists());
    }
}
