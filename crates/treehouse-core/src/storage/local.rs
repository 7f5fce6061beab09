//! Directory-backed object storage.
//!
//! Objects live at `root/<path>`. Writes go to `root/.tmp/` first and are
//! renamed into place, so readers never observe a half-written image.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::{debug, info};
use url::Url;

use super::{join_url, ObjectInfo};
use crate::error::{TreeError, TreeResult};

/// Staging directory for in-flight writes. Object paths never start with it.
const STAGING_DIR: &str = ".tmp";

#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
    public_base: Url,
}

impl LocalStore {
    pub(super) async fn open(root: PathBuf, public_base: Url) -> TreeResult<Self> {
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            TreeError::Config(format!("Failed to create storage directory {:?}: {}", root, e))
        })?;
        info!(?root, %public_base, "Opened local object store");
        Ok(Self { root, public_base })
    }

    /// Directory holding the objects
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, path: &str) -> PathBuf {
        path.split('/').fold(self.root.clone(), |acc, seg| acc.join(seg))
    }

    pub(super) async fn upload(&self, path: &str, bytes: Bytes, upsert: bool) -> TreeResult<String> {
        let target = self.object_path(path);
        let write_err = |e: std::io::Error| TreeError::StorageWrite(format!("{path}: {e}"));

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }
        if !upsert && tokio::fs::try_exists(&target).await.map_err(write_err)? {
            return Err(TreeError::StorageWrite(format!(
                "object already exists: {path}"
            )));
        }

        let staging = self.root.join(STAGING_DIR);
        tokio::fs::create_dir_all(&staging).await.map_err(write_err)?;
        let tmp = staging.join(ulid::Ulid::new().to_string());
        tokio::fs::write(&tmp, &bytes).await.map_err(write_err)?;
        if let Err(e) = tokio::fs::rename(&tmp, &target).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(write_err(e));
        }

        debug!(path, size = bytes.len(), "Stored object");
        Ok(path.to_string())
    }

    pub(super) async fn list(&self, prefix: &str) -> TreeResult<Vec<ObjectInfo>> {
        let dir = self.object_path(prefix);
        let read_err = |e: std::io::Error| TreeError::StorageRead(format!("{prefix}: {e}"));

        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(read_err(e)),
        };

        let mut objects = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(read_err)? {
            let metadata = entry.metadata().await.map_err(read_err)?;
            if !metadata.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            let updated_at = metadata.modified().ok().map(DateTime::<Utc>::from);
            objects.push(ObjectInfo {
                path: format!("{prefix}/{name}"),
                name,
                updated_at,
                size: Some(metadata.len()),
            });
        }
        Ok(objects)
    }

    pub(super) fn public_url(&self, path: &str) -> String {
        join_url(&self.public_base, path.split('/')).to_string()
    }

    pub(super) async fn download(&self, path: &str) -> TreeResult<Option<Bytes>> {
        match tokio::fs::read(self.object_path(path)).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TreeError::StorageRead(format!("{path}: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn open(dir: &Path) -> LocalStore {
        LocalStore::open(
            dir.join("objects"),
            Url::parse("http://127.0.0.1:3000/assets").unwrap(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_upload_list_download() {
        let temp = tempdir().unwrap();
        let store = open(temp.path()).await;

        store
            .upload("banners/u/a.jpg", Bytes::from_static(b"jpeg"), true)
            .await
            .unwrap();

        let listed = store.list("banners/u").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "a.jpg");
        assert_eq!(listed[0].size, Some(4));
        assert!(listed[0].updated_at.is_some());

        let bytes = store.download("banners/u/a.jpg").await.unwrap().unwrap();
        assert_eq!(&bytes[..], b"jpeg");
    }

    #[tokio::test]
    async fn test_missing_prefix_lists_empty() {
        let temp = tempdir().unwrap();
        let store = open(temp.path()).await;
        assert!(store.list("banners/nobody").await.unwrap().is_empty());
        assert!(store.download("banners/nobody/x.jpg").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_overwrite_and_conflict() {
        let temp = tempdir().unwrap();
        let store = open(temp.path()).await;

        store.upload("p/a.png", Bytes::from_static(b"one"), true).await.unwrap();
        store.upload("p/a.png", Bytes::from_static(b"two"), true).await.unwrap();
        let bytes = store.download("p/a.png").await.unwrap().unwrap();
        assert_eq!(&bytes[..], b"two");

        let err = store
            .upload("p/a.png", Bytes::from_static(b"three"), false)
            .await
            .unwrap_err();
        assert!(matches!(err, TreeError::StorageWrite(_)));
    }

    #[tokio::test]
    async fn test_staging_stays_out_of_listings() {
        let temp = tempdir().unwrap();
        let store = open(temp.path()).await;

        store
            .upload("banners/u/me.upload-2.jpg", Bytes::from_static(b"jpeg"), true)
            .await
            .unwrap();

        let listed = store.list("banners/u").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "me.upload-2.jpg");

        let mut staged = tokio::fs::read_dir(store.root().join(STAGING_DIR)).await.unwrap();
        assert!(staged.next_entry().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_public_url() {
        let temp = tempdir().unwrap();
        let store = open(temp.path()).await;
        assert_eq!(
            store.public_url("banners/a_b_c_com/photo.jpg"),
            "http://127.0.0.1:3000/assets/banners/a_b_c_com/photo.jpg"
        );
    }
}
