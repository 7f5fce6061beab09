//! Object storage for user images.
//!
//! The asset store talks to exactly one backend, picked at startup:
//! - **Memory**: objects held in a map, lost on restart. Use for tests.
//! - **Local**: a directory on disk, served over HTTP by the API server.
//! - **Supabase**: Supabase Storage REST API (upload, list, public URL, download).
//!
//! All backends expose the same four operations: `upload`, `list`,
//! `public_url` and `download`. Listing returns the direct children of a
//! directory prefix with their last-modified timestamps; the caller decides
//! which one is "current".

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

use crate::error::{TreeError, TreeResult};

mod local;
mod memory;
mod supabase;

pub use local::LocalStore;
pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

/// One stored object as reported by a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectInfo {
    /// File name (last path segment)
    pub name: String,
    /// Full object path inside the bucket/root
    pub path: String,
    /// Upload/modification time, if the backend reports one
    pub updated_at: Option<DateTime<Utc>>,
    pub size: Option<u64>,
}

/// The underlying backend
#[derive(Clone)]
enum StoreInner {
    Memory(MemoryStore),
    Local(LocalStore),
    Supabase(SupabaseStore),
}

impl std::fmt::Debug for StoreInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreInner::Memory(_) => write!(f, "MemoryStore"),
            StoreInner::Local(store) => write!(f, "LocalStore({:?})", store.root()),
            StoreInner::Supabase(store) => write!(f, "SupabaseStore({})", store.bucket()),
        }
    }
}

/// Handle to the configured object-storage backend.
///
/// Cheap to clone; clones share the same backend.
#[derive(Clone)]
pub struct ObjectStore {
    inner: StoreInner,
}

impl std::fmt::Debug for ObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStore")
            .field("backend", &self.inner)
            .finish()
    }
}

impl ObjectStore {
    /// In-memory backend. Data is lost when the last clone is dropped.
    pub fn new_memory() -> Self {
        tracing::info!("Creating in-memory object store");
        Self {
            inner: StoreInner::Memory(MemoryStore::new()),
        }
    }

    /// Directory-backed storage rooted at `root`.
    ///
    /// `public_base` is the URL under which `root` is served
    /// (e.g. `http://127.0.0.1:3000/assets`).
    pub async fn new_local(
        root: impl Into<std::path::PathBuf>,
        public_base: &str,
    ) -> TreeResult<Self> {
        let store = LocalStore::open(root.into(), parse_base(public_base)?).await?;
        Ok(Self {
            inner: StoreInner::Local(store),
        })
    }

    /// Supabase Storage bucket.
    pub fn new_supabase(project_url: &str, api_key: &str, bucket: &str) -> TreeResult<Self> {
        let store = SupabaseStore::new(parse_base(project_url)?, api_key, bucket)?;
        Ok(Self {
            inner: StoreInner::Supabase(store),
        })
    }

    /// Short backend name for logs and diagnostics
    pub fn backend_name(&self) -> &'static str {
        match self.inner {
            StoreInner::Memory(_) => "memory",
            StoreInner::Local(_) => "local",
            StoreInner::Supabase(_) => "supabase",
        }
    }

    /// Get the memory backend, if this is one.
    pub fn memory(&self) -> Option<&MemoryStore> {
        match &self.inner {
            StoreInner::Memory(store) => Some(store),
            _ => None,
        }
    }

    /// Get the local backend, if this is one.
    pub fn local(&self) -> Option<&LocalStore> {
        match &self.inner {
            StoreInner::Local(store) => Some(store),
            _ => None,
        }
    }

    /// Write `bytes` to `path`.
    ///
    /// With `upsert`, an existing object is overwritten; without it, an
    /// existing object makes the write fail. Returns the stored path.
    pub async fn upload(
        &self,
        path: &str,
        bytes: Bytes,
        content_type: &str,
        upsert: bool,
    ) -> TreeResult<String> {
        validate_object_path(path).map_err(TreeError::StorageWrite)?;
        match &self.inner {
            StoreInner::Memory(store) => store.upload(path, bytes, content_type, upsert),
            StoreInner::Local(store) => store.upload(path, bytes, upsert).await,
            StoreInner::Supabase(store) => store.upload(path, bytes, content_type, upsert).await,
        }
    }

    /// List the objects directly under a directory prefix.
    ///
    /// A prefix with no objects (or that doesn't exist) yields an empty list.
    pub async fn list(&self, prefix: &str) -> TreeResult<Vec<ObjectInfo>> {
        let prefix = prefix.trim_end_matches('/');
        validate_object_path(prefix).map_err(TreeError::StorageRead)?;
        match &self.inner {
            StoreInner::Memory(store) => store.list(prefix),
            StoreInner::Local(store) => store.list(prefix).await,
            StoreInner::Supabase(store) => store.list(prefix).await,
        }
    }

    /// Resolve the public URL of an object path.
    pub fn public_url(&self, path: &str) -> String {
        match &self.inner {
            StoreInner::Memory(store) => store.public_url(path),
            StoreInner::Local(store) => store.public_url(path),
            StoreInner::Supabase(store) => store.public_url(path),
        }
    }

    /// Read an object's bytes. Returns `None` if it doesn't exist.
    pub async fn download(&self, path: &str) -> TreeResult<Option<Bytes>> {
        validate_object_path(path).map_err(TreeError::StorageRead)?;
        match &self.inner {
            StoreInner::Memory(store) => store.download(path),
            StoreInner::Local(store) => store.download(path).await,
            StoreInner::Supabase(store) => store.download(path).await,
        }
    }
}

/// Reject absolute paths and `.`/`..` segments.
fn validate_object_path(path: &str) -> Result<(), String> {
    if path.is_empty() || path.starts_with('/') || path.contains('\\') {
        return Err(format!("invalid object path: {path:?}"));
    }
    if path.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
        return Err(format!("invalid object path: {path:?}"));
    }
    Ok(())
}

fn parse_base(raw: &str) -> TreeResult<Url> {
    let url = Url::parse(raw)
        .map_err(|e| TreeError::Config(format!("invalid base url {raw:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(TreeError::Config(format!("url {raw:?} cannot be a base")));
    }
    Ok(url)
}

/// Append path segments to a base URL, percent-encoding each one.
pub(crate) fn join_url<'a>(base: &Url, segments: impl IntoIterator<Item = &'a str>) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_object_path() {
        assert!(validate_object_path("banners/u/a.jpg").is_ok());
        assert!(validate_object_path("banners/u").is_ok());
        assert!(validate_object_path("").is_err());
        assert!(validate_object_path("/etc/passwd").is_err());
        assert!(validate_object_path("banners/../secrets").is_err());
        assert!(validate_object_path("banners//a.jpg").is_err());
    }

    #[test]
    fn test_join_url_encodes_segments() {
        let base = Url::parse("http://127.0.0.1:3000/assets").unwrap();
        let url = join_url(&base, "banners/u/my photo.jpg".split('/'));
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:3000/assets/banners/u/my%20photo.jpg"
        );

        let trailing = Url::parse("http://cdn.test/").unwrap();
        assert_eq!(join_url(&trailing, ["a.jpg"]).as_str(), "http://cdn.test/a.jpg");
    }

    #[test]
    fn test_parse_base_rejects_garbage() {
        assert!(matches!(parse_base("not a url"), Err(TreeError::Config(_))));
        assert!(matches!(parse_base("mailto:x@y.z"), Err(TreeError::Config(_))));
    }

    #[tokio::test]
    async fn test_rejects_traversal_before_backend() {
        let store = ObjectStore::new_memory();
        let err = store
            .upload("../x", Bytes::from_static(b"x"), "image/png", true)
            .await
            .unwrap_err();
        assert!(matches!(err, TreeError::StorageWrite(_)));
    }
}
