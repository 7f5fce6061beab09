//! In-memory object backend for tests and demos.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

use super::ObjectInfo;
use crate::error::{TreeError, TreeResult};

#[derive(Debug, Clone)]
struct MemObject {
    bytes: Bytes,
    content_type: String,
    updated_at: DateTime<Utc>,
}

#[derive(Default)]
struct MemInner {
    objects: RwLock<BTreeMap<String, MemObject>>,
    /// Last timestamp handed out; upload times are strictly increasing.
    clock: RwLock<Option<DateTime<Utc>>>,
    deny_writes: AtomicBool,
    deny_reads: AtomicBool,
    writes: AtomicUsize,
    lists: AtomicUsize,
}

/// Map-backed store. Clones share the same objects.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<MemInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following write fail as if the provider denied it.
    pub fn deny_writes(&self, deny: bool) {
        self.inner.deny_writes.store(deny, Ordering::SeqCst);
    }

    /// Make every following list/download fail.
    pub fn deny_reads(&self, deny: bool) {
        self.inner.deny_reads.store(deny, Ordering::SeqCst);
    }

    /// Number of write calls received (including denied ones)
    pub fn write_calls(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    /// Number of list calls received (including denied ones)
    pub fn list_calls(&self) -> usize {
        self.inner.lists.load(Ordering::SeqCst)
    }

    pub fn object_count(&self) -> usize {
        self.inner.objects.read().len()
    }

    pub fn content_type(&self, path: &str) -> Option<String> {
        self.inner
            .objects
            .read()
            .get(path)
            .map(|o| o.content_type.clone())
    }

    fn tick(&self) -> DateTime<Utc> {
        let mut clock = self.inner.clock.write();
        let now = Utc::now();
        let next = match *clock {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        *clock = Some(next);
        next
    }

    pub(super) fn upload(
        &self,
        path: &str,
        bytes: Bytes,
        content_type: &str,
        upsert: bool,
    ) -> TreeResult<String> {
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        if self.inner.deny_writes.load(Ordering::SeqCst) {
            return Err(TreeError::StorageWrite(
                "permission denied by storage policy".to_string(),
            ));
        }

        let updated_at = self.tick();
        let mut objects = self.inner.objects.write();
        if !upsert && objects.contains_key(path) {
            return Err(TreeError::StorageWrite(format!(
                "object already exists: {path}"
            )));
        }
        objects.insert(
            path.to_string(),
            MemObject {
                bytes,
                content_type: content_type.to_string(),
                updated_at,
            },
        );
        Ok(path.to_string())
    }

    pub(super) fn list(&self, prefix: &str) -> TreeResult<Vec<ObjectInfo>> {
        self.inner.lists.fetch_add(1, Ordering::SeqCst);
        if self.inner.deny_reads.load(Ordering::SeqCst) {
            return Err(TreeError::StorageRead(
                "permission denied by storage policy".to_string(),
            ));
        }

        let dir = format!("{prefix}/");
        let objects = self.inner.objects.read();
        Ok(objects
            .range(dir.clone()..)
            .take_while(|(path, _)| path.starts_with(&dir))
            .filter(|(path, _)| !path[dir.len()..].contains('/'))
            .map(|(path, obj)| ObjectInfo {
                name: path[dir.len()..].to_string(),
                path: path.clone(),
                updated_at: Some(obj.updated_at),
                size: Some(obj.bytes.len() as u64),
            })
            .collect())
    }

    pub(super) fn public_url(&self, path: &str) -> String {
        format!("memory://objects/{path}")
    }

    pub(super) fn download(&self, path: &str) -> TreeResult<Option<Bytes>> {
        if self.inner.deny_reads.load(Ordering::SeqCst) {
            return Err(TreeError::StorageRead(
                "permission denied by storage policy".to_string(),
            ));
        }
        Ok(self.inner.objects.read().get(path).map(|o| o.bytes.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_only_direct_children() {
        let store = MemoryStore::new();
        store
            .upload("banners/u/a.jpg", Bytes::from_static(b"a"), "image/jpeg", true)
            .unwrap();
        store
            .upload("banners/u/nested/b.jpg", Bytes::from_static(b"b"), "image/jpeg", true)
            .unwrap();
        store
            .upload("banners/u2/c.jpg", Bytes::from_static(b"c"), "image/jpeg", true)
            .unwrap();

        let listed = store.list("banners/u").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "a.jpg");
        assert_eq!(listed[0].path, "banners/u/a.jpg");
    }

    #[test]
    fn test_timestamps_strictly_increase() {
        let store = MemoryStore::new();
        for name in ["a", "b", "c", "d"] {
            store
                .upload(&format!("p/{name}"), Bytes::new(), "image/png", true)
                .unwrap();
        }
        let listed = store.list("p").unwrap();
        let times: Vec<_> = listed.iter().map(|o| o.updated_at.unwrap()).collect();
        assert!(times.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_no_upsert_conflict() {
        let store = MemoryStore::new();
        store.upload("p/a", Bytes::new(), "image/png", false).unwrap();
        assert!(store.upload("p/a", Bytes::new(), "image/png", false).is_err());
        assert!(store.upload("p/a", Bytes::new(), "image/png", true).is_ok());
    }

    #[test]
    fn test_denied_writes() {
        let store = MemoryStore::new();
        store.deny_writes(true);
        let err = store.upload("p/a", Bytes::new(), "image/png", true).unwrap_err();
        assert!(matches!(err, TreeError::StorageWrite(_)));
        assert_eq!(store.write_calls(), 1);
        assert_eq!(store.object_count(), 0);
    }
}
