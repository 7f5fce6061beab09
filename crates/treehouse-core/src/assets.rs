//! Per-user asset store: banners and profile pictures.
//!
//! Maps `(owner key, asset type, file name)` to an object path and resolves
//! public URLs through the configured [`ObjectStore`].
//!
//! # Current asset
//!
//! Several files can accumulate under one `(owner, type)` directory, since
//! every upload keeps its original file name and nothing is ever deleted.
//! The current one is the newest by upload timestamp; ties (or backends that
//! report no timestamp) fall back to the file name, descending. Listing order
//! of the backend is never relied upon.
//!
//! # Example
//!
//! ```ignore
//! let assets = AssetStore::new(ObjectStore::new_memory());
//! let file = ImageFile::new("photo.jpg", bytes)?;
//! let banner = assets.upload(Some(&session), &session.sanitized_key, AssetType::Banner, file).await?;
//! let shown = banner.cache_busted(Utc::now());
//! ```

use bytes::Bytes;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::{TreeError, TreeResult};
use crate::storage::{ObjectInfo, ObjectStore};
use crate::types::{storage_path, AssetRef, AssetType, Session, UserKey};

/// Maximum accepted upload: 4 MB
pub const MAX_UPLOAD_SIZE: usize = 4 * 1024 * 1024;

/// A user-selected image, checked before it reaches storage
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub name: String,
    pub bytes: Bytes,
    pub content_type: String,
}

impl ImageFile {
    /// Validate a selected file.
    ///
    /// The content type is sniffed from the bytes, not taken from the name.
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> TreeResult<Self> {
        let name = name.into();
        let bytes: Bytes = bytes.into();

        if name.trim().is_empty() {
            return Err(TreeError::Validation("no file selected".to_string()));
        }
        if bytes.is_empty() {
            return Err(TreeError::Validation(format!("{name} is empty")));
        }
        if bytes.len() > MAX_UPLOAD_SIZE {
            return Err(TreeError::Validation(format!(
                "{name} is too large: {} bytes (max {} MB)",
                bytes.len(),
                MAX_UPLOAD_SIZE / (1024 * 1024)
            )));
        }
        let format = image::guess_format(&bytes)
            .map_err(|_| TreeError::Validation(format!("{name} is not a recognized image")))?;

        Ok(Self {
            name,
            bytes,
            content_type: format.to_mime_type().to_string(),
        })
    }

    /// Validate an optional selection; nothing selected is a validation error.
    pub fn from_selection(selection: Option<(String, Vec<u8>)>) -> TreeResult<Self> {
        match selection {
            Some((name, bytes)) => Self::new(name, bytes),
            None => Err(TreeError::Validation("no file selected".to_string())),
        }
    }
}

/// Banner/profile-picture storage on top of an object store
#[derive(Debug, Clone)]
pub struct AssetStore {
    store: ObjectStore,
}

impl AssetStore {
    pub fn new(store: ObjectStore) -> Self {
        Self { store }
    }

    pub fn object_store(&self) -> &ObjectStore {
        &self.store
    }

    /// Store `file` as `owner`'s asset and return its reference.
    ///
    /// The session must belong to `owner`. An existing file with the same
    /// name is overwritten.
    pub async fn upload(
        &self,
        session: Option<&Session>,
        owner: &UserKey,
        asset_type: AssetType,
        file: ImageFile,
    ) -> TreeResult<AssetRef> {
        let session = session.ok_or_else(|| {
            TreeError::NotAuthenticated("You must be logged in to upload images".to_string())
        })?;
        if !session.owns(owner) {
            warn!(owner = %owner, session = %session.sanitized_key, "Upload for foreign key refused");
            return Err(TreeError::NotAuthenticated(format!(
                "session does not own assets of {owner}"
            )));
        }

        let path = storage_path(owner, asset_type, &file.name)?;
        info!(path, content_type = %file.content_type, size = file.bytes.len(), "Starting upload");

        let stored = self
            .store
            .upload(&path, file.bytes, &file.content_type, true)
            .await
            .map_err(|e| {
                warn!(path, error = %e, "Upload failed");
                match e {
                    TreeError::StorageWrite(_) => e,
                    other => TreeError::StorageWrite(other.to_string()),
                }
            })?;

        let asset = AssetRef {
            owner_key: owner.clone(),
            asset_type,
            public_url: self.store.public_url(&stored),
            storage_path: stored,
            updated_at: Some(Utc::now()),
        };
        info!(url = %asset.public_url, "Upload successful");
        Ok(asset)
    }

    /// The newest asset of this type for `owner`, or `None` if there is none yet.
    pub async fn fetch_current(
        &self,
        owner: &UserKey,
        asset_type: AssetType,
    ) -> TreeResult<Option<AssetRef>> {
        Ok(self.history(owner, asset_type).await?.into_iter().next())
    }

    /// Every stored file of this type for `owner`, newest first.
    pub async fn history(&self, owner: &UserKey, asset_type: AssetType) -> TreeResult<Vec<AssetRef>> {
        if owner.is_empty() {
            return Err(TreeError::Validation("empty owner key".to_string()));
        }
        let prefix = asset_type.directory(owner);
        debug!(prefix, "Listing assets");

        let mut objects = self.store.list(&prefix).await.map_err(|e| {
            warn!(prefix, error = %e, "Listing failed");
            match e {
                TreeError::StorageRead(_) => e,
                other => TreeError::StorageRead(other.to_string()),
            }
        })?;
        sort_newest_first(&mut objects);

        Ok(objects
            .into_iter()
            .map(|o| AssetRef {
                owner_key: owner.clone(),
                asset_type,
                public_url: self.store.public_url(&o.path),
                storage_path: o.path,
                updated_at: o.updated_at,
            })
            .collect())
    }

    /// Raw bytes of a stored asset, for clients that render from memory.
    pub async fn load_bytes(&self, asset: &AssetRef) -> TreeResult<Option<Bytes>> {
        self.store.download(&asset.storage_path).await
    }
}

/// Newest timestamp first; untimestamped objects last; then name descending.
pub fn sort_newest_first(objects: &mut [ObjectInfo]) {
    objects.sort_by(|a, b| {
        b.updated_at
            .cmp(&a.updated_at)
            .then_with(|| b.name.cmp(&a.name))
    });
}
