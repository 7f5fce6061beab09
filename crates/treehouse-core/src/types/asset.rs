//! Asset Types - Banner and profile-picture references
//!
//! Stored under `{asset_type}s/{owner_key}/{file_name}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TreeError, TreeResult};
use crate::types::session::UserKey;

/// Category of a stored user image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetType {
    Banner,
    ProfilePic,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Banner => "banner",
            AssetType::ProfilePic => "profile-pic",
        }
    }

    /// Directory prefix for this type's objects, without a trailing slash.
    pub fn directory(&self, owner: &UserKey) -> String {
        format!("{}s/{}", self.as_str(), owner)
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AssetType {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "banner" => Ok(AssetType::Banner),
            "profile-pic" => Ok(AssetType::ProfilePic),
            other => Err(TreeError::Validation(format!("unknown asset type: {other}"))),
        }
    }
}

/// Build the storage path for an uploaded file.
///
/// File names must be a single path segment.
pub fn storage_path(owner: &UserKey, asset_type: AssetType, file_name: &str) -> TreeResult<String> {
    if owner.is_empty() {
        return Err(TreeError::Validation("empty owner key".to_string()));
    }
    if file_name.is_empty()
        || file_name == "."
        || file_name == ".."
        || file_name.contains(['/', '\\'])
    {
        return Err(TreeError::Validation(format!(
            "invalid file name: {file_name:?}"
        )));
    }
    Ok(format!("{}/{}", asset_type.directory(owner), file_name))
}

/// A stored banner or profile picture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    pub owner_key: UserKey,
    pub asset_type: AssetType,
    pub storage_path: String,
    pub public_url: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AssetRef {
    /// URL with a `t=<millis>` parameter so caches refetch after an overwrite.
    pub fn cache_busted(&self, now: DateTime<Utc>) -> String {
        cache_bust(&self.public_url, now)
    }

    /// Name of the stored file (last path segment)
    pub fn file_name(&self) -> &str {
        self.storage_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.storage_path)
    }
}

/// Append a cache-busting timestamp to a URL.
pub fn cache_bust(url: &str, now: DateTime<Utc>) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}t={}", now.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_storage_path_layout() {
        let owner = UserKey::parse("a_b_c_com");
        assert_eq!(
            storage_path(&owner, AssetType::Banner, "photo.jpg").unwrap(),
            "banners/a_b_c_com/photo.jpg"
        );
        assert_eq!(
            storage_path(&owner, AssetType::ProfilePic, "me.png").unwrap(),
            "profile-pics/a_b_c_com/me.png"
        );
    }

    #[test]
    fn test_storage_path_rejects_traversal() {
        let owner = UserKey::parse("u");
        for bad in ["", ".", "..", "../x.jpg", "a/b.jpg", "a\\b.jpg"] {
            assert!(
                storage_path(&owner, AssetType::Banner, bad).is_err(),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_cache_bust() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(
            cache_bust("https://cdn.test/banners/u/a.jpg", now),
            "https://cdn.test/banners/u/a.jpg?t=1700000000123"
        );
        assert_eq!(
            cache_bust("https://cdn.test/a.jpg?w=400", now),
            "https://cdn.test/a.jpg?w=400&t=1700000000123"
        );
    }

    #[test]
    fn test_asset_type_round_trip_names() {
        assert_eq!("profile-pic".parse::<AssetType>().unwrap(), AssetType::ProfilePic);
        assert_eq!(
            serde_json::to_string(&AssetType::ProfilePic).unwrap(),
            "\"profile-pic\""
        );
        assert!("avatar".parse::<AssetType>().is_err());
    }
}
