//! Supabase Storage backend (REST API).
//!
//! Endpoints used, relative to the project URL:
//!
//! | Operation | Request |
//! |---|---|
//! | upload | `POST /storage/v1/object/{bucket}/{path}` (`x-upsert`) |
//! | list | `POST /storage/v1/object/list/{bucket}` |
//! | download | `GET /storage/v1/object/{bucket}/{path}` |
//! | public url | `/storage/v1/object/public/{bucket}/{path}` |

use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};
use url::Url;

use super::{join_url, ObjectInfo};
use crate::error::{TreeError, TreeResult};

/// Listing page size requested from the API
const LIST_LIMIT: u32 = 1000;

/// Placeholder object Supabase creates for empty folders
const EMPTY_FOLDER_PLACEHOLDER: &str = ".emptyFolderPlaceholder";

#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: reqwest::Client,
    project_url: Url,
    bucket: String,
}

#[derive(Debug, Deserialize)]
struct ListedObject {
    name: String,
    /// `null` for folders
    id: Option<String>,
    updated_at: Option<DateTime<Utc>>,
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    metadata: Option<serde_json::Value>,
}

impl SupabaseStore {
    pub(super) fn new(project_url: Url, api_key: &str, bucket: &str) -> TreeResult<Self> {
        if bucket.is_empty() {
            return Err(TreeError::Config("empty storage bucket name".to_string()));
        }

        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| TreeError::Config(format!("invalid storage api key: {e}")))?;
        let apikey = HeaderValue::from_str(api_key)
            .map_err(|e| TreeError::Config(format!("invalid storage api key: {e}")))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert("apikey", apikey);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| TreeError::Config(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            project_url,
            bucket: bucket.to_string(),
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn object_url(&self, scope: &[&str], path: &str) -> Url {
        let segments = ["storage", "v1", "object"]
            .into_iter()
            .chain(scope.iter().copied())
            .chain(std::iter::once(self.bucket.as_str()))
            .chain(path.split('/'));
        join_url(&self.project_url, segments)
    }

    pub(super) async fn upload(
        &self,
        path: &str,
        bytes: Bytes,
        content_type: &str,
        upsert: bool,
    ) -> TreeResult<String> {
        let url = self.object_url(&[], path);
        debug!(%url, size = bytes.len(), "Uploading to Supabase Storage");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", if upsert { "true" } else { "false" })
            .body(bytes)
            .send()
            .await
            .map_err(|e| TreeError::StorageWrite(format!("upload request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, path, "Supabase upload rejected");
            return Err(TreeError::StorageWrite(describe_failure(status, &body)));
        }
        Ok(path.to_string())
    }

    pub(super) async fn list(&self, prefix: &str) -> TreeResult<Vec<ObjectInfo>> {
        let mut url = self.project_url.clone();
        if let Ok(mut segs) = url.path_segments_mut() {
            segs.pop_if_empty()
                .extend(["storage", "v1", "object", "list", self.bucket.as_str()]);
        }

        let response = self
            .client
            .post(url)
            .json(&json!({
                "prefix": prefix,
                "limit": LIST_LIMIT,
                "offset": 0,
                "sortBy": { "column": "updated_at", "order": "desc" },
            }))
            .send()
            .await
            .map_err(|e| TreeError::StorageRead(format!("list request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, prefix, "Supabase list rejected");
            return Err(TreeError::StorageRead(describe_failure(status, &body)));
        }

        let listed: Vec<ListedObject> = response
            .json()
            .await
            .map_err(|e| TreeError::StorageRead(format!("malformed listing: {e}")))?;

        Ok(listed
            .into_iter()
            .filter(|o| o.id.is_some() && o.name != EMPTY_FOLDER_PLACEHOLDER)
            .map(|o| {
                let size = o
                    .metadata
                    .as_ref()
                    .and_then(|m| m.get("size"))
                    .and_then(|s| s.as_u64());
                ObjectInfo {
                    path: format!("{prefix}/{}", o.name),
                    updated_at: o.updated_at.or(o.created_at),
                    name: o.name,
                    size,
                }
            })
            .collect())
    }

    pub(super) fn public_url(&self, path: &str) -> String {
        self.object_url(&["public"], path).to_string()
    }

    pub(super) async fn download(&self, path: &str) -> TreeResult<Option<Bytes>> {
        let response = self
            .client
            .get(self.object_url(&[], path))
            .send()
            .await
            .map_err(|e| TreeError::StorageRead(format!("download request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TreeError::StorageRead(describe_failure(status, &body)));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TreeError::StorageRead(format!("download body failed: {e}")))?;
        Ok(Some(bytes))
    }
}

fn describe_failure(status: StatusCode, body: &str) -> String {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            format!("permission denied ({status}); check storage credentials and bucket policy")
        }
        _ if body.is_empty() => format!("provider returned {status}"),
        _ => format!("provider returned {status}: {body}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SupabaseStore {
        SupabaseStore::new(
            Url::parse("https://abc.supabase.co").unwrap(),
            "anon-key",
            "profile-assets",
        )
        .unwrap()
    }

    #[test]
    fn test_public_url() {
        assert_eq!(
            store().public_url("banners/a_b_c_com/photo.jpg"),
            "https://abc.supabase.co/storage/v1/object/public/profile-assets/banners/a_b_c_com/photo.jpg"
        );
    }

    #[test]
    fn test_upload_url() {
        assert_eq!(
            store().object_url(&[], "profile-pics/u/me.png").as_str(),
            "https://abc.supabase.co/storage/v1/object/profile-assets/profile-pics/u/me.png"
        );
    }

    #[test]
    fn test_permission_denied_message() {
        let msg = describe_failure(StatusCode::FORBIDDEN, "{\"error\":\"Unauthorized\"}");
        assert!(msg.starts_with("permission denied"));
        let msg = describe_failure(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(msg, "provider returned 500 Internal Server Error");
    }

    #[test]
    fn test_listing_shape() {
        let raw = r#"[
            {"name":"nested","id":null,"updated_at":null,"created_at":null,"metadata":null},
            {"name":".emptyFolderPlaceholder","id":"1","updated_at":"2025-04-01T10:00:00Z","created_at":"2025-04-01T10:00:00Z","metadata":{"size":0}},
            {"name":"photo.jpg","id":"2","updated_at":"2025-04-02T10:00:00.123Z","created_at":"2025-04-01T10:00:00Z","metadata":{"size":2048,"mimetype":"image/jpeg"}}
        ]"#;
        let listed: Vec<ListedObject> = serde_json::from_str(raw).unwrap();
        assert_eq!(listed.len(), 3);
        assert!(listed[0].id.is_none());
        assert!(listed[2].updated_at.is_some());
    }

    #[test]
    fn test_rejects_empty_bucket() {
        let err = SupabaseStore::new(Url::parse("https://abc.supabase.co").unwrap(), "k", "")
            .unwrap_err();
        assert!(matches!(err, TreeError::Config(_)));
    }
}
