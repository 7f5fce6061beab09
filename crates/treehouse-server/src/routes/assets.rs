use axum::extract::{Multipart, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;
use treehouse_core::{AssetType, ImageFile, TreeError, UserKey};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Uploaded {
    pub url: String,
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct CurrentAsset {
    /// `null` when nothing was uploaded yet
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub user: Option<String>,
}

pub async fn upload_banner(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<Json<Uploaded>> {
    upload(state, headers, multipart, AssetType::Banner).await
}

pub async fn upload_profile_pic(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<Json<Uploaded>> {
    upload(state, headers, multipart, AssetType::ProfilePic).await
}

pub async fn banner(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<OwnerQuery>,
) -> ApiResult<Json<CurrentAsset>> {
    current(state, headers, query, AssetType::Banner).await
}

pub async fn profile_pic(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<OwnerQuery>,
) -> ApiResult<Json<CurrentAsset>> {
    current(state, headers, query, AssetType::ProfilePic).await
}

/// Multipart fields: `file` (required), `user` (optional owner key, must be the caller's).
async fn upload(
    state: AppState,
    headers: HeaderMap,
    mut multipart: Multipart,
    asset_type: AssetType,
) -> ApiResult<Json<Uploaded>> {
    let Some((_, session)) = state.session(&headers) else {
        return Err(TreeError::NotAuthenticated(
            "You must be logged in to upload images".to_string(),
        )
        .into());
    };

    let mut file = None;
    let mut owner = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("file") => {
                let name = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                file = Some((name, bytes));
            }
            Some("user") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                owner = Some(UserKey::parse(raw.trim()));
            }
            other => debug!(field = ?other, "Ignoring multipart field"),
        }
    }

    let Some((name, bytes)) = file else {
        return Err(TreeError::Validation("No file uploaded".to_string()).into());
    };
    let owner = owner.unwrap_or_else(|| session.sanitized_key.clone());

    let image = ImageFile::new(name, bytes)?;
    let asset = state
        .house
        .assets()
        .upload(Some(&session), &owner, asset_type, image)
        .await?;

    Ok(Json(Uploaded {
        url: asset.public_url,
        path: asset.storage_path,
    }))
}

async fn current(
    state: AppState,
    headers: HeaderMap,
    query: OwnerQuery,
    asset_type: AssetType,
) -> ApiResult<Json<CurrentAsset>> {
    let owner = match query.user.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        Some(user) => UserKey::parse(user),
        None => state
            .session(&headers)
            .map(|(_, s)| s.sanitized_key)
            .ok_or_else(|| ApiError::BadRequest("missing user parameter".to_string()))?,
    };

    let asset = state.house.current_asset(&owner, asset_type).await?;
    Ok(Json(CurrentAsset {
        url: asset.map(|a| a.public_url),
    }))
}
