use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use treehouse_core::MAX_UPLOAD_SIZE;

use crate::state::AppState;

mod assets;
mod auth;
mod env;
mod feed;

/// Room for multipart framing around a maximum-size image
const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_SIZE + 64 * 1024;

pub fn build_api_router() -> Router<AppState> {
    let uploads = Router::new()
        .route("/upload-banner", post(assets::upload_banner))
        .route("/upload-profile-pic", post(assets::upload_profile_pic))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT));

    Router::new()
        .nest("/auth", auth::router())
        .route("/banner", get(assets::banner))
        .route("/profile-pic", get(assets::profile_pic))
        .route("/feed", get(feed::feed_page))
        .route("/test-env", get(env::test_env))
        .merge(uploads)
}
