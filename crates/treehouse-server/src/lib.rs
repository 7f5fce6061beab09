//! TreeHouse HTTP API
//!
//! | Route | |
//! |---|---|
//! | `GET /api/auth/signin` | redirect to Google |
//! | `GET /api/auth/callback/google` | finish sign-in, set the session cookie |
//! | `GET /api/auth/session` | current session or 401 |
//! | `POST /api/auth/signout` | drop the session |
//! | `POST /api/upload-banner`, `POST /api/upload-profile-pic` | multipart `file` (+ `user`) |
//! | `GET /api/banner?user=`, `GET /api/profile-pic?user=` | `{ "url": string \| null }` |
//! | `GET /api/feed?page=&size=` | placeholder cards |
//! | `GET /api/test-env` | which variables are configured |
//! | `GET /assets/*` | files of the local storage backend |

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use treehouse_core::{Config, GoogleOAuth, TreeHouse, TreeResult};

pub mod error;
mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{AppState, SESSION_COOKIE, STATE_COOKIE};

/// Assemble state from configuration: open storage and the OAuth client.
pub async fn build_state(config: &Config) -> TreeResult<AppState> {
    let store = config.storage.open().await?;
    let house = TreeHouse::new(store, &config.auth_secret)?;
    let oauth = GoogleOAuth::new(
        &config.google_client_id,
        &config.google_client_secret,
        config.auth_redirect_url.clone(),
        &config.auth_secret,
    )?;
    Ok(AppState::new(house, oauth))
}

pub fn router(state: AppState) -> Router {
    let asset_dir = state
        .house()
        .assets()
        .object_store()
        .local()
        .map(|local| local.root().to_path_buf());

    let mut app = Router::new()
        .nest("/api", routes::build_api_router().with_state(state))
        .fallback(handler_not_found);

    if let Some(dir) = asset_dir {
        app = app.nest_service("/assets", ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http())
}

pub async fn serve(state: AppState, bind: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    info!("Starting TreeHouse server on {}", bind);
    axum::serve(listener, router(state))
        .await
        .context("server error")
}

async fn handler_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
