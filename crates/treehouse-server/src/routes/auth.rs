use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{AppendHeaders, IntoResponse, Redirect};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use treehouse_core::{Session, TreeError};

use crate::error::{ApiError, ApiResult};
use crate::state::{cookie, AppState, SESSION_COOKIE, STATE_COOKIE};

/// Lifetime of the sign-in state cookie, matching the signed state's expiry
const STATE_COOKIE_MAX_AGE_SECS: u32 = 600;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signin", get(sign_in))
        .route("/callback/google", get(callback))
        .route("/session", get(current_session))
        .route("/signout", post(sign_out))
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set by Google when the user declines
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignedIn {
    pub token: String,
    pub session: Session,
}

pub async fn sign_in(State(state): State<AppState>) -> impl IntoResponse {
    let (url, oauth_state) = state.oauth.authorize_url();
    let bound = format!(
        "{STATE_COOKIE}={oauth_state}; Path=/api/auth; HttpOnly; SameSite=Lax; Max-Age={STATE_COOKIE_MAX_AGE_SECS}"
    );
    ([(SET_COOKIE, bound)], Redirect::to(url.as_str()))
}

pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> ApiResult<impl IntoResponse> {
    if let Some(reason) = query.error {
        warn!(%reason, "Sign-in declined at provider");
        return Err(TreeError::NotAuthenticated(format!("sign-in declined: {reason}")).into());
    }
    let (Some(code), Some(oauth_state)) = (query.code, query.state) else {
        return Err(ApiError::BadRequest("missing code or state".to_string()));
    };
    // The state must come back to the browser it was issued to
    if cookie(&headers, STATE_COOKIE).as_deref() != Some(oauth_state.as_str()) {
        warn!("Sign-in state does not match this browser");
        return Err(
            TreeError::NotAuthenticated("sign-in was not started from this browser".to_string())
                .into(),
        );
    }

    let identity = state.oauth.complete(&code, &oauth_state).await?;
    let (token, session) = state.house.sessions().sign_in(identity)?;
    info!(key = %session.sanitized_key, "Signed in through Google");

    let session_cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
    let cleared = format!("{STATE_COOKIE}=; Path=/api/auth; HttpOnly; SameSite=Lax; Max-Age=0");
    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie), (SET_COOKIE, cleared)]),
        Json(SignedIn { token, session }),
    ))
}

pub async fn current_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Session>> {
    let (_, session) = state
        .session(&headers)
        .ok_or_else(|| TreeError::NotAuthenticated("no active session".to_string()))?;
    Ok(Json(session))
}

pub async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some((token, _)) = state.session(&headers) {
        state.house.sessions().sign_out(&token);
    }
    let cleared = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    (StatusCode::NO_CONTENT, [(SET_COOKIE, cleared)])
}
