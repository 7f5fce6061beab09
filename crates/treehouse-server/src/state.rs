use std::sync::Arc;

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;
use treehouse_core::{GoogleOAuth, Session, TreeHouse};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "treehouse_session";

/// Name of the cookie binding a sign-in attempt to the browser that started it
pub const STATE_COOKIE: &str = "treehouse_oauth_state";

#[derive(Clone)]
pub struct AppState {
    pub(crate) house: Arc<TreeHouse>,
    pub(crate) oauth: Arc<GoogleOAuth>,
}

impl AppState {
    pub fn new(house: TreeHouse, oauth: GoogleOAuth) -> Self {
        Self {
            house: Arc::new(house),
            oauth: Arc::new(oauth),
        }
    }

    pub fn house(&self) -> &TreeHouse {
        &self.house
    }

    /// Resolve the caller's session from the bearer header or the cookie.
    pub(crate) fn session(&self, headers: &HeaderMap) -> Option<(String, Session)> {
        let token = session_token(headers)?;
        let session = self.house.sessions().resolve(&token)?;
        Some((token, session))
    }
}

/// Session token from `Authorization: Bearer` (preferred) or the session cookie.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }
    cookie(headers, SESSION_COOKIE)
}

/// Value of the named cookie, if the request carries a non-empty one.
pub fn cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_token_sources() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_token(&headers), None);

        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; treehouse_session=abc.def"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("abc.def"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer xyz.123"));
        assert_eq!(session_token(&headers).as_deref(), Some("xyz.123"));
    }

    #[test]
    fn test_empty_cookie_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("treehouse_oauth_state=; treehouse_session=abc.def"),
        );
        assert_eq!(cookie(&headers, STATE_COOKIE), None);
        assert_eq!(cookie(&headers, SESSION_COOKIE).as_deref(), Some("abc.def"));
    }
}
