//! Google OAuth 2.0 authorization-code flow.
//!
//! 1. [`GoogleOAuth::authorize_url`] sends the user to Google with a signed
//!    `state` holding a fresh ULID.
//! 2. Google redirects back with `code` and `state`.
//! 3. [`GoogleOAuth::complete`] checks the state, exchanges the code for an
//!    access token and reads the user's email, name and picture.

use serde::Deserialize;
use tracing::{debug, warn};
use ulid::Ulid;
use url::Url;

use super::Signer;
use crate::error::{TreeError, TreeResult};
use crate::types::Identity;

pub const AUTHORIZE_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
pub const USERINFO_ENDPOINT: &str = "https://openidconnect.googleapis.com/v1/userinfo";

const STATE_CONTEXT: &str = "treehouse 2025 oauth state";

/// How long a sign-in attempt may take between redirect and callback
const STATE_MAX_AGE_MS: u64 = 10 * 60 * 1000;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    email: Option<String>,
    email_verified: Option<bool>,
    name: Option<String>,
    picture: Option<String>,
}

/// Google OAuth client for one redirect URL.
#[derive(Debug, Clone)]
pub struct GoogleOAuth {
    client_id: String,
    client_secret: String,
    redirect_url: Url,
    authorize_endpoint: Url,
    state: Signer,
    http: reqwest::Client,
    token_endpoint: String,
    userinfo_endpoint: String,
}

impl GoogleOAuth {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_url: Url,
        auth_secret: &str,
    ) -> TreeResult<Self> {
        Ok(Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_url,
            authorize_endpoint: Url::parse(AUTHORIZE_ENDPOINT)
                .map_err(|e| TreeError::Config(format!("bad authorize endpoint: {e}")))?,
            state: Signer::new(STATE_CONTEXT, auth_secret)?,
            http: reqwest::Client::new(),
            token_endpoint: TOKEN_ENDPOINT.to_string(),
            userinfo_endpoint: USERINFO_ENDPOINT.to_string(),
        })
    }

    /// Point token exchange and userinfo at other endpoints.
    pub fn with_endpoints(mut self, token: impl Into<String>, userinfo: impl Into<String>) -> Self {
        self.token_endpoint = token.into();
        self.userinfo_endpoint = userinfo.into();
        self
    }

    pub fn redirect_url(&self) -> &Url {
        &self.redirect_url
    }

    /// Where to send the user, and the state value embedded in it.
    pub fn authorize_url(&self) -> (Url, String) {
        let state = self.state.sign(&Ulid::new().to_string());
        let mut url = self.authorize_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", self.redirect_url.as_str())
            .append_pair("response_type", "code")
            .append_pair("scope", "openid email profile")
            .append_pair("state", &state);
        (url, state)
    }

    /// Reject forged or expired state values.
    pub fn verify_state(&self, state: &str) -> TreeResult<()> {
        let nonce = self
            .state
            .verify(state)
            .ok_or_else(|| TreeError::NotAuthenticated("sign-in state does not verify".to_string()))?;
        let issued = Ulid::from_string(nonce)
            .map_err(|_| TreeError::NotAuthenticated("malformed sign-in state".to_string()))?;
        let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
        if now.saturating_sub(issued.timestamp_ms()) > STATE_MAX_AGE_MS {
            return Err(TreeError::NotAuthenticated("sign-in attempt expired".to_string()));
        }
        Ok(())
    }

    /// Finish a sign-in from the callback parameters.
    pub async fn complete(&self, code: &str, state: &str) -> TreeResult<Identity> {
        self.verify_state(state)?;
        let access_token = self.exchange_code(code).await?;
        self.fetch_identity(&access_token).await
    }

    async fn exchange_code(&self, code: &str) -> TreeResult<String> {
        if code.is_empty() {
            return Err(TreeError::Auth("missing authorization code".to_string()));
        }
        debug!("Exchanging authorization code");
        let response = self
            .http
            .post(&self.token_endpoint)
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.redirect_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| TreeError::Auth(format!("token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Token exchange rejected");
            return Err(TreeError::Auth(format!("token exchange returned {status}: {body}")));
        }
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| TreeError::Auth(format!("malformed token response: {e}")))?;
        Ok(token.access_token)
    }

    async fn fetch_identity(&self, access_token: &str) -> TreeResult<Identity> {
        let response = self
            .http
            .get(&self.userinfo_endpoint)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| TreeError::Auth(format!("userinfo request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Userinfo lookup rejected");
            return Err(TreeError::Auth(format!("userinfo returned {status}")));
        }
        let info: UserInfo = response
            .json()
            .await
            .map_err(|e| TreeError::Auth(format!("malformed userinfo: {e}")))?;
        identity_from(info)
    }
}

fn identity_from(info: UserInfo) -> TreeResult<Identity> {
    let email = info
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| TreeError::Auth("account has no email".to_string()))?;
    if info.email_verified == Some(false) {
        return Err(TreeError::Auth(format!("email {email} is not verified")));
    }
    Ok(Identity {
        email,
        name: info.name,
        picture: info.picture,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GoogleOAuth {
        GoogleOAuth::new(
            "client-id",
            "client-secret",
            Url::parse("http://127.0.0.1:3000/api/auth/callback/google").unwrap(),
            "secret",
        )
        .unwrap()
    }

    #[test]
    fn test_authorize_url() {
        let oauth = client();
        let (url, state) = oauth.authorize_url();
        assert_eq!(url.host_str(), Some("accounts.google.com"));
        let pairs: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs["client_id"], "client-id");
        assert_eq!(pairs["response_type"], "code");
        assert_eq!(
            pairs["redirect_uri"],
            "http://127.0.0.1:3000/api/auth/callback/google"
        );
        assert_eq!(pairs["state"], state);
        assert!(oauth.verify_state(&state).is_ok());
    }

    #[test]
    fn test_state_checks() {
        let oauth = client();
        assert!(matches!(
            oauth.verify_state("forged"),
            Err(TreeError::NotAuthenticated(_))
        ));

        let old = Ulid::from_parts(1_000, 7).to_string();
        let expired = oauth.state.sign(&old);
        let err = oauth.verify_state(&expired).unwrap_err();
        assert!(err.to_string().contains("expired"));
    }

    #[test]
    fn test_identity_from_userinfo() {
        let info: UserInfo = serde_json::from_str(
            r#"{"sub":"1","email":"a.b@c.com","email_verified":true,"name":"Ada","picture":"https://lh3.test/p.png"}"#,
        )
        .unwrap();
        let identity = identity_from(info).unwrap();
        assert_eq!(identity.email, "a.b@c.com");
        assert_eq!(identity.name.as_deref(), Some("Ada"));

        let unverified: UserInfo =
            serde_json::from_str(r#"{"email":"x@y.z","email_verified":false}"#).unwrap();
        assert!(identity_from(unverified).is_err());

        let no_email: UserInfo = serde_json::from_str(r#"{"name":"n"}"#).unwrap();
        assert!(identity_from(no_email).is_err());
    }

    #[tokio::test]
    async fn test_empty_code_rejected_before_network() {
        let oauth = client();
        let (_, state) = oauth.authorize_url();
        let err = oauth.complete("", &state).await.unwrap_err();
        assert!(matches!(err, TreeError::Auth(_)));
    }
}
