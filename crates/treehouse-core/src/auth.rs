//! Authentication: sessions and the Google sign-in flow.
//!
//! The identity provider proves who the user is; this module only keeps
//! track of signed-in sessions. Sessions live in memory and are gone after a
//! restart. A session expires [`DEFAULT_SESSION_MAX_AGE_SECS`] after sign-in;
//! expired sessions are pruned whenever someone signs in.
//!
//! ## Tokens
//!
//! A session token is `<ulid>.<mac>`, where `mac` is the hex BLAKE3 keyed
//! hash of the ULID under a key derived from `AUTH_SECRET`. A token whose MAC
//! doesn't verify is rejected without touching the session table.
//!
//! # Example
//!
//! ```ignore
//! let sessions = SessionRegistry::new(&config.auth_secret)?;
//! let (token, session) = sessions.sign_in(Identity::new("a.b@c.com"))?;
//! assert_eq!(sessions.resolve(&token).unwrap().sanitized_key.as_str(), "a_b_c_com");
//! sessions.sign_out(&token);
//! ```

pub mod google;

use std::collections::HashMap;

use chrono::{TimeDelta, Utc};
use parking_lot::RwLock;
use tracing::{debug, info};
use ulid::Ulid;

pub use google::GoogleOAuth;

use crate::error::{TreeError, TreeResult};
use crate::types::{Identity, Session};

const SESSION_CONTEXT: &str = "treehouse 2025 session tokens";

/// Seconds a session stays valid after sign-in (30 days)
pub const DEFAULT_SESSION_MAX_AGE_SECS: i64 = 30 * 24 * 60 * 60;

/// Appends and checks a keyed MAC on short payloads.
#[derive(Clone)]
pub(crate) struct Signer {
    key: [u8; 32],
}

impl Signer {
    /// Key derived from `secret` for one purpose; different contexts never
    /// accept each other's tokens.
    pub(crate) fn new(context: &str, secret: &str) -> TreeResult<Self> {
        if secret.is_empty() {
            return Err(TreeError::Config("AUTH_SECRET is empty".to_string()));
        }
        Ok(Self {
            key: blake3::derive_key(context, secret.as_bytes()),
        })
    }

    pub(crate) fn sign(&self, payload: &str) -> String {
        let mac = blake3::keyed_hash(&self.key, payload.as_bytes());
        format!("{payload}.{}", mac.to_hex())
    }

    /// The payload of a correctly signed token.
    pub(crate) fn verify<'t>(&self, token: &'t str) -> Option<&'t str> {
        let (payload, mac) = token.rsplit_once('.')?;
        let given = blake3::Hash::from_hex(mac).ok()?;
        // blake3::Hash equality is constant-time
        (blake3::keyed_hash(&self.key, payload.as_bytes()) == given).then_some(payload)
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Signer(..)")
    }
}

/// In-memory table of signed-in sessions keyed by token id.
#[derive(Debug)]
pub struct SessionRegistry {
    signer: Signer,
    sessions: RwLock<HashMap<Ulid, Session>>,
    max_age: TimeDelta,
}

impl SessionRegistry {
    pub fn new(auth_secret: &str) -> TreeResult<Self> {
        Ok(Self {
            signer: Signer::new(SESSION_CONTEXT, auth_secret)?,
            sessions: RwLock::new(HashMap::new()),
            max_age: TimeDelta::seconds(DEFAULT_SESSION_MAX_AGE_SECS),
        })
    }

    pub fn with_max_age(mut self, max_age: TimeDelta) -> Self {
        self.max_age = max_age;
        self
    }

    /// Create a session for a verified identity. Returns the bearer token.
    pub fn sign_in(&self, identity: Identity) -> TreeResult<(String, Session)> {
        if identity.email.trim().is_empty() {
            return Err(TreeError::Auth("identity has no email".to_string()));
        }
        let id = Ulid::new();
        let session = Session::new(identity);
        info!(key = %session.sanitized_key, "Signed in");

        let now = Utc::now().timestamp();
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, s| !self.is_expired(s, now));
        if sessions.len() < before {
            debug!(pruned = before - sessions.len(), "Pruned expired sessions");
        }
        sessions.insert(id, session.clone());
        Ok((self.signer.sign(&id.to_string()), session))
    }

    /// The session behind a token, if the token is genuine, still signed in
    /// and not expired.
    pub fn resolve(&self, token: &str) -> Option<Session> {
        self.resolve_at(token, Utc::now().timestamp())
    }

    fn resolve_at(&self, token: &str, now: i64) -> Option<Session> {
        let id = self.token_id(token)?;
        self.sessions
            .read()
            .get(&id)
            .filter(|s| !self.is_expired(s, now))
            .cloned()
    }

    fn is_expired(&self, session: &Session, now: i64) -> bool {
        now.saturating_sub(session.signed_in_at) >= self.max_age.num_seconds()
    }

    /// Drop the session. Returns whether one was signed in.
    pub fn sign_out(&self, token: &str) -> bool {
        let Some(id) = self.token_id(token) else {
            return false;
        };
        let removed = self.sessions.write().remove(&id);
        if let Some(session) = &removed {
            info!(key = %session.sanitized_key, "Signed out");
        }
        removed.is_some()
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.read().len()
    }

    fn token_id(&self, token: &str) -> Option<Ulid> {
        let Some(payload) = self.signer.verify(token) else {
            debug!("Rejected session token with bad signature");
            return None;
        };
        Ulid::from_string(payload).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_resolve_sign_out() {
        let sessions = SessionRegistry::new("secret").unwrap();
        let (token, session) = sessions
            .sign_in(Identity::new("a.b@c.com").with_name("Ada"))
            .unwrap();
        assert_eq!(session.sanitized_key.as_str(), "a_b_c_com");
        assert_eq!(sessions.resolve(&token), Some(session));

        assert!(sessions.sign_out(&token));
        assert!(sessions.resolve(&token).is_none());
        assert!(!sessions.sign_out(&token));
    }

    #[test]
    fn test_sessions_expire_after_max_age() {
        let sessions = SessionRegistry::new("secret").unwrap();
        let (token, session) = sessions.sign_in(Identity::new("a@b.c")).unwrap();
        let age = DEFAULT_SESSION_MAX_AGE_SECS;

        assert!(sessions.resolve_at(&token, session.signed_in_at + age - 1).is_some());
        assert!(sessions.resolve_at(&token, session.signed_in_at + age).is_none());
    }

    #[test]
    fn test_sign_in_prunes_expired() {
        let sessions = SessionRegistry::new("secret")
            .unwrap()
            .with_max_age(TimeDelta::zero());
        let (first, _) = sessions.sign_in(Identity::new("a@b.c")).unwrap();
        assert!(sessions.resolve(&first).is_none());

        sessions.sign_in(Identity::new("d@e.f")).unwrap();
        assert_eq!(sessions.active_sessions(), 1);
    }

    #[test]
    fn test_forged_tokens_rejected() {
        let sessions = SessionRegistry::new("secret").unwrap();
        let (token, _) = sessions.sign_in(Identity::new("a@b.c")).unwrap();

        let other = SessionRegistry::new("other-secret").unwrap();
        assert!(other.resolve(&token).is_none());

        let (id, _) = token.split_once('.').unwrap();
        assert!(sessions.resolve(id).is_none());
        assert!(sessions.resolve(&format!("{id}.{}", "0".repeat(64))).is_none());
        assert!(sessions.resolve("garbage").is_none());
    }

    #[test]
    fn test_signer_contexts_do_not_mix() {
        let a = Signer::new("ctx a", "secret").unwrap();
        let b = Signer::new("ctx b", "secret").unwrap();
        let token = a.sign("payload");
        assert_eq!(a.verify(&token), Some("payload"));
        assert_eq!(b.verify(&token), None);
    }

    #[test]
    fn test_empty_secret_and_email() {
        assert!(matches!(SessionRegistry::new(""), Err(TreeError::Config(_))));
        let sessions = SessionRegistry::new("s").unwrap();
        assert!(matches!(
            sessions.sign_in(Identity::new(" ")),
            Err(TreeError::Auth(_))
        ));
    }
}
