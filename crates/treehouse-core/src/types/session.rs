//! Session Type - An authenticated identity and its storage key
//!
//! The sanitized key namespaces every stored asset of a user. Two emails that
//! differ only in punctuation map to the same key (`a.b@c.com` and
//! `a_b@c.com`); the mapping is kept as-is so keys stay readable in paths.

use serde::{Deserialize, Serialize};

/// Path-safe user key derived from an identity email
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserKey(String);

impl UserKey {
    /// Derive the key for an identity email.
    pub fn from_email(email: &str) -> Self {
        Self(sanitize(email))
    }

    /// Accept an already-sanitized key (e.g. from a URL), re-sanitizing it.
    ///
    /// Sanitizing is idempotent, so a valid key is returned unchanged and
    /// anything else is coerced into the key alphabet.
    pub fn parse(raw: &str) -> Self {
        Self(sanitize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for UserKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replace every character outside `[A-Za-z0-9]` with `_`.
///
/// One underscore per character, so `sanitize(sanitize(s)) == sanitize(s)`.
pub fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Identity as returned by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl Identity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
            picture: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub identity_email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub sanitized_key: UserKey,
    /// Unix timestamp of sign-in
    pub signed_in_at: i64,
}

impl Session {
    pub fn new(identity: Identity) -> Self {
        let sanitized_key = UserKey::from_email(&identity.email);
        Self {
            identity_email: identity.email,
            display_name: identity.name,
            avatar_url: identity.picture,
            sanitized_key,
            signed_in_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Whether this session owns the given key's assets.
    pub fn owns(&self, key: &UserKey) -> bool {
        &self.sanitized_key == key
    }

    /// Name to show in the UI
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.identity_email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_email() {
        assert_eq!(sanitize("a.b@c.com"), "a_b_c_com");
        assert_eq!(sanitize("alice+tag@example.org"), "alice_tag_example_org");
    }

    #[test]
    fn test_sanitize_multibyte_is_one_underscore_per_char() {
        assert_eq!(sanitize("zoë@x.io"), "zo__x_io");
    }

    #[test]
    fn test_sanitize_empty() {
        assert_eq!(sanitize(""), "");
        assert!(UserKey::from_email("").is_empty());
    }

    #[test]
    fn test_punctuation_collision_is_documented_behavior() {
        assert_eq!(
            UserKey::from_email("a.b@c.com"),
            UserKey::from_email("a_b@c.com")
        );
    }

    #[test]
    fn test_session_derives_key() {
        let session = Session::new(Identity::new("Tree.Hugger@gmail.com").with_name("Tree"));
        assert_eq!(session.sanitized_key.as_str(), "Tree_Hugger_gmail_com");
        assert_eq!(session.label(), "Tree");
        assert!(session.owns(&UserKey::parse("Tree_Hugger_gmail_com")));
        assert!(!session.owns(&UserKey::parse("someone_else")));
    }
}
