//! Environment configuration.
//!
//! Loaded once at startup. Every required variable is checked before
//! failing, so one error lists everything that's missing. Empty values count
//! as missing.
//!
//! | Variable | Required | Default |
//! |---|---|---|
//! | `GOOGLE_CLIENT_ID` | yes | |
//! | `GOOGLE_CLIENT_SECRET` | yes | |
//! | `AUTH_SECRET` | yes | |
//! | `TREEHOUSE_STORAGE_DIR` | one storage backend | |
//! | `TREEHOUSE_PUBLIC_BASE_URL` | no | `http://<bind>/assets` |
//! | `SUPABASE_URL` + `SUPABASE_ANON_KEY` | one storage backend | |
//! | `SUPABASE_BUCKET` | no | `profile-assets` |
//! | `CLOUDINARY_API_KEY`, `CLOUDINARY_API_SECRET` | no | |
//! | `TREEHOUSE_AUTH_REDIRECT_URL` | no | `http://<bind>/api/auth/callback/google` |
//! | `TREEHOUSE_BIND` | no | `127.0.0.1:3000` |

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::{info, warn};
use url::Url;

use crate::error::{TreeError, TreeResult};
use crate::storage::ObjectStore;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_BUCKET: &str = "profile-assets";

/// Every variable the app reads, in report order
pub const KNOWN_VARS: [&str; 13] = [
    "GOOGLE_CLIENT_ID",
    "GOOGLE_CLIENT_SECRET",
    "AUTH_SECRET",
    "TREEHOUSE_STORAGE_DIR",
    "TREEHOUSE_PUBLIC_BASE_URL",
    "SUPABASE_URL",
    "SUPABASE_ANON_KEY",
    "SUPABASE_BUCKET",
    "CLOUDINARY_API_KEY",
    "CLOUDINARY_API_SECRET",
    "TREEHOUSE_AUTH_REDIRECT_URL",
    "TREEHOUSE_BIND",
    "RUST_LOG",
];

/// Which object-storage backend to use
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageSettings {
    Local {
        dir: PathBuf,
        public_base: String,
    },
    Supabase {
        url: String,
        anon_key: String,
        bucket: String,
    },
}

impl StorageSettings {
    pub async fn open(&self) -> TreeResult<ObjectStore> {
        match self {
            StorageSettings::Local { dir, public_base } => {
                ObjectStore::new_local(dir.clone(), public_base).await
            }
            StorageSettings::Supabase {
                url,
                anon_key,
                bucket,
            } => ObjectStore::new_supabase(url, anon_key, bucket),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub google_client_id: String,
    pub google_client_secret: String,
    pub auth_secret: String,
    pub storage: StorageSettings,
    pub auth_redirect_url: Url,
    pub bind: SocketAddr,
    /// Present but unused by the storage path; reported by the env check
    pub cloudinary_configured: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("google_client_id", &self.google_client_id)
            .field("storage", &self.storage_label())
            .field("auth_redirect_url", &self.auth_redirect_url.as_str())
            .field("bind", &self.bind)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> TreeResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> TreeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut missing = Vec::new();
        let mut require = |key: &'static str| {
            get(key).unwrap_or_else(|| {
                missing.push(key);
                String::new()
            })
        };

        let google_client_id = require("GOOGLE_CLIENT_ID");
        let google_client_secret = require("GOOGLE_CLIENT_SECRET");
        let auth_secret = require("AUTH_SECRET");

        let bind_raw = get("TREEHOUSE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind_raw
            .parse()
            .map_err(|e| TreeError::Config(format!("TREEHOUSE_BIND {bind_raw:?}: {e}")))?;

        let storage = match (get("TREEHOUSE_STORAGE_DIR"), get("SUPABASE_URL")) {
            (Some(dir), supabase) => {
                if supabase.is_some() {
                    warn!("Both TREEHOUSE_STORAGE_DIR and SUPABASE_URL set, using local storage");
                }
                Some(StorageSettings::Local {
                    dir: PathBuf::from(dir),
                    public_base: get("TREEHOUSE_PUBLIC_BASE_URL")
                        .unwrap_or_else(|| format!("http://{bind}/assets")),
                })
            }
            (None, Some(url)) => match get("SUPABASE_ANON_KEY") {
                Some(anon_key) => Some(StorageSettings::Supabase {
                    url,
                    anon_key,
                    bucket: get("SUPABASE_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
                }),
                None => {
                    missing.push("SUPABASE_ANON_KEY");
                    None
                }
            },
            (None, None) => {
                missing.push("TREEHOUSE_STORAGE_DIR or SUPABASE_URL");
                None
            }
        };

        let storage = match storage {
            Some(storage) if missing.is_empty() => storage,
            _ => {
                warn!(?missing, "Environment misconfigured");
                return Err(TreeError::Config(format!(
                    "missing environment variables: {}",
                    missing.join(", ")
                )));
            }
        };

        let redirect_raw = get("TREEHOUSE_AUTH_REDIRECT_URL")
            .unwrap_or_else(|| format!("http://{bind}/api/auth/callback/google"));
        let auth_redirect_url = Url::parse(&redirect_raw).map_err(|e| {
            TreeError::Config(format!("TREEHOUSE_AUTH_REDIRECT_URL {redirect_raw:?}: {e}"))
        })?;

        let config = Self {
            google_client_id,
            google_client_secret,
            auth_secret,
            storage,
            auth_redirect_url,
            bind,
            cloudinary_configured: get("CLOUDINARY_API_KEY").is_some()
                && get("CLOUDINARY_API_SECRET").is_some(),
        };
        info!(storage = config.storage_label(), bind = %config.bind, "Configuration loaded");
        Ok(config)
    }

    pub fn storage_label(&self) -> &'static str {
        match self.storage {
            StorageSettings::Local { .. } => "local",
            StorageSettings::Supabase { .. } => "supabase",
        }
    }
}

/// Which known variables are set. Values are never included.
pub fn presence_report<F>(lookup: F) -> BTreeMap<&'static str, bool>
where
    F: Fn(&str) -> Option<String>,
{
    KNOWN_VARS
        .iter()
        .map(|key| (*key, lookup(key).is_some_and(|v| !v.trim().is_empty())))
        .collect()
}
