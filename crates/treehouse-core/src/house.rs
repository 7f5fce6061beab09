//! TreeHouse - the entry point tying storage, sessions and the feed together
//!
//! The desktop app and the CLI drive a single `TreeHouse`; the HTTP server
//! shares one behind an `Arc` and resolves sessions per request.
//!
//! # Example
//!
//! ```ignore
//! use treehouse_core::{AssetType, Identity, ImageFile, TreeHouse};
//!
//! let house = TreeHouse::open("~/.local/share/treehouse").await?;
//! let session = house.sign_in_local(Identity::new("a.b@c.com"))?;
//!
//! let file = ImageFile::new("photo.jpg", std::fs::read("photo.jpg")?)?;
//! let banner = house.upload_own(AssetType::Banner, file).await?;
//! assert!(banner.storage_path.starts_with("banners/a_b_c_com/"));
//! ```

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::info;
use url::Url;

use crate::assets::{AssetStore, ImageFile};
use crate::auth::SessionRegistry;
use crate::error::{TreeError, TreeResult};
use crate::feed::{mock_profile_posts, PageSource, PlaceholderFeed};
use crate::storage::ObjectStore;
use crate::types::{AssetRef, AssetType, Card, Identity, Session, UserKey};

pub struct TreeHouse {
    assets: AssetStore,
    sessions: SessionRegistry,
    feed: PlaceholderFeed,
    data_dir: Option<PathBuf>,
    /// Token of the locally signed-in user (desktop/CLI)
    active: RwLock<Option<String>>,
}

impl std::fmt::Debug for TreeHouse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeHouse")
            .field("store", self.assets.object_store())
            .field("data_dir", &self.data_dir)
            .field("signed_in", &self.active.read().is_some())
            .finish()
    }
}

impl TreeHouse {
    /// Build around an existing store. `auth_secret` keys session tokens.
    pub fn new(store: ObjectStore, auth_secret: &str) -> TreeResult<Self> {
        Ok(Self {
            assets: AssetStore::new(store),
            sessions: SessionRegistry::new(auth_secret)?,
            feed: PlaceholderFeed::default(),
            data_dir: None,
            active: RwLock::new(None),
        })
    }

    /// Everything in memory. Use for tests.
    pub fn in_memory() -> TreeResult<Self> {
        Self::new(ObjectStore::new_memory(), &process_secret())
    }

    /// Local install: images under `<data_dir>/assets`, addressed by `file://` URLs.
    ///
    /// Sessions are per process, so the token key is random on every start.
    pub async fn open(data_dir: impl AsRef<Path>) -> TreeResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        let assets_dir = data_dir.join("assets");
        tokio::fs::create_dir_all(&assets_dir).await?;
        let assets_dir = tokio::fs::canonicalize(&assets_dir).await?;
        let public_base = Url::from_directory_path(&assets_dir).map_err(|_| {
            TreeError::Config(format!("cannot address {assets_dir:?} as a file url"))
        })?;

        let store = ObjectStore::new_local(&assets_dir, public_base.as_str()).await?;
        info!(?data_dir, "Opened TreeHouse");
        let mut house = Self::new(store, &process_secret())?;
        house.data_dir = Some(data_dir);
        Ok(house)
    }

    /// Use another placeholder feed.
    pub fn with_feed(mut self, feed: PlaceholderFeed) -> Self {
        self.feed = feed;
        self
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn feed(&self) -> &PlaceholderFeed {
        &self.feed
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Local session
    // ═══════════════════════════════════════════════════════════════════════

    /// Sign in without a browser round-trip. Replaces any previous local session.
    pub fn sign_in_local(&self, identity: Identity) -> TreeResult<Session> {
        let (token, session) = self.sessions.sign_in(identity)?;
        if let Some(previous) = self.active.write().replace(token) {
            self.sessions.sign_out(&previous);
        }
        Ok(session)
    }

    pub fn sign_out_local(&self) {
        if let Some(token) = self.active.write().take() {
            self.sessions.sign_out(&token);
        }
    }

    /// The locally signed-in session, if any.
    pub fn session(&self) -> Option<Session> {
        let token = self.active.read().clone()?;
        self.sessions.resolve(&token)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Assets
    // ═══════════════════════════════════════════════════════════════════════

    /// Upload as the local session's own asset.
    pub async fn upload_own(&self, asset_type: AssetType, file: ImageFile) -> TreeResult<AssetRef> {
        let session = self.session().ok_or_else(|| {
            TreeError::NotAuthenticated("You must be logged in to upload images".to_string())
        })?;
        self.assets
            .upload(Some(&session), &session.sanitized_key, asset_type, file)
            .await
    }

    pub async fn current_asset(
        &self,
        owner: &UserKey,
        asset_type: AssetType,
    ) -> TreeResult<Option<AssetRef>> {
        self.assets.fetch_current(owner, asset_type).await
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Feed
    // ═══════════════════════════════════════════════════════════════════════

    pub async fn feed_page(&self, page: u32, size: usize) -> TreeResult<Vec<Card>> {
        self.feed.fetch_page(page, size).await
    }

    pub fn profile_posts(&self) -> Vec<Card> {
        mock_profile_posts()
    }
}

fn process_secret() -> String {
    hex::encode(rand::random::<[u8; 32]>())
}
