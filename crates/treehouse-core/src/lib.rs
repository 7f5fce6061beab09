//! TreeHouse Core Library
//!
//! Seed cards, per-user profile images and an infinite-scrolling feed.
//!
//! ## Overview
//!
//! TreeHouse is a social image-sharing app. Users sign in through Google,
//! keep a profile with a banner and a profile picture, and browse a masonry
//! grid of image cards ("seeds") that loads more as they scroll.
//!
//! This crate holds everything that isn't UI or HTTP:
//!
//! - **Sessions**: signed tokens, sanitized per-user storage keys
//! - **Assets**: upload and "current asset" lookup over pluggable object storage
//! - **Feed**: placeholder card generator and the pagination state machine
//! - **View**: responsive column count, masonry placement, lightbox and dialog state
//!
//! ## Quick Start
//!
//! ```ignore
//! use treehouse_core::{AssetType, Identity, TreeHouse};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let house = TreeHouse::open("./data").await?;
//!     let session = house.sign_in_local(Identity::new("a.b@c.com"))?;
//!
//!     match house.current_asset(&session.sanitized_key, AssetType::Banner).await? {
//!         Some(banner) => println!("banner: {}", banner.public_url),
//!         None => println!("no banner yet"),
//!     }
//!
//!     for card in house.feed_page(0, 20).await? {
//!         println!("{} {}", card.kind.as_str(), card.image_url);
//!     }
//!     Ok(())
//! }
//! ```

pub mod assets;
pub mod auth;
pub mod config;
pub mod error;
pub mod feed;
pub mod house;
pub mod logging;
pub mod storage;
pub mod types;
pub mod view;

// Re-exports
pub use assets::{AssetStore, ImageFile, MAX_UPLOAD_SIZE};
pub use auth::{GoogleOAuth, SessionRegistry};
pub use config::{Config, StorageSettings};
pub use error::{TreeError, TreeResult};
pub use feed::{Feed, LoadOutcome, PageSource, PlaceholderFeed, ScrollController, ScrollState};
pub use house::TreeHouse;
pub use storage::{ObjectInfo, ObjectStore};
pub use types::*;
pub use view::{GridLayout, LightboxState, SeedDraft};
