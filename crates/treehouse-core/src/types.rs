//! Core types for TreeHouse

pub mod asset;
pub mod card;
pub mod session;

pub use asset::{cache_bust, storage_path, AssetRef, AssetType};
pub use card::{Card, CardId, CardKind, Engagement};
pub use session::{sanitize, Identity, Session, UserKey};
