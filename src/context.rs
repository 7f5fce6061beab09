//! Shared state for the desktop client.
//!
//! `App` provides the opened [`TreeHouse`] and the local session as context.
//!
//! ## Usage
//!
//! ```ignore
//! let house = use_house();
//! let session = use_session();
//!
//! if let (Some(house), Some(me)) = (house(), session()) {
//!     let banner = house.current_asset(&me.sanitized_key, AssetType::Banner).await?;
//! }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use dioxus::prelude::*;
use treehouse_core::{Session, TreeHouse};

use crate::theme::Theme;

/// `None` until the data directory has been opened.
pub type SharedHouse = Option<Arc<TreeHouse>>;

/// Get the data directory for the application.
pub fn get_data_dir() -> PathBuf {
    crate::get_data_dir()
}

/// Hook to access the TreeHouse from context.
pub fn use_house() -> Signal<SharedHouse> {
    use_context::<Signal<SharedHouse>>()
}

/// Hook to access the signed-in session.
///
/// Mirrors `TreeHouse::session()`; components write it after signing in or out
/// so the header and profile page re-render.
pub fn use_session() -> Signal<Option<Session>> {
    use_context::<Signal<Option<Session>>>()
}

/// Hook to access the window theme.
pub fn use_theme() -> Signal<Theme> {
    use_context::<Signal<Theme>>()
}
