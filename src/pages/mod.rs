//! Page components for TreeHouse.

mod feed;
mod profile;
mod settings;

pub use feed::Feed;
pub use profile::{Profile, UserProfile};
pub use settings::Settings;
