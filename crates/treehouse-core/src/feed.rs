//! Card feed: where cards come from and how they are paged in.

pub mod generator;
pub mod scroll;

pub use generator::{mock_profile_posts, PlaceholderFeed};
pub use scroll::{Feed, LoadOutcome, PageRequest, PageSource, ScrollController, ScrollState, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
