//! UI Components for TreeHouse.

mod auth_control;
mod card_grid;
mod create_seed_modal;
mod escape;
mod header;
pub mod images;
mod lightbox;
mod login_modal;
mod notice;
mod search_bar;
mod seed_card;

pub use auth_control::AuthControl;
pub use card_grid::CardGrid;
pub use create_seed_modal::CreateSeedModal;
pub use escape::EscapeListener;
pub use header::Header;
pub use lightbox::Lightbox;
pub use login_modal::LoginModal;
pub use notice::Notice;
pub use search_bar::SearchBar;
pub use seed_card::SeedCard;
