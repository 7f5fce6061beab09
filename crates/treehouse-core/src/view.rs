//! Presentation logic that doesn't depend on a UI toolkit.

pub mod layout;
pub mod lightbox;
pub mod masonry;
pub mod search;
pub mod seed_draft;

pub use layout::GridLayout;
pub use lightbox::LightboxState;
pub use seed_draft::SeedDraft;

/// Hover glow colours for cards
pub const GLOW_PALETTE: [&str; 16] = [
    "#F9A8D4", "#93C5FD", "#6EE7B7", "#FDBA74", "#C4B5FD", "#FCD34D", "#FCA5A5", "#5EEAD4",
    "#A5F3FC", "#D8B4FE", "#FBCFE8", "#FDE68A", "#E0F2FE", "#F87171", "#86EFAC", "#BFDBFE",
];

/// Glow colour for a card, stable per id.
pub fn glow_color(id: &str) -> &'static str {
    let hash = blake3::hash(id.as_bytes());
    GLOW_PALETTE[hash.as_bytes()[0] as usize % GLOW_PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glow_color_stable() {
        assert_eq!(glow_color("seed-1"), glow_color("seed-1"));
        assert!(GLOW_PALETTE.contains(&glow_color("anything")));
    }
}
