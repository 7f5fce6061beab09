//! Placeholder card generator.
//!
//! Produces synthetic cards for demos and tests. Pure: the same
//! `(seed, page, size)` always yields the same cards, and no I/O happens.
//! The generator never runs dry, so a feed backed by it never exhausts.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{PageSource, MAX_PAGE_SIZE};
use crate::error::{TreeError, TreeResult};
use crate::types::{Card, CardKind};

/// Image host serving deterministic photos for a seed
pub const DEFAULT_IMAGE_BASE: &str = "https://picsum.photos";

/// Width in pixels of generated images; height follows the card kind
const IMAGE_WIDTH: u32 = 400;

/// Deterministic source of placeholder cards
#[derive(Debug, Clone)]
pub struct PlaceholderFeed {
    seed: u64,
    image_base: String,
}

impl Default for PlaceholderFeed {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PlaceholderFeed {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            image_base: DEFAULT_IMAGE_BASE.to_string(),
        }
    }

    /// Use a different image host (must be an absolute URL).
    pub fn with_image_base(mut self, base: impl Into<String>) -> Self {
        self.image_base = base.into().trim_end_matches('/').to_string();
        self
    }

    /// Cards `page * size .. (page + 1) * size`.
    ///
    /// Fails with `Validation` if `size` exceeds [`MAX_PAGE_SIZE`].
    pub fn page(&self, page: u32, size: usize) -> TreeResult<Vec<Card>> {
        if size > MAX_PAGE_SIZE {
            return Err(TreeError::Validation(format!(
                "page size {size} exceeds {MAX_PAGE_SIZE}"
            )));
        }
        let size = size as u64;
        let (start, end) = u64::from(page)
            .checked_mul(size)
            .and_then(|start| Some((start, start.checked_add(size)?)))
            .ok_or_else(|| TreeError::Validation(format!("page {page} out of range")))?;
        (start..end)
            .map(|index| self.card(index))
            .collect()
    }

    /// The card at global position `index`.
    pub fn card(&self, index: u64) -> TreeResult<Card> {
        let mut rng = StdRng::seed_from_u64(self.seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        let kind = CardKind::ALL[rng.random_range(0..CardKind::ALL.len())];
        let (w, h) = kind.aspect_ratio();
        let height = IMAGE_WIDTH * h / w;
        let url = format!(
            "{}/seed/{}-{}/{}/{}",
            self.image_base, self.seed, index, IMAGE_WIDTH, height
        );
        Ok(Card::new(format!("seed-{index}"), kind, &url)?
            .with_engagement(rng.random_range(0..500), rng.random_range(0..50)))
    }
}

impl PageSource for PlaceholderFeed {
    async fn fetch_page(&self, page: u32, size: usize) -> TreeResult<Vec<Card>> {
        self.page(page, size)
    }
}

/// The fixed posts shown on a profile page.
pub fn mock_profile_posts() -> Vec<Card> {
    [
        ("1", CardKind::Square, "123", 409, 12),
        ("2", CardKind::Square, "456", 206, 9),
        ("3", CardKind::Square, "789", 123, 5),
        ("4", CardKind::Phone, "999", 312, 20),
    ]
    .into_iter()
    .filter_map(|(id, kind, seed, hits, branches)| {
        let (w, h) = kind.aspect_ratio();
        let url = format!(
            "{DEFAULT_IMAGE_BASE}/seed/{seed}/{IMAGE_WIDTH}/{}",
            IMAGE_WIDTH * h / w
        );
        Card::new(id, kind, &url)
            .ok()
            .map(|card| card.with_engagement(hits, branches))
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_pages_are_deterministic() {
        let feed = PlaceholderFeed::new(7);
        assert_eq!(feed.page(3, 10).unwrap(), feed.page(3, 10).unwrap());
        assert_ne!(
            PlaceholderFeed::new(8).page(3, 10).unwrap(),
            feed.page(3, 10).unwrap()
        );
    }

    #[test]
    fn test_ids_unique_across_pages() {
        let feed = PlaceholderFeed::new(1);
        let mut ids = HashSet::new();
        for page in 0..5 {
            for card in feed.page(page, 20).unwrap() {
                assert!(ids.insert(card.id.clone()), "duplicate {}", card.id);
            }
        }
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_image_size_follows_kind() {
        let feed = PlaceholderFeed::new(1);
        for card in feed.page(0, 40).unwrap() {
            let (w, h) = card.kind.aspect_ratio();
            let expected = format!("/{}/{}", IMAGE_WIDTH, IMAGE_WIDTH * h / w);
            assert!(card.image_url.as_str().ends_with(&expected), "{}", card.image_url);
            assert!(card.engagement.is_some());
        }
    }

    #[test]
    fn test_zero_size_page_is_empty() {
        assert!(PlaceholderFeed::new(1).page(4, 0).unwrap().is_empty());
    }

    #[test]
    fn test_oversized_page_rejected() {
        let feed = PlaceholderFeed::new(1);
        let err = feed.page(0, MAX_PAGE_SIZE + 1).unwrap_err();
        assert!(matches!(err, TreeError::Validation(_)));
        assert!(matches!(feed.page(0, usize::MAX), Err(TreeError::Validation(_))));

        let last = feed.page(u32::MAX, MAX_PAGE_SIZE).unwrap();
        assert_eq!(last.len(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_mock_profile_posts() {
        let posts = mock_profile_posts();
        assert_eq!(posts.len(), 4);
        assert_eq!(posts[3].kind, CardKind::Phone);
        assert_eq!(posts[0].engagement.unwrap().hits, 409);
    }
}
