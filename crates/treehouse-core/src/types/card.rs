//! Seed Card Type - One displayable unit of the feed
//!
//! Every card source (placeholder generator, HTTP feed, profile posts) produces
//! this one shape. Image URLs are validated as absolute when a card is built
//! or deserialized.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{TreeError, TreeResult};

/// Stable identifier of a card within a loaded sequence
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for CardId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

/// Aspect-ratio class of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    /// 1:1
    Square,
    /// 16:9
    Wide,
    /// 4:3
    Classic,
    /// 9:16
    Phone,
}

impl CardKind {
    pub const ALL: [CardKind; 4] = [
        CardKind::Square,
        CardKind::Wide,
        CardKind::Classic,
        CardKind::Phone,
    ];

    /// Aspect ratio as (width, height)
    pub fn aspect_ratio(&self) -> (u32, u32) {
        match self {
            CardKind::Square => (1, 1),
            CardKind::Wide => (16, 9),
            CardKind::Classic => (4, 3),
            CardKind::Phone => (9, 16),
        }
    }

    /// Rendered height for a unit width.
    pub fn relative_height(&self) -> f64 {
        let (w, h) = self.aspect_ratio();
        h as f64 / w as f64
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CardKind::Square => "square",
            CardKind::Wide => "wide",
            CardKind::Classic => "classic",
            CardKind::Phone => "phone",
        }
    }

    /// CSS class applied to the card's image frame
    pub fn css_class(&self) -> &'static str {
        match self {
            CardKind::Square => "aspect-square",
            CardKind::Wide => "aspect-wide",
            CardKind::Classic => "aspect-classic",
            CardKind::Phone => "aspect-phone",
        }
    }
}

impl std::str::FromStr for CardKind {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "square" => Ok(CardKind::Square),
            "wide" => Ok(CardKind::Wide),
            "classic" => Ok(CardKind::Classic),
            "phone" => Ok(CardKind::Phone),
            other => Err(TreeError::Validation(format!("unknown card kind: {other}"))),
        }
    }
}

/// Informational engagement counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    pub hits: u32,
    pub branches: u32,
}

/// A feed item: image plus metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
    /// Absolute URL of the source image
    pub image_url: Url,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement: Option<Engagement>,
}

impl Card {
    /// Build a card, rejecting relative or malformed image URLs.
    pub fn new(id: impl Into<CardId>, kind: CardKind, image_url: &str) -> TreeResult<Self> {
        let image_url = Url::parse(image_url).map_err(|e| {
            TreeError::Validation(format!("card image url {image_url:?} is not absolute: {e}"))
        })?;
        Ok(Self {
            id: id.into(),
            kind,
            image_url,
            engagement: None,
        })
    }

    pub fn with_engagement(mut self, hits: u32, branches: u32) -> Self {
        self.engagement = Some(Engagement { hits, branches });
        self
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_requires_absolute_url() {
        assert!(Card::new("1", CardKind::Square, "https://picsum.photos/400").is_ok());

        let err = Card::new("2", CardKind::Square, "/images/example1.jpg").unwrap_err();
        assert!(matches!(err, TreeError::Validation(_)));
    }

    #[test]
    fn test_kind_serde_lowercase() {
        let json = serde_json::to_string(&CardKind::Phone).unwrap();
        assert_eq!(json, "\"phone\"");

        let kind: CardKind = serde_json::from_str("\"classic\"").unwrap();
        assert_eq!(kind, CardKind::Classic);
    }

    #[test]
    fn test_unknown_kind_rejected_at_boundary() {
        let json = r#"{"id":"7","kind":"panorama","image_url":"https://x.test/a.jpg"}"#;
        assert!(serde_json::from_str::<Card>(json).is_err());
        assert!("panorama".parse::<CardKind>().is_err());
    }

    #[test]
    fn test_relative_url_rejected_on_deserialize() {
        let json = r#"{"id":"7","kind":"wide","image_url":"/images/a.jpg"}"#;
        assert!(serde_json::from_str::<Card>(json).is_err());
    }

    #[test]
    fn test_relative_heights() {
        assert_eq!(CardKind::Square.relative_height(), 1.0);
        assert!(CardKind::Phone.relative_height() > CardKind::Classic.relative_height());
        assert!(CardKind::Classic.relative_height() > CardKind::Wide.relative_height());
    }

    #[test]
    fn test_engagement_is_optional() {
        let json = r#"{"id":"1","kind":"square","image_url":"https://x.test/a.jpg"}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert!(card.engagement.is_none());

        let card = card.with_engagement(409, 12);
        assert_eq!(card.engagement, Some(Engagement { hits: 409, branches: 12 }));
    }
}
