//! Form state of the "plant a seed" dialog.

use crate::assets::ImageFile;
use crate::error::{TreeError, TreeResult};

/// Longest accepted seed title, in characters
pub const MAX_TITLE_CHARS: usize = 120;

/// What the user has entered so far. Cleared whenever the dialog closes.
#[derive(Debug, Clone, Default)]
pub struct SeedDraft {
    pub title: String,
    pub description: String,
    pub image: Option<ImageFile>,
}

impl SeedDraft {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether the dialog can be submitted.
    pub fn is_ready(&self) -> bool {
        self.check().is_ok()
    }

    /// Validate for planting: an image and a non-empty title are required.
    pub fn check(&self) -> TreeResult<()> {
        if self.image.is_none() {
            return Err(TreeError::Validation("pick an image for your seed".to_string()));
        }
        let title = self.title.trim();
        if title.is_empty() {
            return Err(TreeError::Validation("give your seed a title".to_string()));
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(TreeError::Validation(format!(
                "title is longer than {MAX_TITLE_CHARS} characters"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn test_needs_image_and_title() {
        let mut draft = SeedDraft::default();
        assert!(!draft.is_ready());

        draft.title = "  ".to_string();
        draft.image = Some(ImageFile::new("seed.png", PNG.to_vec()).unwrap());
        assert!(matches!(draft.check(), Err(TreeError::Validation(_))));

        draft.title = "First sprout".to_string();
        assert!(draft.is_ready());

        draft.title = "x".repeat(MAX_TITLE_CHARS + 1);
        assert!(!draft.is_ready());
    }

    #[test]
    fn test_clear() {
        let mut draft = SeedDraft {
            title: "t".to_string(),
            description: "d".to_string(),
            image: Some(ImageFile::new("seed.png", PNG.to_vec()).unwrap()),
        };
        draft.clear();
        assert!(draft.title.is_empty() && draft.description.is_empty() && draft.image.is_none());
    }
}
