//! Full-screen image viewer state.

use url::Url;

/// Which image, if any, is shown enlarged.
///
/// The viewer closes on backdrop click, close button or Escape. Escape only
/// means something while the viewer is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LightboxState {
    current: Option<Url>,
}

impl LightboxState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, url: Url) {
        self.current = Some(url);
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Url> {
        self.current.as_ref()
    }

    /// Handle an Escape key press. Returns whether it closed the viewer.
    pub fn on_escape(&mut self) -> bool {
        self.current.take().is_some()
    }
}
