//! Infinite scroll controller.
//!
//! ```text
//!            sentinel visible            page with cards
//!   Idle ───────────────────────▶ Loading ───────────────▶ Idle
//!    ▲                              │  │
//!    └──────── fetch failed ────────┘  └── empty page ──▶ Exhausted
//! ```
//!
//! Only one page is ever in flight: a visibility trigger while `Loading` is
//! ignored. `Exhausted` is terminal until [`ScrollController::reset`]. Every
//! request carries the controller generation; `reset` bumps it so results
//! of requests issued before the reset are discarded instead of applied.

use std::collections::HashSet;
use std::future::Future;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::TreeResult;
use crate::types::{Card, CardId};

/// Default number of cards per page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Largest page a source is asked for
pub const MAX_PAGE_SIZE: usize = 100;

/// Anything that can produce a page of cards.
pub trait PageSource: Send + Sync {
    /// Fetch page `page` (0-based) of at most `size` cards.
    ///
    /// An empty page means the source has no more cards.
    fn fetch_page(&self, page: u32, size: usize)
        -> impl Future<Output = TreeResult<Vec<Card>>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollState {
    Idle,
    Loading,
    Exhausted,
}

/// A page load the caller must perform and report back via `complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: usize,
    generation: u64,
}

/// What `complete` did with a page result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No load was started (already loading, exhausted, or not visible)
    Skipped,
    /// Cards appended to the sequence
    Appended(usize),
    /// Source returned an empty page
    Exhausted,
    /// Fetch failed; the controller is idle again and will retry on the next trigger
    Failed(String),
    /// Result belonged to a request issued before a reset
    Stale,
}

/// Feed pagination state machine. Holds the loaded card sequence.
#[derive(Debug, Clone)]
pub struct ScrollController {
    state: ScrollState,
    cards: Vec<Card>,
    seen: HashSet<CardId>,
    next_page: u32,
    page_size: usize,
    generation: u64,
    last_error: Option<String>,
}

impl Default for ScrollController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ScrollController {
    pub fn new(page_size: usize) -> Self {
        Self {
            state: ScrollState::Idle,
            cards: Vec::new(),
            seen: HashSet::new(),
            next_page: 0,
            page_size: page_size.max(1),
            generation: 0,
            last_error: None,
        }
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == ScrollState::Loading
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == ScrollState::Exhausted
    }

    /// Cards loaded so far, in arrival order
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Error of the most recent failed load, cleared by the next success
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Number of pages successfully loaded
    pub fn pages_loaded(&self) -> u32 {
        self.next_page
    }

    /// Sentinel visibility changed.
    ///
    /// Returns the page to load when the controller moves `Idle → Loading`,
    /// `None` otherwise.
    pub fn on_sentinel(&mut self, visible: bool) -> Option<PageRequest> {
        if !visible || self.state != ScrollState::Idle {
            return None;
        }
        self.state = ScrollState::Loading;
        debug!(page = self.next_page, "Loading next page");
        Some(PageRequest {
            page: self.next_page,
            size: self.page_size,
            generation: self.generation,
        })
    }

    /// Apply the result of a load started by `on_sentinel`.
    pub fn complete(&mut self, request: PageRequest, result: TreeResult<Vec<Card>>) -> LoadOutcome {
        if request.generation != self.generation || self.state != ScrollState::Loading {
            debug!(page = request.page, "Discarding stale page result");
            return LoadOutcome::Stale;
        }

        match result {
            Ok(cards) if cards.is_empty() => {
                debug!(page = request.page, "Feed exhausted");
                self.state = ScrollState::Exhausted;
                self.last_error = None;
                LoadOutcome::Exhausted
            }
            Ok(cards) => {
                let offered = cards.len();
                let before = self.cards.len();
                for card in cards {
                    if self.seen.insert(card.id.clone()) {
                        self.cards.push(card);
                    } else {
                        warn!(id = %card.id, "Dropping duplicate card");
                    }
                }
                let appended = self.cards.len() - before;
                debug!(page = request.page, offered, appended, "Page appended");
                self.next_page += 1;
                self.state = ScrollState::Idle;
                self.last_error = None;
                LoadOutcome::Appended(appended)
            }
            Err(e) => {
                warn!(page = request.page, error = %e, "Page load failed");
                let msg = e.to_string();
                self.state = ScrollState::Idle;
                self.last_error = Some(msg.clone());
                LoadOutcome::Failed(msg)
            }
        }
    }

    /// Give up on a load that will never report back.
    ///
    /// Returns to `Idle` so the next trigger can start the same page again.
    /// No-op if the request is stale or already completed.
    pub fn abandon(&mut self, request: PageRequest) {
        if request.generation == self.generation && self.state == ScrollState::Loading {
            debug!(page = request.page, "Page load abandoned");
            self.state = ScrollState::Idle;
        }
    }

    /// Drop all cards and start over. In-flight results become stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = ScrollState::Idle;
        self.cards.clear();
        self.seen.clear();
        self.next_page = 0;
        self.last_error = None;
    }
}

/// Async driver pairing a controller with a page source.
///
/// `load_more` can be called from any number of tasks; at most one of them
/// reaches the source at a time.
pub struct Feed<P> {
    source: P,
    controller: Mutex<ScrollController>,
}

impl<P: PageSource> Feed<P> {
    pub fn new(source: P, page_size: usize) -> Self {
        Self {
            source,
            controller: Mutex::new(ScrollController::new(page_size)),
        }
    }

    /// Load the next page if no load is in flight and the feed isn't exhausted.
    pub async fn load_more(&self) -> LoadOutcome {
        let request = self.controller.lock().on_sentinel(true);
        let Some(request) = request else {
            return LoadOutcome::Skipped;
        };
        let mut in_flight = InFlight {
            controller: &self.controller,
            request: Some(request),
        };
        let result = self.source.fetch_page(request.page, request.size).await;
        in_flight.request = None;
        self.controller.lock().complete(request, result)
    }

    pub fn state(&self) -> ScrollState {
        self.controller.lock().state()
    }

    /// Copy of the loaded cards
    pub fn cards(&self) -> Vec<Card> {
        self.controller.lock().cards().to_vec()
    }

    pub fn len(&self) -> usize {
        self.controller.lock().cards().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn reset(&self) {
        self.controller.lock().reset();
    }

    pub fn source(&self) -> &P {
        &self.source
    }
}

/// Abandons its request if the load future is dropped mid-fetch
struct InFlight<'a> {
    controller: &'a Mutex<ScrollController>,
    request: Option<PageRequest>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(request) = self.request.take() {
            self.controller.lock().abandon(request);
        }
    }
}
