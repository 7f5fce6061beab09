//! Feed page - the infinite masonry of seed cards.
//!
//! A sentinel below the grid asks the scroll controller for the next page
//! whenever it comes into view. Column count follows the page width.

use std::sync::Arc;

use dioxus::prelude::*;
use treehouse_core::feed::{Feed as CardFeed, LoadOutcome, ScrollState, DEFAULT_PAGE_SIZE};
use treehouse_core::{Card, GridLayout, LightboxState, PlaceholderFeed};
use url::Url;

use crate::components::{CardGrid, Header, Lightbox};

/// Width assumed until the first resize event arrives
const INITIAL_WIDTH: f64 = 1200.0;

type SharedFeed = Arc<CardFeed<PlaceholderFeed>>;

/// Reactive mirror of the scroll controller
#[derive(Clone, Copy)]
struct FeedView {
    cards: Signal<Vec<Card>>,
    state: Signal<ScrollState>,
    error: Signal<Option<String>>,
    sentinel_visible: Signal<bool>,
}

impl FeedView {
    /// Pull pages until one fails, the feed ends, or the sentinel scrolls away.
    fn load_more(mut self, feed: SharedFeed) {
        spawn(async move {
            loop {
                let outcome = feed.load_more().await;
                self.state.set(feed.state());
                match outcome {
                    LoadOutcome::Appended(_) => {
                        self.error.set(None);
                        self.cards.set(feed.cards());
                        if !(self.sentinel_visible)() {
                            break;
                        }
                    }
                    LoadOutcome::Failed(e) => {
                        tracing::warn!(error = %e, "Feed page failed");
                        self.error.set(Some(e));
                        break;
                    }
                    LoadOutcome::Exhausted => {
                        self.cards.set(feed.cards());
                        break;
                    }
                    LoadOutcome::Skipped | LoadOutcome::Stale => break,
                }
            }
        });
    }
}

#[component]
pub fn Feed() -> Element {
    let feed: SharedFeed =
        use_hook(|| Arc::new(CardFeed::new(PlaceholderFeed::default(), DEFAULT_PAGE_SIZE)));

    let mut view = FeedView {
        cards: use_signal(Vec::new),
        state: use_signal(|| ScrollState::Idle),
        error: use_signal(|| None),
        sentinel_visible: use_signal(|| false),
    };
    let mut width = use_signal(|| INITIAL_WIDTH);
    let mut lightbox = use_signal(LightboxState::default);

    let layout = use_memo(move || GridLayout::for_width(width()));

    use_effect({
        let feed = feed.clone();
        move || view.load_more(feed.clone())
    });

    // Results of a load still in flight belong to a grid that is gone
    use_drop({
        let feed = feed.clone();
        move || feed.reset()
    });

    let state = (view.state)();
    let empty = view.cards.read().is_empty();

    rsx! {
        div { class: "feed-page",
            onresize: move |evt| {
                if let Ok(size) = evt.data().get_content_box_size() {
                    width.set(size.width);
                }
            },

            Header {}

            main { class: "feed-main",
                if empty && state == ScrollState::Loading {
                    div { class: "loading-state",
                        div { class: "loading-spinner" }
                        p { "Growing seeds..." }
                    }
                } else {
                    CardGrid {
                        cards: (view.cards)(),
                        columns: layout().columns,
                        gutter: layout().gutter_px,
                        on_image_click: move |url: Url| lightbox.write().open(url),
                    }
                }

                if let Some(err) = (view.error)() {
                    div { class: "feed-error",
                        span { "Couldn't load more seeds: {err}" }
                        button {
                            class: "btn-secondary",
                            onclick: {
                                let feed = feed.clone();
                                move |_| view.load_more(feed.clone())
                            },
                            "Retry"
                        }
                    }
                }

                if state == ScrollState::Loading && !empty {
                    div { class: "feed-loading-more", div { class: "loading-spinner" } }
                }

                if state == ScrollState::Exhausted {
                    p { class: "feed-end", "You've reached the bottom of the forest." }
                } else {
                    div {
                        class: "scroll-sentinel",
                        onvisible: {
                            let feed = feed.clone();
                            move |evt: Event<VisibleData>| {
                                let visible = evt.data().is_intersecting().unwrap_or(false);
                                view.sentinel_visible.set(visible);
                                if visible {
                                    view.load_more(feed.clone());
                                }
                            }
                        },
                    }
                }
            }

            Lightbox { state: lightbox }
        }
    }
}
