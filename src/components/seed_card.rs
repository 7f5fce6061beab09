//! Seed Card Component
//!
//! One image card with a hover glow and the engagement overlay.

use dioxus::prelude::*;
use treehouse_core::view::glow_color;
use treehouse_core::Card;
use url::Url;

/// A single card in the grid
///
/// # Example
///
/// ```ignore
/// rsx! {
///     SeedCard {
///         card: card.clone(),
///         on_image_click: move |url| lightbox.write().open(url),
///     }
/// }
/// ```
#[component]
pub fn SeedCard(card: Card, on_image_click: EventHandler<Url>) -> Element {
    let mut hovering = use_signal(|| false);

    let glow = glow_color(card.id.as_str());
    let glow_opacity = if hovering() { 1 } else { 0 };
    let frame_class = card.kind.css_class();
    let image_url = card.image_url.clone();

    rsx! {
        div {
            class: "seed-card",
            onmouseenter: move |_| hovering.set(true),
            onmouseleave: move |_| hovering.set(false),
            onclick: move |_| on_image_click.call(image_url.clone()),

            div {
                class: "seed-card__glow",
                style: "background-color: {glow}; opacity: {glow_opacity};",
            }

            div { class: "seed-card__frame {frame_class}",
                img {
                    class: "seed-card__img",
                    src: "{card.image_url}",
                    alt: "Seed {card.id}",
                    loading: "lazy",
                }

                if let Some(engagement) = card.engagement {
                    div { class: "seed-card__stats",
                        span { "role": "img", "aria-label": "hits", "🌱" }
                        " {engagement.hits} hits"
                        span { class: "seed-card__dot", "•" }
                        span { "role": "img", "aria-label": "branches", "🌿" }
                        " {engagement.branches} branches"
                    }
                }
            }
        }
    }
}
