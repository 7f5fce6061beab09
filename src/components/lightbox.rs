//! Lightbox Component
//!
//! Full-screen view of one image. Closes on backdrop click, the close button
//! or Escape; the key listener only exists while an image is shown.

use dioxus::prelude::*;
use treehouse_core::LightboxState;

use crate::components::EscapeListener;

#[component]
pub fn Lightbox(mut state: Signal<LightboxState>) -> Element {
    let Some(url) = state.read().current().cloned() else {
        return rsx! {};
    };

    rsx! {
        EscapeListener {
            on_escape: move |_| {
                state.write().on_escape();
            },
        }

        div {
            class: "lightbox",
            onclick: move |_| state.write().close(),

            button {
                class: "lightbox__close",
                "aria-label": "Close image",
                onclick: move |evt| {
                    evt.stop_propagation();
                    state.write().close();
                },
                "✕"
            }

            img {
                class: "lightbox__img",
                src: "{url}",
                alt: "Enlarged seed",
                onclick: move |evt| evt.stop_propagation(),
            }
        }
    }
}
