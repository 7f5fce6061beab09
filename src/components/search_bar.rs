//! Header search box.
//!
//! Search itself isn't wired to anything yet; the box shows a playful
//! placeholder that rotates while the user isn't typing in it.

use std::time::Duration;

use dioxus::prelude::*;
use treehouse_core::view::glow_color;
use treehouse_core::view::search::{next_placeholder, ROTATE_EVERY_SECS};

#[component]
pub fn SearchBar() -> Element {
    let mut query = use_signal(String::new);
    let mut focused = use_signal(|| false);
    let mut glow = use_signal(|| Option::<&'static str>::None);
    let mut placeholder = use_signal(|| next_placeholder(None, &mut rand::rng()));

    use_hook(move || {
        spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(ROTATE_EVERY_SECS)).await;
                if !focused() {
                    let current = placeholder();
                    placeholder.set(next_placeholder(Some(current), &mut rand::rng()));
                }
            }
        });
    });

    let style = match glow() {
        Some(color) => format!("box-shadow: 0 0 15px 3px {color};"),
        None => String::new(),
    };

    rsx! {
        div {
            class: "search-bar",
            style: "{style}",
            onmouseenter: move |_| glow.set(Some(glow_color(&placeholder()))),
            onmouseleave: move |_| glow.set(None),
            input {
                class: "search-bar__input",
                r#type: "text",
                "aria-label": "Search",
                placeholder: "{placeholder}",
                value: "{query}",
                oninput: move |e| query.set(e.value()),
                onfocus: move |_| focused.set(true),
                onblur: move |_| focused.set(false),
            }
        }
    }
}
