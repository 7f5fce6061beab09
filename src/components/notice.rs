//! Dismissible warning strip for failures that don't block the page.

use dioxus::prelude::*;

#[component]
pub fn Notice(message: String, on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        div { class: "notice", "role": "status",
            span { class: "notice__text", "⚠️ {message}" }
            button {
                class: "notice__dismiss",
                "aria-label": "Dismiss",
                onclick: move |_| on_dismiss.call(()),
                "✕"
            }
        }
    }
}
