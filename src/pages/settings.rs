//! Settings page. Nothing is configurable yet beyond the theme.

use dioxus::prelude::*;

use crate::components::Header;
use crate::context::use_theme;
use crate::theme::Theme;

#[component]
pub fn Settings() -> Element {
    let mut theme = use_theme();
    let current = theme();
    let label = if current == Theme::Dark { "Dark" } else { "Light" };
    let icon = current.toggle_icon();

    rsx! {
        div { class: "settings-page",
            Header {}
            div { class: "settings-panel",
                h1 { class: "settings-panel__title", "Settings" }
                p { "Here you will be able to customize your TreeHouse experience. 🌿" }
                div { class: "settings-panel__row",
                    span { "Theme: {label}" }
                    button {
                        class: "btn-secondary",
                        onclick: move |_| theme.set(current.toggled()),
                        "{icon} Switch"
                    }
                }
            }
        }
    }
}
