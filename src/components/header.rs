//! Top bar: app title, search, the seed and theme buttons, and sign-in.

use dioxus::prelude::*;

use crate::app::Route;
use crate::components::{AuthControl, CreateSeedModal, SearchBar};
use crate::context::use_theme;

#[component]
pub fn Header() -> Element {
    let mut theme = use_theme();
    let mut show_seed = use_signal(|| false);
    let toggle_icon = theme().toggle_icon();

    rsx! {
        header { class: "app-header",
            Link { to: Route::Feed {}, class: "app-title",
                "🌱 TreeHouse"
            }

            div { class: "app-header__center",
                SearchBar {}
                div { class: "app-header__icons",
                    button {
                        class: "header-icon",
                        "aria-label": "Plant a seed",
                        title: "Plant a seed",
                        onclick: move |_| show_seed.set(true),
                        "🌱"
                    }
                    button {
                        class: "header-icon",
                        "aria-label": "Toggle dark mode",
                        title: "Toggle dark mode",
                        onclick: move |_| {
                            let next = theme().toggled();
                            theme.set(next);
                        },
                        "{toggle_icon}"
                    }
                }
            }

            AuthControl {}
        }

        CreateSeedModal {
            show: show_seed(),
            on_close: move |_| show_seed.set(false),
        }
    }
}
