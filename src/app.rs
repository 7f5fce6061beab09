use std::sync::Arc;

use dioxus::prelude::*;
use treehouse_core::{Session, TreeHouse};

use crate::context::get_data_dir;
use crate::pages::{Feed, Profile, Settings, UserProfile};
use crate::theme::{Theme, GLOBAL_STYLES};

/// Application routes.
///
/// - `/` - Infinite feed of seed cards
/// - `/profile` - The signed-in user's own profile
/// - `/profile/:user_key` - Anyone's profile by storage key
/// - `/settings` - Settings (placeholder)
#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[route("/")]
    Feed {},
    #[route("/profile")]
    Profile {},
    #[route("/profile/:user_key")]
    UserProfile { user_key: String },
    #[route("/settings")]
    Settings {},
}

/// Root application component.
///
/// Opens the house, provides it, the session and the theme as context, then
/// routes.
#[component]
pub fn App() -> Element {
    let mut house: Signal<Option<Arc<TreeHouse>>> = use_signal(|| None);
    let session: Signal<Option<Session>> = use_signal(|| None);
    let theme = use_signal(Theme::default);
    let mut open_error: Signal<Option<String>> = use_signal(|| None);

    use_context_provider(|| house);
    use_context_provider(|| session);
    use_context_provider(|| theme);

    use_effect(move || {
        spawn(async move {
            let data_dir = get_data_dir();
            match TreeHouse::open(&data_dir).await {
                Ok(opened) => {
                    house.set(Some(Arc::new(opened)));
                    tracing::info!("TreeHouse opened");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to open TreeHouse");
                    open_error.set(Some(e.to_string()));
                }
            }
        });
    });

    let theme_class = theme().class();

    rsx! {
        style { {GLOBAL_STYLES} }
        div { class: "app-root {theme_class}",
            if let Some(err) = open_error() {
                div { class: "fatal-error",
                    h1 { "TreeHouse could not start" }
                    p { "{err}" }
                }
            } else {
                Router::<Route> {}
            }
        }
    }
}
