//! Auth Control Component
//!
//! Signed out: a "+" button that opens the login modal.
//! Signed in: the user's avatar, opening a dropdown with the profile and
//! settings links and sign-out.

use dioxus::prelude::*;

use crate::app::Route;
use crate::components::LoginModal;
use crate::context::{use_house, use_session};

#[component]
pub fn AuthControl() -> Element {
    let house = use_house();
    let mut session = use_session();
    let mut show_login = use_signal(|| false);
    let mut show_menu = use_signal(|| false);

    let sign_out = move |_| {
        if let Some(house) = house() {
            house.sign_out_local();
        }
        tracing::info!("Signed out");
        session.set(None);
        show_menu.set(false);
    };

    let Some(me) = session() else {
        return rsx! {
            button {
                class: "auth-control auth-control--signin",
                "aria-label": "Login / Sign Up",
                disabled: house().is_none(),
                onclick: move |_| show_login.set(true),
                "+"
            }
            LoginModal {
                show: show_login(),
                on_close: move |_| show_login.set(false),
            }
        };
    };

    let initial = me
        .label()
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();

    rsx! {
        div { class: "auth-control-wrap",
            button {
                class: "auth-control auth-control--avatar",
                title: "{me.label()}",
                "aria-expanded": "{show_menu()}",
                onclick: move |_| show_menu.set(!show_menu()),
                if let Some(avatar) = &me.avatar_url {
                    img { src: "{avatar}", alt: "{me.label()}" }
                } else {
                    span { class: "auth-control__initial", "{initial}" }
                }
            }

            if show_menu() {
                div { class: "auth-menu",
                    div { class: "auth-menu__who",
                        strong { "{me.label()}" }
                        span { class: "auth-menu__email", "{me.identity_email}" }
                    }
                    Link {
                        to: Route::Profile {},
                        class: "auth-menu__item",
                        onclick: move |_| show_menu.set(false),
                        "Profile"
                    }
                    Link {
                        to: Route::Settings {},
                        class: "auth-menu__item",
                        onclick: move |_| show_menu.set(false),
                        "Settings"
                    }
                    button { class: "auth-menu__item", onclick: sign_out, "Sign out" }
                }
            }
        }
    }
}
