//! Login Modal Component
//!
//! Signs in with a local identity. The email decides the storage key, so
//! entering the same address later shows the same banner and picture.

use dioxus::prelude::*;
use treehouse_core::Identity;

use crate::components::EscapeListener;
use crate::context::{use_house, use_session};

/// # Example
///
/// ```ignore
/// rsx! {
///     LoginModal {
///         show: show_login(),
///         on_close: move |_| show_login.set(false),
///     }
/// }
/// ```
#[component]
pub fn LoginModal(show: bool, on_close: EventHandler<()>) -> Element {
    let house = use_house();
    let mut session = use_session();
    let mut email = use_signal(String::new);
    let mut name = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);

    let mut submit = move || {
        let Some(house) = house() else {
            error.set(Some("Still starting up, try again in a moment".to_string()));
            return;
        };
        let address = email().trim().to_string();
        if address.is_empty() {
            error.set(Some("Please enter your email".to_string()));
            return;
        }

        let mut identity = Identity::new(address);
        let display = name().trim().to_string();
        if !display.is_empty() {
            identity = identity.with_name(display);
        }

        match house.sign_in_local(identity) {
            Ok(signed_in) => {
                tracing::info!(key = %signed_in.sanitized_key, "Signed in");
                session.set(Some(signed_in));
                email.set(String::new());
                name.set(String::new());
                error.set(None);
                on_close.call(());
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    if !show {
        return rsx! {};
    }

    rsx! {
        EscapeListener { on_escape: move |_| on_close.call(()) }

        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),

            div {
                class: "login-modal",
                onclick: move |evt| evt.stop_propagation(),

                button {
                    class: "login-modal__close",
                    "aria-label": "Close login modal",
                    onclick: move |_| on_close.call(()),
                    "✕"
                }

                h2 { class: "login-modal__title", "Welcome to TreeHouse" }

                input {
                    class: "input-field",
                    r#type: "email",
                    placeholder: "you@example.com",
                    value: "{email}",
                    oninput: move |e| email.set(e.value()),
                    onkeydown: move |e| {
                        if e.key() == Key::Enter {
                            submit();
                        }
                    },
                }
                input {
                    class: "input-field",
                    placeholder: "Display name (optional)",
                    value: "{name}",
                    oninput: move |e| name.set(e.value()),
                    onkeydown: move |e| {
                        if e.key() == Key::Enter {
                            submit();
                        }
                    },
                }

                if let Some(err) = error() {
                    div { class: "login-modal__error", "{err}" }
                }

                button {
                    class: "btn-primary login-modal__signin",
                    onclick: move |_| submit(),
                    "Sign in"
                }
                button {
                    class: "btn-disabled",
                    disabled: true,
                    "Email & Password (Coming Soon)"
                }

                p { class: "login-modal__fineprint",
                    "By continuing, you agree to our Terms of Service and Privacy Policy."
                }
            }
        }
    }
}
