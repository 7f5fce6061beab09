//! Create Seed Modal
//!
//! Image, title and description for a new seed. Closes on backdrop click,
//! the close button or Escape, and forgets the draft whenever it closes.

use dioxus::prelude::*;
use treehouse_core::SeedDraft;

use crate::components::images::{pick_image, preview_uri};
use crate::components::EscapeListener;

#[component]
pub fn CreateSeedModal(show: bool, on_close: EventHandler<()>) -> Element {
    let mut draft = use_signal(SeedDraft::default);
    let mut preview = use_signal(|| Option::<String>::None);
    let mut picking = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    use_effect(use_reactive((&show,), move |(show,)| {
        if !show {
            draft.write().clear();
            preview.set(None);
            error.set(None);
        }
    }));

    let choose_image = move |_| {
        if picking() {
            return;
        }
        picking.set(true);
        spawn(async move {
            match pick_image().await {
                Ok(Some(file)) => {
                    preview.set(preview_uri(&file).await);
                    draft.write().image = Some(file);
                    error.set(None);
                }
                Ok(None) => {}
                Err(e) => error.set(Some(e)),
            }
            picking.set(false);
        });
    };

    let plant = move |_| {
        let seed = draft.read().clone();
        match seed.check() {
            Ok(()) => {
                tracing::info!(
                    title = %seed.title.trim(),
                    image = seed.image.as_ref().map(|f| f.name.as_str()).unwrap_or_default(),
                    "Planted seed"
                );
                on_close.call(());
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    if !show {
        return rsx! {};
    }

    let title = draft.read().title.clone();
    let description = draft.read().description.clone();
    let ready = draft.read().is_ready();

    rsx! {
        EscapeListener { on_escape: move |_| on_close.call(()) }

        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),

            div {
                class: "seed-modal",
                onclick: move |evt| evt.stop_propagation(),

                button {
                    class: "login-modal__close",
                    "aria-label": "Close",
                    onclick: move |_| on_close.call(()),
                    "✕"
                }

                button {
                    class: "seed-modal__drop",
                    disabled: picking(),
                    onclick: choose_image,
                    if let Some(uri) = preview() {
                        img { class: "seed-modal__preview", src: "{uri}", alt: "Preview" }
                        span { class: "seed-modal__change", "Change Image" }
                    } else {
                        span { class: "seed-modal__plus", "+" }
                        span { "Upload Image" }
                    }
                }

                input {
                    class: "input-field",
                    r#type: "text",
                    placeholder: "Title your seed...",
                    value: "{title}",
                    oninput: move |e| draft.write().title = e.value(),
                }
                textarea {
                    class: "input-field seed-modal__description",
                    rows: "4",
                    placeholder: "Add a description...",
                    value: "{description}",
                    oninput: move |e| draft.write().description = e.value(),
                }

                if let Some(err) = error() {
                    div { class: "login-modal__error", "{err}" }
                }

                button {
                    class: "btn-plant",
                    disabled: !ready,
                    onclick: plant,
                    "Plant Seed"
                }
            }
        }
    }
}
