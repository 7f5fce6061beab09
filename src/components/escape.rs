//! Window-wide Escape key listener.
//!
//! Mount an [`EscapeListener`] only while a dialog is open: the listener is
//! added to `window` on mount and removed on unmount, so Escape works no
//! matter which element has focus.

use std::sync::atomic::{AtomicU64, Ordering};

use dioxus::prelude::*;

static NEXT_LISTENER: AtomicU64 = AtomicU64::new(0);

#[component]
pub fn EscapeListener(on_escape: EventHandler<()>) -> Element {
    let id = use_hook(|| NEXT_LISTENER.fetch_add(1, Ordering::Relaxed));

    use_hook(move || {
        let mut listener = document::eval(&format!(
            r#"
            window.__treehouseEscape = window.__treehouseEscape || {{}};
            const handler = (e) => {{
                if (e.key === "Escape") {{
                    dioxus.send(true);
                }}
            }};
            window.__treehouseEscape[{id}] = handler;
            window.addEventListener("keydown", handler);
            await new Promise(() => {{}});
            "#
        ));
        spawn(async move {
            while listener.recv::<bool>().await.is_ok() {
                on_escape.call(());
            }
        });
    });

    use_drop(move || {
        let _ = document::eval(&format!(
            r#"
            const handlers = window.__treehouseEscape || {{}};
            if (handlers[{id}]) {{
                window.removeEventListener("keydown", handlers[{id}]);
                delete handlers[{id}];
            }}
            "#
        ));
    });

    rsx! {}
}
