//! Asset Image
//!
//! Shows a stored banner or profile picture. The bytes are read through the
//! asset store and inlined as a data URI, so the webview never needs access
//! to the storage location itself.

use base64::Engine;
use dioxus::prelude::*;
use treehouse_core::AssetRef;

use crate::context::use_house;

/// Render a stored asset, or `fallback` while loading or when it can't be read.
///
/// Give it a `key` built from the cache-busted URL so a fresh upload remounts
/// it and the new bytes are read.
///
/// # Example
///
/// ```ignore
/// rsx! {
///     AssetImage {
///         key: "{asset.cache_busted(now)}",
///         asset: asset.clone(),
///         alt: "Profile banner".to_string(),
///         class: "profile-banner__img".to_string(),
///         fallback: rsx! { div { class: "profile-banner__fallback" } },
///     }
/// }
/// ```
#[component]
pub fn AssetImage(
    asset: AssetRef,
    alt: String,
    #[props(default = String::new())] class: String,
    fallback: Element,
    /// Told why the fallback is showing when the bytes couldn't be read
    on_error: Option<EventHandler<String>>,
) -> Element {
    let house = use_house();
    let mut data_uri = use_signal(|| Option::<String>::None);

    use_effect(move || {
        let Some(house) = house() else {
            return;
        };
        let asset = asset.clone();
        spawn(async move {
            match house.assets().load_bytes(&asset).await {
                Ok(Some(bytes)) => data_uri.set(Some(to_data_uri(&bytes))),
                Ok(None) => {
                    tracing::warn!(path = %asset.storage_path, "Asset vanished, using fallback");
                    if let Some(on_error) = on_error {
                        on_error.call(format!("{} is no longer stored", asset.file_name()));
                    }
                }
                Err(e) => {
                    tracing::warn!(path = %asset.storage_path, error = %e, "Failed to load asset");
                    if let Some(on_error) = on_error {
                        on_error.call(e.to_string());
                    }
                }
            }
        });
    });

    match data_uri() {
        Some(uri) => rsx! {
            img { class: "{class}", src: "{uri}", alt: "{alt}" }
        },
        None => fallback,
    }
}

fn to_data_uri(bytes: &[u8]) -> String {
    let mime = image::guess_format(bytes)
        .map(|f| f.to_mime_type())
        .unwrap_or("image/png");
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{encoded}")
}
