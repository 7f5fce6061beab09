//! Image Upload Component
//!
//! File picker that previews the chosen image and stores it as the signed-in
//! user's banner or profile picture.

use dioxus::prelude::*;
use treehouse_core::{AssetRef, AssetType};

use super::{pick_image, preview_uri};
use crate::context::use_house;

/// Upload button for one asset type
///
/// # Examples
///
/// ```ignore
/// rsx! {
///     ImageUpload {
///         asset_type: AssetType::Banner,
///         label: "Upload Banner".to_string(),
///         on_upload: move |asset: AssetRef| {
///             banner.set(Some(asset));
///         },
///     }
/// }
/// ```
#[component]
pub fn ImageUpload(
    asset_type: AssetType,
    /// Called with the stored reference once the upload succeeds
    on_upload: EventHandler<AssetRef>,
    /// Optional button label
    #[props(default = "Upload Image".to_string())]
    label: String,
    /// Show only icon (no text label)
    #[props(default = false)]
    icon_only: bool,
) -> Element {
    let house = use_house();
    let mut uploading = use_signal(|| false);
    let mut preview = use_signal(|| Option::<String>::None);
    let mut error = use_signal(|| Option::<String>::None);

    let handle_upload = move |_| {
        let Some(house) = house() else {
            error.set(Some("Still starting up".to_string()));
            return;
        };
        uploading.set(true);
        error.set(None);

        spawn(async move {
            let file = match pick_image().await {
                Ok(Some(file)) => file,
                Ok(None) => {
                    // Cancelled
                    uploading.set(false);
                    return;
                }
                Err(e) => {
                    error.set(Some(e));
                    uploading.set(false);
                    return;
                }
            };

            if let Some(uri) = preview_uri(&file).await {
                preview.set(Some(uri));
            }

            match house.upload_own(asset_type, file).await {
                Ok(asset) => {
                    tracing::info!(path = %asset.storage_path, "Uploaded {}", asset_type);
                    on_upload.call(asset);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Upload failed");
                    error.set(Some(format!("Upload failed: {e}")));
                }
            }
            preview.set(None);
            uploading.set(false);
        });
    };

    rsx! {
        div { class: "image-upload",
            if let Some(uri) = preview() {
                img { class: "image-upload__preview", src: "{uri}", alt: "Selected image" }
            }

            button {
                class: if icon_only { "image-upload-btn--icon" } else { "image-upload-btn" },
                onclick: handle_upload,
                disabled: uploading(),
                title: if icon_only { "Change image" } else { "" },
                if uploading() {
                    if icon_only { "⏳" } else { "Uploading..." }
                } else if icon_only {
                    "📷"
                } else {
                    "{label}"
                }
            }

            if let Some(err) = error() {
                div { class: "image-upload__error", "⚠️ {err}" }
            }
        }
    }
}
