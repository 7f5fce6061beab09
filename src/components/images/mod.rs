//! Image handling components
//!
//! Pick and upload banners or profile pictures, and show stored ones.

mod asset_image;
pub mod image_upload;

use base64::Engine;
use image::ImageFormat;
use rfd::FileDialog;
use treehouse_core::ImageFile;

pub use asset_image::AssetImage;
pub use image_upload::ImageUpload;

/// Longest edge of a local preview
const PREVIEW_EDGE: u32 = 160;

/// Ask the user for an image file and validate it.
///
/// `Ok(None)` if the dialog was cancelled.
pub(crate) async fn pick_image() -> Result<Option<ImageFile>, String> {
    // Blocking dialog off the UI thread
    let picked = tokio::task::spawn_blocking(|| {
        FileDialog::new()
            .add_filter("images", &["png", "jpg", "jpeg", "gif", "webp"])
            .set_title("Select Image")
            .pick_file()
    })
    .await
    .map_err(|e| format!("File picker error: {e}"))?;

    let Some(path) = picked else {
        return Ok(None);
    };
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| format!("Failed to read file: {e}"))?;
    let selection = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|name| (name.to_string(), bytes));
    ImageFile::from_selection(selection)
        .map(Some)
        .map_err(|e| e.to_string())
}

/// Small PNG thumbnail of `file` as a data URI. `None` if it can't be decoded.
pub(crate) async fn preview_uri(file: &ImageFile) -> Option<String> {
    let bytes = file.bytes.clone();
    tokio::task::spawn_blocking(move || thumbnail_uri(&bytes))
        .await
        .ok()
        .flatten()
}

fn thumbnail_uri(bytes: &[u8]) -> Option<String> {
    let thumb = image::load_from_memory(bytes)
        .ok()?
        .thumbnail(PREVIEW_EDGE, PREVIEW_EDGE);
    let mut buffer = Vec::new();
    thumb
        .write_to(&mut std::io::Cursor::new(&mut buffer), ImageFormat::Png)
        .ok()?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(&buffer);
    Some(format!("data:image/png;base64,{encoded}"))
}
