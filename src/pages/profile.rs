//! Profile Page
//!
//! Banner, profile picture, name and a grid of posts for one storage key.
//! `/profile` shows the signed-in user; `/profile/:user_key` anyone. Upload
//! controls only appear when the viewed key is the signed-in user's own.

use chrono::Utc;
use dioxus::prelude::*;
use treehouse_core::{AssetRef, AssetType, GridLayout, LightboxState, UserKey};
use url::Url;

use crate::components::images::{AssetImage, ImageUpload};
use crate::components::{CardGrid, Header, Lightbox, LoginModal, Notice};
use crate::context::{use_house, use_session};

/// An asset plus the cache-busted URL it was fetched under
#[derive(Clone, PartialEq)]
struct Shown {
    asset: AssetRef,
    url: String,
}

impl Shown {
    fn new(asset: AssetRef) -> Self {
        let url = asset.cache_busted(Utc::now());
        Self { asset, url }
    }
}

/// The signed-in user's own profile
#[component]
pub fn Profile() -> Element {
    let session = use_session();
    let mut show_login = use_signal(|| false);

    match session() {
        Some(me) => rsx! {
            ProfileView {
                key: "{me.sanitized_key}",
                user_key: me.sanitized_key.as_str().to_string(),
            }
        },
        None => rsx! {
            div { class: "profile-page",
                Header {}
                div { class: "profile-signin",
                    p { "Sign in to see your profile." }
                    button {
                        class: "btn-primary",
                        onclick: move |_| show_login.set(true),
                        "Sign in"
                    }
                }
                LoginModal {
                    show: show_login(),
                    on_close: move |_| show_login.set(false),
                }
            }
        },
    }
}

/// Anyone's profile by storage key
#[component]
pub fn UserProfile(user_key: String) -> Element {
    // Keyed so navigating between profiles starts from a clean view
    rsx! {
        ProfileView { key: "{user_key}", user_key: user_key.clone() }
    }
}

#[component]
fn ProfileView(user_key: String) -> Element {
    let house = use_house();
    let session = use_session();
    let mut lightbox = use_signal(LightboxState::default);
    let mut width = use_signal(|| 1200.0);

    let mut banner: Signal<Option<Shown>> = use_signal(|| None);
    let mut avatar: Signal<Option<Shown>> = use_signal(|| None);
    let mut loading = use_signal(|| true);
    let mut notice: Signal<Option<String>> = use_signal(|| None);

    let owner = UserKey::parse(&user_key);
    let is_owner = session().is_some_and(|me| me.owns(&owner));
    let layout = use_memo(move || GridLayout::for_width(width()));

    let viewed = owner.clone();
    use_effect(move || {
        let owner = viewed.clone();
        let Some(house) = house() else {
            return;
        };
        loading.set(true);
        spawn(async move {
            match house.current_asset(&owner, AssetType::Banner).await {
                Ok(found) => banner.set(found.map(Shown::new)),
                Err(e) => {
                    tracing::warn!(error = %e, "Using fallback banner");
                    notice.set(Some(format!("Couldn't load the banner: {e}")));
                }
            }
            match house.current_asset(&owner, AssetType::ProfilePic).await {
                Ok(found) => avatar.set(found.map(Shown::new)),
                Err(e) => {
                    tracing::warn!(error = %e, "Using fallback profile picture");
                    notice.set(Some(format!("Couldn't load the profile picture: {e}")));
                }
            }
            loading.set(false);
        });
    });

    let posts = house().map(|h| h.profile_posts()).unwrap_or_default();
    let hits: u32 = posts.iter().filter_map(|c| c.engagement).map(|e| e.hits).sum();
    let branches: u32 = posts
        .iter()
        .filter_map(|c| c.engagement)
        .map(|e| e.branches)
        .sum();
    let seed_count = posts.len();

    let me = session().filter(|_| is_owner);
    let name = me
        .as_ref()
        .map(|m| m.label().to_string())
        .unwrap_or_else(|| owner.to_string());
    // Uploaded picture, then the identity provider's, then the initial
    let provider_avatar = me.as_ref().and_then(|m| m.avatar_url.clone());
    let initial = name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();

    rsx! {
        div { class: "profile-page",
            onresize: move |evt| {
                if let Ok(size) = evt.data().get_content_box_size() {
                    width.set(size.width);
                }
            },

            Header {}

            if let Some(message) = notice() {
                Notice {
                    message,
                    on_dismiss: move |_| notice.set(None),
                }
            }

            section { class: "profile-banner",
                if loading() {
                    div { class: "profile-banner__loading" }
                } else if let Some(shown) = banner() {
                    AssetImage {
                        key: "{shown.url}",
                        asset: shown.asset.clone(),
                        alt: "Profile Banner".to_string(),
                        class: "profile-banner__img".to_string(),
                        fallback: rsx! { div { class: "profile-banner__fallback" } },
                        on_error: move |e: String| notice.set(Some(format!("Couldn't show the banner: {e}"))),
                    }
                } else {
                    div { class: "profile-banner__fallback" }
                }

                if is_owner {
                    div { class: "profile-banner__upload",
                        ImageUpload {
                            asset_type: AssetType::Banner,
                            label: "Upload Banner".to_string(),
                            on_upload: move |asset: AssetRef| banner.set(Some(Shown::new(asset))),
                        }
                    }
                }
            }

            section { class: "profile-header",
                div { class: "profile-avatar",
                    if let Some(shown) = avatar() {
                        AssetImage {
                            key: "{shown.url}",
                            asset: shown.asset.clone(),
                            alt: "Profile".to_string(),
                            class: "profile-avatar__img".to_string(),
                            fallback: rsx! { span { class: "profile-avatar__initial", "{initial}" } },
                            on_error: move |e: String| {
                                notice.set(Some(format!("Couldn't show the profile picture: {e}")))
                            },
                        }
                    } else if let Some(url) = &provider_avatar {
                        img { class: "profile-avatar__img", src: "{url}", alt: "Profile" }
                    } else {
                        span { class: "profile-avatar__initial", "{initial}" }
                    }

                    if is_owner {
                        div { class: "profile-avatar__upload",
                            ImageUpload {
                                asset_type: AssetType::ProfilePic,
                                icon_only: true,
                                on_upload: move |asset: AssetRef| avatar.set(Some(Shown::new(asset))),
                            }
                        }
                    }
                }

                div { class: "profile-identity",
                    h2 { class: "profile-name", "@{name}" }
                    div { class: "profile-stats",
                        span { "🌱 {hits} hits" }
                        span { "🌿 {branches} branches" }
                        span { "🌳 {seed_count} seeds" }
                    }
                }
            }

            section { class: "profile-posts",
                CardGrid {
                    cards: posts.clone(),
                    columns: layout().columns,
                    gutter: layout().gutter_px,
                    on_image_click: move |url: Url| lightbox.write().open(url),
                }
            }

            Lightbox { state: lightbox }
        }
    }
}
