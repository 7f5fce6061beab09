use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use treehouse_core::feed::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use treehouse_core::Card;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    #[serde(default)]
    pub page: u32,
    pub size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct FeedPage {
    pub cards: Vec<Card>,
    pub page: u32,
    /// `None` once the feed has no more cards
    pub next_page: Option<u32>,
}

pub async fn feed_page(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> ApiResult<Json<FeedPage>> {
    let size = query.size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let cards = state.house.feed_page(query.page, size).await?;
    let next_page = (!cards.is_empty()).then(|| query.page.saturating_add(1));
    Ok(Json(FeedPage {
        cards,
        page: query.page,
        next_page,
    }))
}
