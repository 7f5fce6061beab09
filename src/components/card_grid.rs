//! Card Grid Component
//!
//! Masonry columns of seed cards. Placement comes from
//! `treehouse_core::view::masonry`, so every card lands in the column that is
//! currently shortest.

use dioxus::prelude::*;
use treehouse_core::view::masonry;
use treehouse_core::Card;
use url::Url;

use crate::components::SeedCard;

#[component]
pub fn CardGrid(
    cards: Vec<Card>,
    /// Column count from the layout calculator
    columns: usize,
    /// Gap between columns and rows
    #[props(default = 16)]
    gutter: u32,
    on_image_click: EventHandler<Url>,
) -> Element {
    if cards.is_empty() {
        return rsx! {
            div { class: "card-grid__empty", "No seeds found..." }
        };
    }

    let placement = masonry::place(&cards, columns);

    rsx! {
        div {
            class: "card-grid",
            style: "gap: {gutter}px;",
            for (index, column) in placement.into_iter().enumerate() {
                // Keyed by column count so a layout change rebuilds the columns
                div {
                    key: "{columns}-{index}",
                    class: "card-grid__column",
                    style: "gap: {gutter}px;",
                    for card in column.into_iter().map(|i| cards[i].clone()) {
                        SeedCard {
                            key: "{card.id}",
                            card: card.clone(),
                            on_image_click,
                        }
                    }
                }
            }
        }
    }
}
