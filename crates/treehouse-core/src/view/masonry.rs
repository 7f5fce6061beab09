//! Masonry column placement.
//!
//! Cards are placed in order, each into the column that is currently the
//! shortest. Height is measured relative to the column width, so a phone
//! card (9:16) counts almost twice as much as a square one. Ties go to the
//! leftmost column, which keeps placement deterministic.

use crate::types::Card;

/// Assign each card (by index into `cards`) to one of `columns` columns.
///
/// Always returns `max(columns, 1)` columns, empty ones included. Within a
/// column, indices keep the input order.
pub fn place(cards: &[Card], columns: usize) -> Vec<Vec<usize>> {
    let columns = columns.max(1);
    let mut placed = vec![Vec::new(); columns];
    let mut heights = vec![0.0_f64; columns];

    for (index, card) in cards.iter().enumerate() {
        let mut shortest = 0;
        for (col, height) in heights.iter().enumerate().skip(1) {
            if *height < heights[shortest] {
                shortest = col;
            }
        }
        heights[shortest] += card.kind.relative_height();
        placed[shortest].push(index);
    }

    placed
}

/// Total relative height of each column after placement.
pub fn column_heights(cards: &[Card], placement: &[Vec<usize>]) -> Vec<f64> {
    placement
        .iter()
        .map(|col| {
            col.iter()
                .filter_map(|i| cards.get(*i))
                .map(|c| c.kind.relative_height())
                .sum()
        })
        .collect()
}
