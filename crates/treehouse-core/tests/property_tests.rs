//! Property-based tests for key sanitizing, layout and masonry placement

use proptest::prelude::*;
use treehouse_core::types::sanitize;
use treehouse_core::view::masonry;
use treehouse_core::{Card, CardKind, GridLayout, ScrollController};

// ============================================================================
// Strategy Generators
// ============================================================================

fn kind_strategy() -> impl Strategy<Value = CardKind> {
    prop::sample::select(CardKind::ALL.to_vec())
}

fn cards_strategy(max: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(kind_strategy(), 0..max).prop_map(|kinds| {
        kinds
            .into_iter()
            .enumerate()
            .map(|(i, kind)| {
                Card::new(format!("c{i}"), kind, &format!("https://img.test/{i}.jpg"))
                    .expect("valid card")
            })
            .collect()
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Sanitizing twice is the same as sanitizing once
    #[test]
    fn sanitize_is_idempotent(s in ".{0,64}") {
        let once = sanitize(&s);
        prop_assert_eq!(sanitize(&once), once.clone());
    }

    /// One output character per input character, all in [A-Za-z0-9_]
    #[test]
    fn sanitize_output_alphabet(s in ".{0,64}") {
        let out = sanitize(&s);
        prop_assert_eq!(out.chars().count(), s.chars().count());
        prop_assert!(out.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }

    /// Column count never decreases as the viewport widens, and is at least 1
    #[test]
    fn layout_is_monotonic(a in -100.0f64..4000.0, b in -100.0f64..4000.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let small = GridLayout::for_width(lo);
        let large = GridLayout::for_width(hi);
        prop_assert!(small.columns >= 1);
        prop_assert!(small.columns <= large.columns);
        prop_assert!(small.gutter_px <= large.gutter_px);
    }

    /// Every card lands in exactly one column, in input order within the column
    #[test]
    fn masonry_places_each_card_once(cards in cards_strategy(60), columns in 0usize..8) {
        let placement = masonry::place(&cards, columns);
        prop_assert_eq!(placement.len(), columns.max(1));

        let mut seen: Vec<usize> = placement.concat();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..cards.len()).collect::<Vec<_>>());

        for column in &placement {
            prop_assert!(column.windows(2).all(|w| w[0] < w[1]));
        }
    }

    /// Greedy placement keeps columns within one tallest card of each other
    #[test]
    fn masonry_stays_balanced(cards in cards_strategy(60), columns in 1usize..6) {
        let placement = masonry::place(&cards, columns);
        let heights = masonry::column_heights(&cards, &placement);
        let max = heights.iter().cloned().fold(0.0, f64::max);
        let min = heights.iter().cloned().fold(f64::INFINITY, f64::min);
        let tallest = CardKind::Phone.relative_height();
        prop_assert!(max - min <= tallest + 1e-9, "heights {:?}", heights);
    }

    /// Any number of triggers while a page is loading start no further loads
    #[test]
    fn scroll_single_flight(triggers in 1usize..50) {
        let mut controller = ScrollController::new(10);
        let first = controller.on_sentinel(true);
        prop_assert!(first.is_some());
        let extra = (0..triggers).filter_map(|_| controller.on_sentinel(true)).count();
        prop_assert_eq!(extra, 0);
    }
}
