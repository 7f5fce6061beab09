//! Rotating placeholder text for the header search box.

use rand::Rng;

/// Shown when no message can be picked
pub const FALLBACK_PLACEHOLDER: &str = "Search Treehouse...";

/// Seconds between placeholder changes while the box is not focused
pub const ROTATE_EVERY_SECS: u64 = 45;

pub const SEARCH_PLACEHOLDERS: [&str; 26] = [
    "Chase a trail of breadcrumbs 🥖",
    "Plant your weirdest ideas 🌱",
    "Dig up something cool 🪄",
    "Enter the rabbit hole 🕳️",
    "What’s blooming in your mind?",
    "Summon something strange 🔮",
    "Find your creative frequency 💳",
    "Whistle to the void 🎶",
    "Scroll and grow 🌱",
    "Make some prompt magic ✨",
    "What weird seed will you plant?",
    "Let’s go down the weird treehole 🕳️🌲",
    "Search your future memory 🔁",
    "Spin your cosmic yarn 🧶",
    "Tease the fates 🔮",
    "Turn your brain upside-down 🤹",
    "Embrace your silly side 🦄",
    "Spoil your curiosity 🍿",
    "Unlock the hidden door 🗝️",
    "Tiptoe through your daydreams 💭",
    "Flirt with chaos 🌀",
    "Brew a new obsession ☕",
    "Travel to Idea-land ✈️",
    "Swing from branch to branch 🙉",
    "Discover whats possible 🔍",
    "lets get funky 🪩🕺",
];

/// A random placeholder that differs from `current`.
pub fn next_placeholder<R: Rng + ?Sized>(current: Option<&str>, rng: &mut R) -> &'static str {
    let candidates: Vec<&'static str> = SEARCH_PLACEHOLDERS
        .iter()
        .copied()
        .filter(|p| Some(*p) != current)
        .collect();
    if candidates.is_empty() {
        return FALLBACK_PLACEHOLDER;
    }
    candidates[rng.random_range(0..candidates.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_never_repeats_current() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut current = next_placeholder(None, &mut rng);
        for _ in 0..200 {
            let next = next_placeholder(Some(current), &mut rng);
            assert_ne!(next, current);
            assert!(SEARCH_PLACEHOLDERS.contains(&next));
            current = next;
        }
    }
}
