//! The standard deck recipe.

use super::card::Card;

/// Copies of each face value in a fresh deck.
pub const COPIES_PER_VALUE: usize = 5;

/// Cards in a fresh deck: 15 face values, 5 copies each.
pub const DECK_SIZE: usize = 75;

/// Build an unshuffled standard deck, grouped by ascending value.
#[must_use]
pub fn standard_deck() -> Vec<Card> {
    Card::all_values()
        .flat_map(|card| std::iter::repeat(card).take(COPIES_PER_VALUE))
        .collect()
}
