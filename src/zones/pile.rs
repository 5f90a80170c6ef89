//! Ordered card piles: the draw deck and the discard pile.
//!
//! The top of a pile is the end of the underlying vector. Piles are backed by
//! `im::Vector`, so cloning a whole game for a transactional update is O(1)
//! in the pile size.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::rng::GameRng;
use crate::error::EngineError;

/// An ordered stack of cards. Index 0 is the bottom.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    cards: Vector<Card>,
}

impl Pile {
    /// Create an empty pile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pile from cards listed bottom to top.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// A shuffled pile.
    #[must_use]
    pub fn shuffled(cards: Vec<Card>, rng: &mut GameRng) -> Self {
        let mut cards = cards;
        rng.shuffle(&mut cards);
        Self::from_cards(cards)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Top card, if any.
    #[must_use]
    pub fn top(&self) -> Option<Card> {
        self.cards.back().copied()
    }

    /// Put a card on top.
    pub fn push(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Take the top card.
    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop_back()
    }

    /// Iterate bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Card> + '_ {
        self.cards.iter().copied()
    }
}

/// Draw one card from `deck`, recycling `discard` if the deck is empty.
///
/// Recycling keeps the discard top in place and shuffles everything beneath
/// it into a new deck. Fails with `DeckExhausted` when the deck is empty and
/// the discard holds at most one card; nothing is moved in that case.
pub fn draw_with_recycle(
    deck: &mut Pile,
    discard: &mut Pile,
    rng: &mut GameRng,
) -> Result<Card, EngineError> {
    if deck.is_empty() {
        if discard.len() <= 1 {
            return Err(EngineError::DeckExhausted);
        }
        let top = discard.pop().ok_or(EngineError::DeckExhausted)?;
        let rest: Vec<Card> = std::mem::take(&mut discard.cards).into_iter().collect();
        *deck = Pile::shuffled(rest, rng);
        discard.push(top);
        tracing::debug!(deck = deck.len(), "recycled discard pile into deck");
    }
    deck.pop().ok_or(EngineError::DeckExhausted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(values: &[i8]) -> Vec<Card> {
        values.iter().map(|&v| Card::new(v).unwrap()).collect()
    }

    #[test]
    fn test_top_is_end() {
        let mut pile = Pile::from_cards(cards(&[1, 2, 3]));
        assert_eq!(pile.top(), Card::new(3));
        assert_eq!(pile.pop(), Card::new(3));
        pile.push(Card::new(9).unwrap());
        assert_eq!(pile.top(), Card::new(9));
        assert_eq!(pile.len(), 3);
    }

    #[test]
    fn test_draw_from_nonempty_deck() {
        let mut rng = GameRng::new(1);
        let mut deck = Pile::from_cards(cards(&[4, 5]));
        let mut discard = Pile::from_cards(cards(&[0]));

        assert_eq!(draw_with_recycle(&mut deck, &mut discard, &mut rng), Ok(Card::new(5).unwrap()));
        assert_eq!(deck.len(), 1);
        assert_eq!(discard.len(), 1);
    }

    #[test]
    fn test_recycle_keeps_discard_top() {
        let mut rng = GameRng::new(1);
        let mut deck = Pile::new();
        let mut discard = Pile::from_cards(cards(&[1, 2, 3, 4, 7]));

        let drawn = draw_with_recycle(&mut deck, &mut discard, &mut rng).unwrap();

        assert_eq!(discard.len(), 1);
        assert_eq!(discard.top(), Card::new(7));
        assert_eq!(deck.len(), 3);

        let mut all: Vec<Card> = deck.iter().chain(std::iter::once(drawn)).collect();
        all.sort();
        assert_eq!(all, cards(&[1, 2, 3, 4]));
    }

    #[test]
    fn test_exhausted_leaves_piles_untouched() {
        let mut rng = GameRng::new(1);
        let mut deck = Pile::new();
        let mut discard = Pile::from_cards(cards(&[6]));

        assert_eq!(
            draw_with_recycle(&mut deck, &mut discard, &mut rng),
            Err(EngineError::DeckExhausted)
        );
        assert!(deck.is_empty());
        assert_eq!(discard.top(), Card::new(6));

        let mut discard = Pile::new();
        assert_eq!(
            draw_with_recycle(&mut deck, &mut discard, &mut rng),
            Err(EngineError::DeckExhausted)
        );
    }
}
