//! Card values.
//!
//! Cards carry nothing but their face value. The engine never needs to tell
//! two cards of equal value apart, so a card is just a validated integer.

use serde::{Deserialize, Serialize};

/// A single card: its face value in `-2..=12`.
///
/// ```
/// use skyjo_engine::cards::Card;
///
/// let card = Card::new(-2).unwrap();
/// assert_eq!(card.value(), -2);
/// assert!(Card::new(13).is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card(i8);

impl Card {
    /// Lowest face value.
    pub const MIN: i8 = -2;
    /// Highest face value.
    pub const MAX: i8 = 12;

    /// Create a card, or `None` if the value is outside the deck's domain.
    #[must_use]
    pub const fn new(value: i8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Face value as a score contribution.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0 as i32
    }

    /// Every face value in ascending order.
    pub fn all_values() -> impl Iterator<Item = Card> {
        (Self::MIN..=Self::MAX).map(Card)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
