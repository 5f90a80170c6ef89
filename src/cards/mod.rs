//! Card model: values and the standard deck.
//!
//! ## Key Types
//!
//! - `Card`: A face value in `-2..=12`
//! - `standard_deck`: The 75-card recipe (5 copies of each value)

pub mod card;
pub mod deck;

pub use card::Card;
pub use deck::{standard_deck, COPIES_PER_VALUE, DECK_SIZE};
