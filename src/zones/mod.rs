//! Card piles shared by the table.
//!
//! ## Key Types
//!
//! - `Pile`: Ordered stack (draw deck, discard pile), top = end
//! - `draw_with_recycle`: Deck draw that reshuffles the discard when empty

pub mod pile;

pub use pile::{draw_with_recycle, Pile};
