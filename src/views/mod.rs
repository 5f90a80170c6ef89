//! Read-only projections of a game.
//!
//! Both views are pure functions of the aggregate, rebuilt on every call.
//! Nothing is cached, so there is nothing to invalidate.
//!
//! - `public_view`: safe to broadcast to everyone at the table
//! - `private_view`: one player's own grid and held card, hidden values
//!   redacted

mod private;
mod public;

pub use private::{private_view, GameMeta, PrivateView, SelfView, SlotView};
pub use public::{public_view, PlayerSummary, PublicView};

use crate::core::{Game, Phase, PlayerId};
use crate::events::RankedTotal;

/// Final-round fields shared by both views.
fn final_round_status(game: &Game) -> (bool, Option<PlayerId>, usize) {
    match &game.final_round {
        Some(f) => (true, Some(f.finisher_id.clone()), f.last_turns_remaining),
        None => (false, None, 0),
    }
}

/// Winner and ranking, only once the game is over.
fn results(game: &Game) -> (Option<PlayerId>, Option<Vec<RankedTotal>>) {
    if game.phase == Phase::GameOver {
        (game.winner(), Some(game.ranking()))
    } else {
        (None, None)
    }
}
