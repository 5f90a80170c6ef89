//! One player's private view.
//!
//! Redaction is structural: a slot carries a value only when it is face-up
//! for its owner, or when the round is finished and every in-play slot is
//! shown for scoring. Removed slots never carry a value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::cards::Card;
use crate::core::{Game, Grid, Phase, PlayerId, GRID_SIZE};
use crate::error::EngineError;
use crate::events::RankedTotal;

/// A grid slot as its owner sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    pub value: Option<Card>,
    pub is_face_up: bool,
    pub is_removed: bool,
}

impl SlotView {
    const HIDDEN: SlotView = SlotView {
        value: None,
        is_face_up: false,
        is_removed: false,
    };
}

/// The requesting player's own state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfView {
    pub player_id: PlayerId,
    pub name: String,
    pub drawn_card: Option<Card>,
    pub setup_reveals_done: usize,
    pub grid: Vec<SlotView>,
}

/// Game-level fields repeated in the private view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMeta {
    pub phase: Phase,
    pub current_player_id: Option<PlayerId>,
    pub final_round: bool,
    pub finisher_id: Option<PlayerId>,
    pub last_turns_remaining: usize,
    pub round_index: u32,
    pub total_scores: BTreeMap<PlayerId, i32>,
    pub winner_id: Option<PlayerId>,
    pub ranked_totals: Option<Vec<RankedTotal>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateView {
    pub me: SelfView,
    pub game_meta: GameMeta,
}

/// Project `player`'s private view.
pub fn private_view(game: &Game, player: &PlayerId) -> Result<PrivateView, EngineError> {
    let seat = game.player(player)?;
    let (final_round, finisher_id, last_turns_remaining) = super::final_round_status(game);
    let (winner_id, ranked_totals) = super::results(game);

    Ok(PrivateView {
        me: SelfView {
            player_id: seat.id.clone(),
            name: seat.name.clone(),
            drawn_card: seat.drawn_card,
            setup_reveals_done: seat.setup.done(),
            grid: redact(&seat.grid, game.phase.is_round_finished()),
        },
        game_meta: GameMeta {
            phase: game.phase,
            current_player_id: game.current_player_id().cloned(),
            final_round,
            finisher_id,
            last_turns_remaining,
            round_index: game.round_index,
            total_scores: game.total_scores.clone(),
            winner_id,
            ranked_totals,
        },
    })
}

fn redact(grid: &Grid, show_all: bool) -> Vec<SlotView> {
    if !grid.is_dealt() {
        return vec![SlotView::HIDDEN; GRID_SIZE];
    }

    grid.slots()
        .iter()
        .map(|slot| {
            if slot.removed {
                SlotView {
                    value: None,
                    is_face_up: false,
                    is_removed: true,
                }
            } else if show_all || slot.face_up {
                SlotView {
                    value: Some(slot.card),
                    is_face_up: true,
                    is_removed: false,
                }
            } else {
                SlotView::HIDDEN
            }
        })
        .collect()
}
