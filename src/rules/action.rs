//! Uniform action interface over the typed turn operations.
//!
//! `legal_actions` enumerates exactly the calls that would currently
//! succeed for a player; `apply` dispatches one of them. Bots, tests and the
//! benchmark drive whole games through this pair.

use serde::{Deserialize, Serialize};

use crate::core::{Phase, PlayerId, GRID_SIZE};
use crate::error::EngineError;
use crate::events::GameEvent;

use super::engine::GameEngine;

/// A player move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "index", rename_all = "snake_case")]
pub enum Action {
    RevealSetupCard(usize),
    DrawFromDeck,
    TakeDiscard,
    DiscardDrawn,
    DiscardDrawnAndReveal(usize),
    SwapIntoGrid(usize),
    StartNewRound,
}

impl GameEngine {
    /// Every action `player` could successfully apply right now.
    #[must_use]
    pub fn legal_actions(&self, player: &PlayerId) -> Vec<Action> {
        let game = &self.game;
        let Ok(idx) = game.player_index(player) else {
            return Vec::new();
        };
        let seat = &game.players[idx];
        let grid = &seat.grid;
        let hidden = (0..GRID_SIZE).filter(|&i| grid.check_hidden(i).is_ok());

        match game.phase {
            Phase::SetupReveal => {
                if seat.setup.done() >= game.config.setup_reveals_per_player {
                    return Vec::new();
                }
                hidden.map(Action::RevealSetupCard).collect()
            }
            Phase::TurnChooseSource if idx == game.current_player_idx => {
                let mut actions = Vec::new();
                if seat.drawn_card.is_some() {
                    return actions;
                }
                if !game.deck.is_empty() || game.discard.len() > 1 {
                    actions.push(Action::DrawFromDeck);
                }
                if !game.discard.is_empty() {
                    actions.push(Action::TakeDiscard);
                }
                actions
            }
            Phase::TurnResolve if idx == game.current_player_idx => {
                if seat.drawn_card.is_none() {
                    return Vec::new();
                }
                let mut actions = vec![Action::DiscardDrawn];
                actions.extend(hidden.map(Action::DiscardDrawnAndReveal));
                actions.extend(
                    (0..GRID_SIZE)
                        .filter(|&i| grid.check_in_play(i).is_ok())
                        .map(Action::SwapIntoGrid),
                );
                actions
            }
            Phase::RoundOver => vec![Action::StartNewRound],
            _ => Vec::new(),
        }
    }

    /// Apply an action, returning the events it produced.
    pub fn apply(&mut self, player: &PlayerId, action: Action) -> Result<Vec<GameEvent>, EngineError> {
        tracing::trace!(code = %self.game.code, player = %player, ?action, "apply");
        let events = match action {
            Action::RevealSetupCard(i) => self.reveal_setup_card(player, i)?.events,
            Action::DrawFromDeck => self.draw_from_deck(player)?.events,
            Action::TakeDiscard => self.take_discard(player)?.events,
            Action::DiscardDrawn => self.discard_drawn(player)?.events,
            Action::DiscardDrawnAndReveal(i) => self.discard_drawn_and_reveal(player, i)?.events,
            Action::SwapIntoGrid(i) => self.swap_into_grid(player, i)?.events,
            Action::StartNewRound => self.start_new_round(player)?.events,
        };
        Ok(events)
    }
}
