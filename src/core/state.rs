//! The game aggregate.
//!
//! `Game` holds everything one table needs: phase, seats, piles, turn
//! pointer, final-round status and score sheets. It is plain data with
//! invariant-preserving helpers; the rules that drive it live in
//! `rules::GameEngine`.
//!
//! ## Invariants
//!
//! - `current_player_idx < players.len()` once any player is seated
//! - every grid holds 12 slots after the first deal
//! - during a round, deck + discard + held cards + in-play grid cards is
//!   exactly the standard deck (see `card_census`)
//! - `final_round.is_some()` iff the round is in final-round mode; the
//!   finisher and remaining-turn count cannot exist without each other

use im::Vector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::config::RulesConfig;
use super::ids::{GameId, JoinCode, PlayerId};
use super::phase::Phase;
use super::player::Player;
use crate::cards::Card;
use crate::error::EngineError;
use crate::events::RankedTotal;
use crate::zones::Pile;

/// Final-round status: who finished and how many last turns remain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalRound {
    pub finisher_id: PlayerId,
    pub last_turns_remaining: usize,
}

/// Where the table display shows the current player reaching for a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Deck,
    Discard,
}

/// What the current player intends to do with a deck draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckMode {
    #[default]
    Swap,
    Reveal,
}

/// Transient table cursor. Purely presentational; reset every turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSelection {
    pub source: Option<Source>,
    pub deck_mode: DeckMode,
}

/// Scores of one completed round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    pub round_index: u32,
    pub scores: BTreeMap<PlayerId, i32>,
    pub finisher_id: Option<PlayerId>,
    pub finisher_doubled: bool,
}

/// Full state of one game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    pub id: GameId,
    pub code: JoinCode,
    pub config: RulesConfig,

    pub phase: Phase,

    /// Seats in join order.
    pub players: Vec<Player>,

    /// Seat index of the player to act.
    pub current_player_idx: usize,

    /// Draw pile (top = end).
    pub deck: Pile,

    /// Discard pile (top = end).
    pub discard: Pile,

    /// Deck draw shown to the table while it is being resolved.
    pub table_drawn_card: Option<Card>,

    pub table: TableSelection,

    pub final_round: Option<FinalRound>,

    /// Scores of the last completed round.
    pub round_scores: BTreeMap<PlayerId, i32>,
    pub finisher_doubled: bool,
    pub last_round_finisher: Option<PlayerId>,

    /// Cumulative totals. Empty until the first deal.
    pub total_scores: BTreeMap<PlayerId, i32>,

    /// 1-based round counter.
    pub round_index: u32,
    pub round_history: Vector<RoundRecord>,

    /// Last setup completion stamp handed out this round.
    pub setup_done_counter: u32,
}

impl Game {
    /// An empty lobby.
    #[must_use]
    pub fn new(id: GameId, code: JoinCode, config: RulesConfig) -> Self {
        Self {
            id,
            code,
            config,
            phase: Phase::Lobby,
            players: Vec::new(),
            current_player_idx: 0,
            deck: Pile::new(),
            discard: Pile::new(),
            table_drawn_card: None,
            table: TableSelection::default(),
            final_round: None,
            round_scores: BTreeMap::new(),
            finisher_doubled: false,
            last_round_finisher: None,
            total_scores: BTreeMap::new(),
            round_index: 1,
            round_history: Vector::new(),
            setup_done_counter: 0,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Seat index of a player.
    pub fn player_index(&self, id: &PlayerId) -> Result<usize, EngineError> {
        self.players
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| EngineError::PlayerNotFound(id.clone()))
    }

    /// Look up a player.
    pub fn player(&self, id: &PlayerId) -> Result<&Player, EngineError> {
        self.players
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| EngineError::PlayerNotFound(id.clone()))
    }

    /// Look up a player mutably.
    pub fn player_mut(&mut self, id: &PlayerId) -> Result<&mut Player, EngineError> {
        self.players
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| EngineError::PlayerNotFound(id.clone()))
    }

    /// The player to act. `None` while in the lobby.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        if self.phase == Phase::Lobby {
            return None;
        }
        self.players.get(self.current_player_idx)
    }

    /// Id of the player to act. `None` while in the lobby.
    #[must_use]
    pub fn current_player_id(&self) -> Option<&PlayerId> {
        self.current_player().map(|p| &p.id)
    }

    /// Move to `next`, rejecting anything outside the transition graph.
    pub fn transition(&mut self, next: Phase) -> Result<(), EngineError> {
        if !self.phase.can_transition_to(next) {
            return Err(EngineError::IllegalTransition {
                from: self.phase,
                to: next,
            });
        }
        self.phase = next;
        Ok(())
    }

    /// Did every player meet the setup quota?
    #[must_use]
    pub fn all_setup_done(&self) -> bool {
        let quota = self.config.setup_reveals_per_player;
        self.players.iter().all(|p| p.setup.done() >= quota)
    }

    /// Every card currently in a round location: deck, discard, held cards
    /// and in-play grid slots.
    #[must_use]
    pub fn card_census(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.deck.iter().chain(self.discard.iter()).collect();
        for player in &self.players {
            cards.extend(player.grid.in_play());
            cards.extend(player.drawn_card);
        }
        cards
    }

    /// Totals sorted ascending, ties broken by player id.
    #[must_use]
    pub fn ranking(&self) -> Vec<RankedTotal> {
        let mut ranked: Vec<RankedTotal> = self
            .total_scores
            .iter()
            .map(|(player_id, &total)| RankedTotal {
                player_id: player_id.clone(),
                total,
            })
            .collect();
        ranked.sort_by(|a, b| a.total.cmp(&b.total).then_with(|| a.player_id.cmp(&b.player_id)));
        ranked
    }

    /// Lowest total wins.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.ranking().into_iter().next().map(|r| r.player_id)
    }

    /// Reset the transient table cursor.
    pub fn reset_table_selection(&mut self) {
        self.table = TableSelection::default();
    }
}
