//! Engine failure kinds.
//!
//! Every engine operation either succeeds or returns one of these variants.
//! A failed call never leaves a partially mutated game behind.

use thiserror::Error;

use crate::core::{Operation, Phase, PlayerId};

/// Errors that can occur while driving a game.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Operation not legal in the current phase.
    #[error("{operation} is not allowed in phase {actual} (expected one of {expected:?})")]
    PhaseError {
        operation: Operation,
        expected: &'static [Phase],
        actual: Phase,
    },

    /// A player tried to join after the lobby closed.
    #[error("cannot join: game already started (phase {phase})")]
    JoinAfterStart { phase: Phase },

    /// The lobby already seats the maximum number of players.
    #[error("table is full ({max} players)")]
    TableFull { max: usize },

    /// The acting player is not the player whose turn it is.
    #[error("not your turn")]
    NotYourTurn,

    /// Grid index outside `0..12`.
    #[error("invalid grid index {0}")]
    InvalidIndex(usize),

    /// Slot is removed, or already face-up where a hidden slot is required.
    #[error("slot {index} unavailable: {reason}")]
    SlotUnavailable { index: usize, reason: &'static str },

    /// Player already revealed the per-player setup quota.
    #[error("setup quota of {quota} reveals already met")]
    QuotaExceeded { quota: usize },

    /// Player already holds a drawn card.
    #[error("already holding a drawn card")]
    AlreadyHoldingCard,

    /// Player has no drawn card to resolve.
    #[error("no drawn card to resolve")]
    NoHeldCard,

    /// Discard pile is empty.
    #[error("discard pile is empty")]
    DiscardEmpty,

    /// Deck is empty and the discard pile cannot be recycled.
    #[error("no cards left to draw")]
    DeckExhausted,

    /// Table selection request is inconsistent with the current selection.
    #[error("invalid table selection: {0}")]
    InvalidSelection(&'static str),

    /// No seated player has this id.
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    /// Token does not belong to any player of this game.
    #[error("invalid token")]
    InvalidToken,

    /// No game is registered under this join code.
    #[error("game {0} not found")]
    GameNotFound(String),

    /// Every join code of the configured length is taken.
    #[error("no free join codes of length {len}")]
    JoinCodesExhausted { len: usize },

    /// Rules configuration rejected.
    #[error("invalid rules config: {0}")]
    InvalidConfig(&'static str),

    /// Phase change outside the transition graph.
    #[error("illegal phase transition {from} -> {to}")]
    IllegalTransition { from: Phase, to: Phase },
}

impl EngineError {
    /// True when the failure means "the current phase forbids this action".
    #[must_use]
    pub fn is_phase_error(&self) -> bool {
        matches!(
            self,
            EngineError::PhaseError { .. } | EngineError::JoinAfterStart { .. }
        )
    }
}
