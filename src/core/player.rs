//! Seated players and their per-round state.
//!
//! ## Player
//!
//! Identity (`id`, `name`), lobby readiness, the grid, the single card held
//! between draw and resolve, and setup-reveal progress.
//!
//! ## SetupProgress
//!
//! Which slots a player flipped during setup and when they met the quota.
//! The completion stamp is a strictly increasing counter owned by the game.

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::ids::PlayerId;
use crate::cards::Card;

/// Setup-phase reveal bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupProgress {
    /// Grid indices revealed during setup, in reveal order.
    pub revealed: Vec<usize>,

    /// Order in which this player met the quota (1 = first). `None` until then.
    pub completion_order: Option<u32>,
}

impl SetupProgress {
    /// Reveals done so far.
    #[must_use]
    pub fn done(&self) -> usize {
        self.revealed.len()
    }

    /// Completion order for tie-breaks. Unfinished players sort last.
    #[must_use]
    pub fn completion_rank(&self) -> u32 {
        self.completion_order.unwrap_or(u32::MAX)
    }
}

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,

    /// Lobby readiness. Ignored after the game starts.
    pub ready: bool,

    pub grid: Grid,

    /// Card taken from deck or discard, awaiting resolution.
    pub drawn_card: Option<Card>,

    pub setup: SetupProgress,
}

impl Player {
    /// A fresh lobby seat with an empty grid.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ready: false,
            grid: Grid::empty(),
            drawn_card: None,
            setup: SetupProgress::default(),
        }
    }

    /// Replace all round-scoped state with a freshly dealt grid.
    pub fn reset_for_round(&mut self, grid: Grid) {
        self.grid = grid;
        self.drawn_card = None;
        self.setup = SetupProgress::default();
    }

    /// Sum of the values at the first `quota` setup reveals.
    #[must_use]
    pub fn setup_reveal_sum(&self, quota: usize) -> i32 {
        self.setup
            .revealed
            .iter()
            .take(quota)
            .filter_map(|&i| self.grid.slot(i).ok())
            .map(|s| s.card.value())
            .sum()
    }
}
