//! Player grids and column elimination.
//!
//! A grid is 12 slots addressed `0..12`, laid out as three rows of four:
//!
//! ```text
//!  0  1  2  3
//!  4  5  6  7
//!  8  9 10 11
//! ```
//!
//! Columns are therefore `{0,4,8}`, `{1,5,9}`, `{2,6,10}`, `{3,7,11}`.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::error::EngineError;
use crate::events::{ColumnRemoval, Removals};

/// Slots per grid.
pub const GRID_SIZE: usize = 12;

/// The four fixed columns.
pub const COLUMNS: [[usize; 3]; 4] = [[0, 4, 8], [1, 5, 9], [2, 6, 10], [3, 7, 11]];

/// One grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub card: Card,
    pub face_up: bool,
    pub removed: bool,
}

impl Slot {
    /// A face-down, in-play slot.
    #[must_use]
    pub const fn hidden(card: Card) -> Self {
        Self {
            card,
            face_up: false,
            removed: false,
        }
    }
}

/// A player's card layout.
///
/// Empty until the first deal; exactly `GRID_SIZE` slots afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    slots: Vec<Slot>,
}

impl Grid {
    /// A grid with no cards (fresh lobby seat).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A freshly dealt grid, all cards face-down.
    #[must_use]
    pub fn dealt(cards: [Card; GRID_SIZE]) -> Self {
        Self {
            slots: cards.into_iter().map(Slot::hidden).collect(),
        }
    }

    /// Has this grid been dealt?
    #[must_use]
    pub fn is_dealt(&self) -> bool {
        self.slots.len() == GRID_SIZE
    }

    /// All slots in index order. Empty before the first deal.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Get a slot by index.
    pub fn slot(&self, index: usize) -> Result<&Slot, EngineError> {
        self.slots.get(index).ok_or(EngineError::InvalidIndex(index))
    }

    /// Require a slot that is in play and face-down.
    pub fn check_hidden(&self, index: usize) -> Result<(), EngineError> {
        let slot = self.slot(index)?;
        if slot.removed {
            return Err(EngineError::SlotUnavailable { index, reason: "slot removed" });
        }
        if slot.face_up {
            return Err(EngineError::SlotUnavailable { index, reason: "already face up" });
        }
        Ok(())
    }

    /// Require a slot that is still in play.
    pub fn check_in_play(&self, index: usize) -> Result<(), EngineError> {
        if self.slot(index)?.removed {
            return Err(EngineError::SlotUnavailable { index, reason: "slot removed" });
        }
        Ok(())
    }

    /// Flip a hidden slot face-up.
    pub fn reveal(&mut self, index: usize) -> Result<Card, EngineError> {
        self.check_hidden(index)?;
        let slot = &mut self.slots[index];
        slot.face_up = true;
        Ok(slot.card)
    }

    /// Put `card` into an in-play slot face-up, returning the card it replaced.
    pub fn replace(&mut self, index: usize, card: Card) -> Result<Card, EngineError> {
        self.check_in_play(index)?;
        let slot = &mut self.slots[index];
        let old = std::mem::replace(&mut slot.card, card);
        slot.face_up = true;
        Ok(old)
    }

    /// Remove every column whose three slots are in play, face-up and equal.
    ///
    /// Removed slots are marked removed and turned back face-down. The
    /// caller owns moving the removed cards to the discard pile.
    pub fn eliminate_columns(&mut self) -> Removals {
        let mut removals = Removals::new();
        if !self.is_dealt() {
            return removals;
        }

        for (column, indices) in COLUMNS.into_iter().enumerate() {
            let slots = indices.map(|i| self.slots[i]);
            if slots.iter().any(|s| s.removed || !s.face_up) {
                continue;
            }
            let value = slots[0].card;
            if slots.iter().any(|s| s.card != value) {
                continue;
            }

            for i in indices {
                let slot = &mut self.slots[i];
                slot.removed = true;
                slot.face_up = false;
            }
            removals.push(ColumnRemoval {
                column,
                value,
                slot_indices: indices,
            });
        }

        removals
    }

    /// Every in-play slot is face-up.
    #[must_use]
    pub fn is_fully_revealed(&self) -> bool {
        self.is_dealt() && self.slots.iter().all(|s| s.removed || s.face_up)
    }

    /// Round score: sum of in-play values, face-up or not.
    #[must_use]
    pub fn score(&self) -> i32 {
        self.in_play().map(Card::value).sum()
    }

    /// Cards still in play.
    pub fn in_play(&self) -> impl Iterator<Item = Card> + '_ {
        self.slots.iter().filter(|s| !s.removed).map(|s| s.card)
    }

    /// Slots that are face-up or removed.
    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.slots.iter().filter(|s| s.face_up || s.removed).count()
    }

    /// Slots removed by column elimination.
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.slots.iter().filter(|s| s.removed).count()
    }

    /// Overwrite slot fields directly. Debug tooling only.
    #[cfg(any(test, feature = "debug-tools"))]
    pub(crate) fn slots_mut(&mut self) -> &mut [Slot] {
        &mut self.slots
    }
}
