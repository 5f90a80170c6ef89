//! The game engine: one game's state plus the randomness that drives it.
//!
//! Operations are split by concern across sibling modules (`lobby`, `turns`,
//! `scoring`, `action`), each adding an `impl GameEngine` block. This file
//! holds construction, token resolution, the transactional commit helper and
//! the shared turn guard.
//!
//! ## Atomicity
//!
//! Every mutating operation runs through `transact`: it works on a clone of
//! the aggregate and the RNG and commits both only when the operation
//! returns `Ok`. A failed call therefore leaves the engine exactly as it was,
//! including the shuffle stream.

use rustc_hash::FxHashMap;

#[cfg(any(test, feature = "debug-tools"))]
use crate::cards::Card;
#[cfg(any(test, feature = "debug-tools"))]
use crate::core::{Grid, GRID_SIZE};
use crate::core::{EngineRng, Game, GameId, JoinCode, Operation, PlayerId, PlayerToken, RulesConfig};
use crate::error::EngineError;
use crate::events::{GameEvent, Removals};
use crate::views::{private_view, public_view, PrivateView, PublicView};

/// Owns one game and enforces its rules.
#[derive(Clone, Debug)]
pub struct GameEngine {
    pub(super) game: Game,
    pub(super) rng: EngineRng,
    pub(super) tokens: FxHashMap<PlayerToken, PlayerId>,
}

impl GameEngine {
    /// An empty lobby reachable under `code`.
    #[must_use]
    pub fn new(code: JoinCode, config: RulesConfig, mut rng: EngineRng) -> Self {
        let id = GameId::generate(&mut rng.secrets);
        Self {
            game: Game::new(id, code, config),
            rng,
            tokens: FxHashMap::default(),
        }
    }

    /// Fully reproducible engine with a generated join code.
    #[must_use]
    pub fn with_seed(config: RulesConfig, seed: u64) -> Self {
        let mut rng = EngineRng::seeded(seed);
        let code = JoinCode::generate(&mut rng.secrets, config.join_code_len);
        Self::new(code, config, rng)
    }

    /// Read-only access to the aggregate.
    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    #[must_use]
    pub fn code(&self) -> &JoinCode {
        &self.game.code
    }

    /// Resolve a bearer token to the player it was issued to.
    pub fn player_id_from_token(&self, token: &str) -> Result<PlayerId, EngineError> {
        self.tokens.get(token).cloned().ok_or(EngineError::InvalidToken)
    }

    /// Public projection of the current state.
    #[must_use]
    pub fn public_view(&self) -> PublicView {
        public_view(&self.game)
    }

    /// Private projection for one player.
    pub fn private_view(&self, player: &PlayerId) -> Result<PrivateView, EngineError> {
        private_view(&self.game, player)
    }

    /// Run `op` against a working copy and commit it only on success.
    pub(super) fn transact<T>(
        &mut self,
        op: impl FnOnce(&mut Game, &mut EngineRng) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        let mut game = self.game.clone();
        let mut rng = self.rng.clone();
        let value = op(&mut game, &mut rng)?;
        self.game = game;
        self.rng = rng;
        Ok(value)
    }

    /// Overwrite a player's grid for scripted scenarios.
    ///
    /// Each array is optional; omitted aspects keep their current state. A
    /// grid that was never dealt needs `values`. No elimination check runs
    /// and card conservation is not maintained.
    #[cfg(any(test, feature = "debug-tools"))]
    pub fn debug_set_player_grid(
        &mut self,
        player: &PlayerId,
        values: Option<[Card; GRID_SIZE]>,
        face_up: Option<[bool; GRID_SIZE]>,
        removed: Option<[bool; GRID_SIZE]>,
    ) -> Result<(), EngineError> {
        let target = self.game.player_mut(player)?;
        if !target.grid.is_dealt() {
            let cards = values.ok_or(EngineError::InvalidSelection("grid not dealt"))?;
            target.grid = Grid::dealt(cards);
        }

        for (i, slot) in target.grid.slots_mut().iter_mut().enumerate() {
            if let Some(values) = &values {
                slot.card = values[i];
            }
            if let Some(face_up) = &face_up {
                slot.face_up = face_up[i];
            }
            if let Some(removed) = &removed {
                slot.removed = removed[i];
            }
        }
        tracing::debug!(code = %self.game.code, player = %player, "grid overridden");
        Ok(())
    }
}

/// Check phase, seat and turn ownership for a turn operation.
///
/// Returns the actor's seat index.
pub(super) fn turn_guard(
    game: &Game,
    op: Operation,
    player: &PlayerId,
) -> Result<usize, EngineError> {
    op.check(game.phase)?;
    let idx = game.player_index(player)?;
    if idx != game.current_player_idx {
        return Err(EngineError::NotYourTurn);
    }
    Ok(idx)
}

/// Eliminate qualifying columns for the player at `idx`, moving the removed
/// cards to the discard pile.
pub(super) fn resolve_columns(game: &mut Game, idx: usize, events: &mut Vec<GameEvent>) -> Removals {
    let removals = game.players[idx].grid.eliminate_columns();
    for removal in &removals {
        for _ in removal.slot_indices {
            game.discard.push(removal.value);
        }
        tracing::debug!(
            code = %game.code,
            player = %game.players[idx].id,
            column = removal.column,
            value = %removal.value,
            "column removed"
        );
        events.push(GameEvent::ColumnRemoved {
            player_id: game.players[idx].id.clone(),
            removal: removal.clone(),
        });
    }
    removals
}
