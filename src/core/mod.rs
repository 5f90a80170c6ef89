//! Core game types: identifiers, players, grids, phases, RNG, configuration
//! and the `Game` aggregate.
//!
//! Everything here is plain data plus the invariant-preserving helpers the
//! rules engine builds on. No operation in this module decides whose turn
//! it is or when a round ends; that lives in `rules`.

pub mod config;
pub mod grid;
pub mod ids;
pub mod phase;
pub mod player;
pub mod rng;
pub mod state;

pub use config::RulesConfig;
pub use grid::{Grid, Slot, COLUMNS, GRID_SIZE};
pub use ids::{GameId, JoinCode, PlayerId, PlayerToken};
pub use phase::{Operation, Phase};
pub use player::{Player, SetupProgress};
pub use rng::{EngineRng, GameRng, SecretRng};
pub use state::{DeckMode, FinalRound, Game, RoundRecord, Source, TableSelection};
