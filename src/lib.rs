//! # skyjo-engine
//!
//! Rules engine for a Skyjo-style multiplayer card game: each player builds
//! a 12-card grid, flips and swaps cards to drive its score down, and
//! eliminates columns of three equal face-up cards. Rounds repeat until a
//! cumulative total reaches the game-over threshold; the lowest total wins.
//!
//! ## Design Principles
//!
//! 1. **Strict State Machine**: Every operation is legal in a fixed set of
//!    phases (`Operation::allowed_phases`) and every phase change follows
//!    one transition graph (`Phase::successors`).
//!
//! 2. **All or Nothing**: A failed call returns an `EngineError` and leaves
//!    the game untouched. Successful calls return their events explicitly.
//!
//! 3. **Injected Randomness**: Shuffles and secrets come from an `EngineRng`
//!    handed to the engine, so whole games replay from a seed.
//!
//! ## Architecture
//!
//! - **Pure Engine**: `GameEngine` does no I/O and never calls outward.
//!   The host maps wire commands to engine calls and broadcasts views.
//!
//! - **Persistent Piles**: Deck and discard use `im` vectors, making the
//!   per-call working copy cheap.
//!
//! - **Views by Recomputation**: `public_view` and `private_view` are pure
//!   functions of the aggregate.
//!
//! ## Modules
//!
//! - `core`: Ids, players, grids, phases, RNG, configuration, `Game`
//! - `cards`: Card values and the standard deck
//! - `zones`: Draw and discard piles
//! - `events`: Typed events and `Outcome`
//! - `rules`: `GameEngine` and the `Action` API
//! - `views`: Public and private projections
//! - `registry`: Join-code routing with per-game locking
//!
//! ## Example
//!
//! ```
//! use skyjo_engine::{GameEngine, Phase, RulesConfig};
//!
//! let mut engine = GameEngine::with_seed(RulesConfig::default(), 7);
//! let (ada, _) = engine.add_player("Ada").unwrap();
//! let (bo, _) = engine.add_player("Bo").unwrap();
//! engine.set_ready(&ada, true).unwrap();
//! engine.set_ready(&bo, true).unwrap();
//!
//! assert!(engine.start_game_if_ready().unwrap().value);
//! assert_eq!(engine.game().phase, Phase::SetupReveal);
//!
//! for id in [&ada, &bo] {
//!     engine.reveal_setup_card(id, 0).unwrap();
//!     engine.reveal_setup_card(id, 1).unwrap();
//! }
//! assert_eq!(engine.game().phase, Phase::TurnChooseSource);
//! ```

pub mod cards;
pub mod core;
pub mod error;
pub mod events;
pub mod registry;
pub mod rules;
pub mod views;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    DeckMode, EngineRng, FinalRound, Game, GameId, GameRng, Grid, JoinCode, Operation, Phase,
    Player, PlayerId, PlayerToken, RoundRecord, RulesConfig, SecretRng, Slot, Source,
    COLUMNS, GRID_SIZE,
};

pub use crate::cards::{standard_deck, Card, DECK_SIZE};

pub use crate::error::EngineError;

pub use crate::events::{ColumnRemoval, GameEvent, Outcome, RankedTotal, Removals};

pub use crate::rules::{Action, GameEngine};

pub use crate::views::{private_view, public_view, PrivateView, PublicView};

pub use crate::registry::{GameRegistry, SharedEngine};

pub use crate::zones::Pile;
