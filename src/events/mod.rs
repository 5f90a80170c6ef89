//! Typed engine events.
//!
//! Every state-mutating engine call returns its events alongside its value in
//! an `Outcome`. The engine keeps no event queue: whatever the caller does
//! not read from the returned `Outcome` is gone.
//!
//! `GameEvent` serialises with a `type` tag (`final_round_started`, ...) and
//! its `Display` impl is the user-facing notification text.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

use crate::cards::Card;
use crate::core::PlayerId;

/// A column removed by elimination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRemoval {
    /// Column index `0..4`.
    pub column: usize,
    /// The shared value of the three removed cards.
    pub value: Card,
    /// Grid indices of the removed slots.
    pub slot_indices: [usize; 3],
}

/// Column removals from one check. At most four columns exist.
pub type Removals = SmallVec<[ColumnRemoval; 4]>;

/// One final total in a game-over ranking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedTotal {
    pub player_id: PlayerId,
    pub total: i32,
}

/// Something observable that happened during an engine call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Lobby closed; grids dealt.
    #[serde(rename_all = "camelCase")]
    GameStarted {
        round_index: u32,
        player_count: usize,
        setup_reveals: usize,
    },

    /// A column was eliminated from a player's grid.
    #[serde(rename_all = "camelCase")]
    ColumnRemoved {
        player_id: PlayerId,
        #[serde(flatten)]
        removal: ColumnRemoval,
    },

    /// Everyone met the setup quota; turns begin.
    #[serde(rename_all = "camelCase")]
    SetupCompleted { starting_player_id: PlayerId },

    /// A player revealed their whole grid.
    #[serde(rename_all = "camelCase")]
    FinalRoundStarted {
        finisher_id: PlayerId,
        last_turns_remaining: usize,
    },

    /// A non-finisher used their last turn.
    #[serde(rename_all = "camelCase")]
    LastTurnTaken {
        player_id: PlayerId,
        last_turns_remaining: usize,
    },

    /// Round scored.
    #[serde(rename_all = "camelCase")]
    RoundEnded {
        round_index: u32,
        scores: BTreeMap<PlayerId, i32>,
        finisher_id: PlayerId,
        finisher_doubled: bool,
    },

    /// Next round dealt.
    #[serde(rename_all = "camelCase")]
    NewRoundStarted {
        round_index: u32,
        starting_player_id: PlayerId,
        total_scores: BTreeMap<PlayerId, i32>,
    },

    /// Threshold reached.
    #[serde(rename_all = "camelCase")]
    GameOver {
        threshold: i32,
        winner_id: PlayerId,
        ranked_totals: Vec<RankedTotal>,
        total_scores: BTreeMap<PlayerId, i32>,
    },
}

impl GameEvent {
    /// Wire name of the event kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            GameEvent::GameStarted { .. } => "game_started",
            GameEvent::ColumnRemoved { .. } => "column_removed",
            GameEvent::SetupCompleted { .. } => "setup_completed",
            GameEvent::FinalRoundStarted { .. } => "final_round_started",
            GameEvent::LastTurnTaken { .. } => "last_turn_taken",
            GameEvent::RoundEnded { .. } => "round_ended",
            GameEvent::NewRoundStarted { .. } => "new_round_started",
            GameEvent::GameOver { .. } => "game_over",
        }
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::GameStarted { setup_reveals, .. } => {
                write!(f, "Game started. Each player reveals {} cards.", setup_reveals)
            }
            GameEvent::ColumnRemoved { player_id, removal } => write!(
                f,
                "Column removed for {} (value {})",
                player_id, removal.value
            ),
            GameEvent::SetupCompleted { .. } => write!(f, "Setup done. Turns can begin."),
            GameEvent::FinalRoundStarted { .. } => {
                write!(f, "Final round started! All other players get one last turn.")
            }
            GameEvent::LastTurnTaken { last_turns_remaining, .. } => {
                write!(f, "Last turn taken. Remaining: {}", last_turns_remaining)
            }
            GameEvent::RoundEnded { .. } => write!(f, "Round ended. Scores calculated."),
            GameEvent::NewRoundStarted { round_index, .. } => {
                write!(f, "New round started (Round {}).", round_index)
            }
            GameEvent::GameOver { .. } => write!(f, "Game over! Threshold reached."),
        }
    }
}

/// Result of a successful state-mutating call: its value plus the events it
/// produced, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome<T> {
    pub value: T,
    pub events: Vec<GameEvent>,
}

impl<T> Outcome<T> {
    /// An outcome with no events.
    pub fn quiet(value: T) -> Self {
        Self {
            value,
            events: Vec::new(),
        }
    }

    /// Check whether an event of `kind` was produced.
    #[must_use]
    pub fn has_event(&self, kind: &str) -> bool {
        self.events.iter().any(|e| e.kind() == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> PlayerId {
        PlayerId::from(s)
    }

    #[test]
    fn test_event_kind_matches_serde_tag() {
        let event = GameEvent::LastTurnTaken {
            player_id: pid("p2"),
            last_turns_remaining: 1,
        };
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], event.kind());
        assert_eq!(json["playerId"], "p2");
        assert_eq!(json["lastTurnsRemaining"], 1);
    }

    #[test]
    fn test_column_removed_flattens_removal() {
        let event = GameEvent::ColumnRemoved {
            player_id: pid("p1"),
            removal: ColumnRemoval {
                column: 2,
                value: Card::new(5).unwrap(),
                slot_indices: [2, 6, 10],
            },
        };
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "column_removed");
        assert_eq!(json["column"], 2);
        assert_eq!(json["value"], 5);
        assert_eq!(json["slotIndices"], serde_json::json!([2, 6, 10]));
    }

    #[test]
    fn test_notification_text() {
        let event = GameEvent::NewRoundStarted {
            round_index: 3,
            starting_player_id: pid("p1"),
            total_scores: BTreeMap::new(),
        };
        assert_eq!(event.to_string(), "New round started (Round 3).");

        let event = GameEvent::LastTurnTaken {
            player_id: pid("p1"),
            last_turns_remaining: 0,
        };
        assert_eq!(event.to_string(), "Last turn taken. Remaining: 0");
    }

    #[test]
    fn test_outcome_helpers() {
        let outcome = Outcome {
            value: 3,
            events: vec![GameEvent::SetupCompleted {
                starting_player_id: pid("p1"),
            }],
        };
        assert!(outcome.has_event("setup_completed"));
        assert!(!outcome.has_event("round_ended"));

        assert_eq!(outcome.value, 3);

        assert!(Outcome::quiet(()).events.is_empty());
    }
}
