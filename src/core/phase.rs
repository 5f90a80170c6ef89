//! Game phases and the operation legality table.
//!
//! ## Transition graph
//!
//! ```text
//! LOBBY -> SETUP_REVEAL -> TURN_CHOOSE_SOURCE <-> TURN_RESOLVE
//!                 ^                                    |
//!                 |                                    v
//!                 +------------- ROUND_OVER <----------+
//!                                    |
//!                                    v
//!                                GAME_OVER
//! ```
//!
//! Both tables live here so the whole state machine can be audited in one
//! place: `Phase::successors` lists every legal phase change, and
//! `Operation::allowed_phases` lists the phases each engine call accepts.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Phase of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Players join and ready up.
    #[default]
    Lobby,
    /// Every player flips their setup quota of cards.
    SetupReveal,
    /// Current player picks deck or discard.
    TurnChooseSource,
    /// Current player resolves the held card.
    TurnResolve,
    /// Round scored; waiting for the next round to be started.
    RoundOver,
    /// Threshold reached. Terminal.
    GameOver,
}

impl Phase {
    /// Phases reachable from this one in a single step.
    #[must_use]
    pub const fn successors(self) -> &'static [Phase] {
        match self {
            Phase::Lobby => &[Phase::SetupReveal],
            Phase::SetupReveal => &[Phase::TurnChooseSource],
            Phase::TurnChooseSource => &[Phase::TurnResolve],
            Phase::TurnResolve => &[Phase::TurnChooseSource, Phase::RoundOver],
            Phase::RoundOver => &[Phase::SetupReveal, Phase::GameOver],
            Phase::GameOver => &[],
        }
    }

    /// Check whether `next` is a legal successor.
    #[must_use]
    pub fn can_transition_to(self, next: Phase) -> bool {
        self.successors().contains(&next)
    }

    /// Turn phases (someone is taking a turn).
    #[must_use]
    pub const fn is_turn(self) -> bool {
        matches!(self, Phase::TurnChooseSource | Phase::TurnResolve)
    }

    /// Round finished (grids fully visible, no more turns).
    #[must_use]
    pub const fn is_round_finished(self) -> bool {
        matches!(self, Phase::RoundOver | Phase::GameOver)
    }

    /// Wire name of the phase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Lobby => "LOBBY",
            Phase::SetupReveal => "SETUP_REVEAL",
            Phase::TurnChooseSource => "TURN_CHOOSE_SOURCE",
            Phase::TurnResolve => "TURN_RESOLVE",
            Phase::RoundOver => "ROUND_OVER",
            Phase::GameOver => "GAME_OVER",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engine operations guarded by phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    AddPlayer,
    SetReady,
    StartGame,
    RevealSetupCard,
    SelectSource,
    SetDeckMode,
    DrawFromDeck,
    TakeDiscard,
    DiscardDrawn,
    DiscardDrawnAndReveal,
    SwapIntoGrid,
    StartNewRound,
}

impl Operation {
    /// The legality table: phases in which each operation may run.
    #[must_use]
    pub const fn allowed_phases(self) -> &'static [Phase] {
        match self {
            Operation::AddPlayer | Operation::SetReady | Operation::StartGame => &[Phase::Lobby],
            Operation::RevealSetupCard => &[Phase::SetupReveal],
            Operation::SelectSource | Operation::SetDeckMode => {
                &[Phase::TurnChooseSource, Phase::TurnResolve]
            }
            Operation::DrawFromDeck | Operation::TakeDiscard => &[Phase::TurnChooseSource],
            Operation::DiscardDrawn
            | Operation::DiscardDrawnAndReveal
            | Operation::SwapIntoGrid => &[Phase::TurnResolve],
            Operation::StartNewRound => &[Phase::RoundOver],
        }
    }

    /// Check whether this operation may run in `phase`.
    pub fn check(self, phase: Phase) -> Result<(), EngineError> {
        let expected = self.allowed_phases();
        if expected.contains(&phase) {
            Ok(())
        } else {
            Err(EngineError::PhaseError {
                operation: self,
                expected,
                actual: phase,
            })
        }
    }

    /// Wire name of the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::AddPlayer => "add_player",
            Operation::SetReady => "set_ready",
            Operation::StartGame => "start_game",
            Operation::RevealSetupCard => "reveal_setup_card",
            Operation::SelectSource => "select_source",
            Operation::SetDeckMode => "set_deck_mode",
            Operation::DrawFromDeck => "draw_from_deck",
            Operation::TakeDiscard => "take_discard",
            Operation::DiscardDrawn => "discard_drawn",
            Operation::DiscardDrawnAndReveal => "discard_drawn_and_reveal",
            Operation::SwapIntoGrid => "swap_into_grid",
            Operation::StartNewRound => "start_new_round",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PHASES: [Phase; 6] = [
        Phase::Lobby,
        Phase::SetupReveal,
        Phase::TurnChooseSource,
        Phase::TurnResolve,
        Phase::RoundOver,
        Phase::GameOver,
    ];

    #[test]
    fn test_transition_graph() {
        assert!(Phase::Lobby.can_transition_to(Phase::SetupReveal));
        assert!(Phase::SetupReveal.can_transition_to(Phase::TurnChooseSource));
        assert!(Phase::TurnChooseSource.can_transition_to(Phase::TurnResolve));
        assert!(Phase::TurnResolve.can_transition_to(Phase::TurnChooseSource));
        assert!(Phase::TurnResolve.can_transition_to(Phase::RoundOver));
        assert!(Phase::RoundOver.can_transition_to(Phase::SetupReveal));
        assert!(Phase::RoundOver.can_transition_to(Phase::GameOver));

        assert!(!Phase::Lobby.can_transition_to(Phase::TurnChooseSource));
        assert!(!Phase::TurnChooseSource.can_transition_to(Phase::RoundOver));
        assert!(!Phase::SetupReveal.can_transition_to(Phase::Lobby));
    }

    #[test]
    fn test_lobby_is_never_reentered() {
        for phase in ALL_PHASES {
            assert!(!phase.can_transition_to(Phase::Lobby));
        }
    }

    #[test]
    fn test_game_over_is_terminal() {
        for phase in ALL_PHASES {
            assert!(!Phase::GameOver.can_transition_to(phase));
        }
    }

    #[test]
    fn test_operation_check() {
        assert!(Operation::DrawFromDeck.check(Phase::TurnChooseSource).is_ok());
        assert!(Operation::DrawFromDeck.check(Phase::TurnResolve).is_err());
        assert!(Operation::SelectSource.check(Phase::TurnResolve).is_ok());
        assert!(Operation::StartNewRound.check(Phase::GameOver).is_err());

        match Operation::SwapIntoGrid.check(Phase::RoundOver) {
            Err(EngineError::PhaseError { operation, expected, actual }) => {
                assert_eq!(operation, Operation::SwapIntoGrid);
                assert_eq!(expected, &[Phase::TurnResolve]);
                assert_eq!(actual, Phase::RoundOver);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_no_operation_allowed_after_game_over() {
        let ops = [
            Operation::AddPlayer,
            Operation::SetReady,
            Operation::StartGame,
            Operation::RevealSetupCard,
            Operation::SelectSource,
            Operation::SetDeckMode,
            Operation::DrawFromDeck,
            Operation::TakeDiscard,
            Operation::DiscardDrawn,
            Operation::DiscardDrawnAndReveal,
            Operation::SwapIntoGrid,
            Operation::StartNewRound,
        ];
        for op in ops {
            assert!(op.check(Phase::GameOver).is_err(), "{} allowed after game over", op);
        }
    }

    #[test]
    fn test_phase_serialization() {
        let json = serde_json::to_string(&Phase::TurnChooseSource).unwrap();
        assert_eq!(json, "\"TURN_CHOOSE_SOURCE\"");
        assert_eq!(Phase::GameOver.to_string(), "GAME_OVER");
    }
}
