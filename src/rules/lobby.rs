//! Lobby and setup: seating, readiness, dealing and setup reveals.

use crate::cards::{standard_deck, Card};
use crate::core::{
    Game, GameRng, Grid, Operation, Phase, Player, PlayerId, PlayerToken, GRID_SIZE,
};
use crate::error::EngineError;
use crate::events::{GameEvent, Outcome, Removals};
use crate::zones::Pile;

use super::engine::{resolve_columns, GameEngine};

impl GameEngine {
    /// Seat a new player. Returns their id and bearer token.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
    ) -> Result<(PlayerId, PlayerToken), EngineError> {
        let phase = self.game.phase;
        Operation::AddPlayer
            .check(phase)
            .map_err(|_| EngineError::JoinAfterStart { phase })?;

        let max = self.game.config.max_players;
        if self.game.player_count() >= max {
            return Err(EngineError::TableFull { max });
        }

        let id = loop {
            let candidate = PlayerId::generate(&mut self.rng.secrets);
            if self.game.player(&candidate).is_err() {
                break candidate;
            }
        };
        let token = loop {
            let candidate = PlayerToken::generate(&mut self.rng.secrets);
            if !self.tokens.contains_key(&candidate) {
                break candidate;
            }
        };

        let player = Player::new(id.clone(), name);
        tracing::debug!(code = %self.game.code, player = %id, name = %player.name, "player joined");
        self.game.players.push(player);
        self.tokens.insert(token.clone(), id.clone());
        Ok((id, token))
    }

    /// Toggle lobby readiness.
    pub fn set_ready(&mut self, player: &PlayerId, ready: bool) -> Result<(), EngineError> {
        Operation::SetReady.check(self.game.phase)?;
        self.game.player_mut(player)?.ready = ready;
        Ok(())
    }

    /// Deal the first round if the lobby is full enough and everyone is
    /// ready. Returns `false` (and changes nothing) otherwise.
    pub fn start_game_if_ready(&mut self) -> Result<Outcome<bool>, EngineError> {
        let game = &self.game;
        if Operation::StartGame.check(game.phase).is_err()
            || game.player_count() < game.config.min_players
            || !game.players.iter().all(|p| p.ready)
        {
            return Ok(Outcome::quiet(false));
        }

        self.transact(|game, rng| {
            if game.total_scores.is_empty() {
                for player in &game.players {
                    game.total_scores.insert(player.id.clone(), 0);
                }
            }
            deal_round(game, &mut rng.shuffle)?;
            game.current_player_idx = 0;
            game.transition(Phase::SetupReveal)?;

            tracing::info!(
                code = %game.code,
                players = game.player_count(),
                "game started"
            );
            Ok(Outcome {
                value: true,
                events: vec![GameEvent::GameStarted {
                    round_index: game.round_index,
                    player_count: game.player_count(),
                    setup_reveals: game.config.setup_reveals_per_player,
                }],
            })
        })
    }

    /// Flip one of the player's cards during setup.
    ///
    /// Once every player has met the quota the first turn begins
    /// automatically.
    pub fn reveal_setup_card(
        &mut self,
        player: &PlayerId,
        index: usize,
    ) -> Result<Outcome<Removals>, EngineError> {
        self.transact(|game, _rng| {
            Operation::RevealSetupCard.check(game.phase)?;
            let idx = game.player_index(player)?;
            let quota = game.config.setup_reveals_per_player;

            let seat = &mut game.players[idx];
            seat.grid.check_hidden(index)?;
            if seat.setup.done() >= quota {
                return Err(EngineError::QuotaExceeded { quota });
            }
            seat.grid.reveal(index)?;
            seat.setup.revealed.push(index);

            if seat.setup.done() == quota && seat.setup.completion_order.is_none() {
                game.setup_done_counter += 1;
                game.players[idx].setup.completion_order = Some(game.setup_done_counter);
            }

            let mut events = Vec::new();
            let removals = resolve_columns(game, idx, &mut events);

            if game.all_setup_done() {
                let starter = starting_player(game);
                game.current_player_idx = starter;
                game.transition(Phase::TurnChooseSource)?;
                game.reset_table_selection();

                let starting_player_id = game.players[starter].id.clone();
                tracing::info!(code = %game.code, starter = %starting_player_id, "setup complete");
                events.push(GameEvent::SetupCompleted { starting_player_id });
            }

            Ok(Outcome {
                value: removals,
                events,
            })
        })
    }
}

/// Build a fresh shuffled deck, deal every grid, then seed the discard.
///
/// Resets all round-scoped state on the way.
pub(super) fn deal_round(game: &mut Game, rng: &mut GameRng) -> Result<(), EngineError> {
    let mut deck = Pile::shuffled(standard_deck(), rng);

    for player in &mut game.players {
        let mut cards = Vec::with_capacity(GRID_SIZE);
        for _ in 0..GRID_SIZE {
            cards.push(deck.pop().ok_or(EngineError::DeckExhausted)?);
        }
        let cards: [Card; GRID_SIZE] = cards
            .try_into()
            .map_err(|_| EngineError::DeckExhausted)?;
        player.reset_for_round(Grid::dealt(cards));
    }

    let seed = deck.pop().ok_or(EngineError::DeckExhausted)?;
    game.deck = deck;
    game.discard = Pile::from_cards([seed]);

    game.table_drawn_card = None;
    game.reset_table_selection();
    game.final_round = None;
    game.round_scores.clear();
    game.finisher_doubled = false;
    game.setup_done_counter = 0;
    Ok(())
}

/// Highest setup-reveal sum starts; ties go to whoever completed setup
/// first, then to the lower seat.
fn starting_player(game: &Game) -> usize {
    let quota = game.config.setup_reveals_per_player;
    game.players
        .iter()
        .enumerate()
        .max_by(|(i, a), (j, b)| {
            a.setup_reveal_sum(quota)
                .cmp(&b.setup_reveal_sum(quota))
                .then_with(|| b.setup.completion_rank().cmp(&a.setup.completion_rank()))
                .then_with(|| j.cmp(i))
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::super::engine::test_support::*;
    use super::*;
    use crate::cards::DECK_SIZE;
    use crate::core::RulesConfig;

    fn lobby(n: usize) -> (GameEngine, Vec<PlayerId>) {
        let mut engine = GameEngine::with_seed(RulesConfig::default(), 11);
        let ids = (0..n)
            .map(|i| engine.add_player(format!("P{}", i)).unwrap().0)
            .collect();
        (engine, ids)
    }

    #[test]
    fn test_start_requires_all_ready() {
        let (mut engine, ids) = lobby(2);
        assert!(!engine.start_game_if_ready().unwrap().value);

        engine.set_ready(&ids[0], true).unwrap();
        assert!(!engine.start_game_if_ready().unwrap().value);

        engine.set_ready(&ids[1], true).unwrap();
        let outcome = engine.start_game_if_ready().unwrap();
        assert!(outcome.value);
        assert!(outcome.has_event("game_started"));
        assert_eq!(engine.game().phase, Phase::SetupReveal);
    }

    #[test]
    fn test_single_player_cannot_start() {
        let (mut engine, ids) = lobby(1);
        engine.set_ready(&ids[0], true).unwrap();
        assert!(!engine.start_game_if_ready().unwrap().value);
        assert_eq!(engine.game().phase, Phase::Lobby);
    }

    #[test]
    fn test_deal_conserves_cards() {
        let (engine, _) = started(3, 4);
        let game = engine.game();

        assert_eq!(game.deck.len(), DECK_SIZE - 3 * GRID_SIZE - 1);
        assert_eq!(game.discard.len(), 1);
        assert_eq!(game.current_player_idx, 0);
        for player in &game.players {
            assert!(player.grid.is_dealt());
            assert_eq!(player.grid.revealed_count(), 0);
        }

        let mut census = game.card_census();
        census.sort();
        let mut full = standard_deck();
        full.sort();
        assert_eq!(census, full);
        assert!(game.total_scores.values().all(|&t| t == 0));
    }

    #[test]
    fn test_join_after_start_rejected() {
        let (mut engine, _) = started(2, 4);
        let err = engine.add_player("Late").unwrap_err();
        assert_eq!(err, EngineError::JoinAfterStart { phase: Phase::SetupReveal });
        assert!(err.is_phase_error());
        assert!(engine.set_ready(&PlayerId::from("x"), true).unwrap_err().is_phase_error());
    }

    #[test]
    fn test_table_full() {
        let config = RulesConfig::default().with_max_players(2);
        let mut engine = GameEngine::with_seed(config, 1);
        engine.add_player("A").unwrap();
        engine.add_player("B").unwrap();
        assert_eq!(
            engine.add_player("C"),
            Err(EngineError::TableFull { max: 2 })
        );
    }

    #[test]
    fn test_setup_reveal_errors() {
        let (mut engine, ids) = started(2, 4);
        let p = &ids[0];

        assert_eq!(
            engine.reveal_setup_card(p, 12).unwrap_err(),
            EngineError::InvalidIndex(12)
        );
        engine.reveal_setup_card(p, 0).unwrap();
        assert!(matches!(
            engine.reveal_setup_card(p, 0),
            Err(EngineError::SlotUnavailable { index: 0, .. })
        ));
        engine.reveal_setup_card(p, 5).unwrap();
        assert_eq!(
            engine.reveal_setup_card(p, 6).unwrap_err(),
            EngineError::QuotaExceeded { quota: 2 }
        );
        assert_eq!(engine.game().player(p).unwrap().setup.completion_order, Some(1));
    }

    #[test]
    fn test_two_player_setup_starts_turns() {
        let (mut engine, ids) = started(2, 4);
        engine.reveal_setup_card(&ids[0], 0).unwrap();
        engine.reveal_setup_card(&ids[1], 0).unwrap();
        engine.reveal_setup_card(&ids[1], 1).unwrap();
        assert_eq!(engine.game().phase, Phase::SetupReveal);

        let outcome = engine.reveal_setup_card(&ids[0], 1).unwrap();
        assert!(outcome.has_event("setup_completed"));
        assert_eq!(engine.game().phase, Phase::TurnChooseSource);
    }

    #[test]
    fn test_starting_player_highest_sum() {
        let (mut engine, ids) = started(3, 4);
        let low = grid_of([0; GRID_SIZE]);
        let mut high = grid_of([0; GRID_SIZE]);
        high[0] = card(12);
        high[1] = card(11);
        engine.debug_set_player_grid(&ids[0], Some(low), None, None).unwrap();
        engine.debug_set_player_grid(&ids[1], Some(low), None, None).unwrap();
        engine.debug_set_player_grid(&ids[2], Some(high), None, None).unwrap();

        for id in &ids {
            engine.reveal_setup_card(id, 0).unwrap();
            engine.reveal_setup_card(id, 1).unwrap();
        }
        assert_eq!(current(&engine), ids[2]);
    }

    #[test]
    fn test_starting_player_tie_goes_to_first_finisher() {
        let (mut engine, ids) = started(2, 4);
        let same = grid_of([5; GRID_SIZE]);
        engine.debug_set_player_grid(&ids[0], Some(same), None, None).unwrap();
        engine.debug_set_player_grid(&ids[1], Some(same), None, None).unwrap();

        engine.reveal_setup_card(&ids[0], 0).unwrap();
        engine.reveal_setup_card(&ids[1], 0).unwrap();
        engine.reveal_setup_card(&ids[1], 1).unwrap();
        engine.reveal_setup_card(&ids[0], 1).unwrap();

        assert_eq!(current(&engine), ids[1]);
    }

    #[test]
    fn test_failed_reveal_leaves_state() {
        let (mut engine, ids) = started(2, 4);
        let before = engine.game().clone();
        assert!(engine.reveal_setup_card(&PlayerId::from("ghost"), 0).is_err());
        assert!(engine.reveal_setup_card(&ids[0], 40).is_err());
        assert_eq!(engine.game(), &before);
    }
}
