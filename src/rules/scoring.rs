//! Round scoring, finisher doubling and the round lifecycle.

use std::collections::BTreeMap;

use crate::core::{Game, Operation, Phase, PlayerId, RoundRecord};
use crate::error::EngineError;
use crate::events::{GameEvent, Outcome};

use super::engine::GameEngine;
use super::lobby::deal_round;

impl GameEngine {
    /// Fold the last round into the totals, then either end the game or
    /// deal the next round.
    ///
    /// The threshold is only checked here, never mid-round.
    pub fn start_new_round(&mut self, requester: &PlayerId) -> Result<Outcome<()>, EngineError> {
        self.transact(|game, rng| {
            Operation::StartNewRound.check(game.phase)?;
            game.player(requester)?;

            for player in &game.players {
                let score = game.round_scores.get(&player.id).copied().unwrap_or(0);
                *game.total_scores.entry(player.id.clone()).or_insert(0) += score;
            }

            let threshold = game.config.game_over_threshold;
            let ranked_totals = game.ranking();
            if ranked_totals.iter().any(|r| r.total >= threshold) {
                if let Some(winner_id) = ranked_totals.first().map(|r| r.player_id.clone()) {
                    game.transition(Phase::GameOver)?;
                    game.reset_table_selection();
                    tracing::info!(code = %game.code, winner = %winner_id, "game over");
                    return Ok(Outcome {
                        value: (),
                        events: vec![GameEvent::GameOver {
                            threshold,
                            winner_id,
                            ranked_totals,
                            total_scores: game.total_scores.clone(),
                        }],
                    });
                }
            }

            game.round_index += 1;
            deal_round(game, &mut rng.shuffle)?;
            game.current_player_idx = game
                .last_round_finisher
                .as_ref()
                .and_then(|id| game.player_index(id).ok())
                .unwrap_or(0);
            game.transition(Phase::SetupReveal)?;

            let starting_player_id = game.players[game.current_player_idx].id.clone();
            tracing::info!(code = %game.code, round = game.round_index, "new round started");
            Ok(Outcome {
                value: (),
                events: vec![GameEvent::NewRoundStarted {
                    round_index: game.round_index,
                    starting_player_id,
                    total_scores: game.total_scores.clone(),
                }],
            })
        })
    }
}

/// Raw scores with the finisher doubled unless they hold the minimum.
///
/// Returns the adjusted scores and whether doubling applied.
pub fn finisher_adjusted_scores(
    raw: BTreeMap<PlayerId, i32>,
    finisher: &PlayerId,
) -> (BTreeMap<PlayerId, i32>, bool) {
    let mut scores = raw;
    let min = scores.values().copied().min();
    let mut doubled = false;
    if let (Some(min), Some(score)) = (min, scores.get_mut(finisher)) {
        if *score > min {
            *score *= 2;
            doubled = true;
        }
    }
    (scores, doubled)
}

/// Score every grid and move to `ROUND_OVER`.
pub(super) fn end_round(game: &mut Game, events: &mut Vec<GameEvent>) -> Result<(), EngineError> {
    let finisher_id = match &game.final_round {
        Some(final_round) => final_round.finisher_id.clone(),
        None => return Ok(()),
    };

    let raw = game
        .players
        .iter()
        .map(|p| (p.id.clone(), p.grid.score()))
        .collect();
    let (scores, finisher_doubled) = finisher_adjusted_scores(raw, &finisher_id);

    game.round_scores = scores.clone();
    game.finisher_doubled = finisher_doubled;
    game.last_round_finisher = Some(finisher_id.clone());
    game.round_history.push_back(RoundRecord {
        round_index: game.round_index,
        scores: scores.clone(),
        finisher_id: Some(finisher_id.clone()),
        finisher_doubled,
    });
    game.table_drawn_card = None;
    game.reset_table_selection();
    game.transition(Phase::RoundOver)?;

    tracing::info!(
        code = %game.code,
        round = game.round_index,
        finisher = %finisher_id,
        doubled = finisher_doubled,
        "round ended"
    );
    events.push(GameEvent::RoundEnded {
        round_index: game.round_index,
        scores,
        finisher_id,
        finisher_doubled,
    });
    Ok(())
}
