//! The broadcastable table view.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::cards::Card;
use crate::core::{DeckMode, Game, GameId, JoinCode, Phase, PlayerId, RoundRecord, Source};
use crate::events::RankedTotal;

/// Redacted per-player summary: counts only, never hidden values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    pub ready: bool,
    pub revealed_count: usize,
    pub removed_count: usize,
}

/// What everyone at the table may see.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicView {
    pub id: GameId,
    pub code: JoinCode,
    pub phase: Phase,
    pub deck_count: usize,
    pub discard_count: usize,
    pub discard_top: Option<Card>,
    /// The deck draw being resolved. Only during `TURN_RESOLVE`.
    pub table_drawn_card: Option<Card>,
    pub table_selected_source: Option<Source>,
    pub table_deck_mode: DeckMode,
    pub current_player_id: Option<PlayerId>,
    pub final_round: bool,
    pub finisher_id: Option<PlayerId>,
    pub last_turns_remaining: usize,
    /// Only while `ROUND_OVER`.
    pub round_scores: Option<BTreeMap<PlayerId, i32>>,
    pub finisher_doubled: Option<bool>,
    pub round_index: u32,
    pub round_history: Vec<RoundRecord>,
    pub total_scores: BTreeMap<PlayerId, i32>,
    /// Only while `GAME_OVER`.
    pub winner_id: Option<PlayerId>,
    pub ranked_totals: Option<Vec<RankedTotal>>,
    pub players: Vec<PlayerSummary>,
}

/// Project the public view.
#[must_use]
pub fn public_view(game: &Game) -> PublicView {
    let (final_round, finisher_id, last_turns_remaining) = super::final_round_status(game);
    let (winner_id, ranked_totals) = super::results(game);
    let round_over = game.phase == Phase::RoundOver;

    PublicView {
        id: game.id.clone(),
        code: game.code.clone(),
        phase: game.phase,
        deck_count: game.deck.len(),
        discard_count: game.discard.len(),
        discard_top: game.discard.top(),
        table_drawn_card: game
            .table_drawn_card
            .filter(|_| game.phase == Phase::TurnResolve),
        table_selected_source: game.table.source,
        table_deck_mode: game.table.deck_mode,
        current_player_id: game.current_player_id().cloned(),
        final_round,
        finisher_id,
        last_turns_remaining,
        round_scores: round_over.then(|| game.round_scores.clone()),
        finisher_doubled: round_over.then_some(game.finisher_doubled),
        round_index: game.round_index,
        round_history: game.round_history.iter().cloned().collect(),
        total_scores: game.total_scores.clone(),
        winner_id,
        ranked_totals,
        players: game
            .players
            .iter()
            .map(|p| PlayerSummary {
                id: p.id.clone(),
                name: p.name.clone(),
                ready: p.ready,
                revealed_count: p.grid.revealed_count(),
                removed_count: p.grid.removed_count(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RulesConfig;
    use crate::rules::GameEngine;

    fn engine_with_players() -> (GameEngine, Vec<PlayerId>) {
        let mut engine = GameEngine::with_seed(RulesConfig::default(), 8);
        let ids: Vec<PlayerId> = ["Ada", "Bo"]
            .iter()
            .map(|name| engine.add_player(*name).unwrap().0)
            .collect();
        for id in &ids {
            engine.set_ready(id, true).unwrap();
        }
        (engine, ids)
    }

    #[test]
    fn test_lobby_view() {
        let (engine, _) = engine_with_players();
        let view = public_view(engine.game());

        assert_eq!(view.phase, Phase::Lobby);
        assert_eq!(view.deck_count, 0);
        assert_eq!(view.discard_top, None);
        assert_eq!(view.current_player_id, None);
        assert_eq!(view.players.len(), 2);
        assert!(view.players.iter().all(|p| p.ready && p.revealed_count == 0));
    }

    #[test]
    fn test_view_hides_round_and_game_results_mid_round() {
        let (mut engine, _) = engine_with_players();
        engine.start_game_if_ready().unwrap();
        let view = public_view(engine.game());

        assert_eq!(view.deck_count, 75 - 24 - 1);
        assert_eq!(view.discard_count, 1);
        assert!(view.discard_top.is_some());
        assert!(view.round_scores.is_none());
        assert!(view.finisher_doubled.is_none());
        assert!(view.winner_id.is_none());
        assert!(view.ranked_totals.is_none());
        assert!(!view.final_round);
    }

    #[test]
    fn test_table_card_only_while_resolving() {
        let (mut engine, ids) = engine_with_players();
        engine.start_game_if_ready().unwrap();
        for id in &ids {
            engine.reveal_setup_card(id, 0).unwrap();
            engine.reveal_setup_card(id, 1).unwrap();
        }
        let actor = engine.game().current_player_id().unwrap().clone();

        let card = engine.draw_from_deck(&actor).unwrap().value;
        assert_eq!(public_view(engine.game()).table_drawn_card, Some(card));

        engine.discard_drawn(&actor).unwrap();
        assert_eq!(public_view(engine.game()).table_drawn_card, None);
    }

    #[test]
    fn test_public_json_shape() {
        let (engine, _) = engine_with_players();
        let json = serde_json::to_value(public_view(engine.game())).unwrap();

        assert_eq!(json["phase"], "LOBBY");
        assert_eq!(json["tableDeckMode"], "swap");
        assert!(json["tableSelectedSource"].is_null());
        assert!(json.get("deckCount").is_some());
        assert!(json.get("roundHistory").is_some());
        assert!(json["players"][0].get("revealedCount").is_some());
    }
}
