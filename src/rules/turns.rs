//! Turn operations: drawing, resolving the held card and the table cursor.
//!
//! A turn is one draw (deck or discard) followed by one resolution. Every
//! resolution ends in `finish_turn`, which handles the final-round
//! bookkeeping and either ends the round or passes play to the next seat.

use crate::cards::Card;
use crate::core::{DeckMode, FinalRound, Game, Operation, Phase, PlayerId, Source};
use crate::error::EngineError;
use crate::events::{GameEvent, Outcome, Removals};
use crate::zones::draw_with_recycle;

use super::engine::{resolve_columns, turn_guard, GameEngine};
use super::scoring::end_round;

impl GameEngine {
    /// Draw the top deck card into the player's hand, recycling the discard
    /// pile if the deck is empty.
    pub fn draw_from_deck(&mut self, player: &PlayerId) -> Result<Outcome<Card>, EngineError> {
        self.transact(|game, rng| {
            let idx = turn_guard(game, Operation::DrawFromDeck, player)?;
            if game.players[idx].drawn_card.is_some() {
                return Err(EngineError::AlreadyHoldingCard);
            }

            let card = draw_with_recycle(&mut game.deck, &mut game.discard, &mut rng.shuffle)?;
            game.players[idx].drawn_card = Some(card);
            game.table_drawn_card = Some(card);
            game.transition(Phase::TurnResolve)?;

            tracing::debug!(code = %game.code, player = %player, card = %card, "drew from deck");
            Ok(Outcome::quiet(card))
        })
    }

    /// Take the discard top into the player's hand.
    pub fn take_discard(&mut self, player: &PlayerId) -> Result<Outcome<Card>, EngineError> {
        self.transact(|game, _rng| {
            let idx = turn_guard(game, Operation::TakeDiscard, player)?;
            if game.players[idx].drawn_card.is_some() {
                return Err(EngineError::AlreadyHoldingCard);
            }

            let card = game.discard.pop().ok_or(EngineError::DiscardEmpty)?;
            game.players[idx].drawn_card = Some(card);
            game.table_drawn_card = None;
            game.transition(Phase::TurnResolve)?;

            tracing::debug!(code = %game.code, player = %player, card = %card, "took discard");
            Ok(Outcome::quiet(card))
        })
    }

    /// Throw the held card away and end the turn.
    pub fn discard_drawn(&mut self, player: &PlayerId) -> Result<Outcome<()>, EngineError> {
        self.transact(|game, _rng| {
            let idx = turn_guard(game, Operation::DiscardDrawn, player)?;
            let card = game.players[idx].drawn_card.take().ok_or(EngineError::NoHeldCard)?;
            game.discard.push(card);
            game.table_drawn_card = None;

            tracing::debug!(code = %game.code, player = %player, card = %card, "discarded drawn card");
            let mut events = Vec::new();
            finish_turn(game, idx, &mut events)?;
            Ok(Outcome { value: (), events })
        })
    }

    /// Throw the held card away, flip one hidden slot and end the turn.
    pub fn discard_drawn_and_reveal(
        &mut self,
        player: &PlayerId,
        index: usize,
    ) -> Result<Outcome<Removals>, EngineError> {
        self.transact(|game, _rng| {
            let idx = turn_guard(game, Operation::DiscardDrawnAndReveal, player)?;
            if game.players[idx].drawn_card.is_none() {
                return Err(EngineError::NoHeldCard);
            }
            game.players[idx].grid.check_hidden(index)?;

            let card = game.players[idx].drawn_card.take().ok_or(EngineError::NoHeldCard)?;
            game.discard.push(card);
            game.table_drawn_card = None;
            let revealed = game.players[idx].grid.reveal(index)?;

            tracing::debug!(
                code = %game.code,
                player = %player,
                card = %card,
                index,
                revealed = %revealed,
                "discarded and revealed"
            );
            let mut events = Vec::new();
            let removals = resolve_columns(game, idx, &mut events);
            finish_turn(game, idx, &mut events)?;
            Ok(Outcome {
                value: removals,
                events,
            })
        })
    }

    /// Put the held card into a grid slot face-up; the old card is
    /// discarded.
    pub fn swap_into_grid(
        &mut self,
        player: &PlayerId,
        index: usize,
    ) -> Result<Outcome<Removals>, EngineError> {
        self.transact(|game, _rng| {
            let idx = turn_guard(game, Operation::SwapIntoGrid, player)?;
            if game.players[idx].drawn_card.is_none() {
                return Err(EngineError::NoHeldCard);
            }
            game.players[idx].grid.check_in_play(index)?;

            let card = game.players[idx].drawn_card.take().ok_or(EngineError::NoHeldCard)?;
            let old = game.players[idx].grid.replace(index, card)?;
            game.discard.push(old);
            game.table_drawn_card = None;

            tracing::debug!(
                code = %game.code,
                player = %player,
                card = %card,
                index,
                replaced = %old,
                "swapped into grid"
            );
            let mut events = Vec::new();
            let removals = resolve_columns(game, idx, &mut events);
            finish_turn(game, idx, &mut events)?;
            Ok(Outcome {
                value: removals,
                events,
            })
        })
    }

    /// Point the table display at a source, or clear it with `None`.
    ///
    /// Anything but the deck resets the deck mode to `Swap`.
    pub fn select_source(
        &mut self,
        player: &PlayerId,
        source: Option<Source>,
    ) -> Result<(), EngineError> {
        turn_guard(&self.game, Operation::SelectSource, player)?;
        self.game.table.source = source;
        if source != Some(Source::Deck) {
            self.game.table.deck_mode = DeckMode::Swap;
        }
        Ok(())
    }

    /// Announce what the deck draw will be used for. The deck must be
    /// selected.
    pub fn set_deck_mode(&mut self, player: &PlayerId, mode: DeckMode) -> Result<(), EngineError> {
        turn_guard(&self.game, Operation::SetDeckMode, player)?;
        if self.game.table.source != Some(Source::Deck) {
            return Err(EngineError::InvalidSelection("deck not selected"));
        }
        self.game.table.deck_mode = mode;
        Ok(())
    }
}

/// End-of-turn bookkeeping for the player at `idx`.
///
/// Starts the final round when the actor's grid is fully revealed, counts
/// down last turns otherwise, ends the round when none remain and finally
/// advances to the next seat if the round is still running.
fn finish_turn(game: &mut Game, idx: usize, events: &mut Vec<GameEvent>) -> Result<(), EngineError> {
    let actor = game.players[idx].id.clone();

    if game.final_round.is_none() && game.players[idx].grid.is_fully_revealed() {
        let last_turns_remaining = game.player_count() - 1;
        tracing::info!(code = %game.code, finisher = %actor, "final round started");
        game.final_round = Some(FinalRound {
            finisher_id: actor.clone(),
            last_turns_remaining,
        });
        events.push(GameEvent::FinalRoundStarted {
            finisher_id: actor,
            last_turns_remaining,
        });
    } else if let Some(final_round) = game
        .final_round
        .as_mut()
        .filter(|f| f.finisher_id != actor && f.last_turns_remaining > 0)
    {
        final_round.last_turns_remaining -= 1;
        events.push(GameEvent::LastTurnTaken {
            player_id: actor,
            last_turns_remaining: final_round.last_turns_remaining,
        });
    }

    if matches!(&game.final_round, Some(f) if f.last_turns_remaining == 0) {
        end_round(game, events)?;
    }

    if game.phase != Phase::RoundOver {
        game.current_player_idx = (idx + 1) % game.player_count();
        game.transition(Phase::TurnChooseSource)?;
        game.reset_table_selection();
    }
    Ok(())
}
