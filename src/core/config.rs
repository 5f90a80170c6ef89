//! Rules configuration.
//!
//! Hosts build a `RulesConfig` once and hand it to every engine they create.
//! The grid shape and deck recipe are fixed; the knobs here are the
//! thresholds that vary between house rules.
//!
//! Builders and deserialization both go through `RulesConfig::validate`, so a
//! config loaded from a host file is held to the same limits as one built in
//! code.

use serde::{Deserialize, Serialize};

use crate::cards::DECK_SIZE;
use crate::core::grid::GRID_SIZE;
use crate::error::EngineError;

/// Tunable game rules.
///
/// ## Example
///
/// ```
/// use skyjo_engine::core::RulesConfig;
///
/// let config = RulesConfig::default()
///     .with_game_over_threshold(50)
///     .with_max_players(4);
///
/// assert_eq!(config.setup_reveals_per_player, 2);
/// assert_eq!(config.game_over_threshold, 50);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRulesConfig")]
pub struct RulesConfig {
    /// Cards each player flips during setup.
    pub setup_reveals_per_player: usize,

    /// The game ends once any cumulative total reaches this.
    pub game_over_threshold: i32,

    /// Players required before the game can start.
    pub min_players: usize,

    /// Seats available in the lobby.
    pub max_players: usize,

    /// Length of generated join codes.
    pub join_code_len: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            setup_reveals_per_player: 2,
            game_over_threshold: 100,
            min_players: 2,
            max_players: 6,
            join_code_len: 4,
        }
    }
}

/// Unchecked wire form; missing fields fall back to the defaults.
#[derive(Deserialize)]
#[serde(default)]
struct RawRulesConfig {
    setup_reveals_per_player: usize,
    game_over_threshold: i32,
    min_players: usize,
    max_players: usize,
    join_code_len: usize,
}

impl Default for RawRulesConfig {
    fn default() -> Self {
        let RulesConfig {
            setup_reveals_per_player,
            game_over_threshold,
            min_players,
            max_players,
            join_code_len,
        } = RulesConfig::default();
        Self {
            setup_reveals_per_player,
            game_over_threshold,
            min_players,
            max_players,
            join_code_len,
        }
    }
}

impl TryFrom<RawRulesConfig> for RulesConfig {
    type Error = EngineError;

    fn try_from(raw: RawRulesConfig) -> Result<Self, Self::Error> {
        RulesConfig {
            setup_reveals_per_player: raw.setup_reveals_per_player,
            game_over_threshold: raw.game_over_threshold,
            min_players: raw.min_players,
            max_players: raw.max_players,
            join_code_len: raw.join_code_len,
        }
        .validate()
    }
}

impl RulesConfig {
    /// Most players whose grids plus the discard seed fit a fresh deck.
    pub const MAX_SEATS: usize = (DECK_SIZE - 1) / GRID_SIZE;

    /// Check every limit a playable game depends on.
    pub fn validate(self) -> Result<Self, EngineError> {
        if self.setup_reveals_per_player == 0 || self.setup_reveals_per_player > GRID_SIZE {
            return Err(EngineError::InvalidConfig("setup reveals must be 1-12"));
        }
        if self.min_players < 2 {
            return Err(EngineError::InvalidConfig("at least 2 players required"));
        }
        if self.max_players > Self::MAX_SEATS {
            return Err(EngineError::InvalidConfig("deck cannot deal more than 6 grids"));
        }
        if self.min_players > self.max_players {
            return Err(EngineError::InvalidConfig("min_players exceeds max_players"));
        }
        if self.join_code_len == 0 {
            return Err(EngineError::InvalidConfig("join code cannot be empty"));
        }
        Ok(self)
    }

    fn checked(self) -> Self {
        match self.validate() {
            Ok(config) => config,
            Err(err) => panic!("{}", err),
        }
    }

    /// Set the setup reveal quota.
    #[must_use]
    pub fn with_setup_reveals(mut self, reveals: usize) -> Self {
        self.setup_reveals_per_player = reveals;
        self.checked()
    }

    /// Set the game-over threshold.
    #[must_use]
    pub fn with_game_over_threshold(mut self, threshold: i32) -> Self {
        self.game_over_threshold = threshold;
        self
    }

    /// Set the minimum player count.
    #[must_use]
    pub fn with_min_players(mut self, min: usize) -> Self {
        self.min_players = min;
        self.checked()
    }

    /// Set the maximum player count.
    #[must_use]
    pub fn with_max_players(mut self, max: usize) -> Self {
        self.max_players = max;
        self.checked()
    }

    /// Set the join code length.
    #[must_use]
    pub fn with_join_code_len(mut self, len: usize) -> Self {
        self.join_code_len = len;
        self.checked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RulesConfig::default();
        assert_eq!(config.setup_reveals_per_player, 2);
        assert_eq!(config.game_over_threshold, 100);
        assert_eq!(config.min_players, 2);
        assert_eq!(config.max_players, 6);
        assert_eq!(config.join_code_len, 4);
    }

    #[test]
    fn test_max_seats_fit_deck() {
        assert_eq!(RulesConfig::MAX_SEATS, 6);
        assert!(RulesConfig::MAX_SEATS * GRID_SIZE < DECK_SIZE);
    }

    #[test]
    fn test_builder() {
        let config = RulesConfig::default()
            .with_setup_reveals(3)
            .with_max_players(4)
            .with_min_players(3)
            .with_join_code_len(6);

        assert_eq!(config.setup_reveals_per_player, 3);
        assert_eq!(config.min_players, 3);
        assert_eq!(config.max_players, 4);
        assert_eq!(config.join_code_len, 6);
    }

    #[test]
    #[should_panic(expected = "deck cannot deal more than 6 grids")]
    fn test_too_many_players() {
        let _ = RulesConfig::default().with_max_players(7);
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: RulesConfig = serde_json::from_str(r#"{"game_over_threshold": 150}"#).unwrap();
        assert_eq!(config.game_over_threshold, 150);
        assert_eq!(config.setup_reveals_per_player, 2);
    }

    #[test]
    #[should_panic(expected = "min_players exceeds max_players")]
    fn test_min_above_max_panics() {
        let _ = RulesConfig::default().with_max_players(3).with_min_players(4);
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert_eq!(RulesConfig::default().validate(), Ok(RulesConfig::default()));
    }

    #[test]
    fn test_deserialize_rejects_unplayable_values() {
        let rejected = [
            r#"{"setup_reveals_per_player": 0}"#,
            r#"{"setup_reveals_per_player": 13}"#,
            r#"{"join_code_len": 0}"#,
            r#"{"max_players": 7}"#,
            r#"{"min_players": 1}"#,
            r#"{"min_players": 5, "max_players": 4}"#,
        ];
        for json in rejected {
            let err = serde_json::from_str::<RulesConfig>(json).unwrap_err();
            assert!(
                err.to_string().contains("invalid rules config"),
                "{} gave {}",
                json,
                err
            );
        }
    }

    #[test]
    fn test_serialized_config_round_trips() {
        let config = RulesConfig::default().with_max_players(4).with_join_code_len(5);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<RulesConfig>(&json).unwrap(), config);
    }
}
