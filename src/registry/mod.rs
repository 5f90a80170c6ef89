//! Join-code routing for hosted games.
//!
//! The registry is the only structure shared between games. Lookups and
//! inserts go through a `DashMap`; each engine sits behind its own mutex so
//! at most one operation runs against a game at a time while different
//! games proceed in parallel.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::core::{EngineRng, JoinCode, RulesConfig, SecretRng};
use crate::error::EngineError;
use crate::rules::GameEngine;

/// A hosted game: the engine behind its single-writer lock.
pub type SharedEngine = Arc<Mutex<GameEngine>>;

/// Fresh codes tried before `create_game` gives up.
const MAX_CODE_ATTEMPTS: usize = 1024;

/// Maps join codes to live engines.
pub struct GameRegistry {
    games: DashMap<JoinCode, SharedEngine>,
    config: RulesConfig,
    rng: Mutex<SecretRng>,
}

impl GameRegistry {
    /// Registry whose codes and engine seeds come from OS entropy.
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self::with_rng(config, SecretRng::from_entropy())
    }

    /// Reproducible registry for tests and simulations.
    #[must_use]
    pub fn with_seed(config: RulesConfig, seed: u64) -> Self {
        Self::with_rng(config, SecretRng::new(seed))
    }

    fn with_rng(config: RulesConfig, rng: SecretRng) -> Self {
        Self {
            games: DashMap::new(),
            config,
            rng: Mutex::new(rng),
        }
    }

    /// Host a new empty game under a fresh, unused join code.
    ///
    /// Fails with `JoinCodesExhausted` when the code space is full or no
    /// free code turns up within a bounded number of draws.
    pub fn create_game(&self) -> Result<(JoinCode, SharedEngine), EngineError> {
        let len = self.config.join_code_len;
        let exhausted = EngineError::JoinCodesExhausted { len };
        let capacity = u32::try_from(len)
            .ok()
            .and_then(|exp| JoinCode::ALPHABET.len().checked_pow(exp));
        if capacity.is_some_and(|cap| self.games.len() >= cap) {
            return Err(exhausted);
        }

        for _ in 0..MAX_CODE_ATTEMPTS {
            let (code, rng) = {
                let mut secrets = self.rng.lock();
                let code = JoinCode::generate(&mut secrets, self.config.join_code_len);
                (code, EngineRng::derive(&mut secrets))
            };

            match self.games.entry(code.clone()) {
                Entry::Occupied(_) => {
                    tracing::debug!(code = %code, "join code collision, retrying");
                }
                Entry::Vacant(slot) => {
                    let engine = GameEngine::new(code.clone(), self.config.clone(), rng);
                    let shared = Arc::new(Mutex::new(engine));
                    slot.insert(Arc::clone(&shared));
                    tracing::info!(code = %code, "game created");
                    return Ok((code, shared));
                }
            }
        }
        tracing::warn!(len, games = self.games.len(), "no free join code found");
        Err(exhausted)
    }

    /// Find a game by code. Input is trimmed and upper-cased first.
    pub fn get(&self, code: &str) -> Result<SharedEngine, EngineError> {
        let key = JoinCode::normalize(code);
        self.games
            .get(&key)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| EngineError::GameNotFound(key.as_str().to_string()))
    }

    /// Run `f` against a game while holding its lock.
    pub fn with_game<R>(
        &self,
        code: &str,
        f: impl FnOnce(&mut GameEngine) -> R,
    ) -> Result<R, EngineError> {
        let shared = self.get(code)?;
        let mut engine = shared.lock();
        Ok(f(&mut engine))
    }

    /// Stop hosting a game. Outstanding handles stay usable.
    pub fn remove(&self, code: &str) -> Option<SharedEngine> {
        let (key, engine) = self.games.remove(&JoinCode::normalize(code))?;
        tracing::info!(code = %key, "game removed");
        Some(engine)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Every hosted code, sorted.
    #[must_use]
    pub fn codes(&self) -> Vec<JoinCode> {
        let mut codes: Vec<JoinCode> = self.games.iter().map(|e| e.key().clone()).collect();
        codes.sort();
        codes
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new(RulesConfig::default())
    }
}
