//! Identifiers: players, bearer tokens, games and join codes.
//!
//! All of these are opaque strings. Player ids and tokens are minted by the
//! engine; join codes by the registry.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

use super::rng::SecretRng;

/// Stable player identity within one game.
///
/// Ordered so that ties in rankings break deterministically.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Fresh random id: 12 hex characters.
    pub fn generate(rng: &mut SecretRng) -> Self {
        Self(rng.hex(6))
    }

    /// Borrow as `&str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bearer token handed to a player at join time.
///
/// 128 random bits. Never derived from other data, so it can only be
/// presented, not reconstructed.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerToken(String);

impl PlayerToken {
    /// Fresh random token: 32 hex characters.
    pub fn generate(rng: &mut SecretRng) -> Self {
        Self(rng.hex(16))
    }

    /// Borrow as `&str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PlayerToken {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PlayerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PlayerToken(..)")
    }
}

/// Unique id of a game instance (UUID, simple hex form).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    /// Fresh random UUID.
    pub fn generate(rng: &mut SecretRng) -> Self {
        let uuid = uuid::Builder::from_random_bytes(rng.bytes::<16>()).into_uuid();
        Self(uuid.simple().to_string())
    }

    /// Borrow as `&str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GameId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Short human-typeable code routing players to a game.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JoinCode(String);

impl JoinCode {
    /// Unambiguous characters only: no `0/O`, `1/I`.
    pub const ALPHABET: &'static [u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

    /// Fresh random code of `len` characters.
    pub fn generate(rng: &mut SecretRng, len: usize) -> Self {
        Self(rng.pick_string(Self::ALPHABET, len))
    }

    /// Normalise user input: trimmed and upper-cased.
    #[must_use]
    pub fn normalize(input: &str) -> Self {
        Self(input.trim().to_ascii_uppercase())
    }

    /// Borrow as `&str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JoinCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
