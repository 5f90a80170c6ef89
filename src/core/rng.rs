//! Injectable randomness for shuffling and secret generation.
//!
//! ## Two streams
//!
//! - `GameRng` (ChaCha8): deck shuffles. Fast, seedable, deterministic.
//! - `SecretRng` (ChaCha20): player ids, tokens, game ids, join codes.
//!   Seeded from OS entropy in production so tokens resist guessing.
//!
//! `EngineRng` bundles both and is what a `GameEngine` owns. Tests build it
//! with `EngineRng::seeded` to get fully reproducible games.
//!
//! ```
//! use skyjo_engine::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! let mut x = vec![1, 2, 3, 4, 5, 6, 7, 8];
//! let mut y = x.clone();
//! a.shuffle(&mut x);
//! b.shuffle(&mut y);
//! assert_eq!(x, y);
//! ```

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::{ChaCha20Rng, ChaCha8Rng};
use std::hash::{Hash, Hasher};

/// Deterministic RNG used for deck shuffles.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().next_u64())
    }

    /// Derive a seed for an independent stream.
    ///
    /// The same context always yields the same seed for the same RNG seed.
    #[must_use]
    pub fn context_seed(&self, context: &str) -> u64 {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        hasher.finish()
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

/// Unpredictable RNG for anything a client must not be able to guess.
#[derive(Clone, Debug)]
pub struct SecretRng {
    inner: ChaCha20Rng,
}

impl SecretRng {
    /// Seeded stream. Only for tests and reproducible simulations.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Stream seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha20Rng::from_entropy(),
        }
    }

    /// Child stream keyed by a full 256-bit seed drawn from `self`.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        Self {
            inner: ChaCha20Rng::from_seed(self.bytes::<32>()),
        }
    }

    /// Next raw 64 bits.
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Fill an array with random bytes.
    pub fn bytes<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        self.inner.fill_bytes(&mut out);
        out
    }

    /// `byte_len` random bytes, lower-case hex encoded.
    pub fn hex(&mut self, byte_len: usize) -> String {
        let mut bytes = vec![0u8; byte_len];
        self.inner.fill_bytes(&mut bytes);
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// A string of `len` characters drawn uniformly from `alphabet`.
    pub fn pick_string(&mut self, alphabet: &[u8], len: usize) -> String {
        (0..len)
            .map(|_| alphabet[self.inner.gen_range(0..alphabet.len())] as char)
            .collect()
    }
}

/// Randomness owned by one game engine.
#[derive(Clone, Debug)]
pub struct EngineRng {
    /// Deck shuffles.
    pub shuffle: GameRng,
    /// Ids and tokens.
    pub secrets: SecretRng,
}

impl EngineRng {
    /// Production randomness: both streams from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            shuffle: GameRng::from_entropy(),
            secrets: SecretRng::from_entropy(),
        }
    }

    /// Fully reproducible randomness.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        let shuffle = GameRng::new(seed);
        let secrets = SecretRng::new(shuffle.context_seed("secrets"));
        Self { shuffle, secrets }
    }

    /// Derive a fresh engine stream from a parent secret stream.
    ///
    /// Used by the registry so each hosted game gets its own RNG.
    #[must_use]
    pub fn derive(parent: &mut SecretRng) -> Self {
        Self {
            shuffle: GameRng::new(parent.next_u64()),
            secrets: parent.fork(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shuffle_determinism() {
        let mut rng1 = GameRng::new(7);
        let mut rng2 = GameRng::new(7);

        let mut a: Vec<u32> = (0..50).collect();
        let mut b = a.clone();
        rng1.shuffle(&mut a);
        rng2.shuffle(&mut b);

        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);
        assert_ne!(data, original);

        data.sort();
        assert_eq!(data, original);
    }

    #[test]
    fn test_context_seeds_differ() {
        let rng = GameRng::new(42);
        assert_ne!(rng.context_seed("secrets"), rng.context_seed("shuffle"));
        assert_eq!(rng.context_seed("secrets"), GameRng::new(42).context_seed("secrets"));
    }

    #[test]
    fn test_hex_length() {
        let mut rng = SecretRng::new(1);
        let token = rng.hex(16);
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_pick_string_alphabet() {
        let mut rng = SecretRng::new(1);
        let code = rng.pick_string(b"AB", 64);
        assert_eq!(code.len(), 64);
        assert!(code.chars().all(|c| c == 'A' || c == 'B'));
    }

    #[test]
    fn test_seeded_engine_rng_is_reproducible() {
        let mut a = EngineRng::seeded(9);
        let mut b = EngineRng::seeded(9);
        assert_eq!(a.secrets.hex(8), b.secrets.hex(8));
    }

    #[test]
    fn test_derived_streams_differ() {
        let mut parent = SecretRng::new(3);
        let mut a = EngineRng::derive(&mut parent);
        let mut b = EngineRng::derive(&mut parent);
        assert_ne!(a.secrets.hex(8), b.secrets.hex(8));
    }

    #[test]
    fn test_derived_secrets_use_full_seed() {
        let mut parent = SecretRng::new(4);
        let mut replay = parent.clone();
        let mut derived = EngineRng::derive(&mut parent);

        replay.next_u64();
        let mut expected = ChaCha20Rng::from_seed(replay.bytes::<32>());
        let mut want = [0u8; 16];
        expected.fill_bytes(&mut want);
        assert_eq!(derived.secrets.bytes::<16>(), want);
    }
}
