//! Deterministic random numbers derived from string seeds.
//!
//! A privacy-gap schedule must be stable for a whole day and reproducible for
//! the same child, yet look unpredictable from the outside. Seeds are plain
//! strings (`"{child_id}:{YYYY-MM-DD}"`) digested into the state of a PCG
//! generator. With a [`SeedKey`] the digest becomes HMAC-SHA256, so the
//! schedule cannot be enumerated offline without the key.

use std::fmt;

use chrono::NaiveDate;
use hmac::{Hmac, Mac};
use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;
use sha2::{Digest, Sha256};

use crate::error::ConfigError;

type HmacSha256 = Hmac<Sha256>;

/// Minimum key length accepted for keyed seeding.
pub const MIN_SEED_KEY_BYTES: usize = 32;

/// Secret used to key seed derivation.
///
/// `Debug` output never includes the key material.
#[derive(Clone, PartialEq, Eq)]
pub struct SeedKey(Vec<u8>);

impl SeedKey {
    /// Build a key from raw bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let bytes = bytes.into();
        if bytes.len() < MIN_SEED_KEY_BYTES {
            return Err(ConfigError::invalid(
                "seed_key",
                format!(
                    "must be at least {MIN_SEED_KEY_BYTES} bytes, got {}",
                    bytes.len()
                ),
            ));
        }
        Ok(Self(bytes))
    }

    /// Parse a hex-encoded key.
    pub fn from_hex(encoded: &str) -> Result<Self, ConfigError> {
        let bytes = hex::decode(encoded.trim())
            .map_err(|e| ConfigError::invalid("seed_key", format!("not valid hex: {e}")))?;
        Self::from_bytes(bytes)
    }

    /// Hex encoding of the key, for writing back to configuration.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    fn digest(&self, seed: &str) -> [u8; 32] {
        let mut mac =
            HmacSha256::new_from_slice(&self.0).expect("HMAC can take keys of any size");
        mac.update(seed.as_bytes());
        to_array(&mac.finalize().into_bytes())
    }
}

impl fmt::Debug for SeedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SeedKey(<redacted>)")
    }
}

/// Deterministic generator of floats in `[0, 1)`.
///
/// Two generators built from the same seed yield identical infinite sequences.
#[derive(Clone)]
pub struct SeededRandom {
    inner: Mcg128Xsl64,
}

impl SeededRandom {
    fn from_digest(digest: [u8; 32]) -> Self {
        let mut state = [0u8; 16];
        state.copy_from_slice(&digest[..16]);
        Self {
            inner: Mcg128Xsl64::from_seed(state),
        }
    }

    /// Next draw in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }
}

impl fmt::Debug for SeededRandom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeededRandom").finish_non_exhaustive()
    }
}

fn to_array(bytes: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(bytes);
    out
}

/// Create an unkeyed generator from a seed string.
pub fn create_seeded_random(seed: &str) -> SeededRandom {
    SeededRandom::from_digest(to_array(&Sha256::digest(seed.as_bytes())))
}

/// Create a generator whose state is HMAC-SHA256(key, seed).
pub fn create_keyed_seeded_random(seed: &str, key: &SeedKey) -> SeededRandom {
    SeededRandom::from_digest(key.digest(seed))
}

/// Map one draw onto the inclusive range `[min, max]`.
///
/// # Panics
///
/// Panics if `min > max`.
pub fn random_int_from_seed(rng: &mut SeededRandom, min: i64, max: i64) -> i64 {
    assert!(min <= max, "random_int_from_seed: min ({min}) > max ({max})");
    let span = (max - min + 1) as f64;
    // Guard against a draw that rounds up to exactly `span`.
    let offset = ((rng.next_f64() * span).floor() as i64).min(max - min);
    min + offset
}

/// Seed string for a child on a calendar day.
pub fn generate_seed(child_id: &str, date: NaiveDate) -> String {
    format!("{child_id}:{}", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn take(rng: &mut SeededRandom, n: usize) -> Vec<f64> {
        (0..n).map(|_| rng.next_f64()).collect()
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = create_seeded_random("child-alpha:2025-12-16");
        let mut b = create_seeded_random("child-alpha:2025-12-16");
        assert_eq!(take(&mut a, 64), take(&mut b, 64));
    }

    #[test]
    fn different_seeds_diverge_immediately() {
        let mut a = create_seeded_random("child-alpha:2025-12-16");
        let mut b = create_seeded_random("child-beta:2025-12-16");
        assert_ne!(a.next_f64(), b.next_f64());
    }

    #[test]
    fn draws_are_in_unit_interval() {
        let mut rng = create_seeded_random("range-check");
        for v in take(&mut rng, 10_000) {
            assert!((0.0..1.0).contains(&v), "{v} outside [0, 1)");
        }
    }

    #[test]
    fn keyed_generator_differs_from_unkeyed() {
        let key = SeedKey::from_bytes(vec![7u8; 32]).unwrap();
        let mut keyed = create_keyed_seeded_random("child-alpha:2025-12-16", &key);
        let mut plain = create_seeded_random("child-alpha:2025-12-16");
        assert_ne!(take(&mut keyed, 4), take(&mut plain, 4));
    }

    #[test]
    fn keyed_generator_depends_on_key() {
        let k1 = SeedKey::from_bytes(vec![1u8; 32]).unwrap();
        let k2 = SeedKey::from_bytes(vec![2u8; 32]).unwrap();
        let mut a = create_keyed_seeded_random("seed", &k1);
        let mut b = create_keyed_seeded_random("seed", &k2);
        let mut a2 = create_keyed_seeded_random("seed", &k1);
        let first = take(&mut a, 8);
        assert_ne!(first, take(&mut b, 8));
        assert_eq!(first, take(&mut a2, 8));
    }

    #[test]
    fn random_int_stays_in_bounds_and_hits_both_ends() {
        let mut rng = create_seeded_random("ints");
        let mut seen = [false; 3];
        for _ in 0..1_000 {
            let v = random_int_from_seed(&mut rng, 2, 4);
            assert!((2..=4).contains(&v));
            seen[(v - 2) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn random_int_degenerate_range() {
        let mut rng = create_seeded_random("ints");
        assert_eq!(random_int_from_seed(&mut rng, 5, 5), 5);
    }

    #[test]
    #[should_panic(expected = "min (5) > max (4)")]
    fn random_int_rejects_inverted_range() {
        let mut rng = create_seeded_random("ints");
        random_int_from_seed(&mut rng, 5, 4);
    }

    #[test]
    fn seed_format_uses_calendar_day() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(generate_seed("kid", date), "kid:2025-01-05");
    }

    #[test]
    fn seed_key_validation() {
        assert!(SeedKey::from_hex("zz").is_err());
        assert!(SeedKey::from_hex("00ff").is_err());
        let key = SeedKey::from_hex(&"ab".repeat(32)).unwrap();
        assert_eq!(key.to_hex(), "ab".repeat(32));
        assert_eq!(format!("{key:?}"), "SeedKey(<redacted>)");
    }
}
