//! Random number generation module
//!
//! This module provides cryptographically secure randomness facilities
//! for the Nebula ecosystem.
//!
//! It is built around a ChaCha20-based deterministic random bit generator
//! (DRBG) and exposes a high-level CSPRNG interface suitable for
//! security-critical use cases such as key generation, nonces, and identifiers.

/// Design goals:
/// - Cryptographic security
/// - Deterministic expansion from a secure seed
/// - Forward secrecy through periodic rekeying
/// - No heap allocation
/// - Minimal and explicit API surface
pub(crate) mod chacha20;
mod csprng;

/// Cryptographically secure pseudorandom number generator.
///
/// This type is the primary entry point for generating secure randomness
/// within the Nebula codebase.
pub use csprng::Csprng;

/// Injectable randomness capability used by every signing, encryption, and
/// key-agreement entry point in this crate, rather than a process-global
/// PRNG seeded from wall-clock time.
pub trait SecureRandom {
    fn fill_bytes(&mut self, out: &mut [u8]);

    /// Draws a uniform scalar in `[1, n)` by rejection sampling.
    fn scalar_below(&mut self, n: &crate::bigint::U256) -> crate::bigint::U256 {
        loop {
            let mut buf = [0u8; 32];
            self.fill_bytes(&mut buf);
            let candidate = crate::bigint::U256::from_be_bytes(buf);
            if !candidate.is_zero() && candidate.cmp_bytes(n) == std::cmp::Ordering::Less {
                return candidate;
            }
        }
    }
}

impl SecureRandom for Csprng {
    fn fill_bytes(&mut self, out: &mut [u8]) {
        Csprng::fill_bytes(self, out)
    }
}
