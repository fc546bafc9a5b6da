//! walletcrypt — elliptic-curve primitives for wallet-style key management:
//! secp256k1 and NIST P-256 ECDSA, GB/T 32918 SM2 (sign/verify, public-key
//! encryption, four-message key agreement), and a delegated Ed25519
//! collaborator, all routed through a single curve-tag [`dispatch`] surface.
//!
//! # Module overview
//!
//! - [`bigint`] — fixed-width 256-bit integer arithmetic (`U256`): the
//!   schoolbook layer underlying legality checks and small modular
//!   reductions.
//! - [`montgomery`] — the Montgomery modular-arithmetic engine (`mod_mul`,
//!   `mod_inv`) curve and signature operations run on.
//! - [`curve`] — generic Weierstrass curve parameters and point operations
//!   (addition, scalar multiplication, compression) shared by ECDSA and
//!   SM2.
//! - [`ecdsa`] — ECDSA sign/verify over secp256k1 and secp256r1.
//! - [`sm2`] — the SM2 suite: `Z(ID, P_A)`, sign/verify, encrypt/decrypt,
//!   and the key-agreement protocol.
//! - [`dispatch`] — the curve-tag entry surface every external caller goes
//!   through.
//! - [`pointops`] — boundary helpers composing `point_mul`/`point_add`.
//! - [`ed25519`] — thin wrapper delegating to the Edwards25519
//!   implementation in `signatures`, exposing it under the same
//!   little-endian contract the dispatch layer expects.
//! - [`hash`] — the digest collaborators every signature scheme and KDF in
//!   this crate is built on.
//! - [`rng`] — the injectable `SecureRandom` capability and its ChaCha20-
//!   based default implementation.
//! - [`error`] — the shared `Error`/`ResultCode` vocabulary.
//!
//! # Design goals
//!
//! - No heap allocations in the arithmetic core; `Vec` appears only at
//!   variable-length boundaries (SM2 ciphertext, dispatch byte strings).
//! - Explicit, auditable semantics over a large surface area.
//! - Randomness is always caller-injected via `&mut dyn SecureRandom`,
//!   never drawn from a hidden global.

pub mod bigint;
pub mod montgomery;
pub mod curve;
pub mod ecdsa;
pub mod sm2;
pub mod dispatch;
pub mod pointops;
pub mod ed25519;
pub mod hash;
pub mod rng;
pub mod error;

pub(crate) mod signatures;
pub(crate) mod os;
