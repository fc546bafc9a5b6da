//! Thin dispatch-facing wrapper around the Edwards25519 implementation in
//! [`crate::signatures::ed25519`]. Every curve the dispatch layer routes to
//! speaks big-endian 32/64-byte fixed layouts except this one — Ed25519 is
//! delegated unchanged, little-endian inputs and outputs included, per its
//! own wire conventions.

use crate::hash::sha512;
use crate::signatures::ed25519::core::{self, PrivateKey, PublicKey, Signature};
use crate::signatures::ed25519::group::{GeCached, GeP1, GeP3};
use crate::signatures::ed25519::scalar::Scalar;

/// The Ed25519 group order `ℓ`, little-endian.
pub const ORDER: [u8; 32] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
];

fn expand_seed(seed: &[u8; 32]) -> (Scalar, [u8; 32]) {
    let digest = sha512(seed);

    let mut a_bytes = [0u8; 32];
    a_bytes.copy_from_slice(&digest[..32]);
    a_bytes[0] &= 248;
    a_bytes[31] &= 63;
    a_bytes[31] |= 64;

    let mut prefix = [0u8; 32];
    prefix.copy_from_slice(&digest[32..64]);

    (Scalar::from_bytes(&a_bytes), prefix)
}

/// Derives the public point from a 32-byte little-endian seed, following
/// the standard Ed25519 clamp-and-multiply derivation. Used for both
/// `genPubkey` and `mul_baseG` — the dispatch layer treats them as the same
/// request for this curve.
pub fn gen_pub(seed: &[u8; 32]) -> [u8; 32] {
    let (scalar, _) = expand_seed(seed);
    GeP3::from_scalar_mul(scalar).to_bytes()
}

/// Signs `message` with the private key derived from `seed`.
pub fn sign(seed: &[u8; 32], message: &[u8]) -> [u8; 64] {
    let (scalar, prefix) = expand_seed(seed);
    let public = PublicKey::from_bytes(gen_pub(seed));
    let private = PrivateKey::from_parts(scalar, prefix);
    core::sign(message, public, private).to_bytes()
}

/// Verifies `signature` over `message` under `public`.
pub fn verify(public: &[u8; 32], message: &[u8], signature: &[u8; 64]) -> bool {
    core::verify(Signature::from_bytes(*signature), message, PublicKey::from_bytes(*public))
}

/// `point + [scalar]G`, the Ed25519 leg of `point_mul_baseG_add`. `scalar`
/// is used as-is, without the key-derivation clamp — this is a generic
/// point operation, not a key-generation one.
pub fn add_mul_base(scalar: &[u8; 32], point: &[u8; 32]) -> Option<[u8; 32]> {
    let (decoded, status) = GeP3::decompress(point);
    if status != 0 {
        return None;
    }

    let kg = GeP3::from_scalar_mul(Scalar::from_bytes(scalar));
    let cached = GeCached::from_p3(&decoded);
    let sum = GeP1::from_sum(&kg, &cached);
    Some(GeP3::from_gep1(&sum).to_bytes())
}

/// The Ed25519 group order, little-endian.
pub fn get_order() -> [u8; 32] {
    ORDER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_verify_roundtrip() {
        let seed = [0x11u8; 32];
        let public = gen_pub(&seed);
        let msg = b"dispatched message";
        let sig = sign(&seed, msg);
        assert!(verify(&public, msg, &sig));
    }

    #[test]
    fn tampered_message_fails() {
        let seed = [0x22u8; 32];
        let public = gen_pub(&seed);
        let sig = sign(&seed, b"original");
        assert!(!verify(&public, b"tampered", &sig));
    }

    #[test]
    fn add_mul_base_changes_point() {
        let seed = [0x33u8; 32];
        let public = gen_pub(&seed);
        let k = [0x01u8; 32];
        let moved = add_mul_base(&k, &public).unwrap();
        assert_ne!(moved, public);
    }

    #[test]
    fn order_matches_known_constant() {
        assert_eq!(get_order()[31], 0x10);
        assert_eq!(get_order()[0], 0xed);
    }
}
