//! ECDSA sign/verify over a generic Weierstrass curve (secp256k1,
//! secp256r1). RFC-6979-style deterministic nonces are **not** implemented
//! here — nonces are drawn from an injected [`SecureRandom`], matching the
//! rewritten, non-deterministic design this crate follows.

use crate::bigint::U256;
use crate::curve::{CurveParams, Point, Signature};
use crate::error::{Error, Result};
use crate::hash::sha256;
use crate::rng::SecureRandom;

/// `P = [d]G`. Fails if `d` is not in `[1, n-1]`.
pub fn genpub(params: &CurveParams, d: &U256) -> Result<Point> {
    if !params.is_private_key_legal(d) {
        return Err(Error::PrivateKeyIllegal);
    }
    params.mul_base(d)
}

/// Reduces a message to its 32-byte digest. If `message` is already exactly
/// 32 bytes and `already_hashed` is set, it is used as the digest directly;
/// otherwise it is hashed with SHA-256, the default digest for this
/// engine.
fn digest_message(message: &[u8], already_hashed: bool) -> [u8; 32] {
    if already_hashed && message.len() == 32 {
        let mut out = [0u8; 32];
        out.copy_from_slice(message);
        out
    } else {
        sha256(message)
    }
}

/// Signs `message` with private key `d`, drawing a fresh nonce from `rng`
/// unless `k_opt` is supplied. Retries internally (per the documented
/// "r = 0 or s = 0, retry" rule) by drawing a new nonce, up to a bounded
/// number of attempts — astronomically unlikely to be exhausted for a
/// uniform RNG.
pub fn sign(
    params: &CurveParams,
    d: &U256,
    message: &[u8],
    already_hashed: bool,
    rng: &mut dyn SecureRandom,
    k_opt: Option<U256>,
) -> Result<Signature> {
    if !params.is_private_key_legal(d) {
        return Err(Error::PrivateKeyIllegal);
    }
    let digest = digest_message(message, already_hashed);
    let e = U256::from_be_bytes(digest).modulo(&params.n);

    for attempt in 0..8 {
        let k = if attempt == 0 {
            k_opt.unwrap_or_else(|| rng.scalar_below(&params.n))
        } else {
            rng.scalar_below(&params.n)
        };

        let r1 = params.mul_base(&k)?;
        let x1 = match r1 {
            Point::Finite { x, .. } => x,
            Point::Infinity => continue,
        };
        let r = x1.modulo(&params.n);
        if r.is_zero() {
            continue;
        }

        let k_inv = crate::montgomery::mod_inv(&k.to_be_bytes(), &params.n.to_be_bytes())
            .map(U256::from_be_bytes)
            .map_err(|_| Error::ArithmeticFailure)?;
        let rd = crate::montgomery::mod_mul(&r.to_be_bytes(), &d.to_be_bytes(), &params.n.to_be_bytes())
            .map(U256::from_be_bytes)
            .map_err(|_| Error::ArithmeticFailure)?;
        let e_plus_rd = e.mod_add(&rd, &params.n);
        let s = crate::montgomery::mod_mul(
            &k_inv.to_be_bytes(),
            &e_plus_rd.to_be_bytes(),
            &params.n.to_be_bytes(),
        )
        .map(U256::from_be_bytes)
        .map_err(|_| Error::ArithmeticFailure)?;

        if s.is_zero() {
            continue;
        }
        return Ok(Signature::from_parts(&r, &s));
    }
    Err(Error::ArithmeticFailure)
}

/// Verifies `sig` against `message` under public key `p`.
pub fn verify(
    params: &CurveParams,
    p: &Point,
    message: &[u8],
    already_hashed: bool,
    sig: &Signature,
) -> Result<bool> {
    if !params.is_public_key_legal(p) {
        return Err(Error::PublicKeyIllegal);
    }
    let r = sig.r();
    let s = sig.s();
    if r.is_zero()
        || r.cmp_bytes(&params.n) != std::cmp::Ordering::Less
        || s.is_zero()
        || s.cmp_bytes(&params.n) != std::cmp::Ordering::Less
    {
        return Ok(false);
    }

    let digest = digest_message(message, already_hashed);
    let e = U256::from_be_bytes(digest).modulo(&params.n);

    let w = match crate::montgomery::mod_inv(&s.to_be_bytes(), &params.n.to_be_bytes()) {
        Ok(v) => U256::from_be_bytes(v),
        Err(_) => return Ok(false),
    };

    let u1 = crate::montgomery::mod_mul(&e.to_be_bytes(), &w.to_be_bytes(), &params.n.to_be_bytes())
        .map(U256::from_be_bytes)
        .map_err(|_| Error::ArithmeticFailure)?;
    let u2 = crate::montgomery::mod_mul(&r.to_be_bytes(), &w.to_be_bytes(), &params.n.to_be_bytes())
        .map(U256::from_be_bytes)
        .map_err(|_| Error::ArithmeticFailure)?;

    let p1 = params.mul_base(&u1)?;
    let p2 = params.point_mul(p, &u2)?;
    let x = params.point_add(&p1, &p2)?;

    match x {
        Point::Infinity => Ok(false),
        Point::Finite { x, .. } => Ok(x.modulo(&params.n) == r),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::SECP256K1;
    use crate::rng::Csprng;

    #[test]
    fn sign_verify_roundtrip() {
        let mut rng = Csprng::from_os();
        let d = U256::from(0x1234_5678u64);
        let p = genpub(&SECP256K1, &d).unwrap();
        let msg = b"hello ecdsa";
        let sig = sign(&SECP256K1, &d, msg, false, &mut rng, None).unwrap();
        assert!(verify(&SECP256K1, &p, msg, false, &sig).unwrap());
    }

    #[test]
    fn wrong_key_fails_verification() {
        let mut rng = Csprng::from_os();
        let d = U256::from(42u32);
        let other_d = U256::from(43u32);
        let p = genpub(&SECP256K1, &d).unwrap();
        let msg = b"hello ecdsa";
        let sig = sign(&SECP256K1, &other_d, msg, false, &mut rng, None).unwrap();
        assert!(!verify(&SECP256K1, &p, msg, false, &sig).unwrap());
    }

    #[test]
    fn boundary_scalars_sign_successfully() {
        let mut rng = Csprng::from_os();
        let one = U256::ONE;
        assert!(genpub(&SECP256K1, &one).is_ok());
        let (n_minus_1, _) = SECP256K1.n.sub(&U256::ONE);
        assert!(genpub(&SECP256K1, &n_minus_1).is_ok());

        assert!(sign(&SECP256K1, &U256::ZERO, b"m", false, &mut rng, None).is_err());
        assert!(sign(&SECP256K1, &SECP256K1.n, b"m", false, &mut rng, None).is_err());
    }

    #[test]
    fn known_answer_generator_from_private_key_one() {
        let p = genpub(&SECP256K1, &U256::ONE).unwrap();
        assert_eq!(p, SECP256K1.generator());
    }
}
