//! The SM2 suite over [`crate::curve::SM2_STANDARD`]: ID-bound signing,
//! public-key encryption, and a four-message key-agreement protocol. SM3 is
//! the only digest SM2 ever reaches for, both directly and as the
//! counter-mode KDF underneath encryption and key agreement.

use crate::bigint::U256;
use crate::curve::{CurveParams, Point};
use crate::error::{Error, Result};
use crate::hash::sm3;
use crate::rng::SecureRandom;

/// `Z_A = SM3(ENTL‖ID‖a‖b‖Gx‖Gy‖PAx‖PAy)`, the user-identity preimage every
/// SM2 signature and key-agreement run starts from.
pub fn compute_z(params: &CurveParams, id: &[u8], public: &Point) -> Result<[u8; 32]> {
    let (px, py) = match public {
        Point::Finite { x, y } => (x, y),
        Point::Infinity => return Err(Error::PublicKeyIllegal),
    };
    let entl = ((id.len() as u64) * 8) as u16;

    let mut preimage = Vec::with_capacity(2 + id.len() + 32 * 6);
    preimage.extend_from_slice(&entl.to_be_bytes());
    preimage.extend_from_slice(id);
    preimage.extend_from_slice(&params.a.to_be_bytes());
    preimage.extend_from_slice(&params.b.to_be_bytes());
    preimage.extend_from_slice(&params.gx.to_be_bytes());
    preimage.extend_from_slice(&params.gy.to_be_bytes());
    preimage.extend_from_slice(&px.to_be_bytes());
    preimage.extend_from_slice(&py.to_be_bytes());
    Ok(sm3(&preimage))
}

// Reduced mod `n` here rather than at each call site: `e` only ever
// appears in a `mod_add` against another operand also reduced mod `n`,
// and `mod_add`'s overflow path assumes both inputs are already `< n`.
fn digest_e(params: &CurveParams, id: &[u8], public: &Point, message: &[u8], already_hashed: bool) -> Result<U256> {
    if already_hashed {
        if message.len() != 32 {
            return Err(Error::MalformedInput);
        }
        return Ok(U256::from_be_bytes(message.try_into().unwrap()).modulo(&params.n));
    }
    let z = compute_z(params, id, public)?;
    let mut preimage = Vec::with_capacity(32 + message.len());
    preimage.extend_from_slice(&z);
    preimage.extend_from_slice(message);
    Ok(U256::from_be_bytes(sm3(&preimage)).modulo(&params.n))
}

/// `P = [d]G`. Fails if `d` is not in `[1, n-1]`.
pub fn genpub(params: &CurveParams, d: &U256) -> Result<Point> {
    if !params.is_private_key_legal(d) {
        return Err(Error::PrivateKeyIllegal);
    }
    params.mul_base(d)
}

/// SM2 sign. `already_hashed` lets a caller supply a precomputed `e` (32
/// bytes) in place of `ID ‖ message`, bypassing `Z_A` entirely.
pub fn sign(
    params: &CurveParams,
    d: &U256,
    id: &[u8],
    message: &[u8],
    already_hashed: bool,
    rng: &mut dyn SecureRandom,
    k_opt: Option<U256>,
) -> Result<crate::curve::Signature> {
    if !params.is_private_key_legal(d) {
        return Err(Error::PrivateKeyIllegal);
    }
    if id.is_empty() && !already_hashed {
        return Err(Error::MissingId);
    }

    let public = genpub(params, d)?;
    let e = digest_e(params, id, &public, message, already_hashed)?;

    let one_plus_d_inv = {
        let (one_plus_d, _) = d.add(&U256::ONE);
        mmul_inv(&one_plus_d, &params.n)?
    };

    for attempt in 0..8 {
        let k = if attempt == 0 {
            k_opt.unwrap_or_else(|| rng.scalar_below(&params.n))
        } else {
            rng.scalar_below(&params.n)
        };

        let kg = params.mul_base(&k)?;
        let x1 = match kg {
            Point::Finite { x, .. } => x,
            Point::Infinity => continue,
        };

        let r = e.mod_add(&x1.modulo(&params.n), &params.n);
        if r.is_zero() {
            continue;
        }
        let r_plus_k = r.mod_add(&k, &params.n);
        if r_plus_k.is_zero() {
            continue;
        }

        let rd = mmul(&r, d, &params.n)?;
        let k_minus_rd = k.mod_sub(&rd, &params.n);
        let s = mmul(&one_plus_d_inv, &k_minus_rd, &params.n)?;
        if s.is_zero() {
            continue;
        }
        return Ok(crate::curve::Signature::from_parts(&r, &s));
    }
    Err(Error::ArithmeticFailure)
}

/// SM2 verify.
pub fn verify(
    params: &CurveParams,
    public: &Point,
    id: &[u8],
    message: &[u8],
    already_hashed: bool,
    sig: &crate::curve::Signature,
) -> Result<bool> {
    if !params.is_public_key_legal(public) {
        return Err(Error::PublicKeyIllegal);
    }
    if id.is_empty() && !already_hashed {
        return Err(Error::MissingId);
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

    let t = r.mod_add(&s, &params.n);
    if t.is_zero() {
        return Ok(false);
    }

    let e = digest_e(params, id, public, message, already_hashed)?;
    let sg = params.mul_base(&s)?;
    let tp = params.point_mul(public, &t)?;
    let sum = params.point_add(&sg, &tp)?;

    match sum {
        Point::Infinity => Ok(false),
        Point::Finite { x, .. } => Ok(e.mod_add(&x.modulo(&params.n), &params.n) == r),
    }
}

/// Counter-mode SM3 KDF: `T_i = SM3(Z ‖ i_be32)`, concatenated and
/// truncated to `klen_bytes` bytes.
fn kdf(z: &[u8], klen_bytes: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(klen_bytes + 32);
    let mut counter = 1u32;
    while out.len() < klen_bytes {
        let mut preimage = Vec::with_capacity(z.len() + 4);
        preimage.extend_from_slice(z);
        preimage.extend_from_slice(&counter.to_be_bytes());
        out.extend_from_slice(&sm3(&preimage));
        counter += 1;
    }
    out.truncate(klen_bytes);
    out
}

/// SM2 ciphertext: `0x04 ‖ C1.x(32) ‖ C1.y(32) ‖ C3(32) ‖ C2(|M|)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext(pub Vec<u8>);

impl Ciphertext {
    fn c1x(&self) -> &[u8] {
        &self.0[1..33]
    }
    fn c1y(&self) -> &[u8] {
        &self.0[33..65]
    }
    fn c3(&self) -> &[u8] {
        &self.0[65..97]
    }
    fn c2(&self) -> &[u8] {
        &self.0[97..]
    }
}

/// Encrypts `message` under public key `public`.
pub fn encrypt(
    params: &CurveParams,
    public: &Point,
    message: &[u8],
    rng: &mut dyn SecureRandom,
) -> Result<Ciphertext> {
    if !params.is_public_key_legal(public) {
        return Err(Error::PublicKeyIllegal);
    }

    loop {
        let k = rng.scalar_below(&params.n);
        let (x2, y2) = match params.point_mul(public, &k)? {
            Point::Finite { x, y } => (x, y),
            Point::Infinity => continue,
        };

        let mut z = Vec::with_capacity(64);
        z.extend_from_slice(&x2.to_be_bytes());
        z.extend_from_slice(&y2.to_be_bytes());
        let t = kdf(&z, message.len());
        if t.iter().all(|&b| b == 0) {
            continue;
        }

        let c2: Vec<u8> = message.iter().zip(t.iter()).map(|(m, k)| m ^ k).collect();

        let mut c3_preimage = Vec::with_capacity(64 + message.len());
        c3_preimage.extend_from_slice(&x2.to_be_bytes());
        c3_preimage.extend_from_slice(message);
        c3_preimage.extend_from_slice(&y2.to_be_bytes());
        let c3 = sm3(&c3_preimage);

        let (c1x, c1y) = match params.mul_base(&k)? {
            Point::Finite { x, y } => (x, y),
            Point::Infinity => continue,
        };

        let mut out = Vec::with_capacity(97 + message.len());
        out.push(0x04);
        out.extend_from_slice(&c1x.to_be_bytes());
        out.extend_from_slice(&c1y.to_be_bytes());
        out.extend_from_slice(&c3);
        out.extend_from_slice(&c2);
        return Ok(Ciphertext(out));
    }
}

/// Decrypts `cipher` under private key `d`. Every failure mode — bad key,
/// bad MAC, malformed layout — collapses to the same opaque error so a
/// caller cannot distinguish them.
pub fn decrypt(params: &CurveParams, d: &U256, cipher: &Ciphertext) -> Result<Vec<u8>> {
    if cipher.0.len() < 97 || cipher.0[0] != 0x04 {
        return Err(Error::VerificationFailed);
    }
    if !params.is_private_key_legal(d) {
        return Err(Error::PrivateKeyIllegal);
    }

    let c1x = U256::from_be_bytes(cipher.c1x().try_into().unwrap());
    let c1y = U256::from_be_bytes(cipher.c1y().try_into().unwrap());
    let c1 = Point::Finite { x: c1x, y: c1y };
    if !params.is_public_key_legal(&c1) {
        return Err(Error::VerificationFailed);
    }

    let (x2, y2) = match params.point_mul(&c1, d)? {
        Point::Finite { x, y } => (x, y),
        Point::Infinity => return Err(Error::VerificationFailed),
    };

    let mut z = Vec::with_capacity(64);
    z.extend_from_slice(&x2.to_be_bytes());
    z.extend_from_slice(&y2.to_be_bytes());
    let c2 = cipher.c2();
    let t = kdf(&z, c2.len());
    if t.iter().all(|&b| b == 0) {
        return Err(Error::VerificationFailed);
    }

    let plain: Vec<u8> = c2.iter().zip(t.iter()).map(|(c, k)| c ^ k).collect();

    let mut c3_preimage = Vec::with_capacity(64 + plain.len());
    c3_preimage.extend_from_slice(&x2.to_be_bytes());
    c3_preimage.extend_from_slice(&plain);
    c3_preimage.extend_from_slice(&y2.to_be_bytes());
    let c3_computed = sm3(&c3_preimage);

    if c3_computed != cipher.c3() {
        return Err(Error::VerificationFailed);
    }
    Ok(plain)
}

fn mmul(a: &U256, b: &U256, m: &U256) -> Result<U256> {
    crate::montgomery::mod_mul(&a.to_be_bytes(), &b.to_be_bytes(), &m.to_be_bytes())
        .map(U256::from_be_bytes)
        .map_err(|_| Error::ArithmeticFailure)
}

fn mmul_inv(a: &U256, m: &U256) -> Result<U256> {
    crate::montgomery::mod_inv(&a.to_be_bytes(), &m.to_be_bytes())
        .map(U256::from_be_bytes)
        .map_err(|_| Error::ArithmeticFailure)
}

/// Forces bit `w = 127` of `x`: `x̄ = 2^127 + (x mod 2^128)`, the truncation
/// rule the key-agreement protocol uses on both ephemeral x-coordinates.
fn xbar(x: &U256) -> U256 {
    let b = x.to_be_bytes();
    let mut out = [0u8; 32];
    out[16..32].copy_from_slice(&b[16..32]);
    out[16] |= 0x80;
    U256::from_be_bytes(out)
}

/// Ephemeral state held between steps of the key-agreement protocol. The
/// scalar is overwritten on drop; this crate carries no runtime
/// dependencies, so the wipe is a manual best-effort volatile write rather
/// than a dedicated zeroizing-allocator crate.
pub struct KeyExchangeState {
    scalar: U256,
    pub ephemeral_public: Point,
}

impl Drop for KeyExchangeState {
    fn drop(&mut self) {
        let bytes = &mut self.scalar.0;
        for b in bytes.iter_mut() {
            unsafe { std::ptr::write_volatile(b, 0) };
        }
        std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);
    }
}

/// Step 1, either side: draw an ephemeral scalar and its public point.
pub fn ka_step1(params: &CurveParams, rng: &mut dyn SecureRandom) -> Result<KeyExchangeState> {
    let r = rng.scalar_below(&params.n);
    let big_r = params.mul_base(&r)?;
    Ok(KeyExchangeState {
        scalar: r,
        ephemeral_public: big_r,
    })
}

/// Shared computation of `U = [t]·(P_peer + [x̄_peer]R_peer)` used by both
/// sides once they each hold the other's ephemeral public point.
fn shared_point(
    params: &CurveParams,
    own_static_d: &U256,
    own_ephemeral_r: &U256,
    own_ephemeral_big_r: &Point,
    peer_static_pub: &Point,
    peer_ephemeral_big_r: &Point,
) -> Result<Point> {
    let own_big_r_x = match own_ephemeral_big_r {
        Point::Finite { x, .. } => *x,
        Point::Infinity => return Err(Error::PublicKeyIllegal),
    };
    let peer_big_r_x = match peer_ephemeral_big_r {
        Point::Finite { x, .. } => *x,
        Point::Infinity => return Err(Error::PublicKeyIllegal),
    };

    let t_num = mmul(&xbar(&own_big_r_x), own_ephemeral_r, &params.n)?;
    let t = t_num.mod_add(own_static_d, &params.n);

    let scaled_peer_r = params.point_mul(peer_ephemeral_big_r, &xbar(&peer_big_r_x))?;
    let sum = params.point_add(peer_static_pub, &scaled_peer_r)?;
    let u = params.point_mul(&sum, &t)?;
    if matches!(u, Point::Infinity) {
        return Err(Error::ArithmeticFailure);
    }
    Ok(u)
}

fn ka_check(tag: u8, z_initiator: &[u8; 32], z_responder: &[u8; 32], r_a: &Point, r_b: &Point, u: &Point) -> Result<[u8; 32]> {
    let (ux, uy) = match u {
        Point::Finite { x, y } => (x, y),
        Point::Infinity => return Err(Error::ArithmeticFailure),
    };
    let (rax, ray) = match r_a {
        Point::Finite { x, y } => (x, y),
        Point::Infinity => return Err(Error::PublicKeyIllegal),
    };
    let (rbx, rby) = match r_b {
        Point::Finite { x, y } => (x, y),
        Point::Infinity => return Err(Error::PublicKeyIllegal),
    };

    let mut inner = Vec::with_capacity(32 * 6);
    inner.extend_from_slice(&ux.to_be_bytes());
    inner.extend_from_slice(z_initiator);
    inner.extend_from_slice(z_responder);
    inner.extend_from_slice(&rax.to_be_bytes());
    inner.extend_from_slice(&ray.to_be_bytes());
    inner.extend_from_slice(&rbx.to_be_bytes());
    inner.extend_from_slice(&rby.to_be_bytes());
    let inner_digest = sm3(&inner);

    let mut outer = Vec::with_capacity(1 + 32 + 32);
    outer.push(tag);
    outer.extend_from_slice(&uy.to_be_bytes());
    outer.extend_from_slice(&inner_digest);
    Ok(sm3(&outer))
}

/// Responder's single combined step: on receipt of `r_a` (the initiator's
/// ephemeral public point), draws its own ephemeral keypair, derives the
/// shared key and both confirmation tags, and returns `(R_B, K_B, S_B,
/// S_outer)` for the caller to send back to the initiator (`S_outer` is
/// held locally and compared against the initiator's reply in
/// [`ka_responder_step2`]).
#[allow(clippy::too_many_arguments)]
pub fn ka_responder_step1(
    params: &CurveParams,
    rng: &mut dyn SecureRandom,
    id_initiator: &[u8],
    id_responder: &[u8],
    d_b: &U256,
    pub_a: &Point,
    pub_b: &Point,
    r_a: &Point,
    keylen_bytes: usize,
) -> Result<(KeyExchangeState, Vec<u8>, [u8; 32], [u8; 32])> {
    if !params.is_private_key_legal(d_b) {
        return Err(Error::PrivateKeyIllegal);
    }
    if id_initiator.is_empty() || id_responder.is_empty() {
        return Err(Error::MissingId);
    }
    let state = ka_step1(params, rng)?;
    let u = shared_point(params, d_b, &state.scalar, &state.ephemeral_public, pub_a, r_a)?;

    let z_a = compute_z(params, id_initiator, pub_a)?;
    let z_b = compute_z(params, id_responder, pub_b)?;

    let (ux, uy) = match u {
        Point::Finite { x, y } => (x, y),
        Point::Infinity => return Err(Error::ArithmeticFailure),
    };
    let mut z = Vec::with_capacity(64 + 64);
    z.extend_from_slice(&ux.to_be_bytes());
    z.extend_from_slice(&uy.to_be_bytes());
    z.extend_from_slice(&z_a);
    z.extend_from_slice(&z_b);
    let k_b = kdf(&z, keylen_bytes);

    let s_b = ka_check(0x02, &z_a, &z_b, r_a, &state.ephemeral_public, &u)?;
    let s_outer = ka_check(0x03, &z_a, &z_b, r_a, &state.ephemeral_public, &u)?;

    Ok((state, k_b, s_b, s_outer))
}

/// Initiator's combined step 2: given its own step-1 state and the
/// responder's `(R_B, S_B)`, recomputes the shared secret, checks `S_B`,
/// and returns `(K_A, S_A)` — `S_A` is what the initiator sends back.
#[allow(clippy::too_many_arguments)]
pub fn ka_initiator_step2(
    params: &CurveParams,
    id_initiator: &[u8],
    id_responder: &[u8],
    d_a: &U256,
    pub_a: &Point,
    pub_b: &Point,
    state: &KeyExchangeState,
    r_b: &Point,
    s_b: &[u8; 32],
    keylen_bytes: usize,
) -> Result<(Vec<u8>, [u8; 32])> {
    if !params.is_private_key_legal(d_a) {
        return Err(Error::PrivateKeyIllegal);
    }
    if id_initiator.is_empty() || id_responder.is_empty() {
        return Err(Error::MissingId);
    }
    let u = shared_point(params, d_a, &state.scalar, &state.ephemeral_public, pub_b, r_b)?;

    let z_a = compute_z(params, id_initiator, pub_a)?;
    let z_b = compute_z(params, id_responder, pub_b)?;

    let (ux, uy) = match u {
        Point::Finite { x, y } => (x, y),
        Point::Infinity => return Err(Error::ArithmeticFailure),
    };
    let mut z = Vec::with_capacity(128);
    z.extend_from_slice(&ux.to_be_bytes());
    z.extend_from_slice(&uy.to_be_bytes());
    z.extend_from_slice(&z_a);
    z.extend_from_slice(&z_b);
    let k_a = kdf(&z, keylen_bytes);

    let expected_s_b = ka_check(0x02, &z_a, &z_b, &state.ephemeral_public, r_b, &u)?;
    if &expected_s_b != s_b {
        return Err(Error::VerificationFailed);
    }

    let s_a = ka_check(0x03, &z_a, &z_b, &state.ephemeral_public, r_b, &u)?;
    Ok((k_a, s_a))
}

/// Responder's final check: does the initiator's reply match the `S_outer`
/// this side computed in [`ka_responder_step1`]?
pub fn ka_responder_step2(s_a_received: &[u8; 32], s_outer_held: &[u8; 32]) -> bool {
    s_a_received == s_outer_held
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::SM2_STANDARD;
    use crate::rng::Csprng;

    #[test]
    fn sign_verify_roundtrip() {
        let mut rng = Csprng::from_os();
        let d = U256::from(0xABCDu64);
        let p = genpub(&SM2_STANDARD, &d).unwrap();
        let id = b"alice@example.com";
        let msg = b"sm2 message";
        let sig = sign(&SM2_STANDARD, &d, id, msg, false, &mut rng, None).unwrap();
        assert!(verify(&SM2_STANDARD, &p, id, msg, false, &sig).unwrap());
    }

    #[test]
    fn wrong_key_fails_verification() {
        let mut rng = Csprng::from_os();
        let d = U256::from(11u32);
        let other = U256::from(12u32);
        let p = genpub(&SM2_STANDARD, &d).unwrap();
        let id = b"bob";
        let msg = b"sm2 message";
        let sig = sign(&SM2_STANDARD, &other, id, msg, false, &mut rng, None).unwrap();
        assert!(!verify(&SM2_STANDARD, &p, id, msg, false, &sig).unwrap());
    }

    #[test]
    fn missing_id_rejected() {
        let mut rng = Csprng::from_os();
        let d = U256::from(11u32);
        assert!(matches!(
            sign(&SM2_STANDARD, &d, b"", b"m", false, &mut rng, None),
            Err(Error::MissingId)
        ));
    }

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let mut rng = Csprng::from_os();
        let d = U256::from(999u32);
        let p = genpub(&SM2_STANDARD, &d).unwrap();
        let msg = b"hello sm2";
        let cipher = encrypt(&SM2_STANDARD, &p, msg, &mut rng).unwrap();
        let plain = decrypt(&SM2_STANDARD, &d, &cipher).unwrap();
        assert_eq!(plain, msg);
    }

    #[test]
    fn tampered_ciphertext_fails_without_panicking() {
        let mut rng = Csprng::from_os();
        let d = U256::from(999u32);
        let p = genpub(&SM2_STANDARD, &d).unwrap();
        let mut cipher = encrypt(&SM2_STANDARD, &p, b"hello", &mut rng).unwrap();
        let last = cipher.0.len() - 1;
        cipher.0[last] ^= 0x01;
        assert!(decrypt(&SM2_STANDARD, &d, &cipher).is_err());
    }

    #[test]
    fn key_agreement_round_trip() {
        let mut rng = Csprng::from_os();
        let d_a = U256::from(111u32);
        let d_b = U256::from(222u32);
        let p_a = genpub(&SM2_STANDARD, &d_a).unwrap();
        let p_b = genpub(&SM2_STANDARD, &d_b).unwrap();
        let id_a = b"initiator";
        let id_b = b"responder";

        let state_a = ka_step1(&SM2_STANDARD, &mut rng).unwrap();
        let r_a = state_a.ephemeral_public;

        let (state_b, k_b, s_b, s_outer) =
            ka_responder_step1(&SM2_STANDARD, &mut rng, id_a, id_b, &d_b, &p_a, &p_b, &r_a, 16).unwrap();
        let r_b = state_b.ephemeral_public;

        let (k_a, s_a) =
            ka_initiator_step2(&SM2_STANDARD, id_a, id_b, &d_a, &p_a, &p_b, &state_a, &r_b, &s_b, 16).unwrap();

        assert_eq!(k_a, k_b);
        assert!(ka_responder_step2(&s_a, &s_outer));
    }
}
