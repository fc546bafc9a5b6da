//! Uniform entry surface: a 32-bit curve tag selects which underlying
//! primitive (ECDSA over a Weierstrass curve, SM2, or the delegated
//! Ed25519 collaborator) services a request. Tag values match the
//! external interface's documented constants exactly.

use crate::bigint::U256;
use crate::curve::{CurveParams, Point, Signature, SECP256K1, SECP256R1, SM2_STANDARD};
use crate::error::{Error, Result};
use crate::rng::SecureRandom;
use crate::sm2::{Ciphertext, KeyExchangeState};

/// Selects the underlying curve/primitive a dispatch call operates on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum CurveTag {
    Secp256k1 = 0xECC0_0000,
    Secp256r1 = 0xECC0_0001,
    Sm2Standard = 0xECC0_0002,
    Ed25519 = 0xECC0_0003,
}

impl TryFrom<u32> for CurveTag {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            0xECC0_0000 => Ok(CurveTag::Secp256k1),
            0xECC0_0001 => Ok(CurveTag::Secp256r1),
            0xECC0_0002 => Ok(CurveTag::Sm2Standard),
            0xECC0_0003 => Ok(CurveTag::Ed25519),
            _ => Err(Error::WrongCurveType),
        }
    }
}

impl From<CurveTag> for u32 {
    fn from(tag: CurveTag) -> Self {
        tag as u32
    }
}

fn weierstrass_params(tag: CurveTag) -> Result<&'static CurveParams> {
    match tag {
        CurveTag::Secp256k1 => Ok(&SECP256K1),
        CurveTag::Secp256r1 => Ok(&SECP256R1),
        CurveTag::Sm2Standard => Ok(&SM2_STANDARD),
        CurveTag::Ed25519 => Err(Error::WrongCurveType),
    }
}

fn require_sm2(tag: CurveTag) -> Result<()> {
    if tag == CurveTag::Sm2Standard {
        Ok(())
    } else {
        Err(Error::WrongCurveType)
    }
}

fn scalar_from_bytes(bytes: &[u8]) -> Result<U256> {
    let arr: [u8; 32] = bytes.try_into().map_err(|_| Error::MalformedInput)?;
    Ok(U256::from_be_bytes(arr))
}

fn point_to_bytes(p: &Point) -> Result<[u8; 64]> {
    match p {
        Point::Finite { x, y } => {
            let mut out = [0u8; 64];
            out[..32].copy_from_slice(&x.to_be_bytes());
            out[32..].copy_from_slice(&y.to_be_bytes());
            Ok(out)
        }
        Point::Infinity => Err(Error::MalformedInput),
    }
}

fn point_from_bytes(bytes: &[u8]) -> Result<Point> {
    if bytes.len() != 64 {
        return Err(Error::MalformedInput);
    }
    let x = U256::from_be_bytes(bytes[0..32].try_into().unwrap());
    let y = U256::from_be_bytes(bytes[32..64].try_into().unwrap());
    Ok(Point::Finite { x, y })
}

/// Derives a public key from a private key. `ED25519` treats `private_key`
/// as a 32-byte little-endian seed and returns a 32-byte public point;
/// every other tag returns a 64-byte `x‖y` point.
pub fn gen_pubkey(tag: CurveTag, private_key: &[u8]) -> Result<Vec<u8>> {
    if tag == CurveTag::Ed25519 {
        let seed: [u8; 32] = private_key.try_into().map_err(|_| Error::MalformedInput)?;
        return Ok(crate::ed25519::gen_pub(&seed).to_vec());
    }
    let params = weierstrass_params(tag)?;
    let d = scalar_from_bytes(private_key)?;
    let public = if tag == CurveTag::Sm2Standard {
        crate::sm2::genpub(params, &d)?
    } else {
        crate::ecdsa::genpub(params, &d)?
    };
    Ok(point_to_bytes(&public)?.to_vec())
}

/// Signs `message` under `private_key`. SM2 requires a non-empty `id`;
/// other Weierstrass curves and Ed25519 ignore it.
pub fn sign(
    tag: CurveTag,
    private_key: &[u8],
    id: &[u8],
    message: &[u8],
    already_hashed: bool,
    rng: &mut dyn SecureRandom,
) -> Result<Vec<u8>> {
    if tag == CurveTag::Ed25519 {
        let seed: [u8; 32] = private_key.try_into().map_err(|_| Error::MalformedInput)?;
        return Ok(crate::ed25519::sign(&seed, message).to_vec());
    }
    let params = weierstrass_params(tag)?;
    let d = scalar_from_bytes(private_key)?;
    let sig = if tag == CurveTag::Sm2Standard {
        crate::sm2::sign(params, &d, id, message, already_hashed, rng, None)?
    } else {
        crate::ecdsa::sign(params, &d, message, already_hashed, rng, None)?
    };
    Ok(sig.0.to_vec())
}

/// Verifies a signature against `message` under `public_key`.
pub fn verify(
    tag: CurveTag,
    public_key: &[u8],
    id: &[u8],
    message: &[u8],
    already_hashed: bool,
    signature: &[u8],
) -> Result<bool> {
    if tag == CurveTag::Ed25519 {
        let public: [u8; 32] = public_key.try_into().map_err(|_| Error::MalformedInput)?;
        let sig: [u8; 64] = signature.try_into().map_err(|_| Error::MalformedInput)?;
        return Ok(crate::ed25519::verify(&public, message, &sig));
    }
    let params = weierstrass_params(tag)?;
    let p = point_from_bytes(public_key)?;
    let sig_bytes: [u8; 64] = signature.try_into().map_err(|_| Error::MalformedInput)?;
    let sig = Signature(sig_bytes);
    if tag == CurveTag::Sm2Standard {
        crate::sm2::verify(params, &p, id, message, already_hashed, &sig)
    } else {
        crate::ecdsa::verify(params, &p, message, already_hashed, &sig)
    }
}

/// `[k]G`, identical to [`gen_pubkey`]. Accepts all four tags.
pub fn mul_base_g(tag: CurveTag, k: &[u8]) -> Result<Vec<u8>> {
    if tag == CurveTag::Ed25519 {
        let seed: [u8; 32] = k.try_into().map_err(|_| Error::MalformedInput)?;
        return Ok(crate::ed25519::gen_pub(&seed).to_vec());
    }
    let params = weierstrass_params(tag)?;
    let scalar = scalar_from_bytes(k)?;
    let p = crate::pointops::mul_base_g(params, &scalar)?;
    Ok(point_to_bytes(&p)?.to_vec())
}

/// The subgroup order for `tag`, little-endian for `ED25519` and
/// big-endian otherwise.
pub fn get_curve_order(tag: CurveTag) -> Result<[u8; 32]> {
    if tag == CurveTag::Ed25519 {
        return Ok(crate::ed25519::get_order());
    }
    Ok(weierstrass_params(tag)?.n.to_be_bytes())
}

/// SM2 public-key encryption. Any other tag yields `ECC_WRONG_TYPE`.
pub fn encrypt(tag: CurveTag, public_key: &[u8], message: &[u8], rng: &mut dyn SecureRandom) -> Result<Vec<u8>> {
    require_sm2(tag)?;
    let p = point_from_bytes(public_key)?;
    let cipher = crate::sm2::encrypt(&SM2_STANDARD, &p, message, rng)?;
    Ok(cipher.0)
}

/// SM2 decryption. Any other tag yields `ECC_WRONG_TYPE`.
pub fn decrypt(tag: CurveTag, private_key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    require_sm2(tag)?;
    let d = scalar_from_bytes(private_key)?;
    crate::sm2::decrypt(&SM2_STANDARD, &d, &Ciphertext(ciphertext.to_vec()))
}

/// `P + [k]Q`. Only the three Weierstrass curves are supported.
pub fn point_mul_add(tag: CurveTag, p: &[u8], k: &[u8], q: &[u8]) -> Result<Vec<u8>> {
    let params = weierstrass_params(tag)?;
    let p_point = point_from_bytes(p)?;
    let q_point = point_from_bytes(q)?;
    let scalar = scalar_from_bytes(k)?;
    let result = crate::pointops::point_mul_add(params, &p_point, &scalar, &q_point)?;
    Ok(point_to_bytes(&result)?.to_vec())
}

/// `P + [k]G`. Supports the three Weierstrass curves plus `ED25519`,
/// which treats `p` and `k` as little-endian.
pub fn point_mul_base_add(tag: CurveTag, p: &[u8], k: &[u8]) -> Result<Vec<u8>> {
    if tag == CurveTag::Ed25519 {
        let point: [u8; 32] = p.try_into().map_err(|_| Error::MalformedInput)?;
        let scalar: [u8; 32] = k.try_into().map_err(|_| Error::MalformedInput)?;
        let out = crate::ed25519::add_mul_base(&scalar, &point).ok_or(Error::ArithmeticFailure)?;
        return Ok(out.to_vec());
    }
    let params = weierstrass_params(tag)?;
    let p_point = point_from_bytes(p)?;
    let scalar = scalar_from_bytes(k)?;
    let result = crate::pointops::point_mul_base_add(params, &p_point, &scalar)?;
    Ok(point_to_bytes(&result)?.to_vec())
}

/// Compresses a 64/65-byte point into its 33-byte form. Only the three
/// Weierstrass curves are supported.
pub fn point_compress(tag: CurveTag, encoded: &[u8]) -> Result<[u8; 33]> {
    weierstrass_params(tag)?.point_compress(encoded)
}

/// Decompresses a 33-byte point into its 65-byte `04‖x‖y` form. Only the
/// three Weierstrass curves are supported.
pub fn point_decompress(tag: CurveTag, compressed: &[u8; 33]) -> Result<[u8; 65]> {
    weierstrass_params(tag)?.point_decompress(compressed)
}

/// Step 1 of SM2 key agreement, either side. `tag` must be `SM2_STANDARD`.
pub fn key_agreement_step1(tag: CurveTag, rng: &mut dyn SecureRandom) -> Result<KeyExchangeState> {
    require_sm2(tag)?;
    crate::sm2::ka_step1(&SM2_STANDARD, rng)
}

/// Responder's combined step, gated to `SM2_STANDARD`.
#[allow(clippy::too_many_arguments)]
pub fn key_agreement_responder_step1(
    tag: CurveTag,
    rng: &mut dyn SecureRandom,
    id_initiator: &[u8],
    id_responder: &[u8],
    d_b: &[u8],
    pub_a: &[u8],
    pub_b: &[u8],
    r_a: &[u8],
    keylen_bytes: usize,
) -> Result<(KeyExchangeState, Vec<u8>, [u8; 32], [u8; 32])> {
    require_sm2(tag)?;
    let d_b = scalar_from_bytes(d_b)?;
    let pub_a = point_from_bytes(pub_a)?;
    let pub_b = point_from_bytes(pub_b)?;
    let r_a = point_from_bytes(r_a)?;
    crate::sm2::ka_responder_step1(
        &SM2_STANDARD,
        rng,
        id_initiator,
        id_responder,
        &d_b,
        &pub_a,
        &pub_b,
        &r_a,
        keylen_bytes,
    )
}

/// Initiator's combined step 2, gated to `SM2_STANDARD`.
#[allow(clippy::too_many_arguments)]
pub fn key_agreement_initiator_step2(
    tag: CurveTag,
    id_initiator: &[u8],
    id_responder: &[u8],
    d_a: &[u8],
    pub_a: &[u8],
    pub_b: &[u8],
    state: &KeyExchangeState,
    r_b: &[u8],
    s_b: &[u8; 32],
    keylen_bytes: usize,
) -> Result<(Vec<u8>, [u8; 32])> {
    require_sm2(tag)?;
    let d_a = scalar_from_bytes(d_a)?;
    let pub_a = point_from_bytes(pub_a)?;
    let pub_b = point_from_bytes(pub_b)?;
    let r_b = point_from_bytes(r_b)?;
    crate::sm2::ka_initiator_step2(
        &SM2_STANDARD,
        id_initiator,
        id_responder,
        &d_a,
        &pub_a,
        &pub_b,
        state,
        &r_b,
        s_b,
        keylen_bytes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Csprng;

    #[test]
    fn curve_tag_roundtrips_through_u32() {
        for tag in [
            CurveTag::Secp256k1,
            CurveTag::Secp256r1,
            CurveTag::Sm2Standard,
            CurveTag::Ed25519,
        ] {
            let raw: u32 = tag.into();
            assert_eq!(CurveTag::try_from(raw).unwrap(), tag);
        }
    }

    #[test]
    fn unknown_tag_rejected() {
        assert!(CurveTag::try_from(0xDEAD_BEEF).is_err());
    }

    #[test]
    fn secp256k1_sign_verify_through_dispatch() {
        let mut rng = Csprng::from_os();
        let d = [0x01u8; 32];
        let pubkey = gen_pubkey(CurveTag::Secp256k1, &d).unwrap();
        let msg = b"dispatch test";
        let sig = sign(CurveTag::Secp256k1, &d, b"", msg, false, &mut rng).unwrap();
        assert!(verify(CurveTag::Secp256k1, &pubkey, b"", msg, false, &sig).unwrap());
    }

    #[test]
    fn encrypt_rejects_non_sm2_tags() {
        let mut rng = Csprng::from_os();
        let d = [0x02u8; 32];
        let pubkey = gen_pubkey(CurveTag::Secp256k1, &d).unwrap();
        assert!(matches!(
            encrypt(CurveTag::Secp256k1, &pubkey, b"msg", &mut rng),
            Err(Error::WrongCurveType)
        ));
    }

    #[test]
    fn sm2_sign_requires_id() {
        let mut rng = Csprng::from_os();
        let d = [0x03u8; 32];
        assert!(matches!(
            sign(CurveTag::Sm2Standard, &d, b"", b"msg", false, &mut rng),
            Err(Error::MissingId)
        ));
    }

    #[test]
    fn point_compress_rejects_ed25519() {
        assert!(matches!(
            point_compress(CurveTag::Ed25519, &[0u8; 33]),
            Err(Error::WrongCurveType)
        ));
    }

    #[test]
    fn ed25519_roundtrip_through_dispatch() {
        let seed = [0x07u8; 32];
        let pubkey = gen_pubkey(CurveTag::Ed25519, &seed).unwrap();
        let msg = b"ed25519 via dispatch";
        let mut rng = Csprng::from_os();
        let sig = sign(CurveTag::Ed25519, &seed, b"", msg, false, &mut rng).unwrap();
        assert!(verify(CurveTag::Ed25519, &pubkey, b"", msg, false, &sig).unwrap());
    }
}
