//! Boundary helpers composing point multiplication and addition for the
//! three Weierstrass curves: the shapes the external interface exposes
//! directly rather than asking a caller to chain `point_mul`/`point_add`
//! themselves. Grounded on `sm2_point_mul_add`/`sm2_point_mul_baseG_add` in
//! the original GB/T 32918 reference, generalized to any [`CurveParams`].

use crate::bigint::U256;
use crate::curve::{CurveParams, Point};
use crate::error::{Error, Result};

/// `P + [k]Q`. Fails if the result is the point at infinity.
pub fn point_mul_add(params: &CurveParams, p: &Point, k: &U256, q: &Point) -> Result<Point> {
    let kq = params.point_mul(q, k)?;
    let sum = params.point_add(p, &kq)?;
    if matches!(sum, Point::Infinity) {
        return Err(Error::ArithmeticFailure);
    }
    Ok(sum)
}

/// `P + [k]G`. Fails if the result is the point at infinity.
pub fn point_mul_base_add(params: &CurveParams, p: &Point, k: &U256) -> Result<Point> {
    let kg = params.mul_base(k)?;
    let sum = params.point_add(p, &kg)?;
    if matches!(sum, Point::Infinity) {
        return Err(Error::ArithmeticFailure);
    }
    Ok(sum)
}

/// `[k]G`, identical to `genPubkey`.
pub fn mul_base_g(params: &CurveParams, k: &U256) -> Result<Point> {
    if !params.is_private_key_legal(k) {
        return Err(Error::PrivateKeyIllegal);
    }
    params.mul_base(k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::SECP256K1;

    #[test]
    fn mul_base_g_matches_genpub() {
        let k = U256::from(7u32);
        let direct = mul_base_g(&SECP256K1, &k).unwrap();
        let via_ecdsa = crate::ecdsa::genpub(&SECP256K1, &k).unwrap();
        assert_eq!(direct, via_ecdsa);
    }

    #[test]
    fn point_mul_base_add_composes() {
        let k1 = U256::from(3u32);
        let k2 = U256::from(5u32);
        let p = SECP256K1.mul_base(&k1).unwrap();
        let combined = point_mul_base_add(&SECP256K1, &p, &k2).unwrap();
        let expected = SECP256K1.mul_base(&k1.mod_add(&k2, &SECP256K1.n)).unwrap();
        assert_eq!(combined, expected);
    }

    #[test]
    fn point_mul_add_composes() {
        let k1 = U256::from(3u32);
        let k2 = U256::from(5u32);
        let g = SECP256K1.generator();
        let p = SECP256K1.mul_base(&k1).unwrap();
        let combined = point_mul_add(&SECP256K1, &p, &k2, &g).unwrap();
        let expected = SECP256K1.mul_base(&k1.mod_add(&k2, &SECP256K1.n)).unwrap();
        assert_eq!(combined, expected);
    }
}
