//! Short-Weierstrass curve kernel: affine point model, curve parameter
//! tables, and the legality/encoding helpers shared by ECDSA and SM2.
//!
//! `Point` is modeled as a sum type rather than an affine triple with an
//! "infinity" flag, per the design note this crate follows: it eliminates
//! the reachable-but-undefined state of an infinity point with meaningful
//! coordinates.

pub mod params;

pub use params::{CurveParams, SECP256K1, SECP256R1, SM2_STANDARD};

use crate::bigint::U256;
use crate::error::{Error, Result};
use crate::montgomery;

/// An affine point on a short-Weierstrass curve, or the identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Point {
    Infinity,
    Finite { x: U256, y: U256 },
}

/// A fixed-width ECDSA/SM2-style signature: `r ‖ s`, 32 bytes each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

impl Signature {
    pub fn from_parts(r: &U256, s: &U256) -> Self {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&r.to_be_bytes());
        out[32..].copy_from_slice(&s.to_be_bytes());
        Signature(out)
    }

    pub fn r(&self) -> U256 {
        U256::from_be_bytes(self.0[..32].try_into().unwrap())
    }

    pub fn s(&self) -> U256 {
        U256::from_be_bytes(self.0[32..].try_into().unwrap())
    }
}

fn mmul(a: &U256, b: &U256, m: &U256) -> Result<U256> {
    montgomery::mod_mul(&a.to_be_bytes(), &b.to_be_bytes(), &m.to_be_bytes())
        .map(U256::from_be_bytes)
        .map_err(|_| Error::ArithmeticFailure)
}

fn minv(a: &U256, m: &U256) -> Result<U256> {
    montgomery::mod_inv(&a.to_be_bytes(), &m.to_be_bytes())
        .map(U256::from_be_bytes)
        .map_err(|_| Error::ArithmeticFailure)
}

impl CurveParams {
    /// `1 <= d < n`.
    pub fn is_private_key_legal(&self, d: &U256) -> bool {
        !d.is_zero() && d.cmp_bytes(&self.n) == std::cmp::Ordering::Less
    }

    /// On-curve, coordinates in range, and in the prime-order subgroup.
    pub fn is_public_key_legal(&self, p: &Point) -> bool {
        let (x, y) = match p {
            Point::Infinity => return false,
            Point::Finite { x, y } => (x, y),
        };
        if x.cmp_bytes(&self.p) != std::cmp::Ordering::Less
            || y.cmp_bytes(&self.p) != std::cmp::Ordering::Less
        {
            return false;
        }
        if !self.satisfies_equation(x, y) {
            return false;
        }
        matches!(self.point_mul(p, &self.n), Ok(Point::Infinity))
    }

    fn satisfies_equation(&self, x: &U256, y: &U256) -> bool {
        let lhs = match mmul(y, y, &self.p) {
            Ok(v) => v,
            Err(_) => return false,
        };
        let x2 = match mmul(x, x, &self.p) {
            Ok(v) => v,
            Err(_) => return false,
        };
        let x3 = match mmul(&x2, x, &self.p) {
            Ok(v) => v,
            Err(_) => return false,
        };
        let ax = match mmul(&self.a, x, &self.p) {
            Ok(v) => v,
            Err(_) => return false,
        };
        let rhs = x3.mod_add(&ax, &self.p).mod_add(&self.b, &self.p);
        lhs == rhs
    }

    /// Affine point addition, including the doubling and inverse-point
    /// degenerate cases.
    pub fn point_add(&self, p: &Point, q: &Point) -> Result<Point> {
        let (px, py) = match p {
            Point::Infinity => return Ok(*q),
            Point::Finite { x, y } => (x, y),
        };
        let (qx, qy) = match q {
            Point::Infinity => return Ok(*p),
            Point::Finite { x, y } => (x, y),
        };

        let lambda = if px != qx {
            let num = qy.mod_sub(py, &self.p);
            let den = qx.mod_sub(px, &self.p);
            let den_inv = minv(&den, &self.p)?;
            mmul(&num, &den_inv, &self.p)?
        } else {
            if py.mod_add(qy, &self.p).is_zero() {
                return Ok(Point::Infinity);
            }
            let x2 = mmul(px, px, &self.p)?;
            let three_x2 = x2.mod_add(&x2, &self.p).mod_add(&x2, &self.p);
            let num = three_x2.mod_add(&self.a, &self.p);
            let two_y = py.mod_add(py, &self.p);
            let den_inv = minv(&two_y, &self.p)?;
            mmul(&num, &den_inv, &self.p)?
        };

        let lambda2 = mmul(&lambda, &lambda, &self.p)?;
        let x_r = lambda2.mod_sub(px, &self.p).mod_sub(qx, &self.p);
        let x_diff = px.mod_sub(&x_r, &self.p);
        let y_r = mmul(&lambda, &x_diff, &self.p)?.mod_sub(py, &self.p);

        Ok(Point::Finite { x: x_r, y: y_r })
    }

    /// `R = [k]P` via binary left-to-right double-and-add. Not
    /// constant-time in `k`; see the crate's top-level documentation.
    pub fn point_mul(&self, p: &Point, k: &U256) -> Result<Point> {
        let mut acc = Point::Infinity;
        let bit_len = k.bit_len();
        for i in (0..bit_len).rev() {
            acc = self.point_add(&acc, &acc)?;
            if k.bit(i) {
                acc = self.point_add(&acc, p)?;
            }
        }
        Ok(acc)
    }

    /// `[k]G`.
    pub fn mul_base(&self, k: &U256) -> Result<Point> {
        self.point_mul(&self.generator(), k)
    }

    pub fn generator(&self) -> Point {
        Point::Finite {
            x: self.gx,
            y: self.gy,
        }
    }

    /// Accepts a 64-byte `x‖y` or 65-byte `04‖x‖y` buffer and emits the
    /// 33-byte `02/03 ‖ x` compressed form.
    pub fn point_compress(&self, encoded: &[u8]) -> Result<[u8; 33]> {
        let (x_bytes, y_bytes) = match encoded.len() {
            64 => (&encoded[0..32], &encoded[32..64]),
            65 if encoded[0] == 0x04 => (&encoded[1..33], &encoded[33..65]),
            _ => return Err(Error::MalformedInput),
        };
        let y = U256::from_be_bytes(y_bytes.try_into().unwrap());
        let mut out = [0u8; 33];
        out[0] = if y.bit(0) { 0x03 } else { 0x02 };
        out[1..].copy_from_slice(x_bytes);
        Ok(out)
    }

    /// Reconstructs `04‖x‖y` from a 33-byte compressed point via field
    /// square-root. Only the `p ≡ 3 mod 4` and `p ≡ 5 mod 8` branches are
    /// implemented, matching the three Weierstrass curves this crate
    /// supports (all fall in the easy, `3 mod 4`, branch in practice).
    pub fn point_decompress(&self, compressed: &[u8; 33]) -> Result<[u8; 65]> {
        let prefix = compressed[0];
        if prefix != 0x02 && prefix != 0x03 {
            return Err(Error::MalformedInput);
        }
        let x = U256::from_be_bytes(compressed[1..33].try_into().unwrap());
        if x.cmp_bytes(&self.p) != std::cmp::Ordering::Less {
            return Err(Error::MalformedInput);
        }

        let x2 = mmul(&x, &x, &self.p)?;
        let x3 = mmul(&x2, &x, &self.p)?;
        let ax = mmul(&self.a, &x, &self.p)?;
        let t = x3.mod_add(&ax, &self.p).mod_add(&self.b, &self.p);

        let y = self.sqrt_mod_p(&t)?;

        let wants_odd = prefix == 0x03;
        let y_is_odd = y.bit(0);
        let y = if wants_odd == y_is_odd {
            y
        } else {
            self.p.mod_sub(&y, &self.p)
        };

        let mut out = [0u8; 65];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&x.to_be_bytes());
        out[33..65].copy_from_slice(&y.to_be_bytes());
        Ok(out)
    }

    fn sqrt_mod_p(&self, t: &U256) -> Result<U256> {
        let residue = mod_small(&self.p, 8);
        if residue == 3 || residue == 7 {
            // p ≡ 3 (mod 4): y = t^((p+1)/4) mod p
            let (p_plus_1, _) = self.p.add(&U256::ONE);
            let exp = p_plus_1.shr1_copy().shr1_copy();
            let y = montgomery::mod_exp(&t.to_be_bytes(), &exp.to_be_bytes(), &self.p.to_be_bytes())
                .map(U256::from_be_bytes)
                .map_err(|_| Error::ArithmeticFailure)?;
            let check = mmul(&y, &y, &self.p)?;
            if check == t.modulo_ref(&self.p) {
                Ok(y)
            } else {
                Err(Error::PublicKeyIllegal)
            }
        } else if residue == 5 {
            // p ≡ 5 (mod 8): Atkin's algorithm.
            let (p_plus_3_div_8, _) = self.p.add(&U256::from(3u32));
            let exp = p_plus_3_div_8.shr1_copy().shr1_copy().shr1_copy();
            let u = montgomery::mod_exp(&t.to_be_bytes(), &exp.to_be_bytes(), &self.p.to_be_bytes())
                .map(U256::from_be_bytes)
                .map_err(|_| Error::ArithmeticFailure)?;
            let u2 = mmul(&u, &u, &self.p)?;
            if u2 == *t {
                Ok(u)
            } else if u2 == self.p.mod_sub(t, &self.p) {
                let two_t = t.mod_add(t, &self.p);
                let four_t = two_t.mod_add(&two_t, &self.p);
                let (p_minus_5, _) = self.p.sub(&U256::from(5u32));
                let exp2 = p_minus_5.shr1_copy().shr1_copy().shr1_copy();
                let four_t_pow = montgomery::mod_exp(
                    &four_t.to_be_bytes(),
                    &exp2.to_be_bytes(),
                    &self.p.to_be_bytes(),
                )
                .map(U256::from_be_bytes)
                .map_err(|_| Error::ArithmeticFailure)?;
                Ok(mmul(&two_t, &four_t_pow, &self.p)?)
            } else {
                Err(Error::PublicKeyIllegal)
            }
        } else {
            // p ≡ 1 (mod 8): unsupported branch, no supported curve hits it.
            Err(Error::WrongCurveType)
        }
    }
}

fn mod_small(v: &U256, m: u32) -> u32 {
    let mut acc = 0u32;
    for &byte in v.to_be_bytes().iter() {
        acc = (acc * 256 + byte as u32) % m;
    }
    acc
}

impl U256 {
    fn shr1_copy(&self) -> U256 {
        let mut v = *self;
        v.shr1();
        v
    }

    fn modulo_ref(&self, m: &U256) -> U256 {
        self.modulo(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use params::SECP256K1;

    #[test]
    fn generator_satisfies_curve_equation() {
        let g = SECP256K1.generator();
        assert!(SECP256K1.is_public_key_legal(&g));
    }

    #[test]
    fn point_add_identity() {
        let g = SECP256K1.generator();
        let sum = SECP256K1.point_add(&g, &Point::Infinity).unwrap();
        assert_eq!(sum, g);
    }

    #[test]
    fn point_add_negation_is_infinity() {
        let g = SECP256K1.generator();
        let neg = match g {
            Point::Finite { x, y } => Point::Finite {
                x,
                y: SECP256K1.p.mod_sub(&y, &SECP256K1.p),
            },
            Point::Infinity => unreachable!(),
        };
        let sum = SECP256K1.point_add(&g, &neg).unwrap();
        assert_eq!(sum, Point::Infinity);
    }

    #[test]
    fn scalar_mul_by_order_is_infinity() {
        let g = SECP256K1.generator();
        let result = SECP256K1.point_mul(&g, &SECP256K1.n).unwrap();
        assert_eq!(result, Point::Infinity);
    }

    #[test]
    fn scalar_mul_linearity() {
        let g = SECP256K1.generator();
        let k1 = U256::from(7u32);
        let k2 = U256::from(11u32);
        let lhs1 = SECP256K1.point_mul(&g, &k1).unwrap();
        let lhs2 = SECP256K1.point_mul(&g, &k2).unwrap();
        let lhs = SECP256K1.point_add(&lhs1, &lhs2).unwrap();

        let k_sum = k1.mod_add(&k2, &SECP256K1.n);
        let rhs = SECP256K1.point_mul(&g, &k_sum).unwrap();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn compress_decompress_roundtrip() {
        let g = SECP256K1.generator();
        let (gx, gy) = match g {
            Point::Finite { x, y } => (x, y),
            Point::Infinity => unreachable!(),
        };
        let mut encoded = [0u8; 64];
        encoded[..32].copy_from_slice(&gx.to_be_bytes());
        encoded[32..].copy_from_slice(&gy.to_be_bytes());

        let compressed = SECP256K1.point_compress(&encoded).unwrap();
        let decompressed = SECP256K1.point_decompress(&compressed).unwrap();
        assert_eq!(&decompressed[1..33], &gx.to_be_bytes()[..]);
        assert_eq!(&decompressed[33..65], &gy.to_be_bytes()[..]);
    }

    #[test]
    fn private_key_legality_bounds() {
        assert!(!SECP256K1.is_private_key_legal(&U256::ZERO));
        assert!(SECP256K1.is_private_key_legal(&U256::ONE));
        assert!(!SECP256K1.is_private_key_legal(&SECP256K1.n));
    }
}
