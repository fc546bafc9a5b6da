//! Montgomery modular arithmetic engine.
//!
//! This is the "separate world" described by the component design: the
//! internal representation (`Wide`, a signed multi-precision integer built
//! from 30-bit limbs) never escapes this module. Every public function
//! here is byte-in/byte-out — 32-byte big-endian operands and a 32-byte
//! big-endian result, padded with leading zeros whenever the true result
//! is narrower than 256 bits.
//!
//! The three entry points are:
//! - [`mod_mul`] — `(a * b) mod n`
//! - [`mod_exp`] — `(g ^ x) mod p`, fixed 5-bit window
//! - [`mod_inv`] — modular inverse via binary extended GCD (not Fermat)
//!
//! `mod_mul` and `mod_exp` require an odd modulus (a Montgomery precondition
//! satisfied by every prime/order this crate uses); `mod_inv` requires an
//! odd modulus by construction of the binary algorithm itself.

use crate::bigint::U256;
use crate::error::{Error, Result};

const LIMB_BITS: u32 = 30;
const LIMB_MASK: u64 = (1u64 << LIMB_BITS) - 1;
/// `ceil(256 / 30) = 9` limbs comfortably cover any 256-bit modulus with
/// headroom to spare (9 * 30 = 270 bits).
const K: usize = 9;

/// A 30-bit-limb, fixed-capacity multi-precision integer. Private to this
/// module: callers only ever see 32-byte big-endian buffers.
type Limbs = [u32; K];

fn bytes_to_limbs(bytes: &[u8; 32]) -> Limbs {
    let mut limbs = [0u32; K];
    let mut acc: u128 = 0;
    let mut acc_bits: u32 = 0;
    let mut limb_idx = 0;

    for &byte in bytes.iter().rev() {
        acc |= (byte as u128) << acc_bits;
        acc_bits += 8;
        while acc_bits >= LIMB_BITS && limb_idx < K {
            limbs[limb_idx] = (acc & LIMB_MASK as u128) as u32;
            acc >>= LIMB_BITS;
            acc_bits -= LIMB_BITS;
            limb_idx += 1;
        }
    }
    if limb_idx < K {
        limbs[limb_idx] = (acc & LIMB_MASK as u128) as u32;
    }
    limbs
}

fn limbs_to_bytes(limbs: &Limbs) -> [u8; 32] {
    let mut acc: u128 = 0;
    let mut acc_bits: u32 = 0;
    let mut le_bytes = Vec::with_capacity(36);

    for &limb in limbs.iter() {
        acc |= (limb as u128) << acc_bits;
        acc_bits += LIMB_BITS;
        while acc_bits >= 8 {
            le_bytes.push((acc & 0xFF) as u8);
            acc >>= 8;
            acc_bits -= 8;
        }
    }
    if acc_bits > 0 {
        le_bytes.push((acc & 0xFF) as u8);
    }

    // K * LIMB_BITS = 270 bits => exactly 34 little-endian bytes are
    // produced above regardless of value; the crate's invariant that every
    // Montgomery-domain value is reduced mod N < 2^256 guarantees the two
    // highest bytes are zero, so truncating to 32 is lossless.
    le_bytes.truncate(32);
    while le_bytes.len() < 32 {
        le_bytes.push(0);
    }
    le_bytes.reverse();

    let mut out = [0u8; 32];
    out.copy_from_slice(&le_bytes);
    out
}

fn limbs_is_zero(a: &Limbs) -> bool {
    a.iter().all(|&x| x == 0)
}

fn limbs_cmp(a: &Limbs, b: &Limbs) -> std::cmp::Ordering {
    for i in (0..K).rev() {
        if a[i] != b[i] {
            return a[i].cmp(&b[i]);
        }
    }
    std::cmp::Ordering::Equal
}

fn limbs_sub(a: &Limbs, b: &Limbs) -> Limbs {
    let mut out = [0u32; K];
    let mut borrow = 0i64;
    for i in 0..K {
        let diff = a[i] as i64 - b[i] as i64 - borrow;
        if diff < 0 {
            out[i] = (diff + (1i64 << LIMB_BITS)) as u32;
            borrow = 1;
        } else {
            out[i] = diff as u32;
            borrow = 0;
        }
    }
    out
}

/// Computes `rho = -n^{-1} mod 2^30` via Newton–Raphson iteration, seeded
/// from the low 3 bits of `n` (sufficient because `n` is odd).
fn mont_inv_digit(n0: u32) -> u32 {
    // `n` is odd, so `n0` is odd and a 3-bit seed already satisfies
    // `n0 * seed == 1 (mod 8)`.
    let n0 = n0 as u64;
    let mut x = n0 & 7; // seed: x == n0^{-1} mod 8
    for _ in 0..4 {
        // Newton step doubles the number of correct bits each iteration;
        // four iterations take 3 bits to 48, comfortably covering 30.
        x = x.wrapping_mul(2u64.wrapping_sub(n0.wrapping_mul(x))) & ((1u64 << 32) - 1);
    }
    (0u64.wrapping_sub(x) & LIMB_MASK) as u32
}

/// Montgomery reduction: given a double-width product `t` (2K limbs) and
/// modulus `n`, returns `t * R^{-1} mod n` as K limbs.
fn redc(t: &mut [u32], n: &Limbs, n0prime: u32) -> Limbs {
    for i in 0..K {
        let m = ((t[i] as u64 * n0prime as u64) & LIMB_MASK) as u32;
        let mut carry = 0u64;
        for j in 0..K {
            let prod = t[i + j] as u64 + m as u64 * n[j] as u64 + carry;
            t[i + j] = (prod & LIMB_MASK) as u32;
            carry = prod >> LIMB_BITS;
        }
        let mut k = i + K;
        while carry != 0 {
            let s = t[k] as u64 + carry;
            t[k] = (s & LIMB_MASK) as u32;
            carry = s >> LIMB_BITS;
            k += 1;
        }
    }

    let mut result = [0u32; K];
    result.copy_from_slice(&t[K..2 * K]);

    if limbs_cmp(&result, n) != std::cmp::Ordering::Less {
        result = limbs_sub(&result, n);
    }
    result
}

fn limbs_mul_redc(a: &Limbs, b: &Limbs, n: &Limbs, n0prime: u32) -> Limbs {
    let mut t = [0u32; 2 * K + 1];
    for i in 0..K {
        if a[i] == 0 {
            continue;
        }
        let mut carry = 0u64;
        for j in 0..K {
            let prod = t[i + j] as u64 + a[i] as u64 * b[j] as u64 + carry;
            t[i + j] = (prod & LIMB_MASK) as u32;
            carry = prod >> LIMB_BITS;
        }
        let mut k = i + K;
        while carry != 0 {
            let s = t[k] as u64 + carry;
            t[k] = (s & LIMB_MASK) as u32;
            carry = s >> LIMB_BITS;
            k += 1;
        }
    }
    redc(&mut t, n, n0prime)
}

/// `R^2 mod n`, computed by doubling `1` `2 * K * LIMB_BITS` times with a
/// conditional subtraction — avoids needing a division primitive.
fn compute_r2(n: &Limbs) -> Limbs {
    let mut val = [0u32; K];
    val[0] = 1;
    for _ in 0..(2 * K * LIMB_BITS as usize) {
        let mut carry = 0u32;
        for limb in val.iter_mut() {
            let doubled = (*limb << 1) | carry;
            carry = doubled >> LIMB_BITS;
            *limb = doubled & (LIMB_MASK as u32);
        }
        if carry != 0 || limbs_cmp(&val, n) != std::cmp::Ordering::Less {
            val = limbs_sub(&val, n);
        }
    }
    val
}

struct MontCtx {
    n: Limbs,
    n0prime: u32,
    r2: Limbs,
    one: Limbs,
}

fn setup(modulus: &[u8; 32]) -> Result<MontCtx> {
    let n = bytes_to_limbs(modulus);
    if limbs_is_zero(&n) || n[0] & 1 == 0 {
        return Err(Error::ArithmeticFailure);
    }
    let n0prime = mont_inv_digit(n[0]);
    let r2 = compute_r2(&n);
    let mut one = [0u32; K];
    one[0] = 1;
    Ok(MontCtx {
        n,
        n0prime,
        r2,
        one,
    })
}

impl MontCtx {
    fn to_mont(&self, a: &Limbs) -> Limbs {
        limbs_mul_redc(a, &self.r2, &self.n, self.n0prime)
    }

    fn from_mont(&self, a: &Limbs) -> Limbs {
        limbs_mul_redc(a, &self.one, &self.n, self.n0prime)
    }

    fn mul(&self, a: &Limbs, b: &Limbs) -> Limbs {
        limbs_mul_redc(a, b, &self.n, self.n0prime)
    }
}

/// `(a * b) mod n`.
pub fn mod_mul(a: &[u8; 32], b: &[u8; 32], n: &[u8; 32]) -> Result<[u8; 32]> {
    let ctx = setup(n)?;
    let a_limbs = bytes_to_limbs(a);
    let b_limbs = bytes_to_limbs(b);

    let a_mont = ctx.to_mont(&a_limbs);
    let b_mont = ctx.to_mont(&b_limbs);
    let prod_mont = ctx.mul(&a_mont, &b_mont);
    let result = ctx.from_mont(&prod_mont);

    Ok(limbs_to_bytes(&result))
}

/// `g^x mod p`, using a fixed 5-bit left-to-right window with a
/// precomputed table of `g^1 .. g^31` in Montgomery form.
pub fn mod_exp(g: &[u8; 32], x: &[u8; 32], p: &[u8; 32]) -> Result<[u8; 32]> {
    const WINSIZE: u32 = 5;
    let ctx = setup(p)?;

    let g_limbs = bytes_to_limbs(g);
    let g_mont = ctx.to_mont(&g_limbs);

    let mut table: Vec<Limbs> = Vec::with_capacity((1 << WINSIZE) - 1);
    table.push(g_mont);
    for i in 1..(1usize << WINSIZE) - 1 {
        let next = ctx.mul(&table[i - 1], &g_mont);
        table.push(next);
    }

    let exponent = U256::from_be_bytes(*x);
    let total_bits = 256u32;
    let first_width = total_bits % WINSIZE;
    let first_width = if first_width == 0 { WINSIZE } else { first_width };

    let window_bits = |hi: i32, width: u32| -> u32 {
        let mut v = 0u32;
        for k in 0..width {
            let idx = hi - k as i32;
            v <<= 1;
            if idx >= 0 {
                v |= exponent.bit(idx as u32) as u32;
            }
        }
        v
    };

    let mut hi: i32 = total_bits as i32 - 1;
    let w = window_bits(hi, first_width);
    let mut acc = if w == 0 {
        ctx.one
    } else {
        table[(w - 1) as usize]
    };
    hi -= first_width as i32;

    while hi >= 0 {
        for _ in 0..WINSIZE {
            acc = ctx.mul(&acc, &acc);
        }
        let w = window_bits(hi, WINSIZE);
        if w != 0 {
            acc = ctx.mul(&acc, &table[(w - 1) as usize]);
        }
        hi -= WINSIZE as i32;
    }

    let result = ctx.from_mont(&acc);
    Ok(limbs_to_bytes(&result))
}

/// 320-bit signed magnitude integer used only to hold the Bézout
/// coefficient `B`/`D` during [`mod_inv`]'s binary extended GCD — these can
/// transiently exceed 256 bits by a handful of bits before being folded
/// back into `[0, n)`.
#[derive(Clone, Copy)]
struct Signed320 {
    neg: bool,
    limbs: [u64; 5],
}

impl Signed320 {
    fn from_u256(v: &U256) -> Self {
        let bytes = v.to_be_bytes();
        let mut limbs = [0u64; 5];
        for i in 0..4 {
            let chunk = &bytes[32 - 8 * (i + 1)..32 - 8 * i];
            limbs[i] = u64::from_be_bytes(chunk.try_into().unwrap());
        }
        Signed320 { neg: false, limbs }
    }

    fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&x| x == 0)
    }

    fn is_even(&self) -> bool {
        self.limbs[0] & 1 == 0
    }

    fn shr1(&mut self) {
        let mut carry = 0u64;
        for limb in self.limbs.iter_mut().rev() {
            let new_carry = *limb & 1;
            *limb = (*limb >> 1) | (carry << 63);
            carry = new_carry;
        }
    }

    fn mag_cmp(a: &[u64; 5], b: &[u64; 5]) -> std::cmp::Ordering {
        for i in (0..5).rev() {
            if a[i] != b[i] {
                return a[i].cmp(&b[i]);
            }
        }
        std::cmp::Ordering::Equal
    }

    fn mag_add(a: &[u64; 5], b: &[u64; 5]) -> [u64; 5] {
        let mut out = [0u64; 5];
        let mut carry = 0u128;
        for i in 0..5 {
            let sum = a[i] as u128 + b[i] as u128 + carry;
            out[i] = sum as u64;
            carry = sum >> 64;
        }
        out
    }

    fn mag_sub(a: &[u64; 5], b: &[u64; 5]) -> [u64; 5] {
        // requires a >= b
        let mut out = [0u64; 5];
        let mut borrow = 0i128;
        for i in 0..5 {
            let diff = a[i] as i128 - b[i] as i128 - borrow;
            if diff < 0 {
                out[i] = (diff + (1i128 << 64)) as u64;
                borrow = 1;
            } else {
                out[i] = diff as u64;
                borrow = 0;
            }
        }
        out
    }

    /// `self + other`, both interpreted with sign.
    fn add(&self, other: &Signed320) -> Signed320 {
        if self.neg == other.neg {
            Signed320 {
                neg: self.neg,
                limbs: Self::mag_add(&self.limbs, &other.limbs),
            }
        } else if Self::mag_cmp(&self.limbs, &other.limbs) != std::cmp::Ordering::Less {
            Signed320 {
                neg: self.neg,
                limbs: Self::mag_sub(&self.limbs, &other.limbs),
            }
        } else {
            Signed320 {
                neg: other.neg,
                limbs: Self::mag_sub(&other.limbs, &self.limbs),
            }
        }
    }

    fn sub(&self, other: &Signed320) -> Signed320 {
        let negated = Signed320 {
            neg: !other.neg && !other.is_zero(),
            limbs: other.limbs,
        };
        self.add(&negated)
    }

    /// Adds `n` (always nonnegative) to `self`, keeping the sign coherent.
    fn add_u256(&self, n: &U256) -> Signed320 {
        self.add(&Signed320::from_u256(n))
    }

    /// Reduces into `[0, n)`, assuming `|self| <= n`.
    fn reduce(&self, n: &U256) -> U256 {
        let n_wide = Signed320::from_u256(n);
        let mut v = *self;
        if v.neg {
            v = v.add(&n_wide);
        }
        if Self::mag_cmp(&v.limbs, &n_wide.limbs) != std::cmp::Ordering::Less {
            v = Signed320 {
                neg: false,
                limbs: Self::mag_sub(&v.limbs, &n_wide.limbs),
            };
        }
        let mut bytes = [0u8; 32];
        for i in 0..4 {
            bytes[32 - 8 * (i + 1)..32 - 8 * i].copy_from_slice(&v.limbs[i].to_be_bytes());
        }
        U256::from_be_bytes(bytes)
    }
}

/// Modular inverse via the binary extended Euclidean algorithm (not
/// Fermat). `n` must be odd; fails if `a` shares a factor with `n`.
pub fn mod_inv(a: &[u8; 32], n: &[u8; 32]) -> Result<[u8; 32]> {
    let n = U256::from_be_bytes(*n);
    if n.is_zero() || !n.bit(0) {
        return Err(Error::ArithmeticFailure);
    }
    let x = U256::from_be_bytes(*a).modulo(&n);
    if x.is_zero() {
        return Err(Error::ArithmeticFailure);
    }

    let mut u = n;
    let mut v = x;
    let mut b = Signed320 {
        neg: false,
        limbs: [0; 5],
    };
    let mut d = Signed320 {
        neg: false,
        limbs: [1, 0, 0, 0, 0],
    };

    while !u.is_zero() {
        while !u.bit(0) {
            u.shr1();
            if b.is_even() {
                b.shr1();
            } else {
                b = b.add_u256(&n);
                b.shr1();
            }
        }
        while !v.bit(0) {
            v.shr1();
            if d.is_even() {
                d.shr1();
            } else {
                d = d.add_u256(&n);
                d.shr1();
            }
        }
        if u.cmp_bytes(&v) != std::cmp::Ordering::Less {
            u = u.sub(&v).0;
            b = b.sub(&d);
        } else {
            v = v.sub(&u).0;
            d = d.sub(&b);
        }
    }

    if v != U256::ONE {
        return Err(Error::ArithmeticFailure);
    }

    Ok(d.reduce(&n).to_be_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn be(v: u64) -> [u8; 32] {
        U256::from(v).to_be_bytes()
    }

    #[test]
    fn mod_mul_small() {
        // 7 * 6 mod 13 = 42 mod 13 = 3
        let r = mod_mul(&be(7), &be(6), &be(13)).unwrap();
        assert_eq!(r, be(3));
    }

    #[test]
    fn mod_exp_small() {
        // 3^5 mod 7 = 243 mod 7 = 5
        let r = mod_exp(&be(3), &be(5), &be(7)).unwrap();
        assert_eq!(r, be(5));
    }

    #[test]
    fn mod_inv_small() {
        // 3 * inv = 1 mod 11 -> inv = 4
        let r = mod_inv(&be(3), &be(11)).unwrap();
        assert_eq!(r, be(4));
        let check = mod_mul(&r, &be(3), &be(11)).unwrap();
        assert_eq!(check, be(1));
    }

    #[test]
    fn mod_inv_no_inverse_fails() {
        // gcd(4, 8) != 1
        assert!(mod_inv(&be(4), &be(8)).is_err());
    }

    #[test]
    fn mod_inv_over_secp256k1_prime() {
        let p: [u8; 32] = [
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
            0xFF, 0xFF, 0xFC, 0x2F,
        ];
        let a = be(12345);
        let inv = mod_inv(&a, &p).unwrap();
        let check = mod_mul(&a, &inv, &p).unwrap();
        assert_eq!(check, be(1));
    }

    #[test]
    fn mod_exp_over_secp256k1_prime_matches_square() {
        let p: [u8; 32] = [
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
            0xFF, 0xFF, 0xFC, 0x2F,
        ];
        let g = be(5);
        let squared = mod_exp(&g, &be(2), &p).unwrap();
        let direct = mod_mul(&g, &g, &p).unwrap();
        assert_eq!(squared, direct);
    }
}
